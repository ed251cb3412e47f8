//! Account addresses and program-derived address derivation
//!
//! Metaplex metadata lives at the PDA derived from
//! `["metadata", metadata_program_id, mint]` under the metadata program.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::known_programs::METADATA_PROGRAM_ID;

/// Literal first seed of every Metaplex metadata PDA
pub const METADATA_SEED: &[u8] = b"metadata";

/// Size of a Solana account address in bytes
pub const ADDRESS_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid account address '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("No off-curve bump seed found for program {program}")]
    DerivationExhausted { program: Pubkey },
}

/// Parse a base58 account address, requiring exactly 32 bytes
pub fn parse_address(input: &str) -> Result<Pubkey, AddressError> {
    let trimmed = input.trim();
    let bytes = bs58::decode(trimmed)
        .into_vec()
        .map_err(|e| AddressError::InvalidInput {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

    let bytes: [u8; ADDRESS_LEN] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidInput {
                input: input.to_string(),
                reason: format!("expected {} bytes, got {}", ADDRESS_LEN, bytes.len()),
            })?;

    Ok(Pubkey::new_from_array(bytes))
}

/// Derive a program address from an ordered seed list.
///
/// Returns the address together with its bump seed. Running out of bump
/// values is reported as an error rather than a panic.
pub fn derive_program_address(
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<(Pubkey, u8), AddressError> {
    Pubkey::try_find_program_address(seeds, program_id).ok_or(AddressError::DerivationExhausted {
        program: *program_id,
    })
}

/// Derive the Metaplex metadata account address for a mint
pub fn derive_metadata_address(mint: &Pubkey) -> Result<Pubkey, AddressError> {
    let (address, bump) = derive_program_address(
        &METADATA_PROGRAM_ID,
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
    )?;

    tracing::trace!(%mint, %address, bump, "derived metadata address");
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::known_programs::WSOL_MINT;

    const PUMP_MINT: &str = "6p6xgHyF7AeE6TZkSmFsko444wqoP15icUSqi2jfGiPN";
    const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    #[test]
    fn test_parse_address_valid() {
        let pubkey = parse_address(PUMP_MINT).unwrap();
        assert_eq!(pubkey.to_string(), PUMP_MINT);
    }

    #[test]
    fn test_parse_address_trims_whitespace() {
        let pubkey = parse_address("  EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v\n").unwrap();
        assert_eq!(pubkey.to_string(), USDC_MINT);
    }

    #[test]
    fn test_parse_address_rejects_non_base58() {
        // '0' and 'l' are outside the base58 alphabet
        let result = parse_address("0l0l0l");
        assert!(matches!(result, Err(AddressError::InvalidInput { .. })));
    }

    #[test]
    fn test_parse_address_rejects_wrong_length() {
        let short = bs58::encode([7u8; 16]).into_string();
        let err = parse_address(&short).unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes, got 16"));
    }

    #[test]
    fn test_parse_address_rejects_empty() {
        assert!(parse_address("").is_err());
    }

    #[test]
    fn test_metadata_address_golden_values() {
        let cases = [
            (PUMP_MINT, "H7efTb73LpehuDBaPqZ81Gc585PDf1bCbtQnVb8JpgB8"),
            (USDC_MINT, "5x38Kp4hvdomTCnCrAny4UtMUt5rQBdB6px2K1Ui45Wq"),
            (WSOL_MINT, "6dM4TqWyWJsbx7obrdLcviBkTafD5E8av61zfU6jq57X"),
        ];

        for (mint, expected) in cases {
            let mint = parse_address(mint).unwrap();
            let derived = derive_metadata_address(&mint).unwrap();
            assert_eq!(derived.to_string(), expected, "metadata PDA for {}", mint);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let mint = Pubkey::new_unique();
        let first = derive_metadata_address(&mint).unwrap();
        let second = derive_metadata_address(&mint).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_derivation_differs_per_mint() {
        let a = derive_metadata_address(&Pubkey::new_unique()).unwrap();
        let b = derive_metadata_address(&Pubkey::new_unique()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_derivation_differs_per_program_seed() {
        let mint = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();

        let (standard, _) = derive_program_address(
            &METADATA_PROGRAM_ID,
            &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        )
        .unwrap();
        let (swapped, _) = derive_program_address(
            &METADATA_PROGRAM_ID,
            &[METADATA_SEED, other_program.as_ref(), mint.as_ref()],
        )
        .unwrap();

        assert_ne!(standard, swapped);
    }

    #[test]
    fn test_derived_address_is_off_curve() {
        let mint = parse_address(PUMP_MINT).unwrap();
        let derived = derive_metadata_address(&mint).unwrap();
        assert!(!derived.is_on_curve());
    }
}
