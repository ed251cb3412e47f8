//! Known Program Addresses
//!
//! Constants for the Solana programs a token lookup has to recognise:
//! the Metaplex token metadata program and both token programs.

use solana_sdk::{pubkey, pubkey::Pubkey};

/// Metaplex Token Metadata program (owner of metadata PDAs)
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// SPL Token program
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// SPL Token 2022 (extension-capable token program)
pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

/// Native SOL mint (wrapped SOL)
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Token program that owns a mint account
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenProgram {
    /// Standard SPL Token program
    Spl,
    /// Token-2022 program with extensions
    Token2022,
    /// Anything else - decoded with the shared mint layout anyway
    Unknown,
}

impl TokenProgram {
    /// Classify a mint by its owning program
    pub fn from_owner(owner: &Pubkey) -> Self {
        if *owner == TOKEN_PROGRAM_ID {
            TokenProgram::Spl
        } else if *owner == TOKEN_2022_PROGRAM_ID {
            TokenProgram::Token2022
        } else {
            TokenProgram::Unknown
        }
    }

    pub fn is_token22(&self) -> bool {
        matches!(self, TokenProgram::Token2022)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_program_ids_render_base58() {
        assert_eq!(
            METADATA_PROGRAM_ID.to_string(),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
        assert_eq!(
            TOKEN_PROGRAM_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            TOKEN_2022_PROGRAM_ID.to_string(),
            "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"
        );
    }

    #[test]
    fn test_token_program_from_owner() {
        assert_eq!(TokenProgram::from_owner(&TOKEN_PROGRAM_ID), TokenProgram::Spl);
        assert_eq!(
            TokenProgram::from_owner(&TOKEN_2022_PROGRAM_ID),
            TokenProgram::Token2022
        );

        let system = Pubkey::from_str("11111111111111111111111111111111").unwrap();
        assert_eq!(TokenProgram::from_owner(&system), TokenProgram::Unknown);
    }

    #[test]
    fn test_only_token_2022_is_token22() {
        assert!(TokenProgram::Token2022.is_token22());
        assert!(!TokenProgram::Spl.is_token22());
        assert!(!TokenProgram::Unknown.is_token22());
    }
}
