//! Which optional rules a match plays with.
//!
//! A ruleset can be written as TOML:
//!
//! ```toml
//! castling = true
//! en_passant = true
//! king_safety = false
//! default_promotion = "queen"
//! ```
//!
//! Missing keys fall back to the standard rules.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MatchError, Result};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    pub castling: bool,
    pub en_passant: bool,
    /// Reject moves that leave the mover's king attacked, and end the game
    /// on checkmate or stalemate. When off, the game ends when a king is taken.
    pub king_safety: bool,
    /// Kind a pawn becomes on the last rank when the caller does not choose.
    pub default_promotion: PieceKind,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            castling: true,
            en_passant: true,
            king_safety: true,
            default_promotion: PieceKind::Queen,
        }
    }
}

impl Ruleset {
    pub fn validate(&self) -> Result<()> {
        if !self.default_promotion.is_promotion_target() {
            return Err(MatchError::InvalidRuleset(format!(
                "default_promotion cannot be {:?}",
                self.default_promotion
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let rules: Ruleset = toml::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load a ruleset from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod ruleset_tests;
