use std::path::{Path, PathBuf};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fallback opcode used for mnemonics missing from the instruction table.
pub const FALLBACK_OPCODE: &str = "00000000000";
pub const DIAGNOSTIC_PATH: &str = "debug.out";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub field_width: usize, // bits per operand field (register and offset each)
    pub word_width: usize,  // words are left-zero-padded to this many bits
    pub fallback_opcode: String,
    pub sentinel: String, // any mnemonic containing this ends the program
    pub comment_marker: String,
    pub verbosity: Verbosity,
    pub strictness: Strictness,
    pub diagnostic_path: PathBuf,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            field_width: 7,
            word_width: 32,
            fallback_opcode: FALLBACK_OPCODE.to_string(),
            sentinel: "stop".to_string(),
            comment_marker: "//".to_string(),
            verbosity: Verbosity::Normal,
            strictness: Strictness::empty(),
            diagnostic_path: PathBuf::from(DIAGNOSTIC_PATH),
        }
    }
}

impl AsmConfig {
    /// Parse a JSON config. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// `Quiet` leaves the diagnostic dump empty.
    pub fn records_in_diagnostics(&self) -> bool {
        self.verbosity > Verbosity::Quiet
    }

    /// The diagnostic dump carries a hex column only at maximum verbosity.
    pub fn hex_in_diagnostics(&self) -> bool {
        self.verbosity == Verbosity::Max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Max = 2,
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strictness: u8 {
const UNKNOWN_MNEMONIC = 1 << 0; // error instead of the fallback opcode
const WORD_OVERFLOW = 1 << 1;    // error when a word exceeds word_width
const FIELD_OVERFLOW = 1 << 2;   // error when a magnitude exceeds field_width - 1 bits
}
}
