use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{AsmError, Result};

/// Mnemonic to opcode bit pattern, loaded once from an instruction list.
///
/// Patterns are kept as '0'/'1' text of whatever length the list gives;
/// the table does not enforce a common opcode width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpcodeTable {
    entries: HashMap<String, String>,
}

impl OpcodeTable {
    /// Parse `<descriptor>\t<bit pattern>` lines.
    ///
    /// The mnemonic is the first space-separated token of the descriptor.
    /// Blank lines are skipped; any other line must contain exactly one tab.
    pub fn parse(definition: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (i, raw) in definition.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let (descriptor, pattern) = match (fields.next(), fields.next(), fields.next()) {
                (Some(d), Some(p), None) => (d, p),
                (_, None, _) => {
                    return Err(AsmError::TableLoad { line: i + 1, reason: "missing tab separator".into() })
                }
                _ => {
                    return Err(AsmError::TableLoad { line: i + 1, reason: "more than one tab separator".into() })
                }
            };
            let mnemonic = descriptor.split(' ').next().unwrap_or_default();
            entries.insert(mnemonic.to_string(), pattern.trim().to_string());
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| AsmError::TableIo { path: path.to_path_buf(), source })?;
        let table = Self::parse(&text)?;
        info!(path = %path.display(), entries = table.len(), "loaded instruction table");
        Ok(table)
    }

    pub fn get(&self, mnemonic: &str) -> Option<&str> {
        self.entries.get(mnemonic).map(String::as_str)
    }

    /// Mapped pattern, or `fallback` when the mnemonic is not in the table.
    /// The flag is set when the fallback was used.
    pub fn lookup<'a>(&'a self, mnemonic: &str, fallback: &'a str) -> (&'a str, bool) {
        match self.get(mnemonic) {
            Some(pattern) => (pattern, false),
            None => (fallback, true),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OpcodeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
