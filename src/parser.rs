/// One source line split into its mnemonic and operand tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub mnemonic: &'a str,
    pub operands: Vec<&'a str>,
}

impl Instruction<'_> {
    /// Blank and comment-only lines parse to an empty mnemonic.
    pub fn is_empty(&self) -> bool {
        self.mnemonic.is_empty()
    }
}

/// Strip everything from `comment` on, trim, and split on single spaces.
///
/// Runs of spaces are not collapsed: `"add  1"` yields an empty operand token.
pub fn parse_line<'a>(raw: &'a str, comment: &str) -> Instruction<'a> {
    let code = match raw.find(comment) {
        Some(p) if !comment.is_empty() => &raw[..p],
        _ => raw,
    };
    let code = code.trim();
    if code.is_empty() {
        return Instruction { mnemonic: "", operands: Vec::new() };
    }
    let mut parts = code.split(' ');
    let mnemonic = parts.next().unwrap_or_default();
    Instruction { mnemonic, operands: parts.collect() }
}
