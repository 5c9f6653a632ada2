use serde::Serialize;

use crate::operand::{Operand, OperandError};

/// A finished word plus the fields it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedWord {
    pub bits: String,
    pub opcode: String,
    pub fields: Vec<String>,
    pub values: Vec<i128>, // operand values, one per field
}

impl EncodedWord {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Wider than the requested word width; padding did not apply.
    pub fn overflows(&self, word_width: usize) -> bool {
        self.bits.len() > word_width
    }
}

/// Concatenate opcode and operand fields and left-zero-pad to `word_width`.
///
/// Longer concatenations come back untruncated.
pub fn assemble_word(opcode: &str, fields: &[String], word_width: usize) -> String {
    let mut raw = String::with_capacity(word_width.max(opcode.len()));
    raw.push_str(opcode);
    for f in fields {
        raw.push_str(f);
    }
    format!("{raw:0>word_width$}")
}

/// Encode every operand token at `field_width` and build the word.
pub fn encode_instruction(
    opcode: &str,
    operands: &[&str],
    field_width: usize,
    word_width: usize,
    strict_fields: bool,
) -> Result<EncodedWord, OperandError> {
    let mut fields = Vec::with_capacity(operands.len());
    let mut values = Vec::with_capacity(operands.len());
    for tok in operands {
        let op = Operand::parse(tok)?;
        values.extend(op.values());
        if strict_fields {
            fields.extend(op.encode_checked(field_width)?);
        } else {
            fields.extend(op.encode(field_width));
        }
    }
    let bits = assemble_word(opcode, &fields, word_width);
    Ok(EncodedWord { bits, opcode: opcode.to_string(), fields, values })
}
