use bitvec::prelude::*;

use crate::encoder::EncodedWord;
use crate::operand::{decode_field, fits};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// `0x`-prefixed uppercase hex of a '0'/'1' string, at least 8 digits.
///
/// Words of any width are accepted; leading zero nibbles beyond the
/// eighth digit are dropped.
pub fn fmt_hex(bits: &str) -> String {
    let pad = (4 - bits.len() % 4) % 4;
    let mut bv: BitVec<u8, Msb0> = BitVec::with_capacity(bits.len() + pad);
    bv.resize(pad, false);
    bv.extend(bits.chars().map(|c| c == '1'));

    let digits: String = bv
        .chunks(4)
        .map(|nib| HEX_DIGITS[nib.load_be::<u8>() as usize] as char)
        .collect();
    let digits = digits.trim_start_matches('0');
    format!("0x{digits:0>8}")
}

/// One diagnostic line: word, optional hex column, then the untouched source text.
pub fn fmt_record(word: &str, source_line: &str, with_hex: bool) -> String {
    if with_hex {
        format!("{}\t{}\t{}", word, fmt_hex(word), source_line)
    } else {
        format!("{}\t{}", word, source_line)
    }
}

/// Human-readable field split, e.g. `000000|0000001|0000010 (add 1 2)`.
pub fn fmt_fields(word: &EncodedWord) -> String {
    let pad = word.bits.len().saturating_sub(
        word.opcode.len() + word.fields.iter().map(String::len).sum::<usize>(),
    );
    let mut s = String::new();
    if pad > 0 {
        s.push_str(&"0".repeat(pad));
        s.push('|');
    }
    s.push_str(&word.opcode);
    for f in &word.fields {
        s.push('|');
        s.push_str(f);
    }
    s
}

/// Field breakdown followed by the value each field decodes to.
///
/// Fields whose magnitude spilled into the sign bit, or past `field_width`,
/// decode to something else and are shown as `?`.
pub fn fmt_explain(word: &EncodedWord, field_width: usize) -> String {
    let values: Vec<String> = word
        .fields
        .iter()
        .zip(&word.values)
        .map(|(f, &v)| match decode_field(f) {
            Some(d) if fits(v, field_width) && f.len() == field_width => d.to_string(),
            _ => "?".to_string(),
        })
        .collect();
    format!("{}  [{}]", fmt_fields(word), values.join(", "))
}
