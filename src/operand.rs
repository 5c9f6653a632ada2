//! Operand fields in sign-magnitude form.
//!
//! A field is `width` characters of '0'/'1': the magnitude of the value in
//! binary, left-zero-padded to `width`, with the most significant character
//! forced to `1` for negative values. This is not two's complement; `5` and
//! `-5` differ only in the top bit. Magnitudes wider than the field are kept
//! whole, so the field grows instead of being truncated.
//!
//! Values are `i128`; literals outside that range are format errors.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("not an integer or reg(offset): {0:?}")]
    Format(String),
    #[error("{value} needs more than {width} sign-magnitude bits")]
    TooWide { value: i128, width: usize },
}

/// The two operand shapes the instruction set knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Plain(i128),
    Indexed { register: i128, offset: i128 },
}

impl Operand {
    /// `R(O)` when the token has both parentheses, otherwise a bare integer.
    pub fn parse(token: &str) -> Result<Self, OperandError> {
        if token.contains('(') && token.contains(')') {
            let mut parts = token.split('(');
            let register = parts.next().unwrap_or_default();
            let offset = parts.next().unwrap_or_default().trim_end_matches(')');
            Ok(Operand::Indexed { register: parse_int(register)?, offset: parse_int(offset)? })
        } else {
            Ok(Operand::Plain(parse_int(token)?))
        }
    }

    pub fn values(&self) -> Vec<i128> {
        match *self {
            Operand::Plain(v) => vec![v],
            Operand::Indexed { register, offset } => vec![register, offset],
        }
    }

    /// One field for a plain value, register field then offset field for indexed.
    pub fn encode(&self, width: usize) -> Vec<String> {
        self.values().into_iter().map(|v| encode_field(v, width)).collect()
    }

    /// Like [`Operand::encode`] but rejects values whose magnitude spills into the sign bit.
    pub fn encode_checked(&self, width: usize) -> Result<Vec<String>, OperandError> {
        self.values()
            .into_iter()
            .map(|v| {
                if fits(v, width) {
                    Ok(encode_field(v, width))
                } else {
                    Err(OperandError::TooWide { value: v, width })
                }
            })
            .collect()
    }
}

fn parse_int(s: &str) -> Result<i128, OperandError> {
    s.trim().parse::<i128>().map_err(|_| OperandError::Format(s.to_string()))
}

/// Encode `value` as a `width`-wide sign-magnitude field.
pub fn encode_field(value: i128, width: usize) -> String {
    let magnitude = format!("{:b}", value.unsigned_abs());
    let mut field = format!("{magnitude:0>width$}");
    if value < 0 {
        field.replace_range(..1, "1");
    }
    field
}

/// Whether the magnitude of `value` fits below the sign bit of a `width` field.
pub fn fits(value: i128, width: usize) -> bool {
    let bits = (u128::BITS - value.unsigned_abs().leading_zeros()) as usize;
    width > 0 && bits < width
}

/// Invert [`encode_field`]: top bit is the sign, the rest the magnitude.
///
/// Only meaningful when the encoded value [`fits`] the field: a spilled
/// magnitude reads back as a different number.
///
/// Returns `None` for empty input, non-binary characters, or magnitudes that overflow `i128`.
pub fn decode_field(bits: &str) -> Option<i128> {
    let (sign, rest) = bits.split_at(bits.chars().next()?.len_utf8());
    if rest.starts_with('+') || rest.starts_with('-') {
        return None;
    }
    let magnitude = if rest.is_empty() { 0 } else { i128::from_str_radix(rest, 2).ok()? };
    match sign {
        "0" => Some(magnitude),
        "1" => Some(-magnitude),
        _ => None,
    }
}

/// Parse and encode a single token at `width`.
pub fn encode_token(token: &str, width: usize) -> Result<String, OperandError> {
    Ok(Operand::parse(token)?.encode(width).concat())
}
