use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("instruction table line {line}: {reason}")]
    TableLoad { line: usize, reason: String },
    #[error("cannot read instruction table {path:?}: {source}")]
    TableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: bad operand {token:?} (expected an integer or reg(offset))")]
    OperandFormat { line: usize, token: String },
    #[error("line {line}: unknown mnemonic {mnemonic:?}")]
    UnknownMnemonic { line: usize, mnemonic: String },
    #[error("line {line}: encoded word is {bits} bits wide, limit is {limit}")]
    WordOverflow { line: usize, bits: usize, limit: usize },
    #[error("line {line}: operand {value} does not fit a {width}-bit sign-magnitude field")]
    FieldOverflow { line: usize, value: i128, width: usize },
    #[error("bad config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AsmError>;
