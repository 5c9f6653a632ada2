pub mod config;
pub mod encoder;
pub mod error;
pub mod listing;
pub mod opcode;
pub mod operand;
pub mod parser;
pub mod session;

pub use config::{AsmConfig, Strictness, Verbosity};
pub use encoder::EncodedWord;
pub use error::AsmError;
pub use opcode::OpcodeTable;
pub use session::{assemble_file, assemble_str, Emitter, FileEmitter, Session, Summary, VecEmitter};
