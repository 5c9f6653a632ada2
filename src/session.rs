use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{AsmConfig, Strictness};
use crate::encoder::{encode_instruction, EncodedWord};
use crate::error::{AsmError, Result};
use crate::listing::fmt_record;
use crate::opcode::OpcodeTable;
use crate::operand::OperandError;
use crate::parser::parse_line;

/// Destination for encoded words and their diagnostic records.
pub trait Emitter {
    fn emit_word(&mut self, word: &EncodedWord) -> Result<()>;
    fn emit_record(&mut self, record: &str) -> Result<()>;
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes words to the primary output and records to the diagnostic dump.
pub struct FileEmitter {
    out: BufWriter<File>,
    diag: BufWriter<File>,
}

impl FileEmitter {
    pub fn create(output: &Path, diagnostics: &Path) -> Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(output)?),
            diag: BufWriter::new(File::create(diagnostics)?),
        })
    }
}

impl Emitter for FileEmitter {
    fn emit_word(&mut self, word: &EncodedWord) -> Result<()> {
        writeln!(self.out, "{}", word.bits)?;
        Ok(())
    }
    fn emit_record(&mut self, record: &str) -> Result<()> {
        writeln!(self.diag, "{record}")?;
        Ok(())
    }
    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        self.diag.flush()?;
        Ok(())
    }
}

/// Collects output in memory.
#[derive(Debug, Default, Clone)]
pub struct VecEmitter {
    pub words: Vec<String>,
    pub records: Vec<String>,
}

impl Emitter for VecEmitter {
    fn emit_word(&mut self, word: &EncodedWord) -> Result<()> {
        self.words.push(word.bits.clone());
        Ok(())
    }
    fn emit_record(&mut self, record: &str) -> Result<()> {
        self.records.push(record.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum State {
    Running,
    Stopped,
}

/// What one source line turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Word(EncodedWord),
    Skipped,
    Stopped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines_read: usize,
    pub words: usize,
    pub skipped: usize,
    pub fallbacks: usize,
    pub overflows: usize,
    pub stopped: bool,
}

/// One pass over a source program against a fixed table and config.
pub struct Session<'a> {
    table: &'a OpcodeTable,
    cfg: &'a AsmConfig,
    state: State,
    line: usize,
    summary: Summary,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a OpcodeTable, cfg: &'a AsmConfig) -> Self {
        Self { table, cfg, state: State::Running, line: 0, summary: Summary::default() }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Translate the next source line. Once stopped, every call returns `Step::Stopped`.
    pub fn step(&mut self, raw: &str) -> Result<Step> {
        if self.state == State::Stopped {
            return Ok(Step::Stopped);
        }
        self.line += 1;
        self.summary.lines_read += 1;
        let line = self.line;

        let inst = parse_line(raw, &self.cfg.comment_marker);
        if inst.mnemonic.contains(self.cfg.sentinel.as_str()) && !inst.is_empty() {
            debug!(line, mnemonic = inst.mnemonic, "sentinel reached");
            self.state = State::Stopped;
            self.summary.stopped = true;
            return Ok(Step::Stopped);
        }
        if inst.is_empty() {
            self.summary.skipped += 1;
            return Ok(Step::Skipped);
        }

        let (opcode, fallback) = self.table.lookup(inst.mnemonic, &self.cfg.fallback_opcode);
        if fallback {
            if self.cfg.strictness.contains(Strictness::UNKNOWN_MNEMONIC) {
                return Err(AsmError::UnknownMnemonic { line, mnemonic: inst.mnemonic.to_string() });
            }
            warn!(line, mnemonic = inst.mnemonic, "unknown mnemonic, using fallback opcode");
            self.summary.fallbacks += 1;
        }

        let word = encode_instruction(
            opcode,
            &inst.operands,
            self.cfg.field_width,
            self.cfg.word_width,
            self.cfg.strictness.contains(Strictness::FIELD_OVERFLOW),
        )
        .map_err(|e| match e {
            OperandError::Format(token) => AsmError::OperandFormat { line, token },
            OperandError::TooWide { value, width } => AsmError::FieldOverflow { line, value, width },
        })?;

        if word.overflows(self.cfg.word_width) {
            if self.cfg.strictness.contains(Strictness::WORD_OVERFLOW) {
                return Err(AsmError::WordOverflow { line, bits: word.len(), limit: self.cfg.word_width });
            }
            warn!(line, bits = word.len(), limit = self.cfg.word_width, "word wider than limit, not truncated");
            self.summary.overflows += 1;
        }

        debug!(line, word = %word.bits, "encoded");
        self.summary.words += 1;
        Ok(Step::Word(word))
    }

    /// Feed every line of `src` through [`Session::step`] until EOF or the sentinel.
    pub fn run<R: BufRead, E: Emitter>(&mut self, src: R, out: &mut E) -> Result<Summary> {
        let with_records = self.cfg.records_in_diagnostics();
        let with_hex = self.cfg.hex_in_diagnostics();
        for raw in src.lines() {
            let raw = raw?;
            match self.step(&raw)? {
                Step::Word(word) => {
                    out.emit_word(&word)?;
                    if with_records {
                        out.emit_record(&fmt_record(&word.bits, &raw, with_hex))?;
                    }
                }
                Step::Skipped => {}
                Step::Stopped => break,
            }
        }
        out.finish()?;
        info!(
            lines = self.summary.lines_read,
            words = self.summary.words,
            stopped = self.summary.stopped,
            "session finished"
        );
        Ok(self.summary.clone())
    }
}

/// Assemble `source` into `output`, writing the diagnostic dump to `cfg.diagnostic_path`.
pub fn assemble_file(table: &OpcodeTable, cfg: &AsmConfig, source: &Path, output: &Path) -> Result<Summary> {
    let src = std::io::BufReader::new(File::open(source)?);
    let mut out = FileEmitter::create(output, &cfg.diagnostic_path)?;
    Session::new(table, cfg).run(src, &mut out)
}

/// Assemble source text held in memory.
pub fn assemble_str(table: &OpcodeTable, cfg: &AsmConfig, source: &str) -> Result<VecEmitter> {
    let mut out = VecEmitter::default();
    Session::new(table, cfg).run(source.as_bytes(), &mut out)?;
    Ok(out)
}
