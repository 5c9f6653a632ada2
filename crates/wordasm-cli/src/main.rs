use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wordasm::listing::fmt_explain;
use wordasm::{
    AsmConfig, EncodedWord, Emitter, FileEmitter, OpcodeTable, Session, Strictness, Verbosity,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a source program into fixed-width binary words"
)]
struct Cli {
    /// Source program (one instruction per line, `//` comments)
    #[arg(value_name = "SOURCE")]
    source_file: PathBuf,
    /// Output file, one binary word per line
    #[arg(value_name = "DEST")]
    destination_file: PathBuf,
    /// Maximum diagnostic verbosity: adds a hex column to the diagnostic dump
    #[arg(long)]
    debug: bool,
    /// Instruction list mapping mnemonics to opcode bits
    #[arg(long = "instruction_list_name", default_value = "instruction_list.txt")]
    instruction_list_name: PathBuf,
    /// JSON config file (command-line flags take precedence)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Bits per operand field
    #[arg(long)]
    field_width: Option<usize>,
    /// Fail on mnemonics missing from the instruction list
    #[arg(long)]
    strict_mnemonics: bool,
    /// Fail on words wider than the word width
    #[arg(long)]
    strict_width: bool,
    /// Fail on operands whose magnitude does not fit below the sign bit
    #[arg(long)]
    strict_fields: bool,
    /// Print each word split into its fields on stderr
    #[arg(long)]
    explain: bool,
    /// Print the session summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

impl Cli {
    fn config(&self) -> Result<AsmConfig> {
        let mut cfg = match &self.config {
            Some(path) => AsmConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AsmConfig::default(),
        };
        if self.debug {
            cfg.verbosity = Verbosity::Max;
        }
        if let Some(w) = self.field_width {
            cfg.field_width = w;
        }
        if self.strict_mnemonics {
            cfg.strictness |= Strictness::UNKNOWN_MNEMONIC;
        }
        if self.strict_width {
            cfg.strictness |= Strictness::WORD_OVERFLOW;
        }
        if self.strict_fields {
            cfg.strictness |= Strictness::FIELD_OVERFLOW;
        }
        Ok(cfg)
    }
}

/// Passes everything through and echoes a field breakdown of each word.
struct Explain<'e, E: Emitter> {
    inner: &'e mut E,
    field_width: usize,
}

impl<E: Emitter> Emitter for Explain<'_, E> {
    fn emit_word(&mut self, word: &EncodedWord) -> wordasm::error::Result<()> {
        eprintln!("{}", fmt_explain(word, self.field_width));
        self.inner.emit_word(word)
    }
    fn emit_record(&mut self, record: &str) -> wordasm::error::Result<()> {
        self.inner.emit_record(record)
    }
    fn finish(&mut self) -> wordasm::error::Result<()> {
        self.inner.finish()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.config()?;
    tracing::debug!(?cfg, "configuration");
    let table = OpcodeTable::load(&cli.instruction_list_name)?;

    let src = std::fs::File::open(&cli.source_file)
        .with_context(|| format!("opening {}", cli.source_file.display()))?;
    let mut out = FileEmitter::create(&cli.destination_file, &cfg.diagnostic_path)
        .with_context(|| format!("creating {}", cli.destination_file.display()))?;

    let mut session = Session::new(&table, &cfg);
    let reader = std::io::BufReader::new(src);
    let summary = if cli.explain {
        session.run(reader, &mut Explain { inner: &mut out, field_width: cfg.field_width })?
    } else {
        session.run(reader, &mut out)?
    };

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
