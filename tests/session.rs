use pretty_assertions::assert_eq;

use wordasm::session::{State, Step};
use wordasm::{assemble_str, AsmConfig, AsmError, OpcodeTable, Session, Strictness, Verbosity};

fn table() -> OpcodeTable {
    OpcodeTable::parse("add rd rs rt\t000000\nsub rd rs rt\t000001\nld rd off(rs)\t0101\n").unwrap()
}

#[test]
fn stop_halts_everything_after_it() {
    let src = "add 1 2\nstop\nsub 1 2\nthis is not even valid\n";
    let out = assemble_str(&table(), &AsmConfig::default(), src).unwrap();
    assert_eq!(out.words.len(), 1);
    assert_eq!(out.records.len(), 1);
}

#[test]
fn sentinel_matches_as_substring() {
    let src = "add 1 2\nprogstop_here\nsub 1 2\n";
    let out = assemble_str(&table(), &AsmConfig::default(), src).unwrap();
    assert_eq!(out.words.len(), 1);
}

#[test]
fn stopped_session_ignores_further_lines() {
    let t = table();
    let cfg = AsmConfig::default();
    let mut s = Session::new(&t, &cfg);
    assert!(matches!(s.step("add 1 2").unwrap(), Step::Word(_)));
    assert_eq!(s.step("stop").unwrap(), Step::Stopped);
    assert_eq!(s.state(), State::Stopped);
    assert_eq!(s.step("garbage x y").unwrap(), Step::Stopped);
    assert_eq!(s.summary().lines_read, 2);
    assert!(s.summary().stopped);
}

#[test]
fn blank_and_comment_lines_emit_nothing() {
    let src = "\n// header\n   \nadd 1 2 // sum\n";
    let out = assemble_str(&table(), &AsmConfig::default(), src).unwrap();
    assert_eq!(out.words.len(), 1);
    assert_eq!(out.records, vec![format!("{}\tadd 1 2 // sum", out.words[0])]);
}

#[test]
fn hex_column_only_at_max_verbosity() {
    let mut cfg = AsmConfig::default();
    cfg.verbosity = Verbosity::Max;
    let out = assemble_str(&table(), &cfg, "add 1 2\n").unwrap();
    assert_eq!(out.records, vec![format!("{}\t0x00000082\tadd 1 2", out.words[0])]);

    cfg.verbosity = Verbosity::Normal;
    let out = assemble_str(&table(), &cfg, "add 1 2\n").unwrap();
    assert_eq!(out.records, vec![format!("{}\tadd 1 2", out.words[0])]);
}

#[test]
fn bad_operand_aborts_with_line_number() {
    let src = "add 1 2\nsub 1 r2\nadd 3 4\n";
    match assemble_str(&table(), &AsmConfig::default(), src) {
        Err(AsmError::OperandFormat { line, token }) => {
            assert_eq!(line, 2);
            assert_eq!(token, "r2");
        }
        other => panic!("expected operand error, got {other:?}"),
    }
}

#[test]
fn double_space_is_an_operand_error() {
    let err = assemble_str(&table(), &AsmConfig::default(), "add  1 2\n").unwrap_err();
    assert!(matches!(err, AsmError::OperandFormat { line: 1, .. }));
}

#[test]
fn strict_mnemonics_rejects_unknown() {
    let mut cfg = AsmConfig::default();
    let out = assemble_str(&table(), &cfg, "mul 1 2\n").unwrap();
    assert_eq!(out.words.len(), 1);

    cfg.strictness = Strictness::UNKNOWN_MNEMONIC;
    let err = assemble_str(&table(), &cfg, "mul 1 2\n").unwrap_err();
    assert!(matches!(err, AsmError::UnknownMnemonic { line: 1, .. }));
}

#[test]
fn overflow_is_lenient_unless_strict() {
    let src = "add 1 2 3 4\n"; // 6 + 4*7 = 34 bits
    let mut cfg = AsmConfig::default();
    let t = table();
    let mut s = Session::new(&t, &cfg);
    match s.step(src.trim_end()).unwrap() {
        Step::Word(w) => assert_eq!(w.len(), 34),
        other => panic!("expected a word, got {other:?}"),
    }
    assert_eq!(s.summary().overflows, 1);

    cfg.strictness = Strictness::WORD_OVERFLOW;
    let err = assemble_str(&t, &cfg, src).unwrap_err();
    assert!(matches!(err, AsmError::WordOverflow { bits: 34, limit: 32, .. }));
}

#[test]
fn strict_fields_rejects_sign_bit_spill() {
    let mut cfg = AsmConfig::default();
    cfg.strictness = Strictness::FIELD_OVERFLOW;
    assert!(assemble_str(&table(), &cfg, "add 63 -63\n").is_ok());
    let err = assemble_str(&table(), &cfg, "add 64 1\n").unwrap_err();
    assert!(matches!(err, AsmError::FieldOverflow { value: 64, width: 7, .. }));
}

#[test]
fn quiet_verbosity_drops_records_but_keeps_words() {
    let mut cfg = AsmConfig::default();
    cfg.verbosity = Verbosity::Quiet;
    let out = assemble_str(&table(), &cfg, "add 1 2\nsub 3 4\n").unwrap();
    assert_eq!(out.words.len(), 2);
    assert!(out.records.is_empty());
}

#[test]
fn literal_wider_than_i64_is_encoded() {
    let out = assemble_str(&table(), &AsmConfig::default(), "add 9223372036854775808\n").unwrap();
    assert_eq!(out.words, vec![format!("000000{}", format!("1{}", "0".repeat(63)))]);
}

#[test]
fn later_table_entry_wins() {
    let t = OpcodeTable::parse("add\t0001\nadd\t0010\n").unwrap();
    assert_eq!(t.get("add"), Some("0010"));
    let out = assemble_str(&t, &AsmConfig::default(), "add 1\n").unwrap();
    assert_eq!(out.words, vec![format!("{:0>32}", "00100000001")]);
}

#[test]
fn summary_counts() {
    let t = table();
    let cfg = AsmConfig::default();
    let src = "add 1 2\n\nmul 3\nsub 1 1\nstop\nadd 9 9\n";
    let mut out = wordasm::VecEmitter::default();
    let summary = Session::new(&t, &cfg).run(src.as_bytes(), &mut out).unwrap();
    assert_eq!(summary.lines_read, 5);
    assert_eq!(summary.words, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.fallbacks, 1);
    assert!(summary.stopped);
}
