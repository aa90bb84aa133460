//! faxc-drv — driver for the semantic analysis core.
//!
//! This workspace stops short of a full compiler: there is no lexer or
//! parser here, only the typing core (`faxc-sem`) and the AST it
//! consumes (`faxc-ast`). The driver's job is correspondingly small: pick
//! one of the embedded fixtures, run [`faxc_sem::type_module`] over it,
//! and render either the `TypedModule` it produced or the diagnostics
//! raised along the way.

pub mod fixtures;

use std::fmt::Write as _;

use faxc_sem::{SemaError, TypedModule};
use faxc_util::diagnostic::{Diagnostic, Handler};
use faxc_util::{FileId, Span};

/// What the `check` subcommand should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitType {
    /// One line per raised diagnostic.
    Diagnostics,
    /// One line per typed definition: its path and member count.
    Summary,
}

impl Default for EmitType {
    fn default() -> Self {
        EmitType::Diagnostics
    }
}

/// Parsed command-line configuration for the `faxc` binary's `check`
/// subcommand.
#[derive(Debug, Clone)]
pub struct Config {
    pub fixture: String,
    pub emit: EmitType,
}

impl Config {
    /// Parses `--fixture <name>` and `--emit=diagnostics|summary` out of
    /// an argument list (already stripped of `argv[0]`).
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut fixture = None;
        let mut emit = EmitType::Diagnostics;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if let Some(name) = arg.strip_prefix("--fixture=") {
                fixture = Some(name.to_string());
            } else if arg == "--fixture" {
                fixture = Some(
                    iter.next()
                        .ok_or_else(|| anyhow::anyhow!("--fixture requires a value"))?,
                );
            } else if let Some(value) = arg.strip_prefix("--emit=") {
                emit = parse_emit(value)?;
            } else {
                anyhow::bail!("unrecognized argument `{arg}`");
            }
        }

        Ok(Config {
            fixture: fixture.ok_or_else(|| {
                anyhow::anyhow!(
                    "missing --fixture <name>; known fixtures: {}",
                    fixtures::FIXTURE_NAMES.join(", ")
                )
            })?,
            emit,
        })
    }
}

fn parse_emit(value: &str) -> anyhow::Result<EmitType> {
    match value {
        "diagnostics" => Ok(EmitType::Diagnostics),
        "summary" => Ok(EmitType::Summary),
        other => anyhow::bail!("unknown --emit value `{other}` (want diagnostics or summary)"),
    }
}

/// One invocation of the driver: a fixture module, the typed result it
/// produced, and the `Handler` any `SemaError`s were rendered through.
pub struct CheckOutcome {
    pub typed: TypedModule,
    pub errors: Vec<SemaError>,
    pub handler: Handler,
}

/// Runs the semantic core over `module`, collecting any `SemaError`s into
/// a `Handler` as rendered diagnostics.
pub fn check_module(module: &faxc_ast::Module) -> CheckOutcome {
    let (typed, _table, errors) = faxc_sem::type_module(module);
    let handler = Handler::new();
    for err in &errors {
        handler.emit_diagnostic(sema_error_to_diagnostic(err));
    }
    CheckOutcome {
        typed,
        errors,
        handler,
    }
}

/// Converts a `SemaError`'s `faxc_ast::Position` into a `faxc_util::Span`
/// (no byte offsets are available without a lexer, so only the file id
/// and the start line/column survive the conversion) and wraps it as an
/// error-level `Diagnostic`.
fn sema_error_to_diagnostic(err: &SemaError) -> Diagnostic {
    let span = Span::with_file(
        0,
        0,
        FileId::new(err.pos.file.0),
        err.pos.min.line,
        err.pos.min.col,
    );
    Diagnostic::error(err.kind.to_string(), span)
}

/// Runs the `check` subcommand end to end and writes its rendered output
/// to `out`.
pub fn run_check(config: &Config, out: &mut impl std::fmt::Write) -> anyhow::Result<()> {
    let module = fixtures::by_name(&config.fixture).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown fixture `{}`; known fixtures: {}",
            config.fixture,
            fixtures::FIXTURE_NAMES.join(", ")
        )
    })?;

    let outcome = check_module(&module);

    match config.emit {
        EmitType::Diagnostics => {
            if outcome.errors.is_empty() {
                writeln!(out, "{}: no errors", config.fixture)?;
            }
            for diag in outcome.handler.diagnostics() {
                writeln!(out, "error: {}", diag.message)?;
            }
        }
        EmitType::Summary => {
            for def in &outcome.typed.defs {
                writeln!(out, "{}: {} member(s)", def.path, def.members.len())?;
            }
            if !outcome.errors.is_empty() {
                writeln!(out, "({} definition(s) failed to type)", outcome.errors.len())?;
            }
        }
    }

    Ok(())
}

/// Entry point called by `main.rs`.
pub fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_args(args)?;
    let mut out = String::new();
    run_check(&config, &mut out)?;
    print!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_fixture_types_with_no_errors() {
        let module = fixtures::by_name("base").unwrap();
        let outcome = check_module(&module);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.typed.defs.len(), 2);
    }

    #[test]
    fn bad_super_fixture_reports_no_matching_constructor() {
        let module = fixtures::by_name("bad-super").unwrap();
        let outcome = check_module(&module);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.handler.has_errors());
    }

    #[test]
    fn bad_assign_fixture_reports_cannot_assign() {
        let module = fixtures::by_name("bad-assign").unwrap();
        let outcome = check_module(&module);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0].kind,
            faxc_sem::SemaErrorKind::CannotAssign
        ));
    }

    #[test]
    fn bad_return_fixture_reports_no_return() {
        let module = fixtures::by_name("bad-return").unwrap();
        let outcome = check_module(&module);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0].kind,
            faxc_sem::SemaErrorKind::NoReturn
        ));
    }

    #[test]
    fn bad_void_var_fixture_reports_void_var() {
        let module = fixtures::by_name("bad-void-var").unwrap();
        let outcome = check_module(&module);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0].kind,
            faxc_sem::SemaErrorKind::VoidVar
        ));
    }

    #[test]
    fn from_args_rejects_missing_fixture() {
        let result = Config::from_args(vec!["--emit=summary".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn from_args_parses_fixture_and_emit() {
        let config = Config::from_args(vec![
            "--fixture".to_string(),
            "vararg".to_string(),
            "--emit=summary".to_string(),
        ])
        .unwrap();
        assert_eq!(config.fixture, "vararg");
        assert_eq!(config.emit, EmitType::Summary);
    }

    #[test]
    fn run_check_summary_lists_every_typed_definition() {
        let config = Config {
            fixture: "base".to_string(),
            emit: EmitType::Summary,
        };
        let mut out = String::new();
        run_check(&config, &mut out).unwrap();
        assert!(out.contains("Base"));
        assert!(out.contains("Main"));
    }

    #[test]
    fn run_check_unknown_fixture_errors() {
        let config = Config {
            fixture: "nonexistent".to_string(),
            emit: EmitType::Diagnostics,
        };
        let mut out = String::new();
        assert!(run_check(&config, &mut out).is_err());
    }
}
