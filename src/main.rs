use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context as _, Result};
use clap::Parser;
use env_logger::Env;
use qjs_opcodes::{error, OpcodeTable, Query};

/// Print QuickJS opcode numbers, scraped from `quickjs-opcode.h`.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Opcode to look up: a number (`12`, `0x0c`, `0b1100`) or a prefixed
    /// name (`OP_push_i32`). With no argument, the whole table is printed.
    /// Put negative prefixed literals after `--`, e.g. `-- -0x1`.
    #[arg(allow_negative_numbers = true)]
    query: Option<String>,

    /// Header to scan for `DEF(...)` lines.
    #[arg(
        short = 'H',
        long,
        env = "QJS_OPCODE_HEADER",
        default_value = "./quickjs/quickjs-opcode.h"
    )]
    header: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_status(&e));
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(error::exit_status(&e))
        }
    }
}

/// `--help` and `--version` succeed. Real usage errors get the generic failure
/// status, never clap's own 2, which is reserved for a missing header.
fn usage_status(e: &clap::Error) -> u8 {
    if e.use_stderr() {
        error::EXIT_FAILURE
    } else {
        0
    }
}

fn run(args: &Args) -> Result<()> {
    let table = OpcodeTable::from_path(&args.header)?;
    let query = Query::new(args.query.as_deref());

    let mut stdout = io::stdout().lock();
    query
        .execute(&table, &mut stdout)
        .context("failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use test_case::test_case;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn negative_code_is_a_query() {
        let args = Args::try_parse_from(["qjs-opcodes", "-1"]).unwrap();
        assert_eq!(args.query.as_deref(), Some("-1"));
    }

    #[test]
    fn header_flag() {
        let args = Args::try_parse_from(["qjs-opcodes", "-H", "opcodes.h", "OP_nop"]).unwrap();
        assert_eq!(args.header, PathBuf::from("opcodes.h"));
        assert_eq!(args.query.as_deref(), Some("OP_nop"));
    }

    #[test_case(&["a", "b"]; "extra positional")]
    #[test_case(&["--bogus"]; "unknown flag")]
    #[test_case(&["-H"]; "header without value")]
    #[test_case(&["-H", "quickjs-opcode.h", "--bogus"]; "unknown flag after header")]
    fn usage_error_exits_with_1(argv: &[&str]) {
        let argv = std::iter::once("qjs-opcodes").chain(argv.iter().copied());
        let e = Args::try_parse_from(argv).unwrap_err();
        assert_eq!(usage_status(&e), error::EXIT_FAILURE);
        assert_ne!(usage_status(&e), error::EXIT_MISSING_SOURCE);
    }

    #[test_case("--help")]
    #[test_case("--version")]
    fn help_and_version_exit_with_0(flag: &str) {
        let e = Args::try_parse_from(["qjs-opcodes", flag]).unwrap_err();
        assert_eq!(usage_status(&e), 0);
    }

    #[test]
    fn missing_header_exits_with_2() {
        let args = Args {
            query: None,
            header: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/missing.h")),
        };
        let err = run(&args).unwrap_err();
        assert_eq!(error::exit_status(&err), 2);
        assert!(format!("{err:#}").starts_with("file not found: "));
        assert!(format!("{err:#}").contains("testdata/missing.h"));
    }
}
