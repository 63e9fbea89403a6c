mod search;
mod walk;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{arg, crate_version, value_parser, ArgMatches, Command};
use crossterm::tty::IsTty;
use yansi::Color::Red;
use yansi::Paint;

const APP_HELP_TEMPLATE: &str = r#"xgrep {version}, extended-regex line search.

{usage-heading}
  {usage}

{all-args}{after-help}
"#;

/// At least one line matched.
const EXIT_MATCH: i32 = 0;
/// No line matched.
const EXIT_NO_MATCH: i32 = 1;
/// Bad pattern, bad usage, or nothing readable; diagnostics on stderr.
const EXIT_ERROR: i32 = 1;

fn cli() -> Command {
    Command::new("xg")
        .version(crate_version!())
        .help_template(APP_HELP_TEMPLATE)
        .arg(
            arg!(-E <PATTERN> "Match lines against an extended regular expression")
        )
        .arg(
            arg!(-r --recursive "Search every regular file under the given directories")
        )
        .arg(
            arg!([PATH] ... "Files to search; directories with -r. Reads one line from stdin when absent")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::init();

    // If stdout is not a tty (for example, because it was redirected to
    // a file) turn off colors, so redirected output stays free of ANSI
    // escape codes.
    if !io::stdout().is_tty() {
        yansi::disable();
    }

    let args = match cli().try_get_matches() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    process::exit(EXIT_MATCH)
                }
                _ => process::exit(EXIT_ERROR),
            }
        }
    };

    match run(&args) {
        Ok(true) => process::exit(EXIT_MATCH),
        Ok(false) => process::exit(EXIT_NO_MATCH),
        Err(err) => {
            eprintln!("{} {}", "error:".paint(Red).bold(), err);
            process::exit(EXIT_ERROR);
        }
    }
}

/// Compiles the pattern and dispatches to the right search mode.
/// Returns whether any line matched.
fn run(args: &ArgMatches) -> anyhow::Result<bool> {
    let pattern = args.get_one::<String>("PATTERN").unwrap();
    let recursive = args.get_flag("recursive");
    let paths: Vec<PathBuf> = args
        .get_many::<PathBuf>("PATH")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();

    let pattern = xgrep::compile(pattern.as_bytes())?;

    if recursive {
        if paths.is_empty() {
            anyhow::bail!("-r requires at least one directory to search");
        }
        search::search_recursive(&pattern, &paths)
    } else if paths.is_empty() {
        search::search_stdin(&pattern)
    } else {
        search::search_files(&pattern, &paths)
    }
}
