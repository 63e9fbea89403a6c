/*! The search drivers behind each invocation form.

Every driver compiles nothing itself: it receives the compiled pattern,
builds one [`Searcher`] and feeds it lines in file order. Lines travel
as byte strings end to end, so non-UTF-8 input matches and prints
byte-exactly. All drivers return whether any line matched, which the
caller maps onto the exit code.
*/

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bstr::io::BufReadExt;
use xgrep::{Pattern, Searcher};
use yansi::Color::Red;
use yansi::Paint;

use crate::walk::Walker;

/// Matches a single line read from stdin. Prints nothing, the verdict
/// is the exit code.
pub fn search_stdin(pattern: &Pattern) -> anyhow::Result<bool> {
    let mut searcher = Searcher::new(pattern);
    let mut line = Vec::new();
    io::stdin()
        .lock()
        .read_until(b'\n', &mut line)
        .context("can not read stdin")?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(searcher.matches(&line))
}

/// Searches the given files, printing every matching line. With more
/// than one file each line is prefixed by the file it came from.
/// Unreadable files are reported and skipped.
pub fn search_files(
    pattern: &Pattern,
    paths: &[PathBuf],
) -> anyhow::Result<bool> {
    let mut searcher = Searcher::new(pattern);
    let with_prefix = paths.len() > 1;
    let mut any_matched = false;
    for path in paths {
        match search_file(&mut searcher, path, with_prefix) {
            Ok(matched) => any_matched |= matched,
            Err(err) => report_error(&err),
        }
    }
    Ok(any_matched)
}

/// Searches every regular file under the given directories, printing
/// `PATH:LINE` for each matching line.
pub fn search_recursive(
    pattern: &Pattern,
    paths: &[PathBuf],
) -> anyhow::Result<bool> {
    let mut searcher = Searcher::new(pattern);
    let mut any_matched = false;
    for path in paths {
        Walker::path(path).walk(
            |file_path| {
                match search_file(&mut searcher, file_path, true) {
                    Ok(matched) => any_matched |= matched,
                    Err(err) => report_error(&err),
                }
                Ok(())
            },
            |err| {
                report_error(&err);
                Ok(())
            },
        )?;
    }
    Ok(any_matched)
}

/// Searches one file line by line, printing matches as they are found.
fn search_file(
    searcher: &mut Searcher,
    path: &Path,
    with_prefix: bool,
) -> anyhow::Result<bool> {
    let file = File::open(path)
        .with_context(|| format!("can not open `{}`", path.display()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut matched = false;
    for line in BufReader::new(file).byte_lines() {
        let line = line
            .with_context(|| format!("can not read `{}`", path.display()))?;
        if searcher.matches(&line) {
            matched = true;
            if with_prefix {
                write!(out, "{}:", path.display())?;
            }
            out.write_all(&line)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(matched)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("{} {}", "error:".paint(Red).bold(), err);
}
