/*! The per-line search driver.

A [`Searcher`] borrows a compiled [`Pattern`] and owns the capture
store sized for it. For each line it slides the starting offset from 0
to the end of the line, resetting the store before every attempt, and
reports a hit as soon as one attempt succeeds.
*/

use log::trace;

use crate::matcher::captures::CaptureStore;
use crate::matcher::match_here;
use crate::pattern::Pattern;


/// Matches a compiled pattern against lines, one line at a time.
///
/// The compiled pattern can be shared; each searcher carries its own
/// mutable capture state, so concurrent match attempts need one
/// searcher each.
///
/// # Example
///
/// ```rust
/// let pattern = xgrep::compile(b"colou?r").unwrap();
/// let mut searcher = xgrep::Searcher::new(&pattern);
/// assert!(searcher.matches(b"my favorite color"));
/// assert!(searcher.matches(b"my favourite colour"));
/// assert!(!searcher.matches(b"my favourite colouur"));
/// ```
pub struct Searcher<'p> {
    pattern: &'p Pattern,
    store: CaptureStore,
}

impl<'p> Searcher<'p> {
    /// Creates a searcher for a compiled pattern.
    pub fn new(pattern: &'p Pattern) -> Self {
        Self {
            pattern,
            store: CaptureStore::new(pattern.group_count()),
        }
    }

    /// Returns true if the pattern matches anywhere in `line`.
    ///
    /// The line is a single line's bytes, without its terminator.
    pub fn matches(&mut self, line: &[u8]) -> bool {
        for start in 0..=line.len() {
            self.store.reset();
            if match_here(
                line,
                self.pattern.portions(),
                start,
                0,
                &mut self.store,
                None,
            )
            .is_some()
            {
                trace!("match at offset {start}");
                return true;
            }
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &CaptureStore {
        &self.store
    }
}
