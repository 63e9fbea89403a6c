/*! An extended-regex line search engine written from scratch.

The engine decides whether a text line contains a match of a pattern.
Patterns support anchors, character classes, character groups,
quantifiers, alternation, capturing groups and backreferences, over
bytes rather than characters.

There are two main entry points in this crate: [`compile`] and
[`Searcher`]. Compilation turns a pattern string into an immutable
[`Pattern`] that can be shared freely; a searcher borrows the compiled
pattern, owns the per-line capture state, and answers the question "does
this line match" one line at a time.

# Example

```rust
// Compile a pattern with a capturing group and a backreference.
let pattern = xgrep::compile(br"(\w+) and \1").unwrap();

// Create a searcher that uses the compiled pattern.
let mut searcher = xgrep::Searcher::new(&pattern);

assert!(searcher.matches(b"red and red"));
assert!(!searcher.matches(b"red and blue"));
```
*/

#![deny(missing_docs)]

pub use compiler::compile;
pub use compiler::CompileError;
pub use compiler::CompileErrorKind;

pub use matcher::captures::CaptureStore;

pub use pattern::ByteSet;
pub use pattern::Pattern;
pub use pattern::Portion;

pub use searcher::Searcher;

mod compiler;
mod matcher;
mod pattern;
mod searcher;
