use thiserror::Error;

/// An error occurred while compiling a pattern.
///
/// Carries the kind of problem and the byte offset where it was found.
/// Offsets inside a recursively compiled group or alternation side are
/// relative to that scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct CompileError {
    kind: CompileErrorKind,
    position: usize,
}

impl CompileError {
    pub(crate) fn new(kind: CompileErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// The kind of problem found in the pattern.
    #[inline]
    pub fn kind(&self) -> &CompileErrorKind {
        &self.kind
    }

    /// Byte offset in the pattern where the problem was found.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// The ways a pattern can be malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileErrorKind {
    /// A `(` with no matching `)`.
    #[error("unterminated group")]
    UnterminatedGroup,

    /// A `[` with no matching `]`.
    #[error("unterminated character group")]
    UnterminatedCharGroup,

    /// A group or alternation side with nothing inside.
    #[error("empty subpattern")]
    EmptySubpattern,

    /// A `[]` or `[^]` with no bytes in the set.
    #[error("empty character group")]
    EmptyCharGroup,

    /// A backreference to a group that has not been declared yet.
    #[error("backreference `\\{ordinal}` refers to an undeclared group")]
    BackrefOutOfRange {
        /// The ordinal the backreference asked for.
        ordinal: usize,
    },
}
