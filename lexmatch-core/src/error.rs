//! Error types for the lexmatch engine
//!
//! All errors are static: they are raised once when a branch set is
//! compiled, never during matching. A failed match is not an error — it is
//! an ordinary outcome handled by the catch-all branch (or reported as
//! `MatchOutcome::NoMatch` when the caller supplied none).

use thiserror::Error;

/// The main error type, raised by [`compile`](crate::compile)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The regex literal could not be parsed
    #[error("invalid regex syntax in branch {branch}: {source}")]
    InvalidRegexSyntax {
        /// Index of the branch whose pattern failed to parse
        branch: usize,
        /// The underlying parse error, with its offset in the literal
        source: ParseError,
    },

    /// A three-part (unanchored) form was used under the longest-match
    /// strategy, where "longest across all start positions" is undefined
    #[error("branch {branch}: three-part patterns are not allowed under the longest-match strategy")]
    ThreePartUnderLongest {
        /// Index of the offending branch
        branch: usize,
    },

    /// A non-greedy quantifier was used under the longest-match strategy,
    /// where greediness has no effect
    #[error("branch {branch}: non-greedy quantifiers are not allowed under the longest-match strategy")]
    NonGreedyUnderLongest {
        /// Index of the offending branch
        branch: usize,
    },

    /// The same capture name was bound twice within one branch
    #[error("branch {branch}: duplicate capture name '{name}'")]
    DuplicateCaptureName {
        /// Index of the offending branch
        branch: usize,
        /// The repeated name
        name: String,
    },

    /// A bounded quantifier with min > max, e.g. `{3,1}`
    #[error("branch {branch}: invalid quantifier range {{{min},{max}}} at offset {offset}")]
    InvalidQuantifierRange {
        /// Index of the offending branch
        branch: usize,
        /// Minimum repeat count
        min: u32,
        /// Maximum repeat count
        max: u32,
        /// Offset of the quantifier in the pattern source
        offset: usize,
    },

    /// A `\u` escape in a byte-addressed pattern
    #[error("branch {branch}: unicode escape at offset {offset} is not allowed for byte-addressed patterns")]
    ByteTargetUnicodeEscape {
        /// Index of the offending branch
        branch: usize,
        /// Offset of the escape in the pattern source
        offset: usize,
    },

    /// A catch-all branch that is not the final branch of the set
    #[error("branch {branch}: catch-all must be the last branch")]
    CatchAllNotLast {
        /// Index of the offending branch
        branch: usize,
    },
}

/// A parse error with its offset in the pattern source
///
/// The offset always points at the smallest offending subexpression.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    /// Byte offset in the pattern source where the error was detected
    pub offset: usize,
    /// The specific kind of parse error
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        ParseError { offset, kind }
    }
}

/// Specific kinds of parse errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Encountered a character that cannot start or continue a construct
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// Input ended in the middle of a construct
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    /// A regex literal without a closing `"`
    #[error("unterminated regex literal")]
    UnterminatedLiteral,

    /// A bracket expression without a closing `]`
    #[error("unterminated bracket expression")]
    UnterminatedClass,

    /// A `[:name:]` token naming no known POSIX class
    #[error("unknown POSIX class '[:{0}:]'")]
    UnknownPosixClass(String),

    /// A range `a-b` with start above end
    #[error("invalid range '{0}-{1}' in bracket expression")]
    InvalidClassRange(char, char),

    /// A quantifier with nothing to its left
    #[error("quantifier has no preceding atom")]
    DanglingQuantifier,

    /// An escape sequence the grammar does not define
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    /// `\u`/`\u{...}` in a byte-addressed pattern; lifted to
    /// [`CompileError::ByteTargetUnicodeEscape`]
    #[error("unicode escape in byte-addressed pattern")]
    UnicodeEscapeForBytes,

    /// `{n,m}` with n > m; lifted to
    /// [`CompileError::InvalidQuantifierRange`]
    #[error("quantifier range {{{min},{max}}} has min > max")]
    QuantifierRange {
        /// Minimum repeat count
        min: u32,
        /// Maximum repeat count
        max: u32,
    },

    /// `$` anywhere but the end of a bare or two-part pattern
    #[error("'$' is only allowed at the end of the pattern")]
    MisplacedAnchor,

    /// A `(?..:` modifier other than `(?i:`
    #[error("unsupported group modifier '(?{0}:'")]
    UnknownGroupModifier(String),

    /// An `as` capture inside another capture
    #[error("capture '{0}' is nested inside another capture")]
    NestedCapture(String),

    /// An unescaped `|`; branches are the engine's only alternation
    #[error("alternation is not supported; use separate branches")]
    AlternationUnsupported,

    /// An `as` suffix without a valid name after it
    #[error("expected a capture name after 'as'")]
    ExpectedCaptureName,

    /// A literal code point a byte-addressed pattern can never match
    #[error("literal '{0}' is out of range for a byte-addressed pattern")]
    LiteralOutOfByteRange(char),

    /// A `(` without a matching `)`
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
}

impl ParseError {
    /// Lift a parse error into a [`CompileError`], promoting the kinds the
    /// compile interface names directly
    pub(crate) fn into_compile_error(self, branch: usize) -> CompileError {
        match self.kind {
            ParseErrorKind::QuantifierRange { min, max } => CompileError::InvalidQuantifierRange {
                branch,
                min,
                max,
                offset: self.offset,
            },
            ParseErrorKind::UnicodeEscapeForBytes => CompileError::ByteTargetUnicodeEscape {
                branch,
                offset: self.offset,
            },
            _ => CompileError::InvalidRegexSyntax {
                branch,
                source: self,
            },
        }
    }
}

/// Result type alias for compilation
pub type Result<T> = std::result::Result<T, CompileError>;
