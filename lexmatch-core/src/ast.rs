//! Abstract syntax tree for lex patterns
//!
//! A parsed pattern is a tree of [`Pattern`] nodes. The grammar is
//! deliberately small: literals, `.`, bracket expressions, concatenation,
//! quantifiers, case-insensitive scopes, named captures and the trailing
//! end anchor. There is no alternation node — alternation is expressed as
//! separate branches of the enclosing construct — and captures never nest.

use crate::classes::ClassSet;

/// A node in the pattern AST
///
/// Literals are stored as `u32` units: a Unicode scalar value for
/// char-addressed patterns, a value in `0..=255` for byte-addressed ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches the empty string
    Empty,

    /// A single literal unit
    Literal(u32),

    /// Any single unit, including newline
    Any,

    /// A bracket expression `[...]` or `[^...]`
    Class(ClassSet),

    /// Concatenation of subpatterns
    Concat(Vec<Pattern>),

    /// A quantified subpattern: `*`, `+`, `?`, `{n}`, `{n,}`, `{n,m}` and
    /// their non-greedy `?`-suffixed counterparts
    Repeat {
        /// The quantified subpattern
        inner: Box<Pattern>,
        /// Minimum repeat count
        min: u32,
        /// Maximum repeat count; `None` means unbounded
        max: Option<u32>,
        /// Greedy quantifiers prefer the loop edge, non-greedy the exit edge
        greedy: bool,
    },

    /// A `(?i:...)` scope; ASCII letters match case-insensitively inside
    CaseInsensitive(Box<Pattern>),

    /// A named capture, `atom as name`
    Capture {
        /// The capture name
        name: String,
        /// The captured subpattern
        inner: Box<Pattern>,
    },

    /// `$`: matches only at the end-of-input position
    EndAnchor,
}

impl Pattern {
    /// Build a concatenation, flattening nested concatenations and
    /// dropping empty items
    pub fn concat(items: Vec<Pattern>) -> Self {
        let mut flat = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Pattern::Concat(inner) => flat.extend(inner),
                Pattern::Empty => {}
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Pattern::Empty,
            1 => flat.into_iter().next().unwrap(),
            _ => Pattern::Concat(flat),
        }
    }

    /// Build a quantified pattern
    pub fn repeat(inner: Pattern, min: u32, max: Option<u32>, greedy: bool) -> Self {
        Pattern::Repeat {
            inner: Box::new(inner),
            min,
            max,
            greedy,
        }
    }

    /// Build a named capture
    pub fn capture(name: impl Into<String>, inner: Pattern) -> Self {
        Pattern::Capture {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Build a case-insensitive scope
    pub fn case_insensitive(inner: Pattern) -> Self {
        Pattern::CaseInsensitive(Box::new(inner))
    }

    /// Visit every capture name, outermost first, left to right
    pub fn for_each_capture<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Pattern::Capture { name, inner } => {
                f(name);
                inner.for_each_capture(f);
            }
            Pattern::Concat(items) => {
                for item in items {
                    item.for_each_capture(f);
                }
            }
            Pattern::Repeat { inner, .. } | Pattern::CaseInsensitive(inner) => {
                inner.for_each_capture(f)
            }
            _ => {}
        }
    }

    /// Collect all capture names in declaration order
    pub fn capture_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.for_each_capture(&mut |name| names.push(name));
        names
    }

    /// Whether any quantifier in the pattern is non-greedy
    pub fn has_non_greedy(&self) -> bool {
        match self {
            Pattern::Repeat { inner, greedy, .. } => !greedy || inner.has_non_greedy(),
            Pattern::Concat(items) => items.iter().any(Pattern::has_non_greedy),
            Pattern::CaseInsensitive(inner) | Pattern::Capture { inner, .. } => {
                inner.has_non_greedy()
            }
            _ => false,
        }
    }

    /// Whether the pattern contains an end anchor anywhere
    pub fn has_end_anchor(&self) -> bool {
        match self {
            Pattern::EndAnchor => true,
            Pattern::Concat(items) => items.iter().any(Pattern::has_end_anchor),
            Pattern::Repeat { inner, .. }
            | Pattern::CaseInsensitive(inner)
            | Pattern::Capture { inner, .. } => inner.has_end_anchor(),
            _ => false,
        }
    }
}
