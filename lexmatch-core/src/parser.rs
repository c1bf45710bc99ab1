//! Parser for lex pattern sources
//!
//! A lex pattern source has two layers:
//!
//! - the outer *sequence* layer: whitespace-separated elements, each a
//!   double-quoted regex literal or a parenthesized sub-sequence, optionally
//!   suffixed with `as name` to capture it;
//! - the inner *regex* layer inside the quotes: literals, `.`, escapes,
//!   bracket expressions with ranges/negation/POSIX tokens, quantifiers,
//!   `(?i:...)` scopes and a trailing `$`.
//!
//! Grammar:
//!   pattern    := element*
//!   element    := piece ('as' name)?
//!   piece      := regex_literal | '(' pattern ')'
//!   regex      := term*
//!   term       := atom quantifier?
//!   atom       := literal | escape | '.' | bracket | group | '$'
//!   group      := '(' ('?i:')? regex ')'
//!   quantifier := ('*' | '+' | '?' | '{' n (',' m?)? '}') '?'?
//!   bracket    := '[' '^'? (range | char | posix)+ ']'
//!   posix      := '[:' name ':]'
//!
//! Both layers share one character cursor so every error carries its exact
//! byte offset in the source. POSIX tokens are recognized only inside
//! bracket expressions: a top-level `[:digit:]` is a bracket expression
//! over the plain characters `:`, `d`, `i`, `g`, `t`.

use crate::ast::Pattern;
use crate::classes::{posix_class, ClassSet};
use crate::error::{ParseError, ParseErrorKind};
use crate::input::TargetKind;

/// Characters that must be escaped to appear as literals inside a regex
/// literal
const SPECIAL: &str = "\\[](){}.*+?|^$";

/// Parse a lex pattern source into an AST
///
/// `allow_end_anchor` is false for three-part patterns, whose regex may
/// match at any scan position and therefore can never require end-of-input.
pub fn parse_pattern(
    src: &str,
    target: TargetKind,
    allow_end_anchor: bool,
) -> Result<Pattern, ParseError> {
    Parser::new(src, target, allow_end_anchor).parse()
}

/// Parser over a lex pattern source
pub struct Parser<'a> {
    src: &'a str,
    pos: usize,
    target: TargetKind,
    allow_end_anchor: bool,
    anchor_offsets: Vec<usize>,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given source
    pub fn new(src: &'a str, target: TargetKind, allow_end_anchor: bool) -> Self {
        Parser {
            src,
            pos: 0,
            target,
            allow_end_anchor,
            anchor_offsets: Vec::new(),
        }
    }

    /// Parse the entire source and return the AST
    pub fn parse(mut self) -> Result<Pattern, ParseError> {
        let (pattern, _) = self.parse_sequence(0)?;
        self.skip_ws();
        if let Some(c) = self.peek() {
            let kind = if c == ')' {
                ParseErrorKind::UnbalancedParen
            } else {
                ParseErrorKind::UnexpectedChar(c)
            };
            return Err(self.error_at(self.pos, kind));
        }
        if let Some(&first) = self.anchor_offsets.first() {
            if self.anchor_offsets.len() > 1 || !is_trailing_anchor(&pattern) {
                return Err(self.error_at(first, ParseErrorKind::MisplacedAnchor));
            }
        }
        Ok(pattern)
    }

    // ---- cursor helpers ----

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error_at(&self, offset: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(offset, kind)
    }

    fn end_error(&self) -> ParseError {
        self.error_at(self.pos, ParseErrorKind::UnexpectedEnd)
    }

    // ---- outer sequence layer ----

    /// parse_sequence returns the concatenated pattern and whether any
    /// element inside it is captured (used to reject nested captures)
    fn parse_sequence(&mut self, depth: usize) -> Result<(Pattern, bool), ParseError> {
        let mut items = Vec::new();
        let mut any_capture = false;

        loop {
            self.skip_ws();
            let (piece, piece_captures) = match self.peek() {
                None => break,
                Some(')') if depth > 0 => break,
                Some('"') => (self.parse_regex_literal()?, false),
                Some('(') => {
                    self.bump();
                    let inner = self.parse_sequence(depth + 1)?;
                    self.skip_ws();
                    if !self.eat(')') {
                        return Err(self.error_at(self.pos, ParseErrorKind::UnbalancedParen));
                    }
                    inner
                }
                Some(c) => return Err(self.error_at(self.pos, ParseErrorKind::UnexpectedChar(c))),
            };

            // optional `as name` suffix on the element
            let save = self.pos;
            self.skip_ws();
            if self.eat_keyword("as") {
                self.skip_ws();
                let name_offset = self.pos;
                let name = self.parse_name()?;
                if piece_captures {
                    return Err(self.error_at(name_offset, ParseErrorKind::NestedCapture(name)));
                }
                items.push(Pattern::capture(name, piece));
                any_capture = true;
            } else {
                self.pos = save;
                any_capture |= piece_captures;
                items.push(piece);
            }
        }

        Ok((Pattern::concat(items), any_capture))
    }

    /// Consume `as` only when it stands alone as a keyword
    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.src[self.pos..].starts_with(kw) {
            let after = self.src[self.pos + kw.len()..].chars().next();
            if !matches!(after, Some(c) if c.is_alphanumeric() || c == '_') {
                self.pos += kw.len();
                return true;
            }
        }
        false
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.bump();
            }
            _ => return Err(self.error_at(start, ParseErrorKind::ExpectedCaptureName)),
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    // ---- inner regex layer ----

    fn parse_regex_literal(&mut self) -> Result<Pattern, ParseError> {
        let open = self.pos;
        self.bump(); // consume '"'
        let pattern = self.parse_regex(open, false)?;
        if !self.eat('"') {
            return Err(self.error_at(open, ParseErrorKind::UnterminatedLiteral));
        }
        Ok(pattern)
    }

    /// Parse regex terms until the closing quote (`in_group` false) or the
    /// closing paren of a group (`in_group` true)
    fn parse_regex(&mut self, literal_open: usize, in_group: bool) -> Result<Pattern, ParseError> {
        let mut items: Vec<Pattern> = Vec::new();

        loop {
            let atom_offset = self.pos;
            let atom = match self.peek() {
                None => {
                    return Err(if in_group {
                        self.error_at(self.pos, ParseErrorKind::UnbalancedParen)
                    } else {
                        self.error_at(literal_open, ParseErrorKind::UnterminatedLiteral)
                    })
                }
                Some('"') => {
                    if in_group {
                        return Err(self.error_at(self.pos, ParseErrorKind::UnbalancedParen));
                    }
                    break;
                }
                Some(')') => {
                    if in_group {
                        break;
                    }
                    return Err(self.error_at(self.pos, ParseErrorKind::UnbalancedParen));
                }
                Some('(') => self.parse_group(literal_open)?,
                Some('[') => self.parse_bracket()?,
                Some('.') => {
                    self.bump();
                    Pattern::Any
                }
                Some('$') => {
                    self.bump();
                    if !self.allow_end_anchor {
                        return Err(self.error_at(atom_offset, ParseErrorKind::MisplacedAnchor));
                    }
                    self.anchor_offsets.push(atom_offset);
                    Pattern::EndAnchor
                }
                Some('|') => {
                    return Err(self.error_at(self.pos, ParseErrorKind::AlternationUnsupported))
                }
                Some('*' | '+' | '?' | '{') => {
                    return Err(self.error_at(self.pos, ParseErrorKind::DanglingQuantifier))
                }
                Some(c @ ('^' | '}' | ']')) => {
                    return Err(self.error_at(self.pos, ParseErrorKind::UnexpectedChar(c)))
                }
                Some('\\') => Pattern::Literal(self.parse_escape()?),
                Some(c) => {
                    self.bump();
                    Pattern::Literal(self.literal_unit(c, atom_offset)?)
                }
            };

            let atom = match self.parse_quantifier()? {
                Some((min, max, greedy)) => {
                    if atom.has_end_anchor() {
                        return Err(self.error_at(atom_offset, ParseErrorKind::MisplacedAnchor));
                    }
                    Pattern::repeat(atom, min, max, greedy)
                }
                None => atom,
            };
            items.push(atom);
        }

        Ok(Pattern::concat(items))
    }

    /// Parse `(...)` or `(?i:...)` inside a regex literal
    fn parse_group(&mut self, literal_open: usize) -> Result<Pattern, ParseError> {
        self.bump(); // consume '('
        let mut fold = false;

        if self.peek() == Some('?') {
            self.bump();
            let flags_offset = self.pos;
            let mut flags = String::new();
            while let Some(c) = self.peek() {
                if c == ':' || c == ')' || c == '"' {
                    break;
                }
                self.bump();
                flags.push(c);
            }
            if !self.eat(':') {
                return Err(self.error_at(self.pos, ParseErrorKind::UnexpectedEnd));
            }
            if flags != "i" {
                return Err(self.error_at(flags_offset, ParseErrorKind::UnknownGroupModifier(flags)));
            }
            fold = true;
        }

        let inner = self.parse_regex(literal_open, true)?;
        if !self.eat(')') {
            return Err(self.error_at(self.pos, ParseErrorKind::UnbalancedParen));
        }
        Ok(if fold {
            Pattern::case_insensitive(inner)
        } else {
            inner
        })
    }

    /// Parse a quantifier if one follows the current atom
    fn parse_quantifier(&mut self) -> Result<Option<(u32, Option<u32>, bool)>, ParseError> {
        let (min, max) = match self.peek() {
            Some('*') => {
                self.bump();
                (0, None)
            }
            Some('+') => {
                self.bump();
                (1, None)
            }
            Some('?') => {
                self.bump();
                (0, Some(1))
            }
            Some('{') => {
                let brace_offset = self.pos;
                self.bump();
                let min = self.parse_count()?;
                let max = if self.eat(',') {
                    if self.peek() == Some('}') {
                        None
                    } else {
                        Some(self.parse_count()?)
                    }
                } else {
                    Some(min)
                };
                if !self.eat('}') {
                    return Err(self.error_at(self.pos, ParseErrorKind::UnexpectedChar(
                        self.peek().unwrap_or('\0'),
                    )));
                }
                if let Some(max) = max {
                    if min > max {
                        return Err(
                            self.error_at(brace_offset, ParseErrorKind::QuantifierRange { min, max })
                        );
                    }
                }
                (min, max)
            }
            _ => return Ok(None),
        };

        let greedy = !self.eat('?');
        Ok(Some((min, max, greedy)))
    }

    fn parse_count(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        let mut value: u32 = 0;
        let mut any = false;
        while let Some(c) = self.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            self.bump();
            value = value.saturating_mul(10).saturating_add(digit);
            any = true;
        }
        if !any {
            return Err(self.error_at(
                start,
                match self.peek() {
                    Some(c) => ParseErrorKind::UnexpectedChar(c),
                    None => ParseErrorKind::UnexpectedEnd,
                },
            ));
        }
        Ok(value)
    }

    /// Parse `[...]`, including negation, ranges and POSIX class tokens
    fn parse_bracket(&mut self) -> Result<Pattern, ParseError> {
        let open = self.pos;
        self.bump(); // consume '['
        let negated = self.eat('^');
        let mut set = ClassSet::new();
        let mut any_item = false;

        loop {
            match self.peek() {
                None => return Err(self.error_at(open, ParseErrorKind::UnterminatedClass)),
                Some(']') => {
                    if !any_item {
                        return Err(self.error_at(self.pos, ParseErrorKind::UnexpectedChar(']')));
                    }
                    self.bump();
                    break;
                }
                Some('[') if self.peek_at(1) == Some(':') => {
                    self.parse_posix_token(&mut set)?;
                }
                Some(_) => {
                    let start_offset = self.pos;
                    let start = self.parse_class_unit(start_offset)?;
                    // `a-b` is a range unless the `-` is last before `]`
                    if self.peek() == Some('-') && self.peek_at(1) != Some(']') {
                        self.bump(); // consume '-'
                        if self.peek().is_none() {
                            return Err(self.error_at(open, ParseErrorKind::UnterminatedClass));
                        }
                        let end_offset = self.pos;
                        let end = self.parse_class_unit(end_offset)?;
                        if start > end {
                            return Err(self.error_at(
                                start_offset,
                                ParseErrorKind::InvalidClassRange(
                                    char::from_u32(start).unwrap_or('\u{FFFD}'),
                                    char::from_u32(end).unwrap_or('\u{FFFD}'),
                                ),
                            ));
                        }
                        set.push_range(start, end);
                    } else {
                        set.push_unit(start);
                    }
                }
            }
            any_item = true;
        }

        if negated {
            set.negate();
        }
        Ok(Pattern::Class(set))
    }

    /// Parse a `[:name:]` token; only reachable from inside a bracket
    fn parse_posix_token(&mut self, set: &mut ClassSet) -> Result<(), ParseError> {
        let token_offset = self.pos;
        self.bump(); // '['
        self.bump(); // ':'
        let name_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.bump();
        }
        let name = self.src[name_start..self.pos].to_string();
        if !(self.eat(':') && self.eat(']')) {
            return Err(self.error_at(token_offset, ParseErrorKind::UnknownPosixClass(name)));
        }
        match posix_class(&name) {
            Some(ranges) => {
                for &(lo, hi) in ranges {
                    set.push_range(lo, hi);
                }
                Ok(())
            }
            None => Err(self.error_at(token_offset, ParseErrorKind::UnknownPosixClass(name))),
        }
    }

    /// A single unit inside a bracket expression: a plain character or an
    /// escape
    fn parse_class_unit(&mut self, offset: usize) -> Result<u32, ParseError> {
        match self.peek() {
            Some('\\') => self.parse_escape(),
            Some(c) => {
                self.bump();
                self.literal_unit(c, offset)
            }
            None => Err(self.end_error()),
        }
    }

    /// Validate a literal character against the target kind
    fn literal_unit(&self, c: char, offset: usize) -> Result<u32, ParseError> {
        if self.target == TargetKind::Byte && c as u32 > 0xFF {
            return Err(self.error_at(offset, ParseErrorKind::LiteralOutOfByteRange(c)));
        }
        Ok(c as u32)
    }

    /// Parse an escape sequence, returning the unit it denotes
    fn parse_escape(&mut self) -> Result<u32, ParseError> {
        let offset = self.pos;
        self.bump(); // consume '\\'
        let c = self.bump().ok_or_else(|| self.end_error())?;
        match c {
            'n' => Ok('\n' as u32),
            'r' => Ok('\r' as u32),
            't' => Ok('\t' as u32),
            'x' => {
                let hi = self.parse_hex_digit(offset)?;
                let lo = self.parse_hex_digit(offset)?;
                Ok(hi * 16 + lo)
            }
            'u' => {
                if self.target == TargetKind::Byte {
                    return Err(self.error_at(offset, ParseErrorKind::UnicodeEscapeForBytes));
                }
                let value = if self.eat('{') {
                    let mut value: u32 = 0;
                    let mut any = false;
                    while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                        self.bump();
                        value = value.saturating_mul(16).saturating_add(d);
                        any = true;
                    }
                    if !any || !self.eat('}') {
                        return Err(self.error_at(offset, ParseErrorKind::InvalidEscape('u')));
                    }
                    value
                } else {
                    let mut value = 0;
                    for _ in 0..4 {
                        value = value * 16 + self.parse_hex_digit(offset)?;
                    }
                    value
                };
                if char::from_u32(value).is_none() {
                    return Err(self.error_at(offset, ParseErrorKind::InvalidEscape('u')));
                }
                Ok(value)
            }
            '"' => Ok('"' as u32),
            c if SPECIAL.contains(c) => Ok(c as u32),
            c => Err(self.error_at(offset, ParseErrorKind::InvalidEscape(c))),
        }
    }

    fn parse_hex_digit(&mut self, escape_offset: usize) -> Result<u32, ParseError> {
        match self.peek().and_then(|c| c.to_digit(16)) {
            Some(d) => {
                self.bump();
                Ok(d)
            }
            None => Err(self.error_at(escape_offset, ParseErrorKind::InvalidEscape('x'))),
        }
    }
}

/// Whether the pattern's single end anchor sits in a position that
/// statically requires end-of-input
fn is_trailing_anchor(pattern: &Pattern) -> bool {
    match pattern {
        Pattern::EndAnchor => true,
        Pattern::Concat(items) => items.last().is_some_and(is_trailing_anchor),
        Pattern::Capture { inner, .. } | Pattern::CaseInsensitive(inner) => {
            is_trailing_anchor(inner)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Pattern;

    fn parse(src: &str) -> Result<Pattern, ParseError> {
        parse_pattern(src, TargetKind::Char, true)
    }

    #[test]
    fn test_parse_empty_source() {
        assert_eq!(parse("").unwrap(), Pattern::Empty);
        assert_eq!(parse("\"\"").unwrap(), Pattern::Empty);
    }

    #[test]
    fn test_parse_literal_sequence() {
        let p = parse("\"ab\"").unwrap();
        assert_eq!(
            p,
            Pattern::Concat(vec![
                Pattern::Literal('a' as u32),
                Pattern::Literal('b' as u32)
            ])
        );
    }

    #[test]
    fn test_parse_dot() {
        assert_eq!(parse("\".\"").unwrap(), Pattern::Any);
    }

    #[test]
    fn test_parse_capture() {
        let p = parse("\"[a-z]+\" as id").unwrap();
        match p {
            Pattern::Capture { name, .. } => assert_eq!(name, "id"),
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_juxtaposition() {
        let p = parse("\"ERROR\" (\"[0-9]+\" as code)").unwrap();
        let Pattern::Concat(items) = p else {
            panic!("expected concat")
        };
        assert_eq!(items.len(), 6); // E R R O R + capture
        assert!(matches!(items[5], Pattern::Capture { .. }));
    }

    #[test]
    fn test_parse_nested_capture_rejected() {
        let err = parse("((\"a\" as x) \"b\") as y").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestedCapture("y".to_string()));
    }

    #[test]
    fn test_parse_quantifiers() {
        for (src, min, max, greedy) in [
            ("\"a*\"", 0, None, true),
            ("\"a+\"", 1, None, true),
            ("\"a?\"", 0, Some(1), true),
            ("\"a*?\"", 0, None, false),
            ("\"a+?\"", 1, None, false),
            ("\"a{3}\"", 3, Some(3), true),
            ("\"a{2,}\"", 2, None, true),
            ("\"a{2,5}\"", 2, Some(5), true),
            ("\"a{2,5}?\"", 2, Some(5), false),
        ] {
            match parse(src).unwrap() {
                Pattern::Repeat {
                    min: m,
                    max: x,
                    greedy: g,
                    ..
                } => {
                    assert_eq!((m, x, g), (min, max, greedy), "for {src}");
                }
                other => panic!("expected repeat for {src}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_quantifier_bad_range() {
        let err = parse("\"a{4,2}\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::QuantifierRange { min: 4, max: 2 });
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_parse_dangling_quantifier() {
        let err = parse("\"*a\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DanglingQuantifier);
    }

    #[test]
    fn test_parse_double_quantifier_rejected() {
        assert!(parse("\"a**\"").is_err());
    }

    #[test]
    fn test_parse_bracket_range() {
        let p = parse("\"[a-z0-9]\"").unwrap();
        let Pattern::Class(set) = p else {
            panic!("expected class")
        };
        assert!(set.contains('m' as u32));
        assert!(set.contains('7' as u32));
        assert!(!set.contains('A' as u32));
    }

    #[test]
    fn test_parse_bracket_negated() {
        let p = parse("\"[^abc]\"").unwrap();
        let Pattern::Class(set) = p else {
            panic!("expected class")
        };
        assert!(!set.contains('a' as u32));
        assert!(set.contains('d' as u32));
    }

    #[test]
    fn test_parse_bracket_trailing_dash_literal() {
        let p = parse("\"[a-]\"").unwrap();
        let Pattern::Class(set) = p else {
            panic!("expected class")
        };
        assert!(set.contains('a' as u32));
        assert!(set.contains('-' as u32));
    }

    #[test]
    fn test_parse_posix_inside_brackets() {
        let p = parse("\"[[:digit:]]\"").unwrap();
        let Pattern::Class(set) = p else {
            panic!("expected class")
        };
        assert!(set.contains('5' as u32));
        assert!(!set.contains('a' as u32));
    }

    #[test]
    fn test_bare_posix_is_plain_bracket() {
        // Documented pitfall: without the outer brackets, `[:digit:]` is a
        // bracket expression over `:`, `d`, `i`, `g`, `t`.
        let p = parse("\"[:digit:]\"").unwrap();
        let Pattern::Class(set) = p else {
            panic!("expected class")
        };
        assert!(set.contains(':' as u32));
        assert!(set.contains('d' as u32));
        assert!(set.contains('g' as u32));
        assert!(!set.contains('5' as u32));
    }

    #[test]
    fn test_parse_unknown_posix_class() {
        let err = parse("\"[[:digits:]]\"").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownPosixClass("digits".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_class_range() {
        let err = parse("\"[z-a]\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidClassRange('z', 'a'));
    }

    #[test]
    fn test_parse_case_insensitive_group() {
        let p = parse("\"(?i:abc)\"").unwrap();
        assert!(matches!(p, Pattern::CaseInsensitive(_)));
    }

    #[test]
    fn test_parse_multi_letter_modifier_rejected() {
        let err = parse("\"(?im:abc)\"").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownGroupModifier("im".to_string())
        );
    }

    #[test]
    fn test_parse_negated_modifier_rejected() {
        let err = parse("\"(?-i:abc)\"").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnknownGroupModifier("-i".to_string())
        );
    }

    #[test]
    fn test_parse_plain_group_quantified() {
        let p = parse("\"(ab)+\"").unwrap();
        assert!(matches!(p, Pattern::Repeat { min: 1, max: None, .. }));
    }

    #[test]
    fn test_parse_alternation_rejected() {
        let err = parse("\"a|b\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::AlternationUnsupported);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_parse_escapes() {
        let p = parse("\"\\n\\t\\.\\*\\\\\"").unwrap();
        let Pattern::Concat(items) = p else {
            panic!("expected concat")
        };
        assert_eq!(items[0], Pattern::Literal('\n' as u32));
        assert_eq!(items[2], Pattern::Literal('.' as u32));
        assert_eq!(items[4], Pattern::Literal('\\' as u32));
    }

    #[test]
    fn test_parse_hex_escape() {
        assert_eq!(parse("\"\\x41\"").unwrap(), Pattern::Literal(0x41));
    }

    #[test]
    fn test_parse_unicode_escapes() {
        assert_eq!(parse("\"\\u0041\"").unwrap(), Pattern::Literal(0x41));
        assert_eq!(parse("\"\\u{1F600}\"").unwrap(), Pattern::Literal(0x1F600));
    }

    #[test]
    fn test_parse_unicode_escape_rejected_for_bytes() {
        let err = parse_pattern("\"\\u0041\"", TargetKind::Byte, true).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnicodeEscapeForBytes);
    }

    #[test]
    fn test_parse_hex_escape_allowed_for_bytes() {
        let p = parse_pattern("\"\\xFF\"", TargetKind::Byte, true).unwrap();
        assert_eq!(p, Pattern::Literal(0xFF));
    }

    #[test]
    fn test_parse_wide_literal_rejected_for_bytes() {
        let err = parse_pattern("\"☃\"", TargetKind::Byte, true).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::LiteralOutOfByteRange('☃'));
    }

    #[test]
    fn test_parse_invalid_escape() {
        let err = parse("\"\\q\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape('q'));
    }

    #[test]
    fn test_parse_trailing_anchor_ok() {
        let p = parse("\"abc$\"").unwrap();
        let Pattern::Concat(items) = p else {
            panic!("expected concat")
        };
        assert_eq!(items.last(), Some(&Pattern::EndAnchor));
    }

    #[test]
    fn test_parse_interior_anchor_rejected() {
        let err = parse("\"a$b\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedAnchor);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_parse_anchor_in_earlier_element_rejected() {
        let err = parse("\"a$\" \"b\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedAnchor);
    }

    #[test]
    fn test_parse_quantified_anchor_rejected() {
        let err = parse("\"(a$)?\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedAnchor);
    }

    #[test]
    fn test_parse_anchor_disallowed() {
        let err = parse_pattern("\"abc$\"", TargetKind::Char, false).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MisplacedAnchor);
    }

    #[test]
    fn test_parse_unterminated_literal() {
        let err = parse("\"abc").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_parse_unterminated_class() {
        let err = parse("\"[abc\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedClass);
    }

    #[test]
    fn test_parse_unbalanced_paren() {
        assert!(parse("(\"a\"").is_err());
        assert!(parse("\"a\")").is_err());
    }

    #[test]
    fn test_parse_caret_rejected_outside_brackets() {
        let err = parse("\"^a\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('^'));
    }

    #[test]
    fn test_as_requires_name() {
        let err = parse("\"a\" as 1x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedCaptureName);
    }

    #[test]
    fn test_identifier_starting_with_as_is_not_keyword() {
        // `ascii` must not be mistaken for `as cii`
        let err = parse("\"a\" ascii").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('a'));
    }
}
