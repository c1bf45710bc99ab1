//! Input views and capture values
//!
//! The engine matches over a read-only [`View`]: either a char-addressed
//! `&str` or a byte-addressed `&[u8]`. Positions, match lengths and capture
//! spans are counted in *units* — characters for string views, bytes for
//! byte views. The engine never mutates a view; slicing a match result
//! borrows from the original input.

/// Whether a pattern set addresses characters or bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Char-addressed: units are Unicode scalar values
    Char,
    /// Byte-addressed: units are raw bytes
    Byte,
}

/// A read-only input view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A char-addressed view
    Str(&'a str),
    /// A byte-addressed view
    Bytes(&'a [u8]),
}

impl<'a> View<'a> {
    /// The target kind this view belongs to
    pub fn kind(&self) -> TargetKind {
        match self {
            View::Str(_) => TargetKind::Char,
            View::Bytes(_) => TargetKind::Byte,
        }
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        match self {
            View::Str(s) => s.is_empty(),
            View::Bytes(b) => b.is_empty(),
        }
    }

    /// The string slice, for char-addressed views
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            View::Str(s) => Some(s),
            View::Bytes(_) => None,
        }
    }

    /// The raw bytes of the view
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            View::Str(s) => s.as_bytes(),
            View::Bytes(b) => b,
        }
    }
}

impl<'a> From<&'a str> for View<'a> {
    fn from(s: &'a str) -> Self {
        View::Str(s)
    }
}

impl<'a> From<&'a [u8]> for View<'a> {
    fn from(b: &'a [u8]) -> Self {
        View::Bytes(b)
    }
}

/// A capture value
///
/// A span covering exactly one unit extracts as a scalar; anything else
/// (including the empty span) extracts as a sub-view of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// A single captured character
    Char(char),
    /// A single captured byte
    Byte(u8),
    /// A multi-unit (or empty) captured span
    View(View<'a>),
}

impl<'a> Value<'a> {
    /// The scalar character, if this is a one-char capture
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// The scalar byte, if this is a one-byte capture
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Value::Byte(b) => Some(*b),
            _ => None,
        }
    }

    /// The sub-view, if this is a multi-unit capture
    pub fn as_view(&self) -> Option<View<'a>> {
        match self {
            Value::View(v) => Some(*v),
            _ => None,
        }
    }
}

/// A view decoded into its unit sequence, with enough bookkeeping to slice
/// the original input back out by unit positions
pub(crate) struct Units<'a> {
    view: View<'a>,
    units: Vec<u32>,
    /// Byte offset of each unit start plus one-past-the-end; only populated
    /// for char-addressed views (byte views slice directly)
    offsets: Vec<usize>,
}

impl<'a> Units<'a> {
    pub(crate) fn decode(view: View<'a>) -> Self {
        match view {
            View::Str(s) => {
                let mut units = Vec::with_capacity(s.len());
                let mut offsets = Vec::with_capacity(s.len() + 1);
                for (offset, c) in s.char_indices() {
                    offsets.push(offset);
                    units.push(c as u32);
                }
                offsets.push(s.len());
                Units {
                    view,
                    units,
                    offsets,
                }
            }
            View::Bytes(b) => Units {
                view,
                units: b.iter().map(|&b| b as u32).collect(),
                offsets: Vec::new(),
            },
        }
    }

    /// Number of units in the input
    pub(crate) fn len(&self) -> usize {
        self.units.len()
    }

    /// The unit at position `i`
    pub(crate) fn at(&self, i: usize) -> u32 {
        self.units[i]
    }

    /// Slice the original input by unit positions
    pub(crate) fn slice(&self, from: usize, to: usize) -> View<'a> {
        match self.view {
            View::Str(s) => View::Str(&s[self.offsets[from]..self.offsets[to]]),
            View::Bytes(b) => View::Bytes(&b[from..to]),
        }
    }

    /// Extract a capture span: scalar for a one-unit span, sub-view
    /// otherwise
    pub(crate) fn value(&self, from: usize, to: usize) -> Value<'a> {
        if to - from == 1 {
            match self.view {
                View::Str(_) => {
                    let c = char::from_u32(self.units[from]).expect("unit decoded from &str");
                    Value::Char(c)
                }
                View::Bytes(b) => Value::Byte(b[from]),
            }
        } else {
            Value::View(self.slice(from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_units_are_chars() {
        let units = Units::decode(View::Str("aé☃"));
        assert_eq!(units.len(), 3);
        assert_eq!(units.at(0), 'a' as u32);
        assert_eq!(units.at(1), 'é' as u32);
        assert_eq!(units.at(2), '☃' as u32);
    }

    #[test]
    fn test_byte_units_are_bytes() {
        let input = "é".as_bytes();
        let units = Units::decode(View::Bytes(input));
        assert_eq!(units.len(), 2);
        assert_eq!(units.at(0), 0xC3);
    }

    #[test]
    fn test_slice_respects_char_boundaries() {
        let units = Units::decode(View::Str("aé☃b"));
        assert_eq!(units.slice(1, 3), View::Str("é☃"));
        assert_eq!(units.slice(0, 0), View::Str(""));
        assert_eq!(units.slice(4, 4), View::Str(""));
    }

    #[test]
    fn test_value_scalar_char() {
        let units = Units::decode(View::Str("xyz"));
        assert_eq!(units.value(1, 2), Value::Char('y'));
    }

    #[test]
    fn test_value_scalar_byte() {
        let units = Units::decode(View::Bytes(b"xyz"));
        assert_eq!(units.value(0, 1), Value::Byte(b'x'));
    }

    #[test]
    fn test_value_multi_unit_is_view() {
        let units = Units::decode(View::Str("xyz"));
        assert_eq!(units.value(0, 2), Value::View(View::Str("xy")));
    }

    #[test]
    fn test_value_empty_span_is_view() {
        let units = Units::decode(View::Str("xyz"));
        assert_eq!(units.value(1, 1), Value::View(View::Str("")));
    }

    #[test]
    fn test_view_kind() {
        assert_eq!(View::Str("a").kind(), TargetKind::Char);
        assert_eq!(View::Bytes(b"a").kind(), TargetKind::Byte);
    }
}
