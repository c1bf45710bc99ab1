//! Character sets and the POSIX class table
//!
//! Bracket expressions and POSIX class tokens resolve to a [`ClassSet`]: a
//! normalized list of inclusive code-point ranges plus a negation flag. The
//! same representation covers both char- and byte-addressed patterns (a byte
//! is just a unit in `0..=255`).
//!
//! The POSIX table is a fixed constant. It resolves the twelve classic
//! ASCII-only class names and is not user-extensible.

/// A set of input units, stored as sorted, disjoint inclusive ranges
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSet {
    ranges: Vec<(u32, u32)>,
    negated: bool,
}

impl ClassSet {
    /// Create an empty set
    pub fn new() -> Self {
        ClassSet::default()
    }

    /// Create a set holding a single unit
    pub fn single(unit: u32) -> Self {
        let mut set = ClassSet::new();
        set.push_unit(unit);
        set
    }

    /// Add a single unit
    pub fn push_unit(&mut self, unit: u32) {
        self.push_range(unit, unit);
    }

    /// Add an inclusive range
    pub fn push_range(&mut self, lo: u32, hi: u32) {
        debug_assert!(lo <= hi);
        self.ranges.push((lo, hi));
        self.normalize();
    }

    /// Mark the set as negated
    pub fn negate(&mut self) {
        self.negated = true;
    }

    /// Whether the set holds no ranges (negation aside)
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Test a unit against the set, honoring negation
    pub fn contains(&self, unit: u32) -> bool {
        let hit = self
            .ranges
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&unit));
        hit != self.negated
    }

    /// Expand the set with ASCII case-folded counterparts: every range
    /// overlapping `a-z` gains its `A-Z` image and vice versa. Non-ASCII
    /// code points are untouched.
    pub fn fold_ascii(&mut self) {
        let mut extra = Vec::new();
        for &(lo, hi) in &self.ranges {
            if let Some((l, h)) = intersect((lo, hi), (b'a' as u32, b'z' as u32)) {
                extra.push((l - 32, h - 32));
            }
            if let Some((l, h)) = intersect((lo, hi), (b'A' as u32, b'Z' as u32)) {
                extra.push((l + 32, h + 32));
            }
        }
        self.ranges.extend(extra);
        self.normalize();
    }

    /// Sort and merge adjacent/overlapping ranges
    fn normalize(&mut self) {
        if self.ranges.len() < 2 {
            return;
        }
        self.ranges.sort_unstable();
        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(self.ranges.len());
        for &(lo, hi) in &self.ranges {
            match merged.last_mut() {
                Some(last) if lo <= last.1.saturating_add(1) => {
                    last.1 = last.1.max(hi);
                }
                _ => merged.push((lo, hi)),
            }
        }
        self.ranges = merged;
    }
}

/// Resolve a POSIX class name to its ASCII ranges
///
/// Returns `None` for unknown names; the parser turns that into an
/// `UnknownPosixClass` error.
pub fn posix_class(name: &str) -> Option<&'static [(u32, u32)]> {
    const ALNUM: &[(u32, u32)] = &[(0x30, 0x39), (0x41, 0x5A), (0x61, 0x7A)];
    const ALPHA: &[(u32, u32)] = &[(0x41, 0x5A), (0x61, 0x7A)];
    const BLANK: &[(u32, u32)] = &[(0x09, 0x09), (0x20, 0x20)];
    const CNTRL: &[(u32, u32)] = &[(0x00, 0x1F), (0x7F, 0x7F)];
    const DIGIT: &[(u32, u32)] = &[(0x30, 0x39)];
    const GRAPH: &[(u32, u32)] = &[(0x21, 0x7E)];
    const LOWER: &[(u32, u32)] = &[(0x61, 0x7A)];
    const PRINT: &[(u32, u32)] = &[(0x20, 0x7E)];
    const PUNCT: &[(u32, u32)] = &[(0x21, 0x2F), (0x3A, 0x40), (0x5B, 0x60), (0x7B, 0x7E)];
    const SPACE: &[(u32, u32)] = &[(0x09, 0x0D), (0x20, 0x20)];
    const UPPER: &[(u32, u32)] = &[(0x41, 0x5A)];
    const XDIGIT: &[(u32, u32)] = &[(0x30, 0x39), (0x41, 0x46), (0x61, 0x66)];

    Some(match name {
        "alnum" => ALNUM,
        "alpha" => ALPHA,
        "blank" => BLANK,
        "cntrl" => CNTRL,
        "digit" => DIGIT,
        "graph" => GRAPH,
        "lower" => LOWER,
        "print" => PRINT,
        "punct" => PUNCT,
        "space" => SPACE,
        "upper" => UPPER,
        "xdigit" => XDIGIT,
        _ => return None,
    })
}

fn intersect(a: (u32, u32), b: (u32, u32)) -> Option<(u32, u32)> {
    let lo = a.0.max(b.0);
    let hi = a.1.min(b.1);
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unit() {
        let set = ClassSet::single('x' as u32);
        assert!(set.contains('x' as u32));
        assert!(!set.contains('y' as u32));
    }

    #[test]
    fn test_range() {
        let mut set = ClassSet::new();
        set.push_range('a' as u32, 'z' as u32);
        assert!(set.contains('m' as u32));
        assert!(!set.contains('A' as u32));
    }

    #[test]
    fn test_negation() {
        let mut set = ClassSet::new();
        set.push_range('0' as u32, '9' as u32);
        set.negate();
        assert!(!set.contains('5' as u32));
        assert!(set.contains('x' as u32));
    }

    #[test]
    fn test_merge_overlapping() {
        let mut set = ClassSet::new();
        set.push_range('a' as u32, 'm' as u32);
        set.push_range('k' as u32, 'z' as u32);
        assert!(set.contains('p' as u32));
        assert_eq!(set.ranges.len(), 1);
    }

    #[test]
    fn test_merge_adjacent() {
        let mut set = ClassSet::new();
        set.push_range('a' as u32, 'c' as u32);
        set.push_range('d' as u32, 'f' as u32);
        assert_eq!(set.ranges.len(), 1);
    }

    #[test]
    fn test_fold_ascii_literal() {
        let mut set = ClassSet::single('a' as u32);
        set.fold_ascii();
        assert!(set.contains('a' as u32));
        assert!(set.contains('A' as u32));
    }

    #[test]
    fn test_fold_ascii_range() {
        let mut set = ClassSet::new();
        set.push_range('m' as u32, 'p' as u32);
        set.fold_ascii();
        assert!(set.contains('N' as u32));
        assert!(!set.contains('A' as u32));
    }

    #[test]
    fn test_fold_ascii_ignores_non_letters() {
        let mut set = ClassSet::new();
        set.push_range('0' as u32, '9' as u32);
        let before = set.clone();
        set.fold_ascii();
        assert_eq!(set, before);
    }

    #[test]
    fn test_fold_ascii_ignores_non_ascii() {
        let mut set = ClassSet::single('é' as u32);
        set.fold_ascii();
        assert!(!set.contains('É' as u32));
    }

    #[test]
    fn test_posix_digit() {
        let ranges = posix_class("digit").unwrap();
        assert_eq!(ranges, &[(0x30, 0x39)]);
    }

    #[test]
    fn test_posix_unknown() {
        assert!(posix_class("digits").is_none());
        assert!(posix_class("").is_none());
    }

    #[test]
    fn test_posix_all_names_resolve() {
        for name in [
            "alnum", "alpha", "blank", "cntrl", "digit", "graph", "lower", "print", "punct",
            "space", "upper", "xdigit",
        ] {
            assert!(posix_class(name).is_some(), "missing class {name}");
        }
    }

    #[test]
    fn test_posix_punct() {
        let mut set = ClassSet::new();
        for &(lo, hi) in posix_class("punct").unwrap() {
            set.push_range(lo, hi);
        }
        assert!(set.contains('!' as u32));
        assert!(set.contains('@' as u32));
        assert!(set.contains('~' as u32));
        assert!(!set.contains('a' as u32));
        assert!(!set.contains(' ' as u32));
    }
}
