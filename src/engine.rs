//! The boundary to the matching engine.
//!
//! Everything behind these traits (parsing, compiling, searching) belongs to
//! the engine. This crate only interprets what comes back.

use std::{fmt::Debug, ops::Range};

use crate::{error::PatternError, options::Encoding};

/// A compiler of pattern sources into searchable programs.
pub trait Engine {
    /// Compile `source`. `options` is the raw option bitmask; bits the engine
    /// does not understand must be ignored, not rejected.
    fn compile(
        &self,
        source: &str,
        options: u32,
        encoding: Option<Encoding>,
    ) -> Result<Box<dyn Program>, PatternError>;

    /// A pattern source matching `literal` verbatim.
    fn escape(&self, literal: &str) -> String;
}

/// A compiled pattern.
pub trait Program: Debug + Send + Sync {
    /// Leftmost match in `subject` starting the search at byte `start`.
    /// `start` is always within `subject` and on a character boundary.
    fn search(&self, subject: &str, start: usize) -> Option<RawMatch>;

    /// Name of every group by index, group 0 included (and always unnamed).
    fn group_names(&self) -> Vec<Option<String>>;
}

/// Byte offsets of one group, `begin` included and `end` excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Span {
        Span { begin, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Raw outcome of one successful search: an optional span per group.
/// A `None` entry is a group that did not participate in the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    groups: Vec<Option<Span>>,
}

impl RawMatch {
    pub fn new(groups: Vec<Option<Span>>) -> RawMatch {
        RawMatch { groups }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_begin(&self, i: usize) -> Option<usize> {
        self.span(i).map(|span| span.begin)
    }

    pub fn group_end(&self, i: usize) -> Option<usize> {
        self.span(i).map(|span| span.end)
    }

    pub fn span(&self, i: usize) -> Option<Span> {
        self.groups.get(i).copied().flatten()
    }

    pub(crate) fn into_spans(self) -> Vec<Option<Span>> {
        self.groups
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_raw_match_groups() {
        let raw = RawMatch::new(vec![Some(Span::new(3, 6)), None, Some(Span::new(4, 4))]);
        assert_eq!(raw.group_count(), 3);
        assert_eq!(raw.group_begin(0), Some(3));
        assert_eq!(raw.group_end(0), Some(6));
        assert_eq!(raw.group_begin(1), None);
        assert_eq!(raw.group_end(1), None);
        assert_eq!(raw.span(2), Some(Span::new(4, 4)));
        assert_eq!(raw.span(3), None);
    }

    #[test]
    fn test_span_range() {
        assert_eq!(Span::new(1, 4).range(), 1..4);
    }
}
