use itertools::Itertools;

use std::{
    fmt::{Debug, Display},
    ops::{Bound, RangeBounds},
    sync::Arc,
};

use crate::engine::{RawMatch, Span};

/// The pattern a match came from: source, option bits and group names.
/// Shared between a `Pattern` and every view it produces.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Origin {
    pub(crate) source: String,
    pub(crate) options: u32,
    pub(crate) names: Vec<Option<String>>,
}

/// Read-only view over one successful match.
///
/// The view borrows the subject it was matched against. Group 0 is always
/// present and covers the whole match; any other group may be absent, in
/// which case every accessor reports `None` for it rather than an empty
/// string.
#[derive(Clone)]
pub struct MatchResult<'s> {
    subject: &'s str,
    whole: Span,
    groups: Box<[Option<Span>]>,
    origin: Option<Arc<Origin>>,
}

impl<'s> MatchResult<'s> {
    /// Wrap a raw engine result. Returns `None` when the record is unusable:
    /// no group 0, or a span that is reversed, out of `subject`, or not on a
    /// character boundary.
    pub fn new(subject: &'s str, raw: RawMatch) -> Option<MatchResult<'s>> {
        let groups = raw.into_spans();
        let whole = groups.first().copied().flatten()?;
        if let Some(span) = groups.iter().flatten().find(|span| !is_valid_span(subject, span)) {
            log::trace!("dropping match with span {:?} outside subject", span);
            return None;
        }
        Some(MatchResult {
            subject,
            whole,
            groups: groups.into_boxed_slice(),
            origin: None,
        })
    }

    pub(crate) fn with_origin(mut self, origin: Arc<Origin>) -> MatchResult<'s> {
        self.origin = Some(origin);
        self
    }

    /// Source of the pattern that produced this match. `None` for a view
    /// built directly from a raw record.
    pub fn pattern_source(&self) -> Option<&str> {
        self.origin.as_ref().map(|origin| origin.source.as_str())
    }

    /// Option bits of the pattern that produced this match.
    pub fn pattern_options(&self) -> Option<u32> {
        self.origin.as_ref().map(|origin| origin.options)
    }

    /// The text that was searched.
    pub fn subject(&self) -> &'s str {
        self.subject
    }

    /// Number of groups, the whole match included. Always at least 1.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn span(&self, n: usize) -> Option<Span> {
        self.groups.get(n).copied().flatten()
    }

    /// Text of group `n`, or `None` when the group did not participate or
    /// `n` is out of range.
    pub fn at(&self, n: usize) -> Option<&'s str> {
        self.span(n).map(|span| &self.subject[span.range()])
    }

    pub fn begin(&self, n: usize) -> Option<usize> {
        self.span(n).map(|span| span.begin)
    }

    pub fn end(&self, n: usize) -> Option<usize> {
        self.span(n).map(|span| span.end)
    }

    pub fn offset(&self, n: usize) -> (Option<usize>, Option<usize>) {
        (self.begin(n), self.end(n))
    }

    /// Every group but the whole match.
    pub fn captures(&self) -> Vec<Option<&'s str>> {
        self.iter().skip(1).collect()
    }

    pub fn pre_match(&self) -> &'s str {
        &self.subject[..self.whole.begin]
    }

    pub fn post_match(&self) -> &'s str {
        &self.subject[self.whole.end..]
    }

    /// The whole match.
    pub fn as_str(&self) -> &'s str {
        &self.subject[self.whole.range()]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&'s str>> + '_ {
        (0..self.group_count()).map(move |n| self.at(n))
    }

    pub fn to_vec(&self) -> Vec<Option<&'s str>> {
        self.iter().collect()
    }

    pub fn values_at(&self, indices: &[usize]) -> Vec<Option<&'s str>> {
        indices.iter().map(|&n| self.at(n)).collect()
    }

    /// Groups selected by `range`, with array-slice semantics: `None` when
    /// the range starts past the last group, and the end clamped to the
    /// group count.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Option<Vec<Option<&'s str>>> {
        let len = self.group_count();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.checked_add(1)?,
            Bound::Unbounded => 0,
        };
        if start > len {
            return None;
        }
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        Some((start..end).map(|n| self.at(n)).collect())
    }

    fn group_name(&self, n: usize) -> Option<&str> {
        self.origin.as_ref()?.names.get(n)?.as_deref()
    }

    /// Text of the group called `name`.
    pub fn name(&self, name: &str) -> Option<&'s str> {
        let n = (0..self.group_count()).find(|&n| self.group_name(n) == Some(name))?;
        self.at(n)
    }

    /// Names of the named groups, in group order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.origin
            .iter()
            .flat_map(|origin| origin.names.iter().flatten().map(String::as_str))
    }
}

fn is_valid_span(subject: &str, span: &Span) -> bool {
    span.begin <= span.end && subject.get(span.range()).is_some()
}

impl PartialEq for MatchResult<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject && self.groups == other.groups
    }
}

impl Eq for MatchResult<'_> {}

impl Display for MatchResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// #<MatchData "ab" 1:"a" year:nil>
impl Debug for MatchResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let groups = (1..self.group_count()).format_with("", |n, g| {
            match (self.group_name(n), self.at(n)) {
                (Some(name), Some(text)) => g(&format_args!(" {}:{:?}", name, text)),
                (Some(name), None) => g(&format_args!(" {}:nil", name)),
                (None, Some(text)) => g(&format_args!(" {}:{:?}", n, text)),
                (None, None) => g(&format_args!(" {}:nil", n)),
            }
        });
        write!(f, "#<MatchData {:?}{}>", self.as_str(), groups)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(groups: &[Option<(usize, usize)>]) -> RawMatch {
        RawMatch::new(
            groups
                .iter()
                .map(|group| group.map(|(begin, end)| Span::new(begin, end)))
                .collect(),
        )
    }

    // "abc123def" against (\d)(x)?(\d+)
    fn digits() -> MatchResult<'static> {
        MatchResult::new(
            "abc123def",
            spans(&[Some((3, 6)), Some((3, 4)), None, Some((4, 6))]),
        )
        .unwrap()
    }

    #[test]
    fn test_match_result_rejects_bad_records() {
        assert!(MatchResult::new("abc", spans(&[])).is_none());
        assert!(MatchResult::new("abc", spans(&[None, Some((0, 1))])).is_none());
        assert!(MatchResult::new("abc", spans(&[Some((2, 1))])).is_none());
        assert!(MatchResult::new("abc", spans(&[Some((0, 4))])).is_none());
        assert!(MatchResult::new("abc", spans(&[Some((0, 1)), Some((1, 9))])).is_none());
        // inside a multi-byte character
        assert!(MatchResult::new("文", spans(&[Some((0, 1))])).is_none());
        assert!(MatchResult::new("abc", spans(&[Some((3, 3))])).is_some());
    }

    #[test]
    fn test_match_result_at() {
        let m = digits();
        assert_eq!(m.group_count(), 4);
        assert_eq!(m.at(0), Some("123"));
        assert_eq!(m.at(1), Some("1"));
        assert_eq!(m.at(2), None);
        assert_eq!(m.at(3), Some("23"));
        assert_eq!(m.at(4), None);
        assert_eq!(m.at(usize::MAX), None);
    }

    #[test]
    fn test_match_result_absent_group_is_not_empty() {
        let m = MatchResult::new("ab", spans(&[Some((0, 0)), Some((0, 0)), None])).unwrap();
        assert_eq!(m.at(1), Some(""));
        assert_eq!(m.at(2), None);
        assert_eq!(m.captures(), vec![Some(""), None]);
    }

    #[test]
    fn test_match_result_offsets() {
        let m = digits();
        assert_eq!(m.offset(0), (Some(3), Some(6)));
        assert_eq!(m.offset(2), (None, None));
        assert_eq!(m.offset(9), (None, None));
        for n in 0..m.group_count() {
            assert_eq!(m.offset(n), (m.begin(n), m.end(n)));
            assert_eq!(m.begin(n).is_some(), m.end(n).is_some());
        }
    }

    #[test]
    fn test_match_result_captures() {
        let m = digits();
        assert_eq!(m.captures(), vec![Some("1"), None, Some("23")]);
        assert_eq!(m.captures().len(), m.group_count() - 1);

        let whole_only = MatchResult::new("abc", spans(&[Some((1, 2))])).unwrap();
        assert!(whole_only.captures().is_empty());
    }

    #[test]
    fn test_match_result_pre_post_match() {
        let m = digits();
        assert_eq!(m.pre_match(), "abc");
        assert_eq!(m.post_match(), "def");
        assert_eq!(
            format!("{}{}{}", m.pre_match(), m.as_str(), m.post_match()),
            m.subject()
        );

        let edge = MatchResult::new("abc", spans(&[Some((0, 3))])).unwrap();
        assert_eq!(edge.pre_match(), "");
        assert_eq!(edge.post_match(), "");
    }

    #[test]
    fn test_match_result_sequence() {
        let m = digits();
        let all = m.to_vec();
        assert_eq!(all, vec![Some("123"), Some("1"), None, Some("23")]);
        assert_eq!(all[0], Some(m.as_str()));
        assert_eq!(all[0], m.at(0));
        assert_eq!(m.to_string(), "123");
        // restartable
        assert_eq!(m.iter().len(), 4);
        assert_eq!(m.iter().collect::<Vec<_>>(), m.to_vec());
    }

    #[test]
    fn test_match_result_values_at() {
        let m = digits();
        assert!(m.values_at(&[]).is_empty());
        assert_eq!(
            m.values_at(&[3, 0, 2, 7]),
            vec![Some("23"), Some("123"), None, None]
        );
        let all = m.to_vec();
        assert_eq!(m.values_at(&[1, 3]), vec![all[1], all[3]]);
    }

    #[test]
    fn test_match_result_slice() {
        let m = digits();
        assert_eq!(m.slice(1..3), Some(vec![Some("1"), None]));
        assert_eq!(m.slice(1..=3), Some(vec![Some("1"), None, Some("23")]));
        assert_eq!(m.slice(2..), Some(vec![None, Some("23")]));
        assert_eq!(m.slice(..), Some(m.to_vec()));
        assert_eq!(m.slice(3..100), Some(vec![Some("23")]));
        assert_eq!(m.slice(4..), Some(vec![]));
        assert_eq!(m.slice(5..), None);
        assert_eq!(m.slice(3..1), Some(vec![]));
    }

    fn origin(names: &[Option<&str>]) -> Arc<Origin> {
        Arc::new(Origin {
            source: r"(\d)(x)?(\d+)".to_string(),
            options: 1,
            names: names.iter().map(|name| name.map(str::to_string)).collect(),
        })
    }

    #[test]
    fn test_match_result_names() {
        let m = digits().with_origin(origin(&[None, Some("first"), None, Some("rest")]));
        assert_eq!(m.name("first"), Some("1"));
        assert_eq!(m.name("rest"), Some("23"));
        assert_eq!(m.name("other"), None);
        assert_eq!(m.names().collect::<Vec<_>>(), vec!["first", "rest"]);
    }

    #[test]
    fn test_match_result_inspect() {
        assert_eq!(
            format!("{:?}", digits()),
            r#"#<MatchData "123" 1:"1" 2:nil 3:"23">"#
        );
        assert_eq!(
            format!("{:?}", digits().with_origin(origin(&[None, Some("first"), None, None]))),
            r#"#<MatchData "123" first:"1" 2:nil 3:"23">"#
        );
    }

    #[test]
    fn test_match_result_pattern() {
        assert_eq!(digits().pattern_source(), None);
        assert_eq!(digits().pattern_options(), None);
        assert_eq!(digits().names().count(), 0);

        let m = digits().with_origin(origin(&[]));
        assert_eq!(m.pattern_source(), Some(r"(\d)(x)?(\d+)"));
        assert_eq!(m.pattern_options(), Some(1));
        assert_eq!(m.name("first"), None);
    }

    #[test]
    fn test_match_result_eq() {
        assert_eq!(digits(), digits());
        let other = MatchResult::new("abc123def", spans(&[Some((3, 6))])).unwrap();
        assert!(digits() != other);
    }
}
