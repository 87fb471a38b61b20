use std::fmt::Display;

/// A pattern source the engine refused to compile.
///
/// `position` is a byte offset into the pattern when the engine can point at
/// the offending spot, and `None` for failures that have no location (such as
/// a compiled program exceeding its size limit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pattern: String,
    position: Option<usize>,
    message: String,
}

impl PatternError {
    pub fn new(pattern: &str, position: Option<usize>, message: impl Into<String>) -> PatternError {
        PatternError {
            pattern: pattern.to_string(),
            position,
            message: message.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the pattern with a caret under the failing position:
    ///
    /// ```plain
    ///     a(b
    ///       ^   unclosed group
    /// ```
    pub fn diagnostic(&self) -> String {
        let column = self
            .position
            .and_then(|posi| self.pattern.get(..posi))
            .map(|head| head.chars().count());
        match column {
            Some(column) => format!(
                "{}\n{}^   {}",
                self.pattern,
                " ".repeat(column),
                self.message
            ),
            None => format!("{}\n{}", self.pattern, self.message),
        }
    }
}

impl Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: /{}/", self.message, self.pattern)
    }
}

impl std::error::Error for PatternError {}
