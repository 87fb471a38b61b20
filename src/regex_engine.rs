use regex::{Regex, RegexBuilder};
use regex_syntax::ParserBuilder;

use crate::{
    engine::{Engine, Program, RawMatch, Span},
    error::PatternError,
    options::{Encoding, Options},
};

/// The default engine, backed by the `regex` crate.
///
/// Option bits are mapped as follows; any other bit is carried without
/// effect:
///
/// ```plain
///     IGNORECASE  case-insensitive matching
///     EXTENDED    whitespace and `#` comments in the pattern are ignored
///     MULTILINE   `.` also matches `\n`
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegexEngine {
    size_limit: Option<usize>,
}

impl RegexEngine {
    pub fn new() -> RegexEngine {
        RegexEngine::default()
    }

    /// Cap the size of compiled programs, in bytes.
    pub fn with_size_limit(mut self, bytes: usize) -> RegexEngine {
        self.size_limit = Some(bytes);
        self
    }
}

impl Engine for RegexEngine {
    fn compile(
        &self,
        source: &str,
        options: u32,
        encoding: Option<Encoding>,
    ) -> Result<Box<dyn Program>, PatternError> {
        let flags = Options::from_bits_truncate(options);
        let case_insensitive = flags.contains(Options::IGNORECASE);
        let ignore_whitespace = flags.contains(Options::EXTENDED);
        let dot_matches_new_line = flags.contains(Options::MULTILINE);

        // the regex crate flattens its errors into text, so parse once up
        // front to keep the position of syntax errors.
        ParserBuilder::new()
            .case_insensitive(case_insensitive)
            .ignore_whitespace(ignore_whitespace)
            .dot_matches_new_line(dot_matches_new_line)
            .build()
            .parse(source)
            .map_err(|err| syntax_error(source, &err))?;

        let mut builder = RegexBuilder::new(source);
        builder
            .case_insensitive(case_insensitive)
            .ignore_whitespace(ignore_whitespace)
            .dot_matches_new_line(dot_matches_new_line);
        if let Some(limit) = self.size_limit {
            builder.size_limit(limit);
        }
        let regex = builder
            .build()
            .map_err(|err| PatternError::new(source, None, err.to_string()))?;

        log::debug!(
            "compiled /{}/ options={:#x} encoding={:?} groups={}",
            source,
            options,
            encoding,
            regex.captures_len()
        );
        Ok(Box::new(RegexProgram { regex }))
    }

    /// Escape meta characters and whitespace, so the result stays literal
    /// under EXTENDED as well.
    fn escape(&self, literal: &str) -> String {
        let mut escaped = String::with_capacity(literal.len());
        for ch in regex::escape(literal).chars() {
            match ch {
                ' ' => escaped.push_str("\\ "),
                '\t' => escaped.push_str("\\t"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\x0B' => escaped.push_str("\\v"),
                '\x0C' => escaped.push_str("\\f"),
                ch if ch.is_whitespace() => escaped.push_str(&format!("\\x{{{:X}}}", u32::from(ch))),
                ch => escaped.push(ch),
            }
        }
        escaped
    }
}

fn syntax_error(source: &str, err: &regex_syntax::Error) -> PatternError {
    match err {
        regex_syntax::Error::Parse(err) => {
            PatternError::new(source, Some(err.span().start.offset), err.kind().to_string())
        }
        regex_syntax::Error::Translate(err) => {
            PatternError::new(source, Some(err.span().start.offset), err.kind().to_string())
        }
        _ => PatternError::new(source, None, err.to_string()),
    }
}

#[derive(Debug)]
struct RegexProgram {
    regex: Regex,
}

impl Program for RegexProgram {
    fn search(&self, subject: &str, start: usize) -> Option<RawMatch> {
        let mut locations = self.regex.capture_locations();
        self.regex.captures_read_at(&mut locations, subject, start)?;
        let groups = (0..locations.len())
            .map(|i| locations.get(i).map(|(begin, end)| Span::new(begin, end)))
            .collect();
        Some(RawMatch::new(groups))
    }

    fn group_names(&self) -> Vec<Option<String>> {
        self.regex
            .capture_names()
            .map(|name| name.map(str::to_string))
            .collect()
    }
}
