use std::{
    fmt::{Debug, Display},
    str::FromStr,
    sync::Arc,
};

use crate::{
    context::InputContext,
    engine::{Engine, Program},
    error::PatternError,
    match_result::{MatchResult, Origin},
    operand::Operand,
    options::{Encoding, Options},
    regex_engine::RegexEngine,
};

// flags that appear in the embedded (?on-off:...) form.
const MODE_FLAGS: Options = Options::from_bits_truncate(
    Options::MULTILINE.bits() | Options::IGNORECASE.bits() | Options::EXTENDED.bits(),
);

/// Everything a pattern is compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions<'a> {
    pub source: &'a str,
    pub options: u32,
    pub encoding: Option<Encoding>,
}

impl<'a> CompileOptions<'a> {
    pub fn new(source: &'a str) -> CompileOptions<'a> {
        CompileOptions {
            source,
            options: 0,
            encoding: None,
        }
    }

    pub fn options(mut self, options: impl Into<u32>) -> CompileOptions<'a> {
        self.options = options.into();
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> CompileOptions<'a> {
        self.encoding = Some(encoding);
        self
    }

    /// Select the encoding by identifier (`"n"`, `"u"`, ...). Unknown
    /// identifiers leave the encoding as it was.
    pub fn encoding_name(mut self, identifier: &str) -> CompileOptions<'a> {
        if let Some(encoding) = Encoding::from_identifier(identifier) {
            self.encoding = Some(encoding);
        }
        self
    }
}

/// A compiled regular expression together with its source and option bits.
pub struct Pattern {
    origin: Arc<Origin>,
    program: Box<dyn Program>,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Pattern, PatternError> {
        Pattern::compile(CompileOptions::new(source))
    }

    pub fn with_options(source: &str, options: impl Into<u32>) -> Result<Pattern, PatternError> {
        Pattern::compile(CompileOptions::new(source).options(options))
    }

    pub fn compile(opts: CompileOptions<'_>) -> Result<Pattern, PatternError> {
        Pattern::compile_with(&RegexEngine::new(), opts)
    }

    /// Compile with a specific engine. The encoding, when given, is also
    /// recorded as its option bit.
    pub fn compile_with(engine: &dyn Engine, opts: CompileOptions<'_>) -> Result<Pattern, PatternError> {
        let options = match opts.encoding {
            Some(encoding) => opts.options | encoding.flag().bits(),
            None => opts.options,
        };
        let program = engine.compile(opts.source, options, opts.encoding)?;
        let origin = Origin {
            source: opts.source.to_string(),
            options,
            names: program.group_names(),
        };
        Ok(Pattern {
            origin: Arc::new(origin),
            program,
        })
    }

    /// A pattern source matching `literal` verbatim under the default engine.
    pub fn escape(literal: &str) -> String {
        Pattern::escape_with(&RegexEngine::new(), literal)
    }

    pub fn quote(literal: &str) -> String {
        Pattern::escape(literal)
    }

    /// Escape for the syntax of `engine`, to be compiled by that engine.
    pub fn escape_with(engine: &dyn Engine, literal: &str) -> String {
        engine.escape(literal)
    }

    pub fn quote_with(engine: &dyn Engine, literal: &str) -> String {
        Pattern::escape_with(engine, literal)
    }

    pub fn source(&self) -> &str {
        &self.origin.source
    }

    /// The option bitmask exactly as compiled, engine-specific bits included.
    pub fn options(&self) -> u32 {
        self.origin.options
    }

    /// The option bits this crate knows about.
    pub fn flags(&self) -> Options {
        Options::from_bits_truncate(self.origin.options)
    }

    pub fn encoding(&self) -> Option<Encoding> {
        Encoding::from_bits(self.origin.options)
    }

    pub fn is_fixed_encoding(&self) -> bool {
        self.flags().contains(Options::FIXEDENCODING)
    }

    pub fn is_casefold(&self) -> bool {
        self.origin.options & Options::IGNORECASE.bits() != 0
    }

    /// Names of the named groups, in group order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.origin.names.iter().flatten().map(String::as_str)
    }

    pub fn captures<'s>(&self, subject: &'s str) -> Option<MatchResult<'s>> {
        self.captures_at(subject, 0)
    }

    /// Search `subject` from byte offset `start`. A start past the end of the
    /// subject, or inside a character, finds nothing.
    pub fn captures_at<'s>(&self, subject: &'s str, start: usize) -> Option<MatchResult<'s>> {
        if !subject.is_char_boundary(start) {
            log::trace!("/{}/: start {} is not a boundary of the subject", self.source(), start);
            return None;
        }
        let raw = self.program.search(subject, start)?;
        let result = MatchResult::new(subject, raw)?;
        Some(result.with_origin(Arc::clone(&self.origin)))
    }

    /// Whether `subject` matches. The engine's record is checked the same
    /// way `captures` checks it, so an unusable record is no match.
    pub fn is_match(&self, subject: &str) -> bool {
        self.captures(subject).is_some()
    }

    /// Offset of the leftmost match. An absent subject is no match, and the
    /// engine is not consulted.
    pub fn search(&self, subject: Option<&str>) -> Option<usize> {
        let subject = subject?;
        self.captures(subject).and_then(|result| result.begin(0))
    }

    /// Containment test for case-style dispatch. Symbols are matched by
    /// name; any operand that is neither text nor a symbol is `false`
    /// without a match attempt.
    pub fn case_eq<'a>(&self, operand: impl Into<Operand<'a>>) -> bool {
        let operand = operand.into();
        match operand.as_text() {
            Some(text) => self.captures(text).is_some(),
            None => {
                log::trace!("/{}/: {} operand never matches", self.source(), operand.kind());
                false
            }
        }
    }

    /// `search` against the last input recorded in `context`.
    pub fn search_last_input(&self, context: &InputContext) -> Option<usize> {
        self.search(context.last_input())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.origin.source == other.origin.source && self.origin.options == other.origin.options
    }
}

impl Eq for Pattern {}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Pattern, PatternError> {
        Pattern::new(s)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(s: &str) -> Result<Pattern, PatternError> {
        Pattern::new(s)
    }
}

// (?i-mx:source)
impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let on = self.flags() & MODE_FLAGS;
        let off = MODE_FLAGS - on;
        write!(f, "(?{}", on)?;
        if !off.is_empty() {
            write!(f, "-{}", off)?;
        }
        write!(f, ":{})", self.source())
    }
}

// /source/i
impl Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags() & MODE_FLAGS)?;
        if self.flags().contains(Options::NOENCODING) {
            write!(f, "{}", Encoding::NoEncoding.letter())?;
        }
        Ok(())
    }
}
