use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use std::{fmt::Display, str::FromStr};

// flag letters in the order they are printed.
const FLAG_LETTERS: [(char, Options); 3] = [
    ('m', Options::MULTILINE),
    ('i', Options::IGNORECASE),
    ('x', Options::EXTENDED),
];

bitflags! {
    /// Option bits a pattern is compiled with.
    ///
    /// The values are stable: they are what `Pattern::options` reports and
    /// what callers pass back in. Bits not listed here belong to the engine
    /// and are carried through a pattern untouched.
    pub struct Options: u32 {
        const IGNORECASE    = 1;
        const EXTENDED      = 2;
        const MULTILINE     = 4;
        const FIXEDENCODING = 16;
        const NOENCODING    = 32;
    }
}

impl From<Options> for u32 {
    fn from(options: Options) -> u32 {
        options.bits()
    }
}

impl Display for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (letter, flag) in FLAG_LETTERS {
            if self.contains(flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptionsError {
    flag: char,
}

impl ParseOptionsError {
    pub fn flag(&self) -> char {
        self.flag
    }
}

impl Display for ParseOptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown regexp option: {}", self.flag)
    }
}

impl std::error::Error for ParseOptionsError {}

impl FromStr for Options {
    type Err = ParseOptionsError;

    /// Parse flag letters such as `"mix"`. Order and repetition don't matter.
    fn from_str(s: &str) -> Result<Options, ParseOptionsError> {
        s.chars().try_fold(Options::empty(), |options, ch| {
            FLAG_LETTERS
                .iter()
                .find(|(letter, _)| *letter == ch)
                .map(|(_, flag)| options | *flag)
                .ok_or(ParseOptionsError { flag: ch })
        })
    }
}

/// Encoding a pattern is pinned to.
///
/// Identifiers are decoded by their first character, case-insensitively, so
/// `"n"`, `"N"` and `"none"` all select `NoEncoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum Encoding {
    NoEncoding = 0x6e, // 'n'
    Utf8 = 0x75,       // 'u'
}

impl Encoding {
    pub fn from_identifier(identifier: &str) -> Option<Encoding> {
        let first = identifier.bytes().next()?.to_ascii_lowercase();
        match Encoding::try_from(first) {
            Ok(encoding) => {
                log::trace!("regexp encoding {} from {:?}", encoding, identifier);
                Some(encoding)
            }
            Err(_) => {
                log::warn!("ignoring unknown regexp encoding {:?}", identifier);
                None
            }
        }
    }

    /// The identifier letter, as accepted by `from_identifier`.
    pub fn letter(self) -> char {
        char::from(u8::from(self))
    }

    /// The option bit recording this encoding.
    pub fn flag(self) -> Options {
        match self {
            Encoding::NoEncoding => Options::NOENCODING,
            Encoding::Utf8 => Options::FIXEDENCODING,
        }
    }

    /// Decode the encoding recorded in a raw option bitmask.
    pub fn from_bits(bits: u32) -> Option<Encoding> {
        let options = Options::from_bits_truncate(bits);
        if options.contains(Options::NOENCODING) {
            Some(Encoding::NoEncoding)
        } else if options.contains(Options::FIXEDENCODING) {
            Some(Encoding::Utf8)
        } else {
            None
        }
    }
}
