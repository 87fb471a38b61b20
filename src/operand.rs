use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

/// An interned symbolic name, such as `:foo`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        Symbol(Arc::from(name))
    }

    /// The textual form of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Symbol {
        Symbol::new(name)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Right-hand side of the containment test (`Pattern::case_eq`).
///
/// Only text and symbols can match; everything else is `Other` and is
/// rejected before the engine is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Text(&'a str),
    Symbol(&'a Symbol),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OperandKind {
    Text,
    Symbol,
    Other,
}

impl<'a> Operand<'a> {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Text(_) => OperandKind::Text,
            Operand::Symbol(_) => OperandKind::Symbol,
            Operand::Other => OperandKind::Other,
        }
    }

    /// The text a pattern is matched against, `None` for `Other`.
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Operand::Text(text) => Some(text),
            Operand::Symbol(symbol) => Some(symbol.as_str()),
            Operand::Other => None,
        }
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Operand<'a> {
        Operand::Text(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Operand<'a> {
        Operand::Text(text)
    }
}

impl<'a> From<&'a Symbol> for Operand<'a> {
    fn from(symbol: &'a Symbol) -> Operand<'a> {
        Operand::Symbol(symbol)
    }
}

// a missing value is not text.
impl<'a> From<Option<&'a str>> for Operand<'a> {
    fn from(text: Option<&'a str>) -> Operand<'a> {
        text.map_or(Operand::Other, Operand::Text)
    }
}

macro_rules! other_operand {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand<'_> {
                fn from(_: $ty) -> Self {
                    Operand::Other
                }
            }
        )*
    };
}

other_operand!(i32, i64, u32, u64, usize, f64, bool, char, ());
