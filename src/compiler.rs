//! Compiler from pattern strings to matcher-unit sequences.
//!
//! The compiler walks the pattern left to right in two modes: normal and
//! inside-a-bracket-expression. Quantifiers are not separate units; they
//! mutate the repetition bounds of the most recently emitted unit, which is
//! why they need no lookahead.

use std::iter::Peekable;
use std::str::Chars;

use crate::char_class::ClassSet;
use crate::unit::{CompiledPattern, Unit, UnitKind};

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A quantifier with no unit before it to bind to.
    DanglingQuantifier(char),
    /// The pattern ended inside a `[...]` bracket expression.
    UnterminatedClass,
    /// The pattern ended with an unescaped backslash.
    TrailingEscape,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingQuantifier(q) => {
                write!(f, "Quantifier {q:?} has nothing to apply to")
            }
            Self::UnterminatedClass => write!(f, "Unclosed character class '[' in pattern"),
            Self::TrailingEscape => write!(f, "Unexpected end of pattern after '\\'"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Compile a pattern string into a [`CompiledPattern`].
///
/// No partial pattern is returned on failure.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    Compiler {
        chars: pattern.chars().peekable(),
        units: Vec::new(),
    }
    .compile()
}

struct Compiler<'a> {
    chars: Peekable<Chars<'a>>,
    units: Vec<Unit>,
}

impl Compiler<'_> {
    fn compile(mut self) -> Result<CompiledPattern, PatternError> {
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => {
                    // The escaped character is always a literal, operator or not.
                    let lit = self.chars.next().ok_or(PatternError::TrailingEscape)?;
                    self.push(UnitKind::Literal(lit));
                }
                '.' => self.push(UnitKind::Any),
                '?' => self.last_unit('?')?.set_min_repeat(0),
                '*' => {
                    let unit = self.last_unit('*')?;
                    unit.set_min_repeat(0);
                    unit.set_max_repeat(None);
                }
                '+' => self.last_unit('+')?.set_max_repeat(None),
                '[' => self.compile_class()?,
                other => self.push(UnitKind::Literal(other)),
            }
        }
        Ok(CompiledPattern::from_units(self.units))
    }

    fn push(&mut self, kind: UnitKind) {
        self.units.push(Unit::new(kind));
    }

    /// The unit a quantifier binds to, or an error naming the quantifier.
    fn last_unit(&mut self, quantifier: char) -> Result<&mut Unit, PatternError> {
        self.units
            .last_mut()
            .ok_or(PatternError::DanglingQuantifier(quantifier))
    }

    /// Parse a bracket expression (the `[` has already been consumed).
    ///
    /// `^` negates only as the very first character; everywhere else it is an
    /// ordinary member. Quantifier characters are ordinary members too.
    fn compile_class(&mut self) -> Result<(), PatternError> {
        let negated = self.chars.peek() == Some(&'^');
        if negated {
            self.chars.next(); // consume '^'
        }

        let mut members = ClassSet::new();
        loop {
            match self.chars.next() {
                None => return Err(PatternError::UnterminatedClass),
                Some(']') => break,
                Some(c) => members.insert(c),
            }
        }

        self.push(if negated {
            UnitKind::NegatedClass(members)
        } else {
            UnitKind::Class(members)
        });
        Ok(())
    }
}
