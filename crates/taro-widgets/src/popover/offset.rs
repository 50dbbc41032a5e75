//! Offset expressions: `"0"`, `"100%"`, `"50% - 2px"`.
//!
//! An expression is a sum of signed terms. A term is a number with an
//! optional unit: `px` or no unit is an absolute distance in terminal cells,
//! `%` is a fraction of the reference dimension the expression is evaluated
//! against. This is parsed once into an [`OffsetExpr`]; nothing is evaluated
//! as code.

use std::fmt;
use std::str::FromStr;

/// Unit of one offset term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// A distance in cells (`px` or unitless).
    Absolute,
    /// A percentage of the reference dimension.
    Percent,
}

/// One signed term of an offset expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// Signed magnitude.
    pub value: f64,
    /// How `value` is interpreted.
    pub unit: Unit,
}

impl Term {
    /// Evaluate against a reference `dimension`.
    pub fn eval(&self, dimension: f64) -> f64 {
        match self.unit {
            Unit::Absolute => self.value,
            Unit::Percent => dimension * (self.value / 100.0),
        }
    }
}

/// Errors from [`OffsetExpr::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OffsetError {
    /// The input was empty or only whitespace.
    #[error("offset expression is empty")]
    Empty,
    /// A character that is not part of the grammar.
    #[error("unexpected '{ch}' at byte {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset into the input.
        pos: usize,
    },
    /// A sign or operator that is not followed by a number.
    #[error("expected a number at byte {pos}")]
    MissingTerm {
        /// Byte offset into the input.
        pos: usize,
    },
    /// Digits that do not form a number, such as `1.`.
    #[error("invalid number '{text}' at byte {pos}")]
    InvalidNumber {
        /// The rejected text.
        text: String,
        /// Byte offset into the input.
        pos: usize,
    },
}

/// A parsed offset expression.
///
/// ```
/// use taro_widgets::popover::OffsetExpr;
///
/// let expr: OffsetExpr = "100% - 2".parse().unwrap();
/// assert_eq!(expr.eval(50.0), 48.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetExpr {
    terms: Vec<Term>,
}

impl OffsetExpr {
    /// The empty expression, evaluating to zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A single absolute term.
    pub fn cells(value: f64) -> Self {
        Self {
            terms: vec![Term {
                value,
                unit: Unit::Absolute,
            }],
        }
    }

    /// A single percentage term.
    pub fn percent(value: f64) -> Self {
        Self {
            terms: vec![Term {
                value,
                unit: Unit::Percent,
            }],
        }
    }

    /// Parse an expression.
    pub fn parse(input: &str) -> Result<Self, OffsetError> {
        Parser::new(input).expression()
    }

    /// The terms, in source order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Evaluate against a reference `dimension` (width for horizontal
    /// offsets, height for vertical ones).
    pub fn eval(&self, dimension: f64) -> f64 {
        self.terms.iter().map(|t| t.eval(dimension)).sum()
    }
}

impl FromStr for OffsetExpr {
    type Err = OffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OffsetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            let unit = match term.unit {
                Unit::Absolute => "",
                Unit::Percent => "%",
            };
            match (i, term.value < 0.0) {
                (0, _) => write!(f, "{}{unit}", term.value)?,
                (_, true) => write!(f, " - {}{unit}", -term.value)?,
                (_, false) => write!(f, " + {}{unit}", term.value)?,
            }
        }
        Ok(())
    }
}

/// Horizontal and vertical offsets of a popover from its reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Offset {
    /// Horizontal offset, percentages relative to the reference width.
    pub left: OffsetExpr,
    /// Vertical offset, percentages relative to the reference height.
    pub top: OffsetExpr,
}

impl Offset {
    /// Parse both axes.
    pub fn new(left: &str, top: &str) -> Result<Self, OffsetError> {
        Ok(Self {
            left: left.parse()?,
            top: top.parse()?,
        })
    }

    /// Directly below the reference: `{ left: "0", top: "100%" }`.
    pub fn below() -> Self {
        Self {
            left: OffsetExpr::zero(),
            top: OffsetExpr::percent(100.0),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expression(mut self) -> Result<OffsetExpr, OffsetError> {
        self.skip_ws();
        if self.peek().is_none() {
            return Err(OffsetError::Empty);
        }

        let mut terms = vec![self.term(1.0)?];
        loop {
            self.skip_ws();
            let sign = match self.peek() {
                None => break,
                Some('+') => 1.0,
                Some('-') => -1.0,
                Some(ch) => return Err(OffsetError::UnexpectedChar { ch, pos: self.pos }),
            };
            self.bump();
            terms.push(self.term(sign)?);
        }
        Ok(OffsetExpr { terms })
    }

    fn term(&mut self, mut sign: f64) -> Result<Term, OffsetError> {
        self.skip_ws();
        while let Some(ch @ ('+' | '-')) = self.peek() {
            if ch == '-' {
                sign = -sign;
            }
            self.bump();
            self.skip_ws();
        }

        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        let text = &self.input[start..self.pos];
        if text.is_empty() {
            return Err(match self.peek() {
                Some(ch) => OffsetError::UnexpectedChar { ch, pos: self.pos },
                None => OffsetError::MissingTerm { pos: self.pos },
            });
        }
        let value: f64 = match text.parse() {
            Ok(v) if !text.ends_with('.') && !text.starts_with('.') => v,
            _ => {
                return Err(OffsetError::InvalidNumber {
                    text: text.to_string(),
                    pos: start,
                })
            }
        };

        let unit = if self.rest().starts_with("px") {
            self.pos += 2;
            Unit::Absolute
        } else if self.peek() == Some('%') {
            self.bump();
            Unit::Percent
        } else {
            Unit::Absolute
        };

        Ok(Term {
            value: sign * value,
            unit,
        })
    }
}
