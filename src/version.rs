//! Release version parsing and comparison.
//!
//! The installer's behavior differs across a decade of compiler suite
//! releases, and every threshold ("2011.3.174", "2013_sp1", "2016", ...) is
//! load-bearing: a wrong comparison silently produces a module file pointing
//! at directories that do not exist. Version strings are therefore parsed
//! with an explicit, fully specified tokenizer rather than a general-purpose
//! version library.
//!
//! A version string splits on every non-alphanumeric byte into tokens; a
//! token is numeric when it is all digits, textual otherwise. Comparison is
//! lexicographic over tokens:
//!
//! - numeric vs numeric compares numerically
//! - textual vs textual compares lexically
//! - numeric sorts before textual at the same position ("2013.1" < "2013_sp1")
//! - a missing trailing token sorts before any present token
//!   ("2013" < "2013_sp1")

use crate::error::{PsxeError, Result};
use std::cmp::Ordering;
use std::fmt;

/// One comparable component of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// All-digit run, compared numerically.
    Num(u64),
    /// Mixed or alphabetic run, compared lexically.
    Str(String),
}

impl Token {
    fn from_run(run: &str) -> Token {
        // Digit runs too long for u64 fall back to textual comparison.
        match run.parse::<u64>() {
            Ok(n) if run.bytes().all(|b| b.is_ascii_digit()) => Token::Num(n),
            _ => Token::Str(run.to_string()),
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Token) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Token) -> Ordering {
        match (self, other) {
            (Token::Num(a), Token::Num(b)) => a.cmp(b),
            (Token::Str(a), Token::Str(b)) => a.cmp(b),
            // Numeric tokens order before textual ones, so "2013.1" sorts
            // below "2013_sp1" in line with the product release sequence.
            (Token::Num(_), Token::Str(_)) => Ordering::Less,
            (Token::Str(_), Token::Num(_)) => Ordering::Greater,
        }
    }
}

/// A parsed release version: the original string plus its comparable tokens.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    tokens: Vec<Token>,
}

impl Version {
    /// Parse a version string like `"2016.0.109"` or `"2013_sp1"`.
    ///
    /// Fails when the input is empty or contains no alphanumeric tokens.
    pub fn parse(input: &str) -> Result<Version> {
        if input.is_empty() {
            return Err(PsxeError::InvalidVersion {
                input: input.to_string(),
                reason: "empty string".to_string(),
            });
        }

        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(PsxeError::InvalidVersion {
                input: input.to_string(),
                reason: "no alphanumeric tokens".to_string(),
            });
        }

        Ok(Version {
            raw: input.to_string(),
            tokens,
        })
    }

    /// The original version string as declared in the install config.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Leading component of the version, e.g. `"2016"` for `"2016.0.109"`.
    ///
    /// Versioned directory names (`debugger_2016`, `documentation_2016`) are
    /// keyed off this component.
    pub fn major_component(&self) -> String {
        match &self.tokens[0] {
            Token::Num(n) => n.to_string(),
            Token::Str(s) => s.clone(),
        }
    }

    /// Leading component as a number, when it is numeric.
    pub fn major(&self) -> Option<u64> {
        match self.tokens[0] {
            Token::Num(n) => Some(n),
            Token::Str(_) => None,
        }
    }

    fn cmp_tokens(&self, other: &[Token]) -> Ordering {
        let len = self.tokens.len().max(other.len());
        for idx in 0..len {
            // A missing trailing token sorts before any present token.
            match (self.tokens.get(idx), other.get(idx)) {
                (Some(a), Some(b)) => match a.cmp(b) {
                    Ordering::Equal => {}
                    ord => return ord,
                },
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => unreachable!(),
            }
        }
        Ordering::Equal
    }

    /// Whether this version is `>=` a trusted threshold literal.
    pub fn at_least(&self, threshold: &str) -> bool {
        self.cmp_tokens(&tokenize(threshold)) != Ordering::Less
    }

    /// Whether this version is `<=` a trusted threshold literal.
    pub fn at_most(&self, threshold: &str) -> bool {
        self.cmp_tokens(&tokenize(threshold)) != Ordering::Greater
    }

    /// Whether this version is strictly below a trusted threshold literal.
    pub fn below(&self, threshold: &str) -> bool {
        self.cmp_tokens(&tokenize(threshold)) == Ordering::Less
    }

    /// Whether this version is strictly above a trusted threshold literal.
    pub fn above(&self, threshold: &str) -> bool {
        self.cmp_tokens(&tokenize(threshold)) == Ordering::Greater
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Version) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> Ordering {
        self.cmp_tokens(&other.tokens)
    }
}

/// Split a version string on non-alphanumeric bytes into comparable tokens.
fn tokenize(input: &str) -> Vec<Token> {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|run| !run.is_empty())
        .map(Token::from_run)
        .collect()
}
