// Scorekit
// Copyright (C) 2026  Scorekit Developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Normalized names and the derivation of file, directory, and variable
//! names.
//!
//! Everything a generated project is allowed to call a file is derived from a
//! [`Name`]: a normalized base token plus an optional number qualifier that
//! distinguishes same-named entities ("Violin 2"). A `Name` knows how to spell
//! itself as a per-movement fragment file, a part file, a directory, and a
//! LilyPond variable reference, and those spellings must stay stable across
//! runs because generated files refer to each other by them.

use crate::numerals::{self, Form, RangeError};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

/// The file extension for per-movement note fragments.
pub const FRAGMENT_EXT: &str = "ily";

/// The file extension for part and score files.
pub const PART_EXT: &str = "ly";

/// The statement sigil prefixed to symbolic variable references.
pub const VAR_SIGIL: char = '\\';

/// The error type returned by name derivation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Movement numbers start at 1.
    #[error("movement number must be a positive integer, got {0}")]
    Movement(u32),
    /// A number could not be rendered in the required textual form.
    #[error(transparent)]
    Numeral(#[from] RangeError),
}

/// Collapses whitespace, hyphens, and underscore runs to single underscores
/// and lowercases the result.
///
/// This is idempotent, so already normalized tokens pass through unchanged.
pub fn normalize_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Turns a normalized token back into a human-readable title-cased name.
///
/// Short connective words stay lowercase unless they lead, so
/// `clarinet_in_bb` becomes `Clarinet in Bb`.
pub fn display_name(token: &str) -> String {
    const SMALL_WORDS: [&str; 6] = ["a", "an", "and", "in", "of", "the"];
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| {
            if index > 0 && SMALL_WORDS.contains(&word) {
                word.to_owned()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A normalized base name with an optional number qualifier.
///
/// The cardinal-word and roman forms of the qualifier are computed eagerly by
/// [`Name::numbered`] so that every later derivation is a pure function of
/// stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NameRepr", into = "NameRepr")]
pub struct Name {
    base: String,
    number: Option<u32>,
    numword: String,
    roman: String,
}

// The serialized shape of a Name. The derived word and roman forms are
// per-use state, not identity, and are recomputed on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NameRepr {
    name: String,
    number: Option<u32>,
}

impl TryFrom<NameRepr> for Name {
    type Error = RangeError;

    fn try_from(repr: NameRepr) -> Result<Name, RangeError> {
        match repr.number {
            Some(number) => Name::numbered(&repr.name, number),
            None => Ok(Name::new(&repr.name)),
        }
    }
}

impl From<Name> for NameRepr {
    fn from(name: Name) -> NameRepr {
        NameRepr {
            name: name.base,
            number: name.number,
        }
    }
}

impl Name {
    /// Creates an unqualified name from a raw string, normalizing it.
    pub fn new(name: &str) -> Name {
        Name {
            base: normalize_name(name),
            number: None,
            numword: String::new(),
            roman: String::new(),
        }
    }

    /// Creates a numbered name, e.g. "Violin 2".
    ///
    /// The number must be between 1 and 89 so that it can be rendered as a
    /// roman numeral on printed parts.
    pub fn numbered(name: &str, number: u32) -> Result<Name, RangeError> {
        let numword = numerals::format(number, Form::CardinalWord)?;
        let roman = numerals::format(number, Form::Roman)?;
        Ok(Name {
            base: normalize_name(name),
            number: Some(number),
            numword,
            roman,
        })
    }

    /// The normalized base token.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The number qualifier, if any.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// The cardinal-word form of the qualifier, or `""` when unqualified.
    pub fn numword(&self) -> &str {
        &self.numword
    }

    /// The roman numeral form of the qualifier, or `""` when unqualified.
    pub fn roman(&self) -> &str {
        &self.roman
    }

    /// Joins the qualified base with the movement number in the given form.
    ///
    /// Word forms qualify the base with the cardinal word of the number,
    /// digit forms with its digits. The ordinal form carries a `_mov` suffix.
    fn movement(&self, movement: u32, form: Form) -> Result<String, NameError> {
        if movement == 0 {
            return Err(NameError::Movement(movement));
        }
        let full_name = match self.number {
            Some(number) => match form {
                Form::OrdinalWord | Form::CardinalWord => {
                    format!("{}_{}", self.base, self.numword)
                }
                _ => format!("{}{}", self.base, number),
            },
            None => self.base.clone(),
        };
        let mut num = numerals::format(movement, form)?;
        if form == Form::OrdinalWord {
            num.push_str("_mov");
        }
        Ok(format!("{}_{}", full_name, num))
    }

    /// The file name of this name's note fragment for a movement, e.g.
    /// `violin2_3.ily`.
    pub fn movement_file_name(&self, movement: u32) -> Result<String, NameError> {
        Ok(format!(
            "{}.{}",
            self.movement(movement, Form::Digits)?,
            FRAGMENT_EXT
        ))
    }

    /// The file name of this name's part file, e.g. `o12_violin2.ly`.
    ///
    /// A prefix, when given, is stringified and joined with an underscore, so
    /// numeric prefixes work too.
    pub fn part_file_name<P: fmt::Display>(&self, prefix: Option<P>) -> String {
        let mut name = match prefix {
            Some(prefix) => format!("{}_{}", prefix, self.base),
            None => self.base.clone(),
        };
        if let Some(number) = self.number {
            name.push_str(&number.to_string());
        }
        format!("{}.{}", name, PART_EXT)
    }

    /// The directory name holding this name's fragments, e.g. `violin2`.
    pub fn dir_name(&self) -> String {
        let mut name = self.base.clone();
        if let Some(number) = self.number {
            name.push_str(&number.to_string());
        }
        name
    }

    /// The symbolic variable reference for a movement, e.g.
    /// `\violin_two_first_mov`.
    ///
    /// The movement number is spelled as an ordinal word and the qualifier as
    /// a cardinal word. `sigil` controls the leading statement sigil.
    pub fn var_name(&self, movement: u32, sigil: bool) -> Result<String, NameError> {
        let reference = self.movement(movement, Form::OrdinalWord)?;
        if sigil {
            Ok(format!("{}{}", VAR_SIGIL, reference))
        } else {
            Ok(reference)
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
