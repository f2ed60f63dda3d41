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

//! Conversion of integers into the textual forms used in generated names.
//!
//! Instrument qualifiers and movement numbers appear in several different
//! shapes across a generated project: as plain digits in file names, as
//! cardinal or ordinal words in symbolic variable names, and as roman
//! numerals on printed part names. [`format`] produces all of them, each
//! normalized to a filesystem-safe token (lowercase, `_` separators).

use std::fmt;
use thiserror::Error;

/// A specialized [`Result`] type for numeral formatting.
pub type Result<T> = std::result::Result<T, RangeError>;

/// The textual forms a number can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// Plain decimal digits.
    Digits,
    /// Cardinal number word, e.g. `thirty_one`.
    CardinalWord,
    /// Ordinal number word, e.g. `thirty_first`.
    OrdinalWord,
    /// Roman numeral. Only 1 through 89 are supported.
    Roman,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Form::Digits => "digits",
            Form::CardinalWord => "cardinal word",
            Form::OrdinalWord => "ordinal word",
            Form::Roman => "roman numeral",
        };
        write!(f, "{}", name)
    }
}

/// The error returned when a number falls outside the supported range of a
/// [`Form`].
///
/// Numbers outside the range are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the {form} form only supports numbers between {min} and {max}, got {number}")]
pub struct RangeError {
    pub number: u32,
    pub form: Form,
    pub min: u32,
    pub max: u32,
}

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const ROMAN_UNITS: [&str; 11] = [
    "", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X",
];

/// Renders `number` in the requested [`Form`].
///
/// Word forms support 1 through 999, roman numerals 1 through 89, and the
/// digits form any number. Out of range values return a [`RangeError`].
pub fn format(number: u32, form: Form) -> Result<String> {
    match form {
        Form::Digits => Ok(number.to_string()),
        Form::CardinalWord => cardinal(number),
        Form::OrdinalWord => ordinal(number),
        Form::Roman => roman(number),
    }
}

fn check_range(number: u32, form: Form, min: u32, max: u32) -> Result<()> {
    if number < min || number > max {
        return Err(RangeError {
            number,
            form,
            min,
            max,
        });
    }
    Ok(())
}

fn cardinal(number: u32) -> Result<String> {
    check_range(number, Form::CardinalWord, 1, 999)?;
    Ok(cardinal_parts(number).join("_"))
}

fn cardinal_parts(number: u32) -> Vec<&'static str> {
    let mut parts = Vec::new();
    let mut n = number as usize;
    if n >= 100 {
        parts.push(ONES[n / 100]);
        parts.push("hundred");
        n %= 100;
    }
    if n >= 20 {
        parts.push(TENS[n / 10]);
        n %= 10;
    }
    if n > 0 && n < 20 {
        parts.push(ONES[n]);
    }
    parts
}

fn ordinal(number: u32) -> Result<String> {
    check_range(number, Form::OrdinalWord, 1, 999)?;
    let mut parts = cardinal_parts(number);
    let last = match parts.pop() {
        Some(word) => ordinalize(word),
        None => return Ok(String::new()),
    };
    let mut words: Vec<String> = parts.iter().map(|part| (*part).to_owned()).collect();
    words.push(last);
    Ok(words.join("_"))
}

fn ordinalize(word: &str) -> String {
    match word {
        "one" => "first".to_owned(),
        "two" => "second".to_owned(),
        "three" => "third".to_owned(),
        "five" => "fifth".to_owned(),
        "eight" => "eighth".to_owned(),
        "nine" => "ninth".to_owned(),
        "twelve" => "twelfth".to_owned(),
        word if word.ends_with('y') => format!("{}ieth", &word[..word.len() - 1]),
        word => format!("{}th", word),
    }
}

fn roman(number: u32) -> Result<String> {
    check_range(number, Form::Roman, 1, 89)?;
    let mut remaining = number as usize;
    let mut numeral = String::new();
    if remaining >= 50 {
        numeral.push('L');
        remaining -= 50;
    } else if remaining >= 40 {
        // Nonstandard: the 40s band renders as "IL", not "XL". Generated
        // filenames and variable names depend on this exact output.
        numeral.push_str("IL");
        remaining -= 40;
    }
    while remaining > 10 {
        numeral.push('X');
        remaining -= 10;
    }
    if remaining != 0 {
        numeral.push_str(ROMAN_UNITS[remaining]);
    }
    Ok(numeral)
}
