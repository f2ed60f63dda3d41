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

//! Instruments and ensembles.
//!
//! An [`Instrument`] layers engraving metadata (clef, transposition,
//! abbreviation, MIDI patch) on top of a [`Name`], and knows how to hydrate
//! itself from and persist itself into the record [`Store`]. An [`Ensemble`]
//! is an ordered group of instruments persisted by reference: the stored
//! ensemble record carries only `(name, number)` pairs, and loading one fails
//! atomically if any referenced instrument is missing from the store.

use crate::names::{display_name, normalize_name, Name};
use crate::numerals::RangeError;
use crate::store::{Record, Store, StoreError, ENSEMBLES_TABLE, INSTRUMENTS_TABLE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The error returned when a string does not name a clef.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid clef: '{0}'")]
pub struct InvalidClef(pub String);

macro_rules! clefs {
    ( $( $variant:ident => $name:literal ),* $(,)? ) => {
        /// The fixed set of clefs LilyPond understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum Clef {
            $( #[serde(rename = $name)] $variant, )*
        }

        impl Clef {
            /// The clef's name as written in LilyPond source.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Clef::$variant => $name, )*
                }
            }

            /// Every supported clef.
            pub fn all() -> &'static [Clef] {
                &[ $( Clef::$variant, )* ]
            }
        }

        impl FromStr for Clef {
            type Err = InvalidClef;

            fn from_str(s: &str) -> Result<Clef, InvalidClef> {
                match s {
                    $( $name => Ok(Clef::$variant), )*
                    other => Err(InvalidClef(other.to_owned())),
                }
            }
        }
    };
}

clefs! {
    G => "G",
    Treble => "treble",
    French => "french",
    TenorG => "tenorG",
    Soprano => "soprano",
    C => "C",
    Tenor => "tenor",
    VarC => "varC",
    TenorVarC => "tenorvarC",
    VarBaritone => "varbaritone",
    F => "F",
    Subbass => "subbass",
    G2 => "G2",
    Violin => "violin",
    GG => "GG",
    Mezzosoprano => "mezzosoprano",
    Alto => "alto",
    Baritone => "baritone",
    AltoVarC => "altovarC",
    BaritoneVarC => "baritonevarC",
    BaritoneVarF => "baritonevarF",
    Bass => "bass",
}

impl Default for Clef {
    fn default() -> Clef {
        Clef::Treble
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error type returned when loading an instrument.
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// The record is absent from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored record does not have the shape of an instrument.
    #[error("malformed instrument record for '{name}': {source}")]
    Record {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    /// The number qualifier cannot be rendered as words or numerals.
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// The error type returned when loading an ensemble.
#[derive(Debug, Error)]
pub enum EnsembleError {
    /// The ensemble record itself is absent from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The stored record does not have the shape of an ensemble.
    #[error("malformed ensemble record for '{name}': {source}")]
    Record {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    /// A member instrument could not be resolved. The whole load fails; no
    /// partial ensemble is returned.
    #[error("ensemble '{ensemble}' references an instrument that is not in the store")]
    MissingInstrument {
        ensemble: String,
        #[source]
        source: InstrumentError,
    },
}

// The persisted shape of an instrument. The number qualifier and its derived
// forms are use-site state, not instrument identity, so they are omitted.
#[derive(Debug, Serialize, Deserialize)]
struct StoredInstrument {
    name: String,
    #[serde(default)]
    abbr: String,
    #[serde(default)]
    clef: Clef,
    #[serde(default)]
    transposition: Option<String>,
    #[serde(default)]
    keyboard: bool,
    #[serde(default)]
    midi: Option<String>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    catalog_name: Option<String>,
}

/// A musical instrument and its engraving metadata.
///
/// Constructed directly with [`Instrument::new`], numbered with
/// [`Instrument::numbered`] ("Violin 2"), or hydrated from the record store
/// with [`Instrument::load_from_store`]. Optional metadata is set with
/// builder methods:
///
/// ```
/// use scorekit::instrument::{Clef, Instrument};
///
/// let cello = Instrument::new("Violoncello")
///     .abbr("Vc.")
///     .clef(Clef::Bass)
///     .midi("cello")
///     .family("strings");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    #[serde(flatten)]
    pub name: Name,
    /// Short abbreviation printed on systems after the first.
    #[serde(default)]
    pub abbr: String,
    /// The instrument's usual clef.
    #[serde(default)]
    pub clef: Clef,
    /// The key the instrument sounds in; `None` means concert pitch.
    #[serde(default)]
    pub transposition: Option<String>,
    /// Keyboard instruments get a grand staff instead of a single staff.
    #[serde(default)]
    pub keyboard: bool,
    /// The MIDI patch name used for playback output.
    #[serde(default)]
    pub midi: Option<String>,
    /// The instrument family, as a normalized token.
    #[serde(default)]
    pub family: Option<String>,
    /// The name the external submission catalog knows this instrument by.
    #[serde(default)]
    pub catalog_name: Option<String>,
}

impl Instrument {
    /// Creates an instrument with default metadata.
    pub fn new(name: &str) -> Instrument {
        Instrument::with_name(Name::new(name))
    }

    /// Creates a numbered instrument, e.g. "Violin 2". The number must be
    /// between 1 and 89.
    pub fn numbered(name: &str, number: u32) -> Result<Instrument, RangeError> {
        Ok(Instrument::with_name(Name::numbered(name, number)?))
    }

    fn with_name(name: Name) -> Instrument {
        Instrument {
            name,
            abbr: String::new(),
            clef: Clef::default(),
            transposition: None,
            keyboard: false,
            midi: None,
            family: None,
            catalog_name: None,
        }
    }

    /// Sets the printed abbreviation.
    pub fn abbr(mut self, abbr: &str) -> Instrument {
        self.abbr = abbr.to_owned();
        self
    }

    /// Sets the clef.
    pub fn clef(mut self, clef: Clef) -> Instrument {
        self.clef = clef;
        self
    }

    /// Sets the transposition.
    pub fn transposition(mut self, transposition: &str) -> Instrument {
        self.transposition = Some(transposition.to_owned());
        self
    }

    /// Marks the instrument as a keyboard (grand staff) instrument.
    pub fn keyboard(mut self, keyboard: bool) -> Instrument {
        self.keyboard = keyboard;
        self
    }

    /// Sets the MIDI patch name.
    pub fn midi(mut self, midi: &str) -> Instrument {
        self.midi = Some(midi.to_owned());
        self
    }

    /// Sets the instrument family; the value is normalized.
    pub fn family(mut self, family: &str) -> Instrument {
        self.family = Some(normalize_name(family));
        self
    }

    /// Sets the external catalog name.
    pub fn catalog_name(mut self, catalog_name: &str) -> Instrument {
        self.catalog_name = Some(catalog_name.to_owned());
        self
    }

    /// Loads an instrument from the store's `instruments` table by normalized
    /// name, optionally layering a number qualifier on top.
    ///
    /// A missing record is a [`StoreError::NotFound`], propagated with the
    /// searched key and table named.
    pub fn load_from_store(
        name: &str,
        store: &Store,
        number: Option<u32>,
    ) -> Result<Instrument, InstrumentError> {
        let name = normalize_name(name);
        let record = store.get_exact(&name, INSTRUMENTS_TABLE)?;
        let stored: StoredInstrument = serde_json::from_value(Value::Object(record.clone()))
            .map_err(|source| InstrumentError::Record {
                name: name.clone(),
                source,
            })?;
        let mut instrument = match number {
            Some(number) => Instrument::numbered(&stored.name, number)?,
            None => Instrument::new(&stored.name),
        };
        instrument.abbr = stored.abbr;
        instrument.clef = stored.clef;
        instrument.transposition = stored.transposition;
        instrument.keyboard = stored.keyboard;
        instrument.midi = stored.midi;
        instrument.family = stored.family;
        instrument.catalog_name = stored.catalog_name;
        Ok(instrument)
    }

    /// Inserts this instrument into the store's `instruments` table.
    ///
    /// The number qualifier and its derived forms are not persisted. No
    /// duplicate check is made here; callers should search the table first.
    pub fn persist(&self, store: &mut Store) -> Result<(), StoreError> {
        store.insert(INSTRUMENTS_TABLE, self.record())
    }

    fn record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".to_owned(), Value::from(self.name.base()));
        record.insert("abbr".to_owned(), Value::from(self.abbr.as_str()));
        record.insert("clef".to_owned(), Value::from(self.clef.as_str()));
        record.insert(
            "transposition".to_owned(),
            Value::from(self.transposition.clone()),
        );
        record.insert("keyboard".to_owned(), Value::from(self.keyboard));
        record.insert("midi".to_owned(), Value::from(self.midi.clone()));
        record.insert("family".to_owned(), Value::from(self.family.clone()));
        record.insert(
            "catalog_name".to_owned(),
            Value::from(self.catalog_name.clone()),
        );
        record
    }

    /// The stored catalog name, or a best-effort fuzzy guess against the
    /// given candidate list.
    ///
    /// A failed guess is absorbed: with no candidates the title-cased display
    /// name is returned instead. A successful guess is cached on the
    /// instance.
    pub fn catalog_name_or_guess(&mut self, candidates: &[String]) -> String {
        if let Some(name) = &self.catalog_name {
            return name.clone();
        }
        let target = self.name.base().replace('_', " ");
        let best = candidates
            .iter()
            .max_by(|a, b| {
                let score_a = strsim::jaro_winkler(&a.to_lowercase(), &target);
                let score_b = strsim::jaro_winkler(&b.to_lowercase(), &target);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned();
        match best {
            Some(name) => {
                self.catalog_name = Some(name.clone());
                name
            }
            None => {
                log::warn!(
                    "no catalog candidates for instrument '{}', using display name",
                    self.name.base()
                );
                display_name(self.name.base())
            }
        }
    }

    /// The name printed at the top of this instrument's part, e.g.
    /// "Violin II".
    ///
    /// Unless `with_key` is set, an ` in X` transposition suffix is stripped
    /// from the display name. Numbered instruments carry their roman numeral.
    pub fn part_name(&self, with_key: bool) -> String {
        let mut name = display_name(self.name.base());
        if !with_key {
            if let Some(position) = name.find(" in ") {
                name.truncate(position);
            }
        }
        if !self.name.roman().is_empty() {
            name.push(' ');
            name.push_str(self.name.roman());
        }
        name
    }
}

// Member reference inside a stored ensemble record.
#[derive(Debug, Serialize, Deserialize)]
struct MemberRef {
    name: String,
    number: Option<u32>,
}

/// An ordered group of instruments under a collective name.
///
/// List order is display and performance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    name: Name,
    instruments: Vec<Instrument>,
}

impl Ensemble {
    /// Creates an empty ensemble.
    pub fn new(name: &str) -> Ensemble {
        Ensemble {
            name: Name::new(name),
            instruments: Vec::new(),
        }
    }

    /// The ensemble's name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The title-cased display form of the ensemble's name.
    pub fn part_name(&self) -> String {
        display_name(self.name.base())
    }

    /// The member instruments, in order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Appends an already constructed instrument.
    pub fn add_instrument(&mut self, instrument: Instrument) {
        self.instruments.push(instrument);
    }

    /// Resolves an instrument from the store and appends it.
    ///
    /// A missing record propagates as an error; nothing is appended then.
    pub fn add_from_store(
        &mut self,
        name: &str,
        store: &Store,
        number: Option<u32>,
    ) -> Result<(), InstrumentError> {
        let instrument = Instrument::load_from_store(name, store, number)?;
        self.instruments.push(instrument);
        Ok(())
    }

    /// Loads an ensemble and all of its member instruments from the store.
    ///
    /// Every member referenced by the stored record must itself resolve; a
    /// single miss fails the whole load with
    /// [`EnsembleError::MissingInstrument`] and no partial ensemble.
    pub fn load_from_store(name: &str, store: &Store) -> Result<Ensemble, EnsembleError> {
        let name = normalize_name(name);
        let record = store.get_exact(&name, ENSEMBLES_TABLE)?;
        let members: Vec<MemberRef> = record
            .get("instruments")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|source| EnsembleError::Record {
                name: name.clone(),
                source,
            })?
            .unwrap_or_default();
        let mut ensemble = Ensemble::new(&name);
        for member in members {
            let instrument = Instrument::load_from_store(&member.name, store, member.number)
                .map_err(|source| EnsembleError::MissingInstrument {
                    ensemble: name.clone(),
                    source,
                })?;
            ensemble.instruments.push(instrument);
        }
        Ok(ensemble)
    }

    /// Inserts this ensemble into the store's `ensembles` table.
    ///
    /// Member instruments not yet present in the `instruments` table are
    /// persisted first. The ensemble record itself references members by
    /// `(name, number)` pairs only, never by full payload.
    pub fn persist(&self, store: &mut Store) -> Result<(), StoreError> {
        for instrument in &self.instruments {
            let existing = store.search(INSTRUMENTS_TABLE, Some(("name", instrument.name.base())));
            if existing.is_empty() {
                instrument.persist(store)?;
            }
        }
        let members: Vec<Value> = self
            .instruments
            .iter()
            .map(|instrument| {
                let mut member = Record::new();
                member.insert("name".to_owned(), Value::from(instrument.name.base()));
                member.insert("number".to_owned(), Value::from(instrument.name.number()));
                Value::Object(member)
            })
            .collect();
        let mut record = Record::new();
        record.insert("name".to_owned(), Value::from(self.name.base()));
        record.insert("instruments".to_owned(), Value::from(members));
        store.insert(ENSEMBLES_TABLE, record)
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clef_names_round_trip() {
        for clef in Clef::all() {
            assert_eq!(Ok(*clef), clef.as_str().parse());
        }
        assert_eq!(
            Err(InvalidClef("trebble".to_owned())),
            "trebble".parse::<Clef>()
        );
    }

    #[test]
    fn numbered_factory_derives_forms() {
        let violin = Instrument::numbered("Violin", 1).unwrap();
        assert_eq!("violin", violin.name.base());
        assert_eq!(Some(1), violin.name.number());
        assert_eq!("one", violin.name.numword());
        assert_eq!("I", violin.name.roman());
        assert_eq!("", violin.abbr);
        assert_eq!(Clef::Treble, violin.clef);
        assert_eq!(None, violin.transposition);
        assert!(!violin.keyboard);
        assert_eq!(None, violin.midi);
        assert_eq!(None, violin.family);
    }

    #[test]
    fn builder_methods() {
        let cello = Instrument::numbered("Violoncello", 2)
            .unwrap()
            .abbr("Vc.")
            .clef(Clef::Bass)
            .midi("violoncello")
            .family("Strings");
        assert_eq!("violoncello", cello.name.base());
        assert_eq!("two", cello.name.numword());
        assert_eq!("II", cello.name.roman());
        assert_eq!("Vc.", cello.abbr);
        assert_eq!(Clef::Bass, cello.clef);
        assert_eq!(Some("violoncello".to_owned()), cello.midi);
        assert_eq!(Some("strings".to_owned()), cello.family);
    }

    #[test]
    fn part_names() {
        let violin = Instrument::numbered("Violin", 2).unwrap();
        assert_eq!("Violin II", violin.part_name(false));

        let clarinet = Instrument::new("Clarinet in Bb").transposition("bb");
        assert_eq!("Clarinet", clarinet.part_name(false));
        assert_eq!("Clarinet in Bb", clarinet.part_name(true));
    }

    #[test]
    fn catalog_guess_falls_back_without_candidates() {
        let mut oboe = Instrument::new("oboe");
        assert_eq!("Oboe", oboe.catalog_name_or_guess(&[]));
        assert_eq!(None, oboe.catalog_name);
    }

    #[test]
    fn catalog_guess_picks_best_match_and_caches() {
        let candidates = vec![
            "Cello".to_owned(),
            "Viola".to_owned(),
            "Violin".to_owned(),
        ];
        let mut violin = Instrument::numbered("Violin", 2).unwrap();
        assert_eq!("Violin", violin.catalog_name_or_guess(&candidates));
        assert_eq!(Some("Violin".to_owned()), violin.catalog_name);
    }

    #[test]
    fn stored_form_omits_qualifier() {
        let violin = Instrument::numbered("Violin", 2).unwrap();
        let record = violin.record();
        assert_eq!(Some(&Value::from("violin")), record.get("name"));
        assert!(record.get("number").is_none());
    }

    #[test]
    fn instrument_serde_round_trip() {
        let cello = Instrument::numbered("Violoncello", 2)
            .unwrap()
            .abbr("Vc.")
            .clef(Clef::Bass);
        let json = serde_json::to_string(&cello).unwrap();
        let back: Instrument = serde_json::from_str(&json).unwrap();
        assert_eq!(cello, back);
    }
}
