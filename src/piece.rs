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

//! The piece aggregate: headers, composer, movements, and instrumentation.
//!
//! A [`Piece`] holds everything the skeleton generator needs to know about a
//! musical work. Cross-field invariants are checked when the piece is built
//! (see [`PieceBuilder::build`]) or loaded, against the host-provided
//! [`Lexicon`]: the toolchain version must start with a digit, the notation
//! language must be one of the allowed set, key signatures must use allowed
//! notes and modes, and there is always at least one instrument and one
//! movement.

use crate::instrument::{Ensemble, Instrument};
use crate::store::{Record, Store, StoreError, COMPOSERS_TABLE};
use crate::vocab::Lexicon;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The error type for malformed construction input.
///
/// Raised at construction time, never partially applied: a piece either
/// validates as a whole or is not produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("toolchain version '{0}' does not start with a digit")]
    Version(String),
    #[error("language '{given}' is not allowed; must be one of {allowed:?}")]
    Language { given: String, allowed: Vec<String> },
    #[error("key note '{0}' is not in the allowed note list")]
    KeyNote(String),
    #[error("key mode '{0}' is not in the allowed mode list")]
    KeyMode(String),
    #[error("movement number must be a positive integer")]
    MovementNumber,
    #[error("a piece must have at least one movement")]
    NoMovements,
    #[error("a piece must have at least one instrument")]
    NoInstruments,
    #[error("license '{0}' is not an allowed submission license")]
    License(String),
    #[error("style '{0}' is not an allowed submission style")]
    Style(String),
}

/// The error returned when no catalog composer matches a guess.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no matching catalog composer found for '{name}'")]
pub struct NoMatch {
    pub name: String,
}

/// The error type returned when loading a composer from the store.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed composer record for '{name}': {source}")]
    Record {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A composer and the names they go by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composer {
    /// The full name, e.g. "Ludwig van Beethoven".
    pub name: String,
    /// The name the external submission catalog knows this composer by.
    #[serde(default)]
    pub catalog_name: Option<String>,
    /// A stored short form; when absent one is derived on demand.
    #[serde(default)]
    pub short_name: Option<String>,
}

impl Composer {
    /// Creates a composer from a full name.
    pub fn new(name: &str) -> Composer {
        Composer {
            name: name.to_owned(),
            catalog_name: None,
            short_name: None,
        }
    }

    /// The shortened form of the name: initials of all given names joined by
    /// periods, then the surname. "Ludwig van Beethoven" becomes
    /// "L.v. Beethoven"; single-word names pass through unchanged.
    pub fn short_name(&self) -> String {
        if let Some(short_name) = &self.short_name {
            return short_name.clone();
        }
        let mut parts: Vec<&str> = self.name.split_whitespace().collect();
        let surname = match parts.pop() {
            Some(surname) => surname,
            None => return self.name.clone(),
        };
        let initials: String = parts
            .iter()
            .filter_map(|part| part.chars().next())
            .map(|initial| format!("{}.", initial))
            .collect();
        if initials.is_empty() {
            surname.to_owned()
        } else {
            format!("{} {}", initials, surname)
        }
    }

    /// The stored catalog name, or the best fuzzy match from `candidates`.
    ///
    /// Unlike the instrument guess this one is strict: if the best match does
    /// not contain the composer's surname token, no answer is better than a
    /// wrong one and [`NoMatch`] is returned.
    pub fn catalog_name_or_guess(&self, candidates: &[String]) -> Result<String, NoMatch> {
        if let Some(catalog_name) = &self.catalog_name {
            return Ok(catalog_name.clone());
        }
        let surname = self
            .name
            .split_whitespace()
            .last()
            .unwrap_or(&self.name)
            .to_owned();
        let best = candidates
            .iter()
            .max_by(|a, b| {
                let score_a = strsim::jaro_winkler(a, &self.name);
                let score_b = strsim::jaro_winkler(b, &self.name);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .filter(|best| best.contains(&surname));
        match best {
            Some(best) => Ok(best.clone()),
            None => Err(NoMatch {
                name: self.name.clone(),
            }),
        }
    }

    /// Loads a composer from the store's `composers` table.
    ///
    /// The lookup is forgiving: the table is searched by surname substring
    /// and the first record also containing the leading given name wins.
    pub fn load_from_store(name: &str, store: &Store) -> Result<Composer, ComposerError> {
        let mut parts: Vec<&str> = name.split_whitespace().collect();
        let surname = parts.pop().unwrap_or(name);
        let matches = store.search(COMPOSERS_TABLE, Some(("name", surname)));
        let full_name = matches
            .into_iter()
            .find(|candidate| {
                parts
                    .first()
                    .map_or(true, |given| candidate.contains(given))
            })
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
                table: COMPOSERS_TABLE.to_owned(),
            })?;
        let record = store.get_exact(&full_name, COMPOSERS_TABLE)?;
        serde_json::from_value(Value::Object(record.clone())).map_err(|source| {
            ComposerError::Record {
                name: full_name,
                source,
            }
        })
    }

    /// Inserts this composer into the store's `composers` table.
    ///
    /// No duplicate check is made here; callers should search the table
    /// first.
    pub fn persist(&self, store: &mut Store) -> Result<(), StoreError> {
        let mut record = Record::new();
        record.insert("name".to_owned(), Value::from(self.name.as_str()));
        record.insert(
            "catalog_name".to_owned(),
            Value::from(self.catalog_name.clone()),
        );
        record.insert(
            "short_name".to_owned(),
            Value::from(self.short_name.clone()),
        );
        store.insert(COMPOSERS_TABLE, record)
    }
}

/// Expands a license shorthand (`cc4`, `ccsa4`, `pd`) to its proper name.
///
/// Anything else passes through unchanged.
pub fn expand_license(license: &str) -> String {
    match license {
        "cc4" => "Creative Commons Attribution 4.0".to_owned(),
        "ccsa4" => "Creative Commons Attribution-ShareAlike 4.0".to_owned(),
        "pd" => "Public Domain".to_owned(),
        other => other.to_owned(),
    }
}

/// The headers required by the external submission catalog.
///
/// Style and license are validated against the host-provided vocabularies at
/// construction. The composer and instruments fields are derived when the
/// headers are attached to a piece's [`Headers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHeaders {
    /// Where the source material came from, e.g. an edition or publisher.
    pub source: String,
    /// The catalog's style classification.
    pub style: String,
    /// The full license name; shorthands are expanded at construction.
    pub license: String,
    /// The catalog composer name, derived on attach.
    #[serde(default)]
    pub composer: Option<String>,
    /// Who maintains the submission.
    pub maintainer: String,
    #[serde(default)]
    pub maintainer_email: Option<String>,
    #[serde(default)]
    pub maintainer_web: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poet: Option<String>,
    #[serde(default)]
    pub opus: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    /// The catalog's comma-joined instrument list, derived on attach.
    #[serde(default)]
    pub instruments: Option<String>,
}

impl CatalogHeaders {
    /// Creates catalog headers, expanding license shorthands and validating
    /// style and license against the lexicon.
    pub fn new(
        source: &str,
        style: &str,
        license: &str,
        lexicon: &Lexicon,
    ) -> Result<CatalogHeaders, ValidationError> {
        let license = expand_license(license);
        if !lexicon.licenses.iter().any(|allowed| allowed == &license) {
            return Err(ValidationError::License(license));
        }
        if !lexicon.styles.iter().any(|allowed| allowed == style) {
            return Err(ValidationError::Style(style.to_owned()));
        }
        Ok(CatalogHeaders {
            source: source.to_owned(),
            style: style.to_owned(),
            license,
            composer: None,
            maintainer: "Anonymous".to_owned(),
            maintainer_email: None,
            maintainer_web: None,
            title: None,
            poet: None,
            opus: None,
            date: None,
            more_info: None,
            instruments: None,
        })
    }

    /// Sets the maintainer name.
    pub fn maintainer(mut self, maintainer: &str) -> CatalogHeaders {
        self.maintainer = maintainer.to_owned();
        self
    }

    /// Sets the maintainer's email address.
    pub fn maintainer_email(mut self, email: &str) -> CatalogHeaders {
        self.maintainer_email = Some(email.to_owned());
        self
    }

    /// Sets the maintainer's web page.
    pub fn maintainer_web(mut self, web: &str) -> CatalogHeaders {
        self.maintainer_web = Some(web.to_owned());
        self
    }

    /// Sets the catalog opus.
    pub fn opus(mut self, opus: &str) -> CatalogHeaders {
        self.opus = Some(opus.to_owned());
        self
    }

    /// Sets the composition date.
    pub fn date(mut self, date: &str) -> CatalogHeaders {
        self.date = Some(date.to_owned());
        self
    }
}

/// Title page and header block information for a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headers {
    pub title: String,
    pub composer: Composer,
    #[serde(default)]
    pub dedication: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub subsubtitle: Option<String>,
    #[serde(default)]
    pub poet: Option<String>,
    #[serde(default)]
    pub meter: Option<String>,
    #[serde(default)]
    pub arranger: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    /// Optional submission-catalog headers.
    #[serde(default)]
    pub catalog: Option<CatalogHeaders>,
}

impl Headers {
    /// Creates headers with the given title and an anonymous composer.
    pub fn new(title: &str) -> Headers {
        Headers {
            title: title.to_owned(),
            composer: Composer::new("Anonymous"),
            dedication: None,
            subtitle: None,
            subsubtitle: None,
            poet: None,
            meter: None,
            arranger: None,
            tagline: None,
            copyright: None,
            catalog: None,
        }
    }

    /// Sets the composer.
    pub fn composer(mut self, composer: Composer) -> Headers {
        self.composer = composer;
        self
    }

    /// Sets the dedication.
    pub fn dedication(mut self, dedication: &str) -> Headers {
        self.dedication = Some(dedication.to_owned());
        self
    }

    /// Sets the subtitle.
    pub fn subtitle(mut self, subtitle: &str) -> Headers {
        self.subtitle = Some(subtitle.to_owned());
        self
    }

    /// Sets the subsubtitle.
    pub fn subsubtitle(mut self, subsubtitle: &str) -> Headers {
        self.subsubtitle = Some(subsubtitle.to_owned());
        self
    }

    /// Sets the poet.
    pub fn poet(mut self, poet: &str) -> Headers {
        self.poet = Some(poet.to_owned());
        self
    }

    /// Sets the meter line.
    pub fn meter(mut self, meter: &str) -> Headers {
        self.meter = Some(meter.to_owned());
        self
    }

    /// Sets the arranger.
    pub fn arranger(mut self, arranger: &str) -> Headers {
        self.arranger = Some(arranger.to_owned());
        self
    }

    /// Sets the tagline.
    pub fn tagline(mut self, tagline: &str) -> Headers {
        self.tagline = Some(tagline.to_owned());
        self
    }

    /// Sets the copyright line.
    pub fn copyright(mut self, copyright: &str) -> Headers {
        self.copyright = Some(copyright.to_owned());
        self
    }

    /// Attaches submission-catalog headers, deriving the catalog composer
    /// and instrument names from the lexicon's candidate lists.
    ///
    /// The copyright line is overwritten to match the license.
    pub fn attach_catalog(
        &mut self,
        mut catalog: CatalogHeaders,
        instruments: &mut [Instrument],
        lexicon: &Lexicon,
    ) -> Result<(), NoMatch> {
        catalog.composer = Some(self.composer.catalog_name_or_guess(&lexicon.composers)?);
        let names: Vec<String> = instruments
            .iter_mut()
            .map(|instrument| instrument.catalog_name_or_guess(&lexicon.instruments))
            .collect();
        catalog.instruments = Some(names.join(", "));
        self.copyright = Some(catalog.license.clone());
        self.catalog = Some(catalog);
        Ok(())
    }
}

/// A key signature: a note name and a mode, both from the allowed
/// vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub note: String,
    pub mode: String,
}

impl KeySignature {
    /// Creates a key signature, validating note and mode against the lexicon.
    pub fn new(note: &str, mode: &str, lexicon: &Lexicon) -> Result<KeySignature, ValidationError> {
        let note = note.to_lowercase();
        let mode = mode.to_lowercase();
        if !lexicon.notes.iter().any(|allowed| allowed == &note) {
            return Err(ValidationError::KeyNote(note));
        }
        if !lexicon.modes.iter().any(|allowed| allowed == &mode) {
            return Err(ValidationError::KeyMode(mode));
        }
        Ok(KeySignature { note, mode })
    }
}

/// A single movement of a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub num: u32,
    #[serde(default)]
    pub tempo: String,
    #[serde(default)]
    pub time: String,
    pub key: KeySignature,
}

impl Movement {
    /// Creates a movement. The number must be at least 1.
    pub fn new(num: u32, key: KeySignature) -> Result<Movement, ValidationError> {
        if num == 0 {
            return Err(ValidationError::MovementNumber);
        }
        Ok(Movement {
            num,
            tempo: String::new(),
            time: String::new(),
            key,
        })
    }

    /// Sets the tempo marking.
    pub fn tempo(mut self, tempo: &str) -> Movement {
        self.tempo = tempo.to_owned();
        self
    }

    /// Sets the time signature.
    pub fn time(mut self, time: &str) -> Movement {
        self.time = time.to_owned();
        self
    }

    // The default untitled first movement in C major.
    fn untitled_first() -> Movement {
        Movement {
            num: 1,
            tempo: String::new(),
            time: String::new(),
            key: KeySignature {
                note: "c".to_owned(),
                mode: "major".to_owned(),
            },
        }
    }
}

/// The canonical instrument list of a piece.
///
/// Built either from a plain instrument list or from an [`Ensemble`]; both
/// resolve to one ordered list, with the ensemble's name kept only as
/// metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrumentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    ensemble: Option<String>,
    instruments: Vec<Instrument>,
}

impl Instrumentation {
    /// Builds instrumentation from an ordered instrument list, which must be
    /// non-empty.
    pub fn from_instruments(instruments: Vec<Instrument>) -> Result<Instrumentation, ValidationError> {
        if instruments.is_empty() {
            return Err(ValidationError::NoInstruments);
        }
        Ok(Instrumentation {
            ensemble: None,
            instruments,
        })
    }

    /// Builds instrumentation from an ensemble, which must have members.
    pub fn from_ensemble(ensemble: Ensemble) -> Result<Instrumentation, ValidationError> {
        let name = ensemble.name().base().to_owned();
        let instruments = ensemble.instruments().to_vec();
        if instruments.is_empty() {
            return Err(ValidationError::NoInstruments);
        }
        Ok(Instrumentation {
            ensemble: Some(name),
            instruments,
        })
    }

    /// The ensemble name, when this instrumentation came from one.
    pub fn ensemble(&self) -> Option<&str> {
        self.ensemble.as_deref()
    }

    /// The instruments, in display and performance order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Mutable access to the instruments, for catalog-name derivation.
    pub fn instruments_mut(&mut self) -> &mut [Instrument] {
        &mut self.instruments
    }
}

/// Everything the skeleton generator needs to know about a musical work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Piece {
    pub headers: Headers,
    /// The engraving toolchain version the skeleton targets.
    pub version: String,
    #[serde(flatten)]
    pub instrumentation: Instrumentation,
    /// The notation input language, when not the toolchain default.
    pub language: Option<String>,
    /// Free text used as the file name prefix, e.g. "Op. 15".
    pub opus: Option<String>,
    pub movements: Vec<Movement>,
}

/// The serialized shape of a [`Piece`], as read back from a configuration
/// file. [`Piece::load`] revalidates it against a [`Lexicon`].
#[derive(Debug, Clone, Deserialize)]
pub struct PieceDoc {
    pub headers: Headers,
    pub version: String,
    #[serde(default)]
    pub ensemble: Option<String>,
    pub instruments: Vec<Instrument>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub opus: Option<String>,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl Piece {
    /// Starts building a piece from its required parts.
    pub fn builder(
        headers: Headers,
        version: &str,
        instrumentation: Instrumentation,
    ) -> PieceBuilder {
        PieceBuilder {
            headers,
            version: version.to_owned(),
            instrumentation,
            language: None,
            opus: None,
            movements: None,
        }
    }

    /// Rebuilds a piece from its serialized form, revalidating every
    /// cross-field invariant against the lexicon.
    pub fn load(doc: PieceDoc, lexicon: &Lexicon) -> Result<Piece, ValidationError> {
        let instrumentation = match doc.ensemble {
            Some(ensemble) => {
                if doc.instruments.is_empty() {
                    return Err(ValidationError::NoInstruments);
                }
                Instrumentation {
                    ensemble: Some(ensemble),
                    instruments: doc.instruments,
                }
            }
            None => Instrumentation::from_instruments(doc.instruments)?,
        };
        let mut movements = Vec::with_capacity(doc.movements.len());
        for movement in doc.movements {
            let key = KeySignature::new(&movement.key.note, &movement.key.mode, lexicon)?;
            movements.push(
                Movement::new(movement.num, key)?
                    .tempo(&movement.tempo)
                    .time(&movement.time),
            );
        }
        let mut builder = Piece::builder(doc.headers, &doc.version, instrumentation);
        if let Some(language) = &doc.language {
            builder = builder.language(language);
        }
        if let Some(opus) = &doc.opus {
            builder = builder.opus(opus);
        }
        builder.movements(movements).build(lexicon)
    }

    /// Restores the dense `1..N` movement numbering after inserts or
    /// deletes. Renumbering is the caller's responsibility; the aggregate
    /// does not do it implicitly.
    pub fn renumber_movements(&mut self) {
        for (index, movement) in self.movements.iter_mut().enumerate() {
            movement.num = index as u32 + 1;
        }
    }
}

/// Builds a [`Piece`], validating it as a whole on
/// [`build`](PieceBuilder::build).
#[derive(Debug)]
pub struct PieceBuilder {
    headers: Headers,
    version: String,
    instrumentation: Instrumentation,
    language: Option<String>,
    opus: Option<String>,
    movements: Option<Vec<Movement>>,
}

impl PieceBuilder {
    /// Sets the notation input language.
    pub fn language(mut self, language: &str) -> PieceBuilder {
        self.language = Some(language.to_owned());
        self
    }

    /// Sets the opus text used as the file name prefix.
    pub fn opus(mut self, opus: &str) -> PieceBuilder {
        self.opus = Some(opus.to_owned());
        self
    }

    /// Sets the movement list. An empty list fails validation; leaving the
    /// list unset defaults to a single untitled first movement.
    pub fn movements(mut self, movements: Vec<Movement>) -> PieceBuilder {
        self.movements = Some(movements);
        self
    }

    /// Validates and produces the piece.
    pub fn build(self, lexicon: &Lexicon) -> Result<Piece, ValidationError> {
        if !self
            .version
            .chars()
            .next()
            .map_or(false, |first| first.is_ascii_digit())
        {
            return Err(ValidationError::Version(self.version));
        }
        let language = match self.language {
            Some(language) => {
                if !lexicon.has_language(&language) {
                    return Err(ValidationError::Language {
                        given: language,
                        allowed: lexicon.languages.clone(),
                    });
                }
                Some(language.to_lowercase())
            }
            None => None,
        };
        let movements = match self.movements {
            Some(movements) => {
                if movements.is_empty() {
                    return Err(ValidationError::NoMovements);
                }
                movements
            }
            None => vec![Movement::untitled_first()],
        };
        Ok(Piece {
            headers: self.headers,
            version: self.version,
            instrumentation: self.instrumentation,
            language,
            opus: self.opus,
            movements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::lilypond_defaults()
    }

    #[test]
    fn composer_short_names() {
        assert_eq!(
            "L.v. Beethoven",
            Composer::new("Ludwig van Beethoven").short_name()
        );
        assert_eq!("Anonymous", Composer::new("Anonymous").short_name());
        assert_eq!(
            "J.S. Bach",
            Composer::new("Johann Sebastian Bach").short_name()
        );
    }

    #[test]
    fn composer_stored_short_name_wins() {
        let mut composer = Composer::new("Claude Debussy");
        composer.short_name = Some("Debussy".to_owned());
        assert_eq!("Debussy", composer.short_name());
    }

    #[test]
    fn composer_guess_requires_matching_surname() {
        let candidates = vec!["BeethovenLv Beethoven".to_owned(), "MozartWA".to_owned()];
        let beethoven = Composer::new("Ludwig van Beethoven");
        assert_eq!(
            Ok("BeethovenLv Beethoven".to_owned()),
            beethoven.catalog_name_or_guess(&candidates)
        );

        let holst = Composer::new("Gustav Holst");
        assert_eq!(
            Err(NoMatch {
                name: "Gustav Holst".to_owned()
            }),
            holst.catalog_name_or_guess(&candidates)
        );
    }

    #[test]
    fn license_shorthands() {
        assert_eq!("Public Domain", expand_license("pd"));
        assert_eq!("Creative Commons Attribution 4.0", expand_license("cc4"));
        assert_eq!(
            "Creative Commons Attribution-ShareAlike 4.0",
            expand_license("ccsa4")
        );
        assert_eq!("Custom License", expand_license("Custom License"));
    }

    #[test]
    fn catalog_headers_validate_style_and_license() {
        let lexicon = lexicon();
        assert!(CatalogHeaders::new("original edition", "Baroque", "pd", &lexicon).is_ok());
        assert_eq!(
            Err(ValidationError::Style("Atonal".to_owned())),
            CatalogHeaders::new("original edition", "Atonal", "pd", &lexicon)
        );
        assert_eq!(
            Err(ValidationError::License("WTFPL".to_owned())),
            CatalogHeaders::new("original edition", "Baroque", "WTFPL", &lexicon)
        );
    }

    #[test]
    fn key_signatures_validate_against_lexicon() {
        let lexicon = lexicon();
        assert!(KeySignature::new("c", "major", &lexicon).is_ok());
        assert!(KeySignature::new("Bf", "Minor", &lexicon).is_ok());
        assert_eq!(
            Err(ValidationError::KeyNote("h".to_owned())),
            KeySignature::new("h", "major", &lexicon)
        );
        assert_eq!(
            Err(ValidationError::KeyMode("dorian".to_owned())),
            KeySignature::new("c", "dorian", &lexicon)
        );
    }

    #[test]
    fn version_must_start_with_digit() {
        let lexicon = lexicon();
        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let result = Piece::builder(Headers::new("Test"), "LilyPond 2.24", instrumentation)
            .build(&lexicon);
        assert_eq!(
            Err(ValidationError::Version("LilyPond 2.24".to_owned())),
            result
        );
    }

    #[test]
    fn language_checked_case_insensitively() {
        let lexicon = lexicon();
        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let piece = Piece::builder(Headers::new("Test"), "2.24.1", instrumentation)
            .language("English")
            .build(&lexicon)
            .unwrap();
        assert_eq!(Some("english".to_owned()), piece.language);

        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let result = Piece::builder(Headers::new("Test"), "2.24.1", instrumentation)
            .language("klingon")
            .build(&lexicon);
        assert!(matches!(result, Err(ValidationError::Language { .. })));
    }

    #[test]
    fn empty_instrument_list_rejected() {
        assert_eq!(
            Err(ValidationError::NoInstruments),
            Instrumentation::from_instruments(Vec::new())
        );
    }

    #[test]
    fn movements_default_to_untitled_first() {
        let lexicon = lexicon();
        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let piece = Piece::builder(Headers::new("Test"), "2.24.1", instrumentation)
            .build(&lexicon)
            .unwrap();
        assert_eq!(1, piece.movements.len());
        assert_eq!(1, piece.movements[0].num);
        assert_eq!("c", piece.movements[0].key.note);
        assert_eq!("major", piece.movements[0].key.mode);
    }

    #[test]
    fn explicit_empty_movement_list_rejected() {
        let lexicon = lexicon();
        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let result = Piece::builder(Headers::new("Test"), "2.24.1", instrumentation)
            .movements(Vec::new())
            .build(&lexicon);
        assert_eq!(Err(ValidationError::NoMovements), result);
    }

    #[test]
    fn renumbering_restores_dense_sequence() {
        let lexicon = lexicon();
        let key = KeySignature::new("c", "major", &lexicon).unwrap();
        let instrumentation =
            Instrumentation::from_instruments(vec![Instrument::new("oboe")]).unwrap();
        let mut piece = Piece::builder(Headers::new("Test"), "2.24.1", instrumentation)
            .movements(vec![
                Movement::new(1, key.clone()).unwrap(),
                Movement::new(2, key.clone()).unwrap(),
                Movement::new(3, key).unwrap(),
            ])
            .build(&lexicon)
            .unwrap();
        piece.movements.remove(1);
        piece.renumber_movements();
        let numbers: Vec<u32> = piece.movements.iter().map(|movement| movement.num).collect();
        assert_eq!(vec![1, 2], numbers);
    }
}
