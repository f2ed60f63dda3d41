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

//! A library for generating [LilyPond](https://lilypond.org) music engraving
//! project skeletons.
//!
//! # Introduction
//!
//! Engraving a multi-movement piece for several instruments in LilyPond
//! means maintaining a small tree of source files that constantly refer to
//! each other: per-instrument note fragments for every movement, part files
//! that include them, a shared `global` context for markings common to all
//! parts, a definitions file for headers, and a score that pulls everything
//! together through symbolic variable names. Setting that tree up by hand is
//! tedious, because a single misspelled file or variable name breaks the
//! whole build.
//!
//! Scorekit models the piece once and derives all of those names
//! deterministically. It contains:
//!
//! * [`names`] - The identity model. A [`Name`](names::Name) is a normalized
//!   base token with an optional number qualifier ("Violin 2"), and every
//!   file, directory, and variable name in a generated project is a pure
//!   function of it.
//!
//! * [`numerals`] - Rendering of numbers as digits, cardinal or ordinal
//!   words, and the restricted roman numerals used on printed parts.
//!
//! * [`instrument`] - Instruments and ensembles, layered on the identity
//!   model, with load/persist support against the record store.
//!
//! * [`store`] - An embedded JSON document store of reusable instrument,
//!   composer, ensemble, and vocabulary records, so common metadata only has
//!   to be entered once.
//!
//! * [`piece`] - The piece aggregate: headers, composer, movements,
//!   instrumentation, and the cross-field validation that runs when a piece
//!   is built or loaded.
//!
//! * [`vocab`] - The host-provided vocabularies (allowed notes, modes,
//!   languages, licenses, styles, catalog names) and their fetch-once cache.
//!
//! * [`config`] - YAML persistence of a piece between editing sessions.
//!
//! * [`skeleton`] - The planned file tree of a generated project, derived
//!   purely from a piece.
//!
//! Template rendering of the actual LilyPond sources is left to the caller;
//! scorekit hands it paths and symbolic references.
//!
//! # Examples
//!
//! Planning the layout of a string duo piece:
//!
//! ```
//! use scorekit::{
//!     instrument::{Clef, Instrument},
//!     piece::{Composer, Headers, Instrumentation, Piece},
//!     skeleton::Skeleton,
//!     vocab::Lexicon,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lexicon = Lexicon::lilypond_defaults();
//!
//! let violin = Instrument::numbered("Violin", 1)?
//!     .abbr("Vln.")
//!     .midi("violin")
//!     .family("strings");
//! let cello = Instrument::new("Violoncello")
//!     .abbr("Vc.")
//!     .clef(Clef::Bass)
//!     .midi("cello")
//!     .family("strings");
//!
//! let headers = Headers::new("Duo for Violin and Cello")
//!     .composer(Composer::new("Ludwig van Beethoven"));
//! let piece = Piece::builder(
//!     headers,
//!     "2.24.1",
//!     Instrumentation::from_instruments(vec![violin, cello])?,
//! )
//! .language("english")
//! .opus("Op. 15")
//! .build(&lexicon)?;
//!
//! let skeleton = Skeleton::plan(&piece)?;
//! assert_eq!("O15", skeleton.prefix);
//! assert_eq!("O15_score.ly", skeleton.score_file.to_str().unwrap());
//! assert!(skeleton.parts.contains(&"O15_violin1.ly".into()));
//! assert!(skeleton
//!     .fragments
//!     .contains(&"violoncello/violoncello_1.ily".into()));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod instrument;
pub mod names;
pub mod numerals;
pub mod piece;
pub mod skeleton;
pub mod store;
pub mod vocab;
