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

//! Reading and writing the piece configuration file.
//!
//! A piece lives between editing sessions as a YAML document whose top-level
//! shape mirrors the [`Piece`] aggregate's serialized form. An empty or
//! unparsable file is a [`ConfigError`] the caller should treat as "no
//! existing piece", not as a fatal condition.

use crate::piece::{Piece, PieceDoc, ValidationError};
use crate::vocab::Lexicon;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The error type returned when reading or writing a piece configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but holds no data.
    #[error("no data in piece configuration file {}", path.display())]
    Empty { path: PathBuf },
    /// The file is not a valid piece configuration document.
    #[error("parsing piece configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// The file could not be read or written.
    #[error("piece configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document parsed but failed cross-field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Writes a piece to a YAML configuration file, replacing any existing
/// content.
pub fn write_config<P: AsRef<Path>>(path: P, piece: &Piece) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let contents = serde_yaml::to_string(piece).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, contents).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("wrote piece configuration to {}", path.display());
    Ok(())
}

/// Reads a piece back from a YAML configuration file, revalidating it
/// against the lexicon.
pub fn read_config<P: AsRef<Path>>(path: P, lexicon: &Lexicon) -> Result<Piece, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_owned(),
        });
    }
    let doc: PieceDoc = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(Piece::load(doc, lexicon)?)
}
