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

//! Planning of the generated project layout.
//!
//! A [`Skeleton`] is the file tree a generated project will have, derived
//! purely from a [`Piece`]: one directory per instrument (plus the shared
//! `global` context) holding a note fragment per movement, a part file per
//! instrument at the top level, the `includes.ily` aggregation file, the
//! `defs.ily` header file, and the score file. Nothing here touches the
//! filesystem or renders content; the paths and symbolic references are
//! handed to a template renderer by the caller.

use crate::names::{normalize_name, Name, NameError};
use crate::piece::Piece;
use std::path::PathBuf;

/// The name of the shared context holding markings common to all parts.
pub const GLOBAL_CONTEXT: &str = "global";

/// The aggregation file that includes every generated fragment.
pub const INCLUDES_FILE: &str = "includes.ily";

/// The file holding shared definitions and the header block.
pub const DEFS_FILE: &str = "defs.ily";

/// The planned file tree of a generated project.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    /// The opus-or-title-derived file name prefix.
    pub prefix: String,
    /// One directory per instrument, preceded by the `global` directory.
    pub directories: Vec<PathBuf>,
    /// Every per-movement note fragment, grouped under its directory. These
    /// are the paths the includes file aggregates, in include order.
    pub fragments: Vec<PathBuf>,
    /// One part file per instrument at the top level.
    pub parts: Vec<PathBuf>,
    /// The `includes.ily` aggregation file.
    pub includes_file: PathBuf,
    /// The `defs.ily` definitions file.
    pub defs_file: PathBuf,
    /// The score file, `{prefix}_score.ly`.
    pub score_file: PathBuf,
}

impl Skeleton {
    /// Derives the full layout for a piece.
    pub fn plan(piece: &Piece) -> Result<Skeleton, NameError> {
        let prefix = file_prefix(piece);
        let global = Name::new(GLOBAL_CONTEXT);
        let mut names = vec![global.clone()];
        names.extend(
            piece
                .instrumentation
                .instruments()
                .iter()
                .map(|instrument| instrument.name.clone()),
        );

        let mut directories = Vec::new();
        let mut fragments = Vec::new();
        for name in &names {
            let dir = PathBuf::from(name.dir_name());
            for movement in &piece.movements {
                fragments.push(dir.join(name.movement_file_name(movement.num)?));
            }
            directories.push(dir);
        }

        let parts = piece
            .instrumentation
            .instruments()
            .iter()
            .map(|instrument| PathBuf::from(instrument.name.part_file_name(Some(&prefix))))
            .collect();

        let score_file = PathBuf::from(format!("{}_score.ly", prefix));

        Ok(Skeleton {
            prefix,
            directories,
            fragments,
            parts,
            includes_file: PathBuf::from(INCLUDES_FILE),
            defs_file: PathBuf::from(DEFS_FILE),
            score_file,
        })
    }

    /// The symbolic variable references the score pulls in, movement by
    /// movement: the global context first, then every instrument in order.
    pub fn score_references(piece: &Piece) -> Result<Vec<String>, NameError> {
        let global = Name::new(GLOBAL_CONTEXT);
        let mut references = Vec::new();
        for movement in &piece.movements {
            references.push(global.var_name(movement.num, true)?);
            for instrument in piece.instrumentation.instruments() {
                references.push(instrument.name.var_name(movement.num, true)?);
            }
        }
        Ok(references)
    }
}

/// The file name prefix for top-level files, derived from the opus when one
/// is set ("Op. 15" becomes "O15"), else from the normalized title.
pub fn file_prefix(piece: &Piece) -> String {
    match &piece.opus {
        Some(opus) => opus.replace("Op. ", "O").replace(' ', "_").to_uppercase(),
        None => normalize_name(&piece.headers.title.replace('.', "")),
    }
}
