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

//! The embedded record store of reusable metadata.
//!
//! A [`Store`] is a document store over a single JSON file, organized into
//! named tables (`instruments`, `composers`, `ensembles`, and arbitrary
//! vocabulary tables such as `titlewords`). It exists so commonly used
//! metadata only has to be entered once; the instrument and composer types
//! hydrate themselves from it and persist new entries back into it.
//!
//! Access is single-threaded and blocking. Inserts are written through to the
//! backing file immediately. Callers sharing one store file across processes
//! must serialize their own access.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A specialized [`Result`] type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The implicit catch-all table, hidden from [`Store::tables`].
pub const DEFAULT_TABLE: &str = "_default";

/// The table instrument records live in.
pub const INSTRUMENTS_TABLE: &str = "instruments";

/// The table composer records live in.
pub const COMPOSERS_TABLE: &str = "composers";

/// The table ensemble records live in.
pub const ENSEMBLES_TABLE: &str = "ensembles";

/// The bundled reference data used to seed a fresh store.
const DEFAULT_DB: &str = include_str!("store/default_db.json");

/// The error type returned by [`Store`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record was absent from a table. Never silently defaulted; the
    /// message names both the searched key and the table.
    #[error("'{name}' is not in the '{table}' table")]
    NotFound { name: String, table: String },
    /// The store file could not be read or written.
    #[error("store file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The store file was not a valid document store.
    #[error("parsing store file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A document record: a flat JSON object.
pub type Record = Map<String, Value>;

/// A document store over named tables in a single JSON file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tables: BTreeMap<String, Vec<Record>>,
}

impl Store {
    /// The default store location under the user's local data directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "scorekit")
            .map(|dirs| dirs.data_dir().join("db.json"))
            .unwrap_or_else(|| PathBuf::from("db.json"))
    }

    /// Seeds a store file from the bundled reference data.
    ///
    /// This is a wholesale copy: any pre-existing content at `path` is
    /// overwritten, not merged.
    pub fn bootstrap<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        create_parent_dir(path)?;
        fs::write(path, DEFAULT_DB).map_err(|source| StoreError::Io {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("bootstrapped store at {}", path.display());
        Ok(())
    }

    /// Opens the store at `path`, creating an empty one if the file does not
    /// exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store> {
        let path = path.as_ref().to_owned();
        create_parent_dir(&path)?;
        let tables = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Store { path, tables })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All table names, excluding the implicit default table.
    pub fn tables(&self) -> Vec<String> {
        self.tables
            .keys()
            .filter(|name| *name != DEFAULT_TABLE)
            .cloned()
            .collect()
    }

    /// Returns the display keys of records in `table`.
    ///
    /// With no predicate every record is listed; with a `(field, substring)`
    /// predicate only records whose named field contains the substring are.
    /// The display key is the record's `name` field, or its `word` field for
    /// vocabulary tables; records with neither are silently skipped.
    pub fn search(&self, table: &str, predicate: Option<(&str, &str)>) -> Vec<String> {
        let records = match self.tables.get(table) {
            Some(records) => records,
            None => return Vec::new(),
        };
        records
            .iter()
            .filter(|record| match predicate {
                Some((field, term)) => record
                    .get(field)
                    .and_then(Value::as_str)
                    .map_or(false, |value| value.contains(term)),
                None => true,
            })
            .filter_map(display_key)
            .collect()
    }

    /// Returns the record in `table` whose `name` field is exactly `name`.
    ///
    /// A miss is a [`StoreError::NotFound`], never an empty result.
    pub fn get_exact(&self, name: &str, table: &str) -> Result<&Record> {
        self.tables
            .get(table)
            .and_then(|records| {
                records
                    .iter()
                    .find(|record| record.get("name").and_then(Value::as_str) == Some(name))
            })
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
                table: table.to_owned(),
            })
    }

    /// Appends a record to `table` and writes the store through to disk.
    ///
    /// No uniqueness check is made at this layer; callers wanting to avoid
    /// duplicates must search first.
    pub fn insert(&mut self, table: &str, record: Record) -> Result<()> {
        self.tables
            .entry(table.to_owned())
            .or_insert_with(Vec::new)
            .push(record);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.tables).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("saved store to {}", self.path.display());
        Ok(())
    }
}

fn display_key(record: &Record) -> Option<String> {
    record
        .get("name")
        .or_else(|| record.get("word"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: path.to_owned(),
                source,
            })?;
        }
    }
    Ok(())
}
