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

//! Host-provided vocabularies and their process-scoped cache.
//!
//! Several construction-time checks validate against vocabularies the host
//! provides: allowed key notes and modes, notation languages, submission
//! licenses and styles, and the catalog's composer and instrument name lists.
//! These are fetched at most once per process and cached; [`VocabCache`]
//! makes the "fetch once" contract explicit and gives callers needing
//! freshness an explicit [`reset`](VocabCache::reset) hook instead of a
//! process restart.
//!
//! A [`Lexicon`] bundles the fetched collections into the single context
//! object the piece aggregate validates against.
//! [`Lexicon::lilypond_defaults`] provides an offline baseline.

use std::collections::HashMap;

/// Well-known cache keys for the vocabularies consumed by this crate.
pub mod keys {
    /// Allowed key signature note names.
    pub const NOTES: &str = "notes";
    /// Allowed key signature modes.
    pub const MODES: &str = "modes";
    /// Allowed notation input languages.
    pub const LANGUAGES: &str = "languages";
    /// Allowed submission licenses.
    pub const LICENSES: &str = "licenses";
    /// Allowed submission styles.
    pub const STYLES: &str = "styles";
    /// Catalog composer names.
    pub const COMPOSERS: &str = "composers";
    /// Catalog instrument names.
    pub const INSTRUMENTS: &str = "instruments";
}

/// A process-scoped cache of fetched vocabularies.
///
/// Each key is fetched at most once per cache; the fetch error type is the
/// caller's and propagates untouched. There is no automatic refresh, only the
/// explicit [`reset`](VocabCache::reset) operation.
#[derive(Debug, Default)]
pub struct VocabCache {
    entries: HashMap<String, Vec<String>>,
}

impl VocabCache {
    /// Creates an empty cache.
    pub fn new() -> VocabCache {
        VocabCache::default()
    }

    /// Returns the cached collection for `key`, running `fetch` first if the
    /// key has never been fetched.
    pub fn get_or_fetch<E, F>(&mut self, key: &str, fetch: F) -> Result<&[String], E>
    where
        F: FnOnce() -> Result<Vec<String>, E>,
    {
        if !self.entries.contains_key(key) {
            let values = fetch()?;
            log::debug!("cached {} values under vocabulary key {:?}", values.len(), key);
            self.entries.insert(key.to_owned(), values);
        }
        Ok(self
            .entries
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Whether `key` has been fetched.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Invalidates one key, or the whole cache when `key` is `None`. The next
    /// [`get_or_fetch`](VocabCache::get_or_fetch) will fetch again.
    pub fn reset(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }
}

/// The bundle of vocabularies the piece aggregate validates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Allowed key signature note names.
    pub notes: Vec<String>,
    /// Allowed key signature modes.
    pub modes: Vec<String>,
    /// Allowed notation input languages.
    pub languages: Vec<String>,
    /// Allowed submission licenses.
    pub licenses: Vec<String>,
    /// Allowed submission styles.
    pub styles: Vec<String>,
    /// Catalog composer names, used for fuzzy guessing.
    pub composers: Vec<String>,
    /// Catalog instrument names, used for fuzzy guessing.
    pub instruments: Vec<String>,
}

impl Lexicon {
    /// An offline baseline mirroring the vocabularies LilyPond ships and the
    /// submission catalog publishes.
    ///
    /// The catalog composer and instrument name lists start empty; hosts that
    /// fetch them should fill them in.
    pub fn lilypond_defaults() -> Lexicon {
        let mut notes = Vec::new();
        for letter in &["a", "b", "c", "d", "e", "f", "g"] {
            notes.push((*letter).to_owned());
            // "f" flattens and "b" sharpens per the original note spellings.
            notes.push(format!("{}f", letter));
            notes.push(format!("{}b", letter));
        }
        Lexicon {
            notes,
            modes: to_strings(&["major", "minor"]),
            languages: to_strings(&[
                "nederlands",
                "catalan",
                "deutsch",
                "english",
                "espanol",
                "francais",
                "italiano",
                "norsk",
                "portugues",
                "suomi",
                "svenska",
                "vlaams",
            ]),
            licenses: to_strings(&[
                "Public Domain",
                "Creative Commons Attribution 4.0",
                "Creative Commons Attribution-ShareAlike 4.0",
            ]),
            styles: to_strings(&[
                "Baroque",
                "Classical",
                "Romantic",
                "Modern",
                "Folk",
                "Jazz",
                "Popular / Dance",
            ]),
            composers: Vec::new(),
            instruments: Vec::new(),
        }
    }

    /// Case-insensitive membership test for a notation language.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(language))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetches_at_most_once() {
        let mut cache = VocabCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let values = cache
                .get_or_fetch::<(), _>(keys::MODES, || {
                    calls += 1;
                    Ok(vec!["major".to_owned(), "minor".to_owned()])
                })
                .unwrap();
            assert_eq!(["major", "minor"], values);
        }
        assert_eq!(1, calls);
    }

    #[test]
    fn fetch_errors_propagate_and_cache_nothing() {
        let mut cache = VocabCache::new();
        let result = cache.get_or_fetch(keys::NOTES, || Err("network down"));
        assert_eq!(Err("network down"), result);
        assert!(!cache.contains(keys::NOTES));
    }

    #[test]
    fn reset_invalidates() {
        let mut cache = VocabCache::new();
        cache
            .get_or_fetch::<(), _>(keys::STYLES, || Ok(vec!["Baroque".to_owned()]))
            .unwrap();
        cache.reset(Some(keys::STYLES));
        assert!(!cache.contains(keys::STYLES));

        cache
            .get_or_fetch::<(), _>(keys::STYLES, || Ok(vec!["Classical".to_owned()]))
            .unwrap();
        cache.reset(None);
        assert!(!cache.contains(keys::STYLES));
    }

    #[test]
    fn default_lexicon_languages() {
        let lexicon = Lexicon::lilypond_defaults();
        assert!(lexicon.has_language("english"));
        assert!(lexicon.has_language("English"));
        assert!(!lexicon.has_language("klingon"));
    }
}
