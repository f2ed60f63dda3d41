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

use pretty_assertions::assert_eq;
use scorekit::instrument::{Clef, Instrument};
use scorekit::piece::{Headers, Instrumentation, KeySignature, Movement, Piece};
use scorekit::skeleton::{file_prefix, Skeleton};
use scorekit::vocab::Lexicon;
use std::path::PathBuf;

#[test]
fn layout_for_a_string_trio() {
    let piece = trio_piece(None);
    let skeleton = Skeleton::plan(&piece).unwrap();

    assert_eq!("test_piece", skeleton.prefix);
    assert_eq!(
        paths(&["global", "violin1", "violin2", "violoncello"]),
        skeleton.directories
    );
    assert_eq!(
        paths(&[
            "global/global_1.ily",
            "global/global_2.ily",
            "global/global_3.ily",
            "violin1/violin1_1.ily",
            "violin1/violin1_2.ily",
            "violin1/violin1_3.ily",
            "violin2/violin2_1.ily",
            "violin2/violin2_2.ily",
            "violin2/violin2_3.ily",
            "violoncello/violoncello_1.ily",
            "violoncello/violoncello_2.ily",
            "violoncello/violoncello_3.ily",
        ]),
        skeleton.fragments
    );
    assert_eq!(
        paths(&[
            "test_piece_violin1.ly",
            "test_piece_violin2.ly",
            "test_piece_violoncello.ly",
        ]),
        skeleton.parts
    );
    assert_eq!(PathBuf::from("includes.ily"), skeleton.includes_file);
    assert_eq!(PathBuf::from("defs.ily"), skeleton.defs_file);
    assert_eq!(PathBuf::from("test_piece_score.ly"), skeleton.score_file);
}

#[test]
fn opus_drives_the_file_prefix() {
    let piece = trio_piece(Some("Op. 15"));
    let skeleton = Skeleton::plan(&piece).unwrap();

    assert_eq!("O15", skeleton.prefix);
    assert_eq!(PathBuf::from("O15_score.ly"), skeleton.score_file);
    assert!(skeleton.parts.contains(&PathBuf::from("O15_violin1.ly")));
    // Fragment directories do not carry the prefix.
    assert!(skeleton
        .fragments
        .contains(&PathBuf::from("violin1/violin1_1.ily")));
}

#[test]
fn title_prefix_drops_periods() {
    let lexicon = Lexicon::lilypond_defaults();
    let piece = Piece::builder(
        Headers::new("Sonata No. 3"),
        "2.24.1",
        Instrumentation::from_instruments(vec![Instrument::new("piano")]).unwrap(),
    )
    .build(&lexicon)
    .unwrap();
    assert_eq!("sonata_no_3", file_prefix(&piece));
}

#[test]
fn score_pulls_global_then_each_instrument_per_movement() {
    let piece = trio_piece(None);
    let references = Skeleton::score_references(&piece).unwrap();

    assert_eq!(12, references.len());
    assert_eq!(
        vec![
            "\\global_first_mov",
            "\\violin_one_first_mov",
            "\\violin_two_first_mov",
            "\\violoncello_first_mov",
        ],
        &references[..4]
    );
    assert!(references.contains(&"\\global_third_mov".to_owned()));
    assert!(references.contains(&"\\violin_two_second_mov".to_owned()));
}

fn trio_piece(opus: Option<&str>) -> Piece {
    let lexicon = Lexicon::lilypond_defaults();
    let instruments = vec![
        Instrument::numbered("violin", 1).unwrap(),
        Instrument::numbered("violin", 2).unwrap(),
        Instrument::new("violoncello").clef(Clef::Bass),
    ];
    let key = KeySignature::new("c", "major", &lexicon).unwrap();
    let movements = vec![
        Movement::new(1, key.clone()).unwrap(),
        Movement::new(2, key.clone()).unwrap(),
        Movement::new(3, key).unwrap(),
    ];
    let mut builder = Piece::builder(
        Headers::new("Test Piece"),
        "2.24.1",
        Instrumentation::from_instruments(instruments).unwrap(),
    )
    .movements(movements);
    if let Some(opus) = opus {
        builder = builder.opus(opus);
    }
    builder.build(&lexicon).unwrap()
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}
