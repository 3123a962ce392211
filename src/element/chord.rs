//! Chord shapes and chord expansion

use super::note::{Note, NoteKind};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// A named chord and its intervals above the root, in semitones
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ChordShape {
    pub name: &'static str,
    pub intervals: &'static [u8],
}

macro_rules! shape {
    ($name:expr, [$($i:expr),*]) => {
        ChordShape { name: $name, intervals: &[$($i),*] }
    };
}

/// Known chord names, matched case-insensitively
pub static CHORD_SHAPES: &[ChordShape] = &[
    shape!("MAJ", [4, 7]),
    shape!("MAJ6", [4, 7, 9]),
    shape!("MAJ7", [4, 7, 11]),
    shape!("MAJ9", [4, 7, 11, 14]),
    shape!("ADD9", [4, 7, 14]),
    shape!("MAJ6%9", [4, 7, 9, 14]),
    shape!("MAJ7%6", [4, 7, 9, 11]),
    shape!("MAJ13", [4, 7, 11, 14, 21]),
    shape!("MAJ7<5", [4, 6, 11]),
    shape!("MAJ7>5", [4, 8, 11]),
    shape!("MIN", [3, 7]),
    shape!("MIN6", [3, 7, 9]),
    shape!("MIN7", [3, 7, 10]),
    shape!("MIN9", [3, 7, 10, 14]),
    shape!("MIN11", [3, 7, 10, 14, 17]),
    shape!("MIN13", [3, 7, 10, 14, 21]),
    shape!("MIN7%11", [3, 7, 10, 17]),
    shape!("MINADD9", [3, 7, 14]),
    shape!("MIN6%9", [3, 7, 9, 14]),
    shape!("MINMAJ7", [3, 7, 11]),
    shape!("MINMAJ9", [3, 7, 11, 14]),
    shape!("DOM7", [4, 7, 10]),
    shape!("DOM7%6", [4, 7, 9, 10]),
    shape!("DOM7%11", [4, 7, 10, 17]),
    shape!("DOM7SUS", [5, 7, 10]),
    shape!("DOM7%6SUS", [5, 7, 9, 10]),
    shape!("DOM9", [4, 7, 10, 14]),
    shape!("DOM11", [4, 7, 10, 14, 17]),
    shape!("DOM13", [4, 7, 10, 14, 21]),
    shape!("DOM13SUS", [5, 7, 10, 14, 21]),
    shape!("DOM7<5", [4, 6, 10]),
    shape!("DOM7>5", [4, 8, 10]),
    shape!("DOM7<5<9", [4, 6, 10, 13]),
    shape!("DOM7<5>9", [4, 6, 10, 15]),
    shape!("DOM7>5<9", [4, 8, 10, 13]),
    shape!("DOM7>5>9", [4, 8, 10, 15]),
    shape!("AUG", [4, 8]),
    shape!("AUG7", [4, 8, 10]),
    shape!("DIM", [3, 6]),
    shape!("DIM7", [3, 6, 9]),
    shape!("SUS4", [5, 7]),
    shape!("SUS2", [2, 7]),
];

impl ChordShape {
    /// Longest chord name that prefixes `text`, ignoring case
    pub fn match_prefix(text: &str) -> Option<&'static ChordShape> {
        CHORD_SHAPES
            .iter()
            .filter(|shape| {
                text.len() >= shape.name.len()
                    && text.is_char_boundary(shape.name.len())
                    && text[..shape.name.len()].eq_ignore_ascii_case(shape.name)
            })
            .max_by_key(|shape| shape.name.len())
    }

    pub fn lookup(name: &str) -> Option<&'static ChordShape> {
        CHORD_SHAPES
            .iter()
            .find(|shape| shape.name.eq_ignore_ascii_case(name))
    }

    /// Number of tones including the root
    pub fn tone_count(&self) -> usize {
        self.intervals.len() + 1
    }
}

/// A chord: a root note plus a shape, optionally inverted
///
/// `root` is the note as written; `sounding_root` is that note raised an
/// octave once the chord is inverted. All sounding notes, with the
/// inversion applied, come from [`Chord::notes`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    root: Note,
    sounding_root: Note,
    shape: &'static ChordShape,
    inversion: u8,
}

impl Chord {
    /// Build a chord, checking that every inverted tone stays in range
    pub fn new(root: Note, shape: &'static ChordShape, inversion: u8) -> Result<Self> {
        if inversion as usize >= shape.tone_count() {
            return Err(Error::InvalidInversion(format!(
                "{} inversions requested for {} with {} tones",
                inversion,
                shape.name,
                shape.tone_count()
            )));
        }
        let mut chord = Self {
            sounding_root: root.clone(),
            root,
            shape,
            inversion,
        };
        for value in chord.values() {
            if value > 127 {
                return Err(Error::NoteOutOfRange(value));
            }
        }
        if inversion > 0 {
            chord.sounding_root = chord.root.clone().with_value(chord.root.value() + 12);
        }
        Ok(chord)
    }

    /// Inversion count that puts the tone with `bass` pitch class lowest
    pub fn inversion_for_pitch_class(root: u8, shape: &ChordShape, bass: u8) -> Result<u8> {
        std::iter::once(0)
            .chain(shape.intervals.iter().copied())
            .position(|interval| (root as u32 + interval as u32) % 12 == bass as u32 % 12)
            .map(|i| i as u8)
            .ok_or_else(|| {
                Error::InvalidInversion(format!(
                    "pitch class {} is not in {}",
                    bass % 12,
                    shape.name
                ))
            })
    }

    /// Inversion count that puts the tone with the exact `bass` value lowest
    pub fn inversion_for_value(root: u8, shape: &ChordShape, bass: u8) -> Result<u8> {
        std::iter::once(0)
            .chain(shape.intervals.iter().copied())
            .position(|interval| root as u32 + interval as u32 == bass as u32)
            .map(|i| i as u8)
            .ok_or_else(|| {
                Error::InvalidInversion(format!("note {} is not in {}", bass, shape.name))
            })
    }

    pub fn root(&self) -> &Note {
        &self.root
    }

    /// The root as it sounds: an octave up in any inversion
    pub fn sounding_root(&self) -> &Note {
        &self.sounding_root
    }

    pub fn shape(&self) -> &'static ChordShape {
        self.shape
    }

    pub fn name(&self) -> &'static str {
        self.shape.name
    }

    pub fn inversion(&self) -> u8 {
        self.inversion
    }

    fn values(&self) -> impl Iterator<Item = i32> + '_ {
        std::iter::once(0)
            .chain(self.shape.intervals.iter().copied())
            .enumerate()
            .map(move |(i, interval)| {
                let raise = if i < self.inversion as usize { 12 } else { 0 };
                self.root.value() as i32 + interval as i32 + raise
            })
    }

    /// Sounding notes: the (possibly raised) root, then one Parallel note
    /// per interval
    pub fn notes(&self) -> Vec<Note> {
        self.values()
            .enumerate()
            .map(|(i, value)| {
                let note = self.root.clone().with_value(value as u8);
                if i == 0 {
                    note
                } else {
                    note.with_kind(NoteKind::Parallel)
                }
            })
            .collect()
    }

    pub fn verify_string(&self) -> String {
        format!(
            "Chord: root={}, name={}, inversion={}, duration={}",
            self.root.value(),
            self.shape.name,
            self.inversion,
            self.root.decimal_duration()
        )
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.root.value(), self.shape.name.to_ascii_lowercase())?;
        for _ in 0..self.inversion {
            f.write_str("^")?;
        }
        self.root.write_suffix(f)
    }
}
