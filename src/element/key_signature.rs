//! Key signatures and their effect on letter notes

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Major => "maj",
            Self::Minor => "min",
        }
    }
}

/// Major keys by root name, indexed by fifths + 7
const MAJOR_KEYS: [&str; 15] = [
    "CB", "GB", "DB", "AB", "EB", "BB", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];

/// Minor keys by root name, indexed by fifths + 7
const MINOR_KEYS: [&str; 15] = [
    "AB", "EB", "BB", "F", "C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#",
];

/// Pitch classes raised by successive sharps: F C G D A E B
const SHARP_ORDER: [u8; 7] = [5, 0, 7, 2, 9, 4, 11];

/// Pitch classes lowered by successive flats: B E A D G C F
const FLAT_ORDER: [u8; 7] = [11, 4, 9, 2, 7, 0, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KeySignature {
    fifths: i8,
    mode: Mode,
}

impl KeySignature {
    pub fn new(fifths: i8, mode: Mode) -> Result<Self> {
        if !(-7..=7).contains(&fifths) {
            return Err(Error::InvalidKeySignature(format!("{} fifths", fifths)));
        }
        Ok(Self { fifths, mode })
    }

    /// Look up a key by root name (e.g. "Eb", "F#") and mode
    pub fn from_root(root: &str, mode: Mode) -> Result<Self> {
        let table = match mode {
            Mode::Major => &MAJOR_KEYS,
            Mode::Minor => &MINOR_KEYS,
        };
        let upper = root.to_ascii_uppercase();
        table
            .iter()
            .position(|name| *name == upper)
            .map(|i| Self {
                fifths: i as i8 - 7,
                mode,
            })
            .ok_or_else(|| Error::InvalidKeySignature(format!("{}{}", root, mode.suffix())))
    }

    pub fn fifths(&self) -> i8 {
        self.fifths
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Root name as written in a music string
    pub fn root(&self) -> String {
        let table = match self.mode {
            Mode::Major => &MAJOR_KEYS,
            Mode::Minor => &MINOR_KEYS,
        };
        let name = table[(self.fifths + 7) as usize];
        let mut chars = name.chars();
        let mut root = String::new();
        if let Some(letter) = chars.next() {
            root.push(letter);
        }
        for c in chars {
            root.push(if c == 'B' { 'b' } else { c });
        }
        root
    }

    /// Apply this key to a raw pitch class (0-11)
    ///
    /// Returns the adjusted class, which may be -1 (Cb) or 12 (B#).
    pub fn adjust(&self, pitch_class: u8, natural: bool) -> i32 {
        adjust_pitch_class(pitch_class, self.fifths, natural)
    }

    pub fn verify_string(&self) -> String {
        format!("KeySig: keySig={}, scale={:?}", self.fifths, self.mode)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "K{}{}", self.root(), self.mode.suffix())
    }
}

/// Key-signature substitution for a pitch class
pub fn adjust_pitch_class(pitch_class: u8, fifths: i8, natural: bool) -> i32 {
    let pc = pitch_class as i32;
    if natural || fifths == 0 {
        return pc;
    }
    let count = fifths.unsigned_abs() as usize;
    if fifths > 0 {
        if SHARP_ORDER[..count].contains(&pitch_class) {
            return pc + 1;
        }
    } else if FLAT_ORDER[..count].contains(&pitch_class) {
        return pc - 1;
    }
    pc
}
