//! Note values and duration arithmetic

use serde::Serialize;
use std::fmt;

/// Ticks per whole note, shared by all duration math
pub const RESOLUTION: u64 = 128;

/// Attack and decay velocity used when none is given
pub const DEFAULT_VELOCITY: u8 = 64;

/// Default octave for a plain note
pub const DEFAULT_OCTAVE: u8 = 5;

/// Default octave for a chord root
pub const DEFAULT_CHORD_OCTAVE: u8 = 3;

/// Duration letter codes and their fraction of a whole note
pub const DURATION_CODES: [(char, f64); 8] = [
    ('w', 1.0),
    ('h', 0.5),
    ('q', 0.25),
    ('i', 0.125),
    ('s', 0.0625),
    ('t', 0.03125),
    ('x', 0.015625),
    ('o', 0.0078125),
];

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B"];

/// How a note relates to the notes before it in the same token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// First note of a token
    #[default]
    First,
    /// Follows the previous note (`_`)
    Sequential,
    /// Sounds together with the first note (`+`)
    Parallel,
}

impl NoteKind {
    /// Connector character that introduces a note of this kind
    pub fn connector(&self) -> Option<char> {
        match self {
            Self::First => None,
            Self::Sequential => Some('_'),
            Self::Parallel => Some('+'),
        }
    }
}

/// A single note or rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    value: u8,
    octave: Option<u8>,
    decimal_duration: f64,
    duration: u64,
    attack_velocity: u8,
    decay_velocity: u8,
    rest: bool,
    natural: bool,
    start_of_tie: bool,
    end_of_tie: bool,
    kind: NoteKind,
}

impl Note {
    /// Quarter note with default velocities
    pub fn new(value: u8) -> Self {
        Self {
            value,
            octave: None,
            decimal_duration: 0.25,
            duration: ticks_for(0.25),
            attack_velocity: DEFAULT_VELOCITY,
            decay_velocity: DEFAULT_VELOCITY,
            rest: false,
            natural: false,
            start_of_tie: false,
            end_of_tie: false,
            kind: NoteKind::First,
        }
    }

    pub fn rest() -> Self {
        Self {
            rest: true,
            ..Self::new(0)
        }
    }

    pub fn with_octave(mut self, octave: Option<u8>) -> Self {
        self.octave = octave;
        self
    }

    /// Set the decimal duration; the tick count follows
    pub fn with_decimal_duration(mut self, decimal: f64) -> Self {
        self.decimal_duration = decimal;
        self.duration = ticks_for(decimal);
        self
    }

    /// Set the tick count; the decimal duration follows
    pub fn with_duration(mut self, ticks: u64) -> Self {
        self.duration = ticks;
        self.decimal_duration = ticks as f64 / RESOLUTION as f64;
        self
    }

    pub fn with_velocities(mut self, attack: u8, decay: u8) -> Self {
        self.attack_velocity = attack;
        self.decay_velocity = decay;
        self
    }

    pub fn with_natural(mut self, natural: bool) -> Self {
        self.natural = natural;
        self
    }

    pub fn with_tie(mut self, start: bool, end: bool) -> Self {
        self.start_of_tie = start;
        self.end_of_tie = end;
        self
    }

    pub fn with_kind(mut self, kind: NoteKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn octave(&self) -> Option<u8> {
        self.octave
    }

    pub fn decimal_duration(&self) -> f64 {
        self.decimal_duration
    }

    /// Duration in ticks
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn attack_velocity(&self) -> u8 {
        self.attack_velocity
    }

    pub fn decay_velocity(&self) -> u8 {
        self.decay_velocity
    }

    pub fn is_rest(&self) -> bool {
        self.rest
    }

    pub fn is_natural(&self) -> bool {
        self.natural
    }

    pub fn is_start_of_tie(&self) -> bool {
        self.start_of_tie
    }

    pub fn is_end_of_tie(&self) -> bool {
        self.end_of_tie
    }

    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    /// Note name with octave, e.g. "F#5"
    pub fn name(&self) -> String {
        if self.rest {
            return "R".to_string();
        }
        format!(
            "{}{}",
            NOTE_NAMES[(self.value % 12) as usize],
            self.value / 12
        )
    }

    /// Duration, tie and velocity suffix shared by notes and chords
    pub(crate) fn write_suffix(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end_of_tie {
            f.write_str("-")?;
        }
        f.write_str(&duration_string(self.decimal_duration))?;
        if self.start_of_tie {
            f.write_str("-")?;
        }
        if self.attack_velocity != DEFAULT_VELOCITY {
            write!(f, "a{}", self.attack_velocity)?;
        }
        if self.decay_velocity != DEFAULT_VELOCITY {
            write!(f, "d{}", self.decay_velocity)?;
        }
        Ok(())
    }

    pub fn verify_string(&self) -> String {
        format!(
            concat!(
                "Note: value={}, duration={}, startOfTie={}, endOfTie={}, ",
                "attack={}, decay={}, isRest={}, kind={:?}"
            ),
            self.value,
            self.decimal_duration,
            self.start_of_tie,
            self.end_of_tie,
            self.attack_velocity,
            self.decay_velocity,
            self.rest,
            self.kind,
        )
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("R")?;
        } else {
            write!(f, "[{}]", self.value)?;
        }
        self.write_suffix(f)
    }
}

/// Tick count for a decimal duration
pub fn ticks_for(decimal: f64) -> u64 {
    (RESOLUTION as f64 * decimal).round() as u64
}

/// Render a decimal duration as a letter code where one fits exactly
pub fn duration_string(decimal: f64) -> String {
    for (code, value) in DURATION_CODES {
        if approx_eq(decimal, value) {
            return code.to_string();
        }
        if approx_eq(decimal, value * 1.5) {
            return format!("{}.", code);
        }
    }
    format!("/{}", decimal)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
