//! Parsed musical elements
//!
//! Every element renders back to a canonical music string through
//! `Display` and describes itself through `verify_string`.

pub mod chord;
pub mod key_signature;
pub mod note;

pub use chord::{Chord, ChordShape};
pub use key_signature::{KeySignature, Mode};
pub use note::{Note, NoteKind, RESOLUTION};

use serde::Serialize;
use std::fmt;

/// Voice (MIDI channel), 0-15
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub channel: u8,
}

/// Tempo in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tempo {
    pub bpm: u32,
}

/// Instrument program change, 0-127
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub program: u8,
}

/// Percussion layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub index: u8,
}

/// Absolute time position in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Time {
    pub ticks: u64,
}

/// Controller change, index and value 0-127
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controller {
    pub index: u8,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelPressure {
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolyphonicPressure {
    pub key: u8,
    pub value: u8,
}

/// Pitch wheel position as 7-bit halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchBend {
    pub lsb: u8,
    pub msb: u8,
}

impl PitchBend {
    /// Maximum combined 14-bit value
    pub const MAX: u16 = 16383;

    pub fn from_value(value: u16) -> Self {
        Self {
            lsb: (value & 0x7F) as u8,
            msb: ((value >> 7) & 0x7F) as u8,
        }
    }

    pub fn value(&self) -> u16 {
        ((self.msb as u16) << 7) | self.lsb as u16
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemExclusive {
    pub bytes: Vec<u8>,
}

/// A parsed element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Voice(Voice),
    Tempo(Tempo),
    Instrument(Instrument),
    Layer(Layer),
    Time(Time),
    KeySignature(KeySignature),
    Controller(Controller),
    ChannelPressure(ChannelPressure),
    PolyphonicPressure(PolyphonicPressure),
    PitchBend(PitchBend),
    SystemExclusive(SystemExclusive),
    Measure,
    Note(Note),
    Chord(Chord),
}

impl Element {
    /// Canonical music string for this element
    pub fn music_string(&self) -> String {
        self.to_string()
    }

    /// The note carried by a `Note`, or the sounding root of a `Chord`
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Self::Note(note) => Some(note),
            Self::Chord(chord) => Some(chord.sounding_root()),
            _ => None,
        }
    }

    pub fn is_note(&self) -> bool {
        self.as_note().is_some()
    }

    /// Human-readable description used to verify parser output
    pub fn verify_string(&self) -> String {
        match self {
            Self::Voice(v) => format!("Voice: voice={}", v.channel),
            Self::Tempo(t) => format!("Tempo: tempo={}", t.bpm),
            Self::Instrument(i) => format!("Instrument: instrument={}", i.program),
            Self::Layer(l) => format!("Layer: layer={}", l.index),
            Self::Time(t) => format!("Time: time={}", t.ticks),
            Self::KeySignature(k) => k.verify_string(),
            Self::Controller(c) => format!("Controller: id={}, value={}", c.index, c.value),
            Self::ChannelPressure(p) => format!("ChannelPressure: pressure={}", p.value),
            Self::PolyphonicPressure(p) => {
                format!("PolyphonicPressure: key={}, pressure={}", p.key, p.value)
            }
            Self::PitchBend(b) => format!("PitchBend: bend={}", b.value()),
            Self::SystemExclusive(s) => {
                let bytes: Vec<String> = s.bytes.iter().map(|b| b.to_string()).collect();
                format!("SysEx: bytes={}", bytes.join(","))
            }
            Self::Measure => "Measure".to_string(),
            Self::Note(n) => n.verify_string(),
            Self::Chord(c) => c.verify_string(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voice(v) => write!(f, "V{}", v.channel),
            Self::Tempo(t) => write!(f, "T{}", t.bpm),
            Self::Instrument(i) => write!(f, "I{}", i.program),
            Self::Layer(l) => write!(f, "L{}", l.index),
            Self::Time(t) => write!(f, "@{}", t.ticks),
            Self::KeySignature(k) => write!(f, "{}", k),
            Self::Controller(c) => write!(f, "X{}={}", c.index, c.value),
            Self::ChannelPressure(p) => write!(f, "+{}", p.value),
            Self::PolyphonicPressure(p) => write!(f, "*{},{}", p.key, p.value),
            Self::PitchBend(b) => write!(f, "&{}", b.value()),
            Self::SystemExclusive(s) => {
                let bytes: Vec<String> = s.bytes.iter().map(|b| b.to_string()).collect();
                write!(f, "^DEC:{}", bytes.join(","))
            }
            Self::Measure => f.write_str("|"),
            Self::Note(n) => write!(f, "{}", n),
            Self::Chord(c) => write!(f, "{}", c),
        }
    }
}

impl From<Note> for Element {
    fn from(note: Note) -> Self {
        Self::Note(note)
    }
}

impl From<Chord> for Element {
    fn from(chord: Chord) -> Self {
        Self::Chord(chord)
    }
}
