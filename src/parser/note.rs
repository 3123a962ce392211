//! Note and chord tokens
//!
//! A note token is one or more sub-tokens joined by `+` (parallel) or `_`
//! (sequential). Each sub-token is read in a fixed order:
//!
//! ```text
//! root  octave?  chord? octave?  inversion?  duration  tuplet?  velocity*
//! ```
//!
//! Nothing is emitted for a token until all of it has been read.

use super::factories::{check_range, ParseContext};
use super::reader::TokenReader;
use crate::element::note::{DEFAULT_CHORD_OCTAVE, DEFAULT_OCTAVE, DEFAULT_VELOCITY, DURATION_CODES};
use crate::element::{Chord, ChordShape, Element, Note, NoteKind};
use crate::error::{Error, Result};

/// Written root of a sub-token
#[derive(Debug, Clone, Copy, PartialEq)]
enum Root {
    Rest,
    /// Pitch letter with its accidental offset
    Letter {
        pitch_class: u8,
        accidental: i8,
        natural: bool,
    },
    /// Absolute MIDI value
    Numeric(i64),
}

/// Chord part of a sub-token
struct ChordSuffix {
    shape: &'static ChordShape,
    bass: Option<Bass>,
    carets: u8,
}

/// Bass note named after an inversion caret
enum Bass {
    PitchClass(u8),
    Value(u8),
}

/// Parse a whole note token into its elements
pub fn parse_note_token(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    let mut elements = Vec::new();
    let mut kind = NoteKind::First;

    loop {
        parse_sub_token(reader, ctx, kind, &mut elements)?;
        kind = match reader.next_char() {
            None => break,
            Some('+') => NoteKind::Parallel,
            Some('_') => NoteKind::Sequential,
            Some(c) => return Err(Error::InvalidVelocityPrefix(c)),
        };
    }

    Ok(elements)
}

fn parse_sub_token(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
    kind: NoteKind,
    elements: &mut Vec<Element>,
) -> Result<()> {
    let root = parse_root(reader, ctx)?;

    let mut octave = match root {
        Root::Letter { .. } => reader.read_small_number(2).map(|o| o as u8),
        _ => None,
    };

    let chord = match root {
        Root::Rest => None,
        _ => parse_chord(reader, ctx, &mut octave, root)?,
    };

    let value = match root {
        Root::Rest => 0,
        Root::Numeric(value) => value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Root::Letter {
            pitch_class,
            accidental,
            natural,
        } => {
            let default_octave = if chord.is_some() {
                DEFAULT_CHORD_OCTAVE
            } else {
                DEFAULT_OCTAVE
            };
            let octave = *octave.get_or_insert(default_octave);
            let class = if natural || accidental != 0 {
                pitch_class as i32 + accidental as i32
            } else {
                ctx.key_signature.adjust(pitch_class, false)
            };
            octave as i32 * 12 + class
        }
    };
    if !(0..=127).contains(&value) {
        return Err(Error::NoteOutOfRange(value));
    }

    let end_of_tie = reader.eat('-');
    let decimal = parse_duration(reader, ctx)?;
    let decimal = parse_tuplet(reader)?.map_or(decimal, |ratio| decimal * ratio);
    let start_of_tie = reader.eat('-');
    let (attack, decay) = parse_velocity(reader, ctx)?;

    let note = match root {
        Root::Rest => Note::rest(),
        Root::Letter { natural, .. } => Note::new(value as u8).with_natural(natural),
        Root::Numeric(_) => Note::new(value as u8),
    };
    let note = note
        .with_octave(octave)
        .with_decimal_duration(decimal)
        .with_tie(start_of_tie, end_of_tie)
        .with_velocities(attack, decay)
        .with_kind(kind);

    match chord {
        None => elements.push(Element::Note(note)),
        Some(suffix) => {
            let inversion = match suffix.bass {
                None => suffix.carets,
                Some(Bass::PitchClass(pc)) => {
                    Chord::inversion_for_pitch_class(note.value(), suffix.shape, pc)?
                }
                Some(Bass::Value(v)) => Chord::inversion_for_value(note.value(), suffix.shape, v)?,
            };
            let chord = Chord::new(note, suffix.shape, inversion)?;
            let notes = chord.notes();
            elements.push(Element::Chord(chord));
            elements.extend(notes.into_iter().skip(1).map(Element::Note));
        }
    }
    Ok(())
}

/// Semitone offset of a pitch letter above C
fn pitch_class(letter: char) -> Option<u8> {
    let pc = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    Some(pc)
}

fn parse_root(reader: &mut TokenReader<'_>, ctx: &ParseContext<'_>) -> Result<Root> {
    match reader.peek() {
        Some('[') => {
            let symbol = reader.read_bracketed_symbol()?;
            Ok(Root::Numeric(ctx.environment.long(&symbol)?))
        }
        Some(c) if c.is_ascii_digit() => {
            let digits = reader.read_digits()?;
            Ok(Root::Numeric(ctx.environment.long(&digits)?))
        }
        Some('R' | 'r') => {
            reader.advance(1);
            Ok(Root::Rest)
        }
        Some(c) => {
            let pitch_class = pitch_class(c)
                .ok_or_else(|| Error::unexpected(Some(c), "a note letter, 'R' or a note value"))?;
            reader.advance(1);

            let mut accidental = 0i8;
            let mut natural = false;
            loop {
                if reader.eat('#') {
                    accidental += 1;
                } else if reader.eat('b') {
                    accidental -= 1;
                } else if reader.eat('n') {
                    natural = true;
                } else {
                    break;
                }
            }
            Ok(Root::Letter {
                pitch_class,
                accidental,
                natural,
            })
        }
        None => Err(Error::unexpected(None, "a note")),
    }
}

/// Chord name, an octave after it when none came before, and an inversion
fn parse_chord(
    reader: &mut TokenReader<'_>,
    ctx: &ParseContext<'_>,
    octave: &mut Option<u8>,
    root: Root,
) -> Result<Option<ChordSuffix>> {
    let Some(shape) = ChordShape::match_prefix(&reader.remainder()) else {
        return Ok(None);
    };
    reader.advance(shape.name.chars().count());

    if octave.is_none() && matches!(root, Root::Letter { .. }) {
        *octave = reader.read_small_number(2).map(|o| o as u8);
    }

    let mut carets = 0u8;
    let mut bass = None;
    while reader.eat('^') {
        carets += 1;
        if carets == 1 {
            bass = parse_bass(reader, ctx)?;
            if bass.is_some() {
                break;
            }
        }
    }

    Ok(Some(ChordSuffix { shape, bass, carets }))
}

/// Bass note after a caret: `E`, `Eb5` or `[64]`
///
/// Only uppercase letters name a bass note, so `^a100` stays a velocity.
fn parse_bass(reader: &mut TokenReader<'_>, ctx: &ParseContext<'_>) -> Result<Option<Bass>> {
    match reader.peek() {
        Some('[') => {
            let symbol = reader.read_bracketed_symbol()?;
            let value = check_range("Bass note", ctx.environment.long(&symbol)?, 0, 127)?;
            Ok(Some(Bass::Value(value as u8)))
        }
        Some(c @ 'A'..='G') => {
            reader.advance(1);
            let mut class = pitch_class(c).unwrap_or_default() as i32;
            if reader.eat('#') {
                class += 1;
            } else if reader.eat('b') {
                class -= 1;
            }
            match reader.read_small_number(2) {
                Some(octave) => {
                    let value =
                        check_range("Bass note", octave as i64 * 12 + class as i64, 0, 127)?;
                    Ok(Some(Bass::Value(value as u8)))
                }
                None => Ok(Some(Bass::PitchClass(class.rem_euclid(12) as u8))),
            }
        }
        _ => Ok(None),
    }
}

/// Decimal duration; a quarter note when none is written
fn parse_duration(reader: &mut TokenReader<'_>, ctx: &ParseContext<'_>) -> Result<f64> {
    let mut decimal = 0.0;
    let mut written = false;

    loop {
        match reader.peek() {
            Some('/') => {
                reader.advance(1);
                let operand = match reader.peek() {
                    Some('[') => reader.read_bracketed_symbol()?,
                    _ => reader.read_digits()?,
                };
                decimal += ctx.environment.double(&operand)?;
            }
            Some(c) => {
                let Some(&(_, value)) = DURATION_CODES
                    .iter()
                    .find(|(code, _)| code.eq_ignore_ascii_case(&c))
                else {
                    break;
                };
                reader.advance(1);
                decimal += if reader.eat('.') { value * 1.5 } else { value };
            }
            None => break,
        }
        written = true;
    }

    Ok(if written { decimal } else { 0.25 })
}

/// `*num:denom` scales the duration by num/denom; a bare `*` is a triplet
fn parse_tuplet(reader: &mut TokenReader<'_>) -> Result<Option<f64>> {
    if !reader.eat('*') {
        return Ok(None);
    }
    if !reader.peek().is_some_and(|c| c.is_ascii_digit()) {
        return Ok(Some(2.0 / 3.0));
    }

    let numerator = reader.read_digits()?;
    reader.expect_char(&[':'])?;
    let denominator = reader.read_digits()?;

    let parse = |digits: String| -> Result<f64> {
        match digits.parse::<f64>() {
            Ok(v) if v > 0.0 => Ok(v),
            _ => Err(Error::MalformedNumber(digits)),
        }
    };
    Ok(Some(parse(numerator)? / parse(denominator)?))
}

/// Attack (`a`, `<`) and decay (`d`, `>`) velocities
fn parse_velocity(reader: &mut TokenReader<'_>, ctx: &ParseContext<'_>) -> Result<(u8, u8)> {
    let mut attack = DEFAULT_VELOCITY;
    let mut decay = DEFAULT_VELOCITY;

    while let Some(c) = reader.peek() {
        let target = match c {
            'A' | 'a' | '<' => &mut attack,
            'D' | 'd' | '>' => &mut decay,
            '+' | '_' => break,
            other => return Err(Error::InvalidVelocityPrefix(other)),
        };
        reader.advance(1);
        let operand = reader.read_operand()?;
        *target = check_range("Velocity", ctx.environment.long(&operand)?, 0, 127)? as u8;
    }

    Ok((attack, decay))
}
