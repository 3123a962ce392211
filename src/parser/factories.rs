//! Element factories for everything except notes
//!
//! Each factory consumes one whole token and returns the elements it
//! describes. The leading character selects the factory.

use super::note;
use super::reader::TokenReader;
use crate::element::{
    ChannelPressure, Controller, Element, Instrument, KeySignature, Layer, Mode, PitchBend,
    PolyphonicPressure, SystemExclusive, Tempo, Time, Voice,
};
use crate::environment::Environment;
use crate::error::{Error, Result};

/// Session state visible to factories
pub struct ParseContext<'a> {
    pub environment: &'a mut Environment,
    pub key_signature: KeySignature,
}

/// Builds the elements of one token
pub type Factory = fn(&mut TokenReader<'_>, &mut ParseContext<'_>) -> Result<Vec<Element>>;

/// Kind of token, decided by its leading character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Voice,
    Tempo,
    Instrument,
    Layer,
    Controller,
    KeySignature,
    Time,
    PitchBend,
    PolyphonicPressure,
    ChannelPressure,
    SystemExclusive,
    Measure,
    Dictionary,
    Note,
}

impl TokenKind {
    pub fn from_lead(lead: char) -> Option<Self> {
        let kind = match lead.to_ascii_uppercase() {
            'V' => Self::Voice,
            'T' => Self::Tempo,
            'I' => Self::Instrument,
            'L' => Self::Layer,
            'X' => Self::Controller,
            'K' => Self::KeySignature,
            '@' => Self::Time,
            '&' => Self::PitchBend,
            '*' => Self::PolyphonicPressure,
            '+' => Self::ChannelPressure,
            '^' => Self::SystemExclusive,
            '|' => Self::Measure,
            '$' => Self::Dictionary,
            'A'..='G' | 'R' | '0'..='9' | '[' => Self::Note,
            _ => return None,
        };
        Some(kind)
    }

    pub fn factory(&self) -> Factory {
        match self {
            Self::Voice => parse_voice,
            Self::Tempo => parse_tempo,
            Self::Instrument => parse_instrument,
            Self::Layer => parse_layer,
            Self::Controller => parse_controller,
            Self::KeySignature => parse_key_signature,
            Self::Time => parse_time,
            Self::PitchBend => parse_pitch_bend,
            Self::PolyphonicPressure => parse_polyphonic_pressure,
            Self::ChannelPressure => parse_channel_pressure,
            Self::SystemExclusive => parse_system_exclusive,
            Self::Measure => parse_measure,
            Self::Dictionary => parse_dictionary,
            Self::Note => note::parse_note_token,
        }
    }
}

/// Check a value against an inclusive range
pub(crate) fn check_range(what: &'static str, value: i64, min: i64, max: i64) -> Result<i64> {
    if value < min || value > max {
        return Err(Error::ValueOutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn expect_lead(reader: &mut TokenReader<'_>, lead: char) -> Result<()> {
    reader.expect_char(&[lead.to_ascii_uppercase(), lead.to_ascii_lowercase()])?;
    Ok(())
}

fn read_ranged(
    reader: &mut TokenReader<'_>,
    env: &Environment,
    what: &'static str,
    max: i64,
) -> Result<i64> {
    let operand = reader.read_operand()?;
    check_range(what, env.long(&operand)?, 0, max)
}

fn parse_voice(reader: &mut TokenReader<'_>, ctx: &mut ParseContext<'_>) -> Result<Vec<Element>> {
    expect_lead(reader, 'V')?;
    let channel = read_ranged(reader, ctx.environment, "Voice", 15)? as u8;
    reader.expect_end()?;
    Ok(vec![Element::Voice(Voice { channel })])
}

fn parse_tempo(reader: &mut TokenReader<'_>, ctx: &mut ParseContext<'_>) -> Result<Vec<Element>> {
    expect_lead(reader, 'T')?;
    let operand = reader.read_operand()?;
    let bpm = check_range("Tempo", ctx.environment.int(&operand)? as i64, 1, i32::MAX as i64)?;
    reader.expect_end()?;
    Ok(vec![Element::Tempo(Tempo { bpm: bpm as u32 })])
}

fn parse_instrument(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    expect_lead(reader, 'I')?;
    let program = read_ranged(reader, ctx.environment, "Instrument", 127)? as u8;
    reader.expect_end()?;
    Ok(vec![Element::Instrument(Instrument { program })])
}

fn parse_layer(reader: &mut TokenReader<'_>, ctx: &mut ParseContext<'_>) -> Result<Vec<Element>> {
    expect_lead(reader, 'L')?;
    let operand = reader.read_operand()?;
    let index = ctx.environment.byte(&operand)?;
    reader.expect_end()?;
    Ok(vec![Element::Layer(Layer { index })])
}

fn parse_time(reader: &mut TokenReader<'_>, ctx: &mut ParseContext<'_>) -> Result<Vec<Element>> {
    reader.expect_char(&['@'])?;
    let operand = reader.read_operand()?;
    let ticks = check_range("Time", ctx.environment.long(&operand)?, 0, i64::MAX)?;
    reader.expect_end()?;
    Ok(vec![Element::Time(Time { ticks: ticks as u64 })])
}

/// `X<index>=<value>`; an index above 127 names a coarse/fine pair
fn parse_controller(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    expect_lead(reader, 'X')?;
    let index = read_ranged(reader, ctx.environment, "Controller index", 16383)?;
    reader.expect_char(&['='])?;

    if index <= 127 {
        let value = read_ranged(reader, ctx.environment, "Controller value", 127)?;
        reader.expect_end()?;
        return Ok(vec![Element::Controller(Controller {
            index: index as u8,
            value: value as u8,
        })]);
    }

    let value = read_ranged(reader, ctx.environment, "Controller value", 16383)?;
    reader.expect_end()?;
    let coarse = Controller {
        index: (index / 128) as u8,
        value: (value >> 7) as u8,
    };
    let fine = Controller {
        index: (index % 128) as u8,
        value: (value & 0x7F) as u8,
    };
    Ok(vec![Element::Controller(coarse), Element::Controller(fine)])
}

/// `K<root>[#|b]MAJ|MIN`
fn parse_key_signature(
    reader: &mut TokenReader<'_>,
    _ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    expect_lead(reader, 'K')?;
    let token = reader.token();
    let invalid = || Error::InvalidKeySignature(token.to_string());

    let letter = match reader.next_char() {
        Some(c) if ('A'..='G').contains(&c.to_ascii_uppercase()) => c.to_ascii_uppercase(),
        _ => return Err(invalid()),
    };
    let mut root = letter.to_string();
    if reader.eat('#') {
        root.push('#');
    } else if matches!(reader.peek(), Some('b' | 'B')) {
        // flat only when the mode name follows
        let rest = reader.remainder()[1..].to_ascii_uppercase();
        if rest.starts_with("MAJ") || rest.starts_with("MIN") {
            reader.advance(1);
            root.push('b');
        }
    }
    // a natural sign names the same key
    reader.eat('n');

    let mode = if reader.eat_prefix_ignore_case("maj") {
        Mode::Major
    } else if reader.eat_prefix_ignore_case("min") {
        Mode::Minor
    } else {
        return Err(invalid());
    };
    reader.expect_end()?;

    let key = KeySignature::from_root(&root, mode)?;
    Ok(vec![Element::KeySignature(key)])
}

/// `&<0-16383>` or `&<lsb>,<msb>`
fn parse_pitch_bend(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['&'])?;
    let operand = reader.read_operand()?;
    let first = ctx.environment.long(&operand)?;

    let bend = if reader.eat(',') {
        let lsb = check_range("Pitch bend LSB", first, 0, 127)? as u8;
        let msb = read_ranged(reader, ctx.environment, "Pitch bend MSB", 127)? as u8;
        PitchBend { lsb, msb }
    } else {
        let value = check_range("Pitch bend", first, 0, PitchBend::MAX as i64)?;
        PitchBend::from_value(value as u16)
    };
    reader.expect_end()?;
    Ok(vec![Element::PitchBend(bend)])
}

fn parse_polyphonic_pressure(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['*'])?;
    let key = read_ranged(reader, ctx.environment, "Polyphonic pressure key", 127)? as u8;
    reader.expect_char(&[','])?;
    let value = read_ranged(reader, ctx.environment, "Polyphonic pressure", 127)? as u8;
    reader.expect_end()?;
    Ok(vec![Element::PolyphonicPressure(PolyphonicPressure { key, value })])
}

fn parse_channel_pressure(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['+'])?;
    let value = read_ranged(reader, ctx.environment, "Channel pressure", 127)? as u8;
    reader.expect_end()?;
    Ok(vec![Element::ChannelPressure(ChannelPressure { value })])
}

/// `^DEC:<b>,<b>,...` or `^HEX:<b>,<b>,...`
fn parse_system_exclusive(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['^'])?;
    let hex = if reader.eat_prefix_ignore_case("HEX:") {
        true
    } else if reader.eat_prefix_ignore_case("DEC:") {
        false
    } else {
        return Err(Error::unexpected(reader.peek(), "'DEC:' or 'HEX:'"));
    };

    let mut bytes = Vec::new();
    loop {
        let byte = if hex {
            let digits = reader.read_until(&[',']);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(Error::MalformedNumber(digits));
            }
            u8::from_str_radix(&digits, 16).map_err(|_| Error::MalformedNumber(digits))?
        } else {
            let operand = reader.read_operand()?;
            ctx.environment.byte(&operand)?
        };
        bytes.push(byte);
        if !reader.eat(',') {
            break;
        }
    }
    reader.expect_end()?;
    Ok(vec![Element::SystemExclusive(SystemExclusive { bytes })])
}

fn parse_measure(
    reader: &mut TokenReader<'_>,
    _ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['|'])?;
    reader.expect_end()?;
    Ok(vec![Element::Measure])
}

/// `$NAME=VALUE` adds a dictionary entry and produces no element
fn parse_dictionary(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    reader.expect_char(&['$'])?;
    let name = reader.read_until(&['=']);
    if name.is_empty() {
        return Err(Error::unexpected(reader.peek(), "a dictionary name"));
    }
    reader.expect_char(&['='])?;
    let value = reader.remainder();
    if value.is_empty() {
        return Err(Error::unexpected(None, "a dictionary value"));
    }
    reader.advance(value.chars().count());
    ctx.environment.define(&name, &value);
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with(env: &mut Environment, token: &str) -> Result<Vec<Element>> {
        let mut reader = TokenReader::new(token);
        let lead = reader.peek().unwrap();
        let kind = TokenKind::from_lead(lead).unwrap();
        let mut ctx = ParseContext {
            environment: env,
            key_signature: KeySignature::default(),
        };
        (kind.factory())(&mut reader, &mut ctx)
    }

    fn parse(token: &str) -> Result<Vec<Element>> {
        parse_with(&mut Environment::new(), token)
    }

    fn single(token: &str) -> Element {
        let mut elements = parse(token).unwrap();
        assert_eq!(elements.len(), 1, "{}", token);
        elements.remove(0)
    }

    #[test]
    fn test_routing() {
        assert_eq!(TokenKind::from_lead('v'), Some(TokenKind::Voice));
        assert_eq!(TokenKind::from_lead('c'), Some(TokenKind::Note));
        assert_eq!(TokenKind::from_lead('['), Some(TokenKind::Note));
        assert_eq!(TokenKind::from_lead('7'), Some(TokenKind::Note));
        assert_eq!(TokenKind::from_lead('Z'), None);
        assert_eq!(TokenKind::from_lead('#'), None);
    }

    #[test]
    fn test_voice() {
        assert_eq!(single("V9"), Element::Voice(Voice { channel: 9 }));
        assert!(matches!(parse("V16"), Err(Error::ValueOutOfRange { value: 16, .. })));
        assert!(matches!(parse("V"), Err(Error::MalformedNumber(_))));
        assert!(matches!(parse("V1x"), Err(Error::UnexpectedChar { found: 'x', .. })));
    }

    #[test]
    fn test_tempo() {
        assert_eq!(single("T120"), Element::Tempo(Tempo { bpm: 120 }));
        assert_eq!(single("T[Allegro]"), Element::Tempo(Tempo { bpm: 120 }));
        assert_eq!(single("TAdagio"), Element::Tempo(Tempo { bpm: 60 }));
        assert!(matches!(parse("T0"), Err(Error::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_instrument() {
        assert_eq!(single("I[Flute]"), Element::Instrument(Instrument { program: 73 }));
        assert_eq!(single("I0"), Element::Instrument(Instrument { program: 0 }));
        assert!(matches!(parse("I128"), Err(Error::ValueOutOfRange { .. })));
        assert!(matches!(parse("I[Kazoo]"), Err(Error::UndefinedSymbol(s)) if s == "KAZOO"));
    }

    #[test]
    fn test_layer_and_time() {
        assert_eq!(single("L3"), Element::Layer(Layer { index: 3 }));
        assert_eq!(single("@4000"), Element::Time(Time { ticks: 4000 }));
    }

    #[test]
    fn test_controller() {
        assert_eq!(
            single("X7=100"),
            Element::Controller(Controller { index: 7, value: 100 })
        );
        assert_eq!(
            single("X[Volume_Coarse]=[On]"),
            Element::Controller(Controller { index: 7, value: 127 })
        );
        assert!(matches!(parse("X7=200"), Err(Error::ValueOutOfRange { .. })));
        assert!(matches!(parse("X7"), Err(Error::UnexpectedEnd { .. })));
    }

    #[test]
    fn test_combined_controller() {
        let elements = parse("X[Volume]=10200").unwrap();
        assert_eq!(
            elements,
            vec![
                Element::Controller(Controller { index: 7, value: 79 }),
                Element::Controller(Controller { index: 39, value: 88 }),
            ]
        );
    }

    #[test]
    fn test_key_signature() {
        let key = |token: &str| match single(token) {
            Element::KeySignature(k) => (k.fifths(), k.mode()),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(key("KGmaj"), (1, Mode::Major));
        assert_eq!(key("KBbMAJ"), (-2, Mode::Major));
        assert_eq!(key("kebmin"), (-6, Mode::Minor));
        assert_eq!(key("KBMAJ"), (5, Mode::Major));
        assert_eq!(key("KF#min"), (3, Mode::Minor));
        assert_eq!(key("KCnmaj"), (0, Mode::Major));
        assert!(matches!(parse("KD#maj"), Err(Error::InvalidKeySignature(_))));
        assert!(matches!(parse("KHmaj"), Err(Error::InvalidKeySignature(_))));
        assert!(matches!(parse("KCdor"), Err(Error::InvalidKeySignature(_))));
    }

    #[test]
    fn test_pitch_bend() {
        assert_eq!(single("&8192"), Element::PitchBend(PitchBend { lsb: 0, msb: 64 }));
        assert_eq!(single("&5,64"), Element::PitchBend(PitchBend { lsb: 5, msb: 64 }));
        assert!(matches!(parse("&16384"), Err(Error::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_pressure() {
        assert_eq!(
            single("+90"),
            Element::ChannelPressure(ChannelPressure { value: 90 })
        );
        assert_eq!(
            single("*60,30"),
            Element::PolyphonicPressure(PolyphonicPressure { key: 60, value: 30 })
        );
        assert!(matches!(parse("*60"), Err(Error::UnexpectedEnd { .. })));
    }

    #[test]
    fn test_system_exclusive() {
        assert_eq!(
            single("^DEC:240,67,247"),
            Element::SystemExclusive(SystemExclusive { bytes: vec![240, 67, 247] })
        );
        assert_eq!(
            single("^hex:F0,43,f7"),
            Element::SystemExclusive(SystemExclusive { bytes: vec![0xF0, 0x43, 0xF7] })
        );
        assert!(matches!(parse("^HEX:F0,ZZ"), Err(Error::MalformedNumber(s)) if s == "ZZ"));
        assert!(matches!(parse("^HEX:+F"), Err(Error::MalformedNumber(s)) if s == "+F"));
        assert!(matches!(parse("^HEX:F0,"), Err(Error::MalformedNumber(s)) if s.is_empty()));
        assert!(matches!(parse("^HEX:100"), Err(Error::MalformedNumber(_))));
        assert!(matches!(parse("^OCT:1"), Err(Error::UnexpectedChar { found: 'O', .. })));
    }

    #[test]
    fn test_measure() {
        assert_eq!(single("|"), Element::Measure);
        assert!(parse("|x").is_err());
    }

    #[test]
    fn test_dictionary_definition() {
        let mut env = Environment::empty();
        assert!(parse_with(&mut env, "$LOUD=120").unwrap().is_empty());
        assert_eq!(env.byte("loud").unwrap(), 120);
        assert!(matches!(parse_with(&mut env, "$=5"), Err(Error::UnexpectedChar { .. })));
        assert!(matches!(parse_with(&mut env, "$X="), Err(Error::UnexpectedEnd { .. })));
    }
}
