//! Integration tests for MusicString parsing
//!
//! These tests drive the public `Parser` API end to end and inspect the
//! element stream seen by listeners.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::atomic::AtomicBool;

use musicstring::element::{Instrument, Tempo, Voice};
use musicstring::{
    parse_elements, Element, ElementCollector, Error, NoteKind, Parser, ParserListener,
    ParserOptions, Subscriptions,
};
use tempfile::NamedTempFile;

/// Helper to parse leniently and return every element fired
fn parse_all(music: &str) -> Vec<Element> {
    let mut parser = Parser::new();
    let collector = ElementCollector::new();
    parser.register(collector.clone());
    parser.parse(music).expect("lenient parse failed");
    collector.take()
}

/// Helper returning (value, kind) for every note-like element
fn note_summary(elements: &[Element]) -> Vec<(u8, NoteKind)> {
    elements
        .iter()
        .filter_map(|e| e.as_note().map(|n| (n.value(), n.kind())))
        .collect()
}

// =============================================================================
// Element stream
// =============================================================================

#[test]
fn test_voice_tempo_chord_and_notes() {
    let elements = parse_elements("V0 T120 Cmaj5q C5q+E5q").unwrap();

    assert_eq!(elements[0], Element::Voice(Voice { channel: 0 }));
    assert_eq!(elements[1], Element::Tempo(Tempo { bpm: 120 }));
    match &elements[2] {
        Element::Chord(chord) => {
            assert_eq!(chord.root().value(), 60);
            assert_eq!(chord.name(), "MAJ");
            assert_eq!(chord.root().decimal_duration(), 0.25);
        }
        other => panic!("expected chord, got {:?}", other),
    }
    assert_eq!(
        note_summary(&elements[3..]),
        vec![
            (64, NoteKind::Parallel),
            (67, NoteKind::Parallel),
            (60, NoteKind::First),
            (64, NoteKind::Parallel),
        ]
    );
    assert_eq!(elements.len(), 7);
}

#[test]
fn test_inversions_change_fired_pitches() {
    let fired = |music: &str| -> Vec<u8> {
        parse_elements(music)
            .unwrap()
            .iter()
            .filter_map(|e| e.as_note().map(|n| n.value()))
            .collect()
    };
    assert_eq!(fired("C5majq"), vec![60, 64, 67]);
    assert_eq!(fired("C5maj^q"), vec![72, 64, 67]);
    assert_eq!(fired("C5maj^^q"), vec![72, 76, 67]);

    // the written root is kept for re-rendering
    let elements = parse_elements("C5maj^q").unwrap();
    match &elements[0] {
        Element::Chord(chord) => {
            assert_eq!(chord.root().value(), 60);
            assert_eq!(elements[0].music_string(), "[60]maj^q");
        }
        other => panic!("expected chord, got {:?}", other),
    }
}

#[test]
fn test_instrument_by_name() {
    let elements = parse_elements("I[Flute]").unwrap();
    assert_eq!(elements, vec![Element::Instrument(Instrument { program: 73 })]);
}

#[test]
fn test_percussion_names() {
    let elements = parse_elements("V9 [Acoustic_Bass_Drum]q [Closed_Hi_Hat]i").unwrap();
    let values: Vec<u8> = note_summary(&elements).iter().map(|(v, _)| *v).collect();
    assert_eq!(values, vec![35, 42]);
}

#[test]
fn test_controllers_and_messages() {
    let elements =
        parse_elements("X[Volume]=16383 &8192 +100 *60,20 ^DEC:240,247 @256 L2 |").unwrap();
    let strings: Vec<String> = elements.iter().map(|e| e.music_string()).collect();
    assert_eq!(
        strings,
        vec!["X7=127", "X39=127", "&8192", "+100", "*60,20", "^DEC:240,247", "@256", "L2", "|"]
    );
}

#[test]
fn test_key_signature_applies_to_following_notes() {
    let elements = parse_elements("KEbmaj E5q A5q B5q C5q Bn5q").unwrap();
    let values: Vec<u8> = note_summary(&elements).iter().map(|(v, _)| *v).collect();
    assert_eq!(values, vec![63, 68, 70, 60, 71]);
}

#[test]
fn test_tuplet_duration() {
    let elements = parse_elements("C5q*2:3").unwrap();
    let note = elements[0].as_note().unwrap();
    assert!((note.decimal_duration() - 0.25 * 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(note.duration(), 21);
}

#[test]
fn test_music_string_reparses() {
    let elements = parse_elements("V3 T90 I[Cello] KGmaj F4h.a80 Rq Cmin^^w X7=90 |").unwrap();
    let text: Vec<String> = elements
        .iter()
        .filter(|e| !matches!(e, Element::Note(n) if n.kind() == NoteKind::Parallel))
        .map(|e| e.music_string())
        .collect();
    let again = parse_elements(&text.join(" ")).unwrap();
    assert_eq!(elements.len(), again.len());
    for (a, b) in elements.iter().zip(&again) {
        assert_eq!(a.verify_string(), b.verify_string());
    }
}

#[test]
fn test_json_output_is_tagged() {
    let elements = parse_elements("V1 C5q").unwrap();
    let json = serde_json::to_value(&elements).unwrap();
    assert_eq!(json[0]["type"], "voice");
    assert_eq!(json[0]["channel"], 1);
    assert_eq!(json[1]["type"], "note");
    assert_eq!(json[1]["value"], 60);
    assert_eq!(json[1]["kind"], "first");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unknown_token_is_reported_and_skipped() {
    let mut parser = Parser::new();
    let collector = ElementCollector::new();
    parser.register(collector.clone());

    let summary = parser.parse("Z5q C5q").unwrap();
    assert_eq!(summary.errors.len(), 1);
    let message = summary.errors[0].to_string();
    assert!(message.contains("Z5q"), "{}", message);
    assert_eq!(note_summary(&collector.elements()), vec![(60, NoteKind::First)]);
}

#[test]
fn test_strict_mode_returns_parse_error() {
    let mut parser = Parser::with_options(ParserOptions::new().strict(true));
    let err = parser.parse("C5q I[Kazoo]").unwrap_err();
    match err {
        Error::Parse { token, source, .. } => {
            assert_eq!(token, "I[Kazoo]");
            assert!(matches!(*source, Error::UndefinedSymbol(ref s) if s == "KAZOO"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_dictionary_cycle_is_an_error() {
    let mut parser = Parser::with_options(ParserOptions::new().strict(true));
    let err = parser.parse("$A=B $B=A I[A]").unwrap_err();
    assert!(matches!(err.root_cause(), Error::DictionaryCycle(_)));
}

#[test]
fn test_lenient_collects_every_error() {
    let elements = parse_all("V16 T0 Hq C5q K#maj");
    assert_eq!(note_summary(&elements), vec![(60, NoteKind::First)]);

    let mut parser = Parser::new();
    let summary = parser.parse("V16 T0 Hq C5q K#maj").unwrap();
    assert_eq!(summary.tokens, 5);
    assert_eq!(summary.errors.len(), 4);
}

// =============================================================================
// Parser session
// =============================================================================

#[test]
fn test_default_tempo_policy() {
    let mut parser = Parser::with_options(ParserOptions::new().default_tempo(true));
    let collector = ElementCollector::new();
    parser.register(collector.clone());
    parser.parse("C5q D5q").unwrap();
    let elements = collector.take();
    assert_eq!(elements[0], Element::Tempo(Tempo { bpm: 120 }));
    assert_eq!(elements.len(), 3);
}

#[test]
fn test_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "$LEAD=[Trumpet]").unwrap();
    writeln!(file, "V0 I[Lead] T[Andante]").unwrap();
    writeln!(file, "C5q E5q G5h").unwrap();

    let mut parser = Parser::with_options(ParserOptions::new().strict(true));
    let collector = ElementCollector::new();
    parser.register(collector.clone());
    let summary = parser.parse_file(file.path()).unwrap();

    assert_eq!(summary.tokens, 7);
    let elements = collector.take();
    assert_eq!(elements[1], Element::Instrument(Instrument { program: 56 }));
    assert_eq!(elements.len(), 6);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut parser = Parser::new();
    let err = parser.parse_file(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_cancel_before_start() {
    let mut parser = Parser::new();
    let cancel = AtomicBool::new(true);
    assert!(matches!(
        parser.parse_with_cancel("C5q", &cancel),
        Err(Error::Cancelled(0))
    ));
}

/// Listener that counts notes and stops listening after `limit`
struct NoteCounter {
    seen: Rc<RefCell<usize>>,
    limit: usize,
}

impl ParserListener for NoteCounter {
    fn on_element(
        &mut self,
        element: &Element,
        subscriptions: &mut Subscriptions<'_>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if element.is_note() {
            *self.seen.borrow_mut() += 1;
            if *self.seen.borrow() == self.limit {
                let me = subscriptions.current();
                subscriptions.unregister(me);
            }
        }
        Ok(())
    }
}

#[test]
fn test_listener_can_unregister_itself() {
    let seen = Rc::new(RefCell::new(0));
    let mut parser = Parser::new();
    parser.register(NoteCounter {
        seen: seen.clone(),
        limit: 2,
    });
    parser.parse("C5q D5q E5q F5q").unwrap();
    assert_eq!(*seen.borrow(), 2);
}

#[test]
fn test_failing_listener_does_not_starve_others() {
    let mut parser = Parser::new();
    let collector = ElementCollector::new();
    parser.register_fn(|_| Err("listener down".into()));
    parser.register(collector.clone());

    let summary = parser.parse("V0 C5q").unwrap();
    assert_eq!(summary.errors.len(), 2);
    assert!(summary.errors[0].to_string().contains("listener down"));
    assert_eq!(collector.elements().len(), 2);
}
