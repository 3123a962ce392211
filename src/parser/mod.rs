//! MusicString parser - splits text into tokens and fires elements
//!
//! Tokens are separated by whitespace. The first character of a token
//! selects its factory; the factory reads the whole token before any
//! element reaches a listener.

pub mod event;
pub mod factories;
pub mod note;
pub mod reader;

use crate::element::{Element, KeySignature, Tempo};
use crate::environment::Environment;
use crate::error::{Error, Result};
use event::{
    ElementCollector, EventDispatcher, FnListener, ListenerId, ListenerResult, ParserListener,
    Progress,
};
use factories::{ParseContext, TokenKind};
use reader::TokenReader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tempo fired when the default-tempo policy is on and the music sets none
pub const DEFAULT_TEMPO: u32 = 120;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Stop at the first failing token instead of skipping it
    pub strict: bool,
    /// Fire `Tempo(DEFAULT_TEMPO)` before the first voice or note when no
    /// tempo was given
    pub default_tempo: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn default_tempo(mut self, default_tempo: bool) -> Self {
        self.default_tempo = default_tempo;
        self
    }
}

/// Outcome of a lenient parse
#[derive(Debug, Default)]
pub struct ParseSummary {
    /// Tokens processed, including skipped ones
    pub tokens: usize,
    /// Elements delivered to listeners
    pub elements: usize,
    /// Errors of skipped tokens, in input order
    pub errors: Vec<Error>,
}

impl ParseSummary {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// MusicString parser
#[derive(Debug)]
pub struct Parser {
    environment: Environment,
    dispatcher: EventDispatcher,
    options: ParserOptions,
    key_signature: KeySignature,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            environment: Environment::new(),
            dispatcher: EventDispatcher::new(),
            options,
            key_signature: KeySignature::default(),
        }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// Add a dictionary definition, as a `$NAME=VALUE` token would
    pub fn define(&mut self, name: &str, value: &str) {
        self.environment.define(name, value);
    }

    /// Key signature currently applied to letter notes
    pub fn key_signature(&self) -> KeySignature {
        self.key_signature
    }

    pub fn register<L: ParserListener + 'static>(&mut self, listener: L) -> ListenerId {
        self.dispatcher.register(listener)
    }

    pub fn register_fn<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&Element) -> ListenerResult + 'static,
    {
        self.dispatcher.register(FnListener::new(f))
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        self.dispatcher.unregister(id)
    }

    /// Parse a music string, firing its elements to the listeners
    ///
    /// In lenient mode failing tokens are logged, skipped and returned in
    /// the summary. In strict mode the first failure is returned.
    pub fn parse(&mut self, text: &str) -> Result<ParseSummary> {
        self.run(text, None)
    }

    /// Like [`Parser::parse`], checking `cancel` before every token
    pub fn parse_with_cancel(&mut self, text: &str, cancel: &AtomicBool) -> Result<ParseSummary> {
        self.run(text, Some(cancel))
    }

    pub fn parse_reader<R: Read>(&mut self, mut input: R) -> Result<ParseSummary> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        self.parse(&text)
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<ParseSummary> {
        log::info!("parsing {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(file)
    }

    fn run(&mut self, text: &str, cancel: Option<&AtomicBool>) -> Result<ParseSummary> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let total = tokens.len();
        let mut summary = ParseSummary::default();
        // tempo tracking starts over with every parse
        let mut tempo_pending = self.options.default_tempo;

        for (index, token) in tokens.iter().enumerate() {
            if cancel.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                log::info!("parse cancelled after {} of {} tokens", index, total);
                return Err(Error::Cancelled(index));
            }

            match self.process_token(token, &mut tempo_pending, &mut summary.elements) {
                Ok(()) => {}
                Err(e) if self.options.strict => return Err(e),
                Err(e) => {
                    log::warn!("skipping token '{}': {}", token, e);
                    summary.errors.push(e);
                }
            }
            summary.tokens += 1;

            self.dispatcher.progress(&Progress {
                description: (*token).to_string(),
                processed: index + 1,
                total,
            });
        }

        Ok(summary)
    }

    /// Build one token's elements and fire them, adding each fired element
    /// to `delivered` even when a listener fails on it
    fn process_token(
        &mut self,
        token: &str,
        tempo_pending: &mut bool,
        delivered: &mut usize,
    ) -> Result<()> {
        let elements = self.build_token(token)?;
        log::debug!("{} -> {} element(s)", token, elements.len());

        let mut fired = Vec::with_capacity(elements.len() + 1);
        if *tempo_pending {
            match elements.first() {
                Some(Element::Tempo(_)) => *tempo_pending = false,
                Some(Element::Voice(_) | Element::Note(_) | Element::Chord(_)) => {
                    *tempo_pending = false;
                    log::debug!("no tempo given, using {}", DEFAULT_TEMPO);
                    fired.push(Element::Tempo(Tempo { bpm: DEFAULT_TEMPO }));
                }
                _ => {}
            }
        }
        fired.extend(elements);

        let mut failures = Vec::new();
        for element in &fired {
            if let Element::KeySignature(key) = element {
                self.key_signature = *key;
            }
            let result = self.dispatcher.dispatch(element);
            *delivered += 1;
            match result {
                Ok(()) => {}
                Err(Error::Listener(f)) => failures.extend(f),
                Err(e) => return Err(e),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Listener(failures))
        }
    }

    /// Parse a token without firing anything
    fn build_token(&mut self, token: &str) -> Result<Vec<Element>> {
        let mut reader = TokenReader::new(token);
        let mut ctx = ParseContext {
            environment: &mut self.environment,
            key_signature: self.key_signature,
        };
        build_elements(&mut reader, &mut ctx).map_err(|source| Error::Parse {
            token: token.to_string(),
            position: reader.position(),
            source: Box::new(source),
        })
    }
}

fn build_elements(
    reader: &mut TokenReader<'_>,
    ctx: &mut ParseContext<'_>,
) -> Result<Vec<Element>> {
    let lead = reader
        .peek()
        .ok_or_else(|| Error::unexpected(None, "a token"))?;
    let kind = TokenKind::from_lead(lead).ok_or_else(|| Error::UnexpectedChar {
        found: lead,
        expected: "an element token".into(),
    })?;
    (kind.factory())(reader, ctx)
}

/// Parse `text` strictly and return every element it fires
pub fn parse_elements(text: &str) -> Result<Vec<Element>> {
    let mut parser = Parser::with_options(ParserOptions::new().strict(true));
    let collector = ElementCollector::new();
    parser.register(collector.clone());
    parser.parse(text)?;
    Ok(collector.take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Mode, NoteKind, Voice};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect(parser: &mut Parser) -> ElementCollector {
        let collector = ElementCollector::new();
        parser.register(collector.clone());
        collector
    }

    #[test]
    fn test_tokens_fire_in_order() {
        let elements = parse_elements("V1 I[Piano] C5q |").unwrap();
        let strings: Vec<String> = elements.iter().map(|e| e.music_string()).collect();
        assert_eq!(strings, vec!["V1", "I0", "[60]q", "|"]);
    }

    #[test]
    fn test_lenient_skips_bad_tokens() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        let summary = parser.parse("C5q Z5q V99 E5q").unwrap();
        assert_eq!(summary.tokens, 4);
        assert_eq!(summary.elements, 2);
        assert_eq!(summary.errors.len(), 2);
        assert!(matches!(
            &summary.errors[0],
            Error::Parse { token, position: 0, .. } if token == "Z5q"
        ));
        assert!(matches!(
            summary.errors[1].root_cause(),
            Error::ValueOutOfRange { value: 99, .. }
        ));
        assert_eq!(collector.elements().len(), 2);
    }

    #[test]
    fn test_strict_stops_at_first_error() {
        let mut parser = Parser::with_options(ParserOptions::new().strict(true));
        let collector = collect(&mut parser);
        let err = parser.parse("C5q Z5q E5q").unwrap_err();
        assert!(matches!(err, Error::Parse { ref token, .. } if token == "Z5q"));
        assert_eq!(collector.elements().len(), 1);
    }

    #[test]
    fn test_failed_token_fires_nothing() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        let summary = parser.parse("C5q+E5q+Z").unwrap();
        assert_eq!(summary.errors.len(), 1);
        assert!(collector.elements().is_empty());
    }

    #[test]
    fn test_error_position() {
        let mut parser = Parser::with_options(ParserOptions::new().strict(true));
        let err = parser.parse("C5qz").unwrap_err();
        match err {
            Error::Parse { position, source, .. } => {
                assert_eq!(position, 3);
                assert!(matches!(*source, Error::InvalidVelocityPrefix('z')));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_default_tempo() {
        let mut parser = Parser::with_options(ParserOptions::new().default_tempo(true));
        let collector = collect(&mut parser);
        parser.parse("I0 V0 C5q").unwrap();
        let strings: Vec<String> = collector.take().iter().map(|e| e.music_string()).collect();
        assert_eq!(strings, vec!["I0", "T120", "V0", "[60]q"]);

        // given tempo wins
        parser.parse("T90 C5q").unwrap();
        let strings: Vec<String> = collector.take().iter().map(|e| e.music_string()).collect();
        assert_eq!(strings, vec!["T90", "[60]q"]);
    }

    #[test]
    fn test_default_tempo_waits_for_a_good_token() {
        let mut parser = Parser::with_options(ParserOptions::new().default_tempo(true));
        let collector = collect(&mut parser);
        parser.parse("V99 V1").unwrap();
        assert_eq!(
            collector.elements(),
            vec![
                Element::Tempo(Tempo { bpm: DEFAULT_TEMPO }),
                Element::Voice(Voice { channel: 1 })
            ]
        );
    }

    #[test]
    fn test_no_default_tempo_unless_asked() {
        let elements = parse_elements("C5q").unwrap();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_key_signature_carries_forward() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        parser.parse("KGmaj F5q Fn5q").unwrap();
        assert_eq!(parser.key_signature().fifths(), 1);
        assert_eq!(parser.key_signature().mode(), Mode::Major);
        let values: Vec<u8> = collector
            .elements()
            .iter()
            .filter_map(|e| e.as_note().map(|n| n.value()))
            .collect();
        assert_eq!(values, vec![66, 65]);
    }

    #[test]
    fn test_dictionary_tokens() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        parser.parse("$MELODY=[Violin] I[Melody] $LOUD=110 C5qa[Loud]").unwrap();
        let elements = collector.elements();
        assert_eq!(elements[0].music_string(), "I40");
        assert_eq!(elements[1].as_note().unwrap().attack_velocity(), 110);
        assert!(parser.environment().contains("melody"));
    }

    #[test]
    fn test_define_api() {
        let mut parser = Parser::with_options(ParserOptions::new().strict(true));
        let collector = collect(&mut parser);
        parser.define("BASS", "36");
        parser.parse("[Bass]h").unwrap();
        assert_eq!(collector.elements()[0].as_note().unwrap().value(), 36);
    }

    #[test]
    fn test_progress_after_every_token() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        parser.parse("V0 Z C5q").unwrap();
        let progress = collector.progress();
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[1].description, "Z");
        assert_eq!(progress[2].processed, 3);
        assert!(progress.iter().all(|p| p.total == 3));
    }

    #[test]
    fn test_cancel() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        let cancel = AtomicBool::new(true);
        let err = parser.parse_with_cancel("C5q D5q", &cancel).unwrap_err();
        assert!(matches!(err, Error::Cancelled(0)));
        assert!(collector.elements().is_empty());

        let flag = Rc::new(AtomicBool::new(false));
        let trip = flag.clone();
        parser.register_fn(move |_| {
            trip.store(true, Ordering::SeqCst);
            Ok(())
        });
        let err = parser.parse_with_cancel("C5q D5q", &flag).unwrap_err();
        assert!(matches!(err, Error::Cancelled(1)));
    }

    #[test]
    fn test_listener_errors() {
        let mut parser = Parser::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        parser.register_fn(|e| {
            if e.is_note() {
                Err("no notes please".into())
            } else {
                Ok(())
            }
        });
        let log = seen.clone();
        parser.register_fn(move |e| {
            log.borrow_mut().push(e.music_string());
            Ok(())
        });

        let summary = parser.parse("V0 C5q+E5q").unwrap();
        assert_eq!(summary.errors.len(), 1);
        match &summary.errors[0] {
            Error::Listener(failures) => assert_eq!(failures.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        // the second listener still saw everything
        assert_eq!(*seen.borrow(), vec!["V0", "[60]q", "[64]q"]);
        assert_eq!(summary.elements, 3);
    }

    #[test]
    fn test_delivered_count_survives_listener_failure() {
        let mut parser = Parser::new();
        let collector = collect(&mut parser);
        parser.register_fn(|_| Err("always fails".into()));

        let summary = parser.parse("C5q D5q").unwrap();
        assert_eq!(summary.errors.len(), 2);
        assert_eq!(summary.elements, 2);
        assert_eq!(collector.elements().len(), summary.elements);
    }

    #[test]
    fn test_chord_kinds_through_parser() {
        let elements = parse_elements("Cmaj5q").unwrap();
        assert!(matches!(elements[0], Element::Chord(_)));
        assert_eq!(elements[0].as_note().unwrap().kind(), NoteKind::First);
        assert_eq!(elements[1].as_note().unwrap().kind(), NoteKind::Parallel);
    }

    #[test]
    fn test_parse_reader() {
        let mut parser = Parser::with_options(ParserOptions::new().strict(true));
        let collector = collect(&mut parser);
        let summary = parser.parse_reader("V0\nT[Allegro]\n\tC5q".as_bytes()).unwrap();
        assert_eq!(summary.tokens, 3);
        assert_eq!(collector.elements()[1], Element::Tempo(Tempo { bpm: 120 }));
    }
}
