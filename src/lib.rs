pub mod element;
pub mod environment;
pub mod error;
pub mod parser;

pub use element::{Chord, Element, KeySignature, Note, NoteKind};
pub use environment::Environment;
pub use error::{Error, Result};
pub use parser::event::{ElementCollector, ListenerId, ParserListener, Progress, Subscriptions};
pub use parser::{parse_elements, ParseSummary, Parser, ParserOptions};
