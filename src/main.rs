//! MusicString to JSON converter

use clap::Parser as ClapParser;
use log::{LevelFilter, Log, Metadata, Record};
use musicstring::{ElementCollector, Parser, ParserOptions};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(name = "musicstring")]
#[command(version = "0.1.0")]
#[command(about = "Parse MusicString text into a stream of musical events", long_about = None)]
struct Args {
    /// Input file (reads from stdin if not specified)
    input: Option<PathBuf>,

    /// Output file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// Print one verify string per element instead of JSON
    #[arg(long)]
    verify: bool,

    /// Stop at the first bad token
    #[arg(long)]
    strict: bool,

    /// Fire a 120 BPM tempo when the music sets none
    #[arg(long)]
    default_tempo: bool,

    /// Dictionary definition, NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_define)]
    defines: Vec<(String, String)>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

/// Logger writing `level: message` lines to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level().as_str().to_ascii_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ParserOptions::new()
        .strict(args.strict)
        .default_tempo(args.default_tempo);
    let mut parser = Parser::with_options(options);
    for (name, value) in &args.defines {
        parser.define(name, value);
    }

    let collector = ElementCollector::new();
    parser.register(collector.clone());

    let summary = match &args.input {
        Some(path) => parser.parse_file(path)?,
        None => parser.parse_reader(io::stdin())?,
    };
    if !summary.is_clean() {
        log::warn!(
            "{} of {} tokens skipped",
            summary.errors.len(),
            summary.tokens
        );
    }

    let elements = collector.take();
    let text = if args.verify {
        let lines: Vec<String> = elements.iter().map(|e| e.verify_string()).collect();
        lines.join("\n")
    } else if args.compact {
        serde_json::to_string(&elements)?
    } else {
        serde_json::to_string_pretty(&elements)?
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}
