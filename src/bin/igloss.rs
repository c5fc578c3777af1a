//! Command-line interface for igloss
//! This binary parses CHAT and Toolbox transcript files into the normalized
//! session hierarchy and prints it, or reports where the annotation tiers
//! fell out of alignment.
//!
//! Usage:
//!   igloss parse --corpus `<name>` `<path>` [--pretty]  - Parse a session file to JSON
//!   igloss check --corpus `<name>` `<path>`             - Report alignment warnings
//!   igloss list-corpora                             - List built-in corpus profiles

use clap::{Arg, ArgAction, Command};

use igloss::sessions::SessionCursor;
use igloss::{CorpusRegistry, Session};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("igloss")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parser for CHAT and Toolbox interlinear-gloss transcripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a session file and print it as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the session file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("corpus")
                        .long("corpus")
                        .short('c')
                        .help("Corpus profile to parse with (see list-corpora)")
                        .required(true),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print the JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a session file and report its alignment warnings")
                .arg(
                    Arg::new("path")
                        .help("Path to the session file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("corpus")
                        .long("corpus")
                        .short('c')
                        .help("Corpus profile to parse with (see list-corpora)")
                        .required(true),
                ),
        )
        .subcommand(Command::new("list-corpora").about("List built-in corpus profiles"))
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let corpus = parse_matches.get_one::<String>("corpus").unwrap();
            let pretty = parse_matches.get_flag("pretty");
            handle_parse_command(path, corpus, pretty);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            let corpus = check_matches.get_one::<String>("corpus").unwrap();
            handle_check_command(path, corpus);
        }
        Some(("list-corpora", _)) => {
            handle_list_corpora_command();
        }
        _ => unreachable!(),
    }
}

fn parse_session(path: &str, corpus: &str) -> Session {
    let registry = CorpusRegistry::builtin();
    let profile = registry.get(corpus).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let cursor = SessionCursor::open(path, profile).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    cursor.parse()
}

/// Handle the parse command
fn handle_parse_command(path: &str, corpus: &str, pretty: bool) {
    let session = parse_session(path, corpus);
    let output = if pretty {
        serde_json::to_string_pretty(&session)
    } else {
        serde_json::to_string(&session)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing session: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str, corpus: &str) {
    let session = parse_session(path, corpus);
    let mut flagged = 0;

    for utterance in &session.utterances {
        let clean = utterance.warnings.is_empty()
            && utterance.words.iter().all(|word| word.warnings.is_empty());
        if clean {
            continue;
        }
        flagged += 1;
        for warning in &utterance.warnings {
            println!("{}: {}", utterance.source_id, warning);
        }
        for word in &utterance.words {
            for warning in &word.warnings {
                println!("{}: {}: {}", utterance.source_id, word.word, warning);
            }
        }
    }

    println!(
        "{} utterances, {} with warnings",
        session.utterances.len(),
        flagged
    );
}

/// Handle the list-corpora command
fn handle_list_corpora_command() {
    println!("Built-in corpus profiles:\n");
    let registry = CorpusRegistry::builtin();
    for name in registry.names() {
        println!("  {}", name);
    }
}
