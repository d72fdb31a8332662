//! Command-line interface for edify
//! Inspect the token stream a rule would see, validate rule files, and
//! simulate single keystrokes against a document.
//!
//! Usage:
//!   edify tokens `<path>` [--json]                                - Dump the lexer's view of a file
//!   edify check `<rules>`                                         - Validate a rule file
//!   edify simulate `<rules>` `<path>` --offset `<n>` --insert `<ch>`  - Run one keystroke

use clap::{Arg, ArgAction, Command};

use edify::registry::SessionState;
use edify::rules::EditEvent;
use edify::{config, grammar, DocumentContext, EditContext, EditSession, RuleRegistry};

fn main() {
    let matches = Command::new("edify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Token-pattern rule engine for editor typing aids")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the lexer's view of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the grammar file to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit machine-readable JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a rule file against the built-in vocabulary")
                .arg(
                    Arg::new("rules")
                        .help("Path to the rule file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Apply one typed character to a document and show the outcome")
                .arg(
                    Arg::new("rules")
                        .help("Path to the rule file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .help("Byte offset the character is typed at")
                        .required(true),
                )
                .arg(
                    Arg::new("insert")
                        .long("insert")
                        .help("The typed character")
                        .required(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_tokens_command(path, sub.get_flag("json"));
        }
        Some(("check", sub)) => {
            let rules = sub.get_one::<String>("rules").unwrap();
            handle_check_command(rules);
        }
        Some(("simulate", sub)) => {
            let rules = sub.get_one::<String>("rules").unwrap();
            let path = sub.get_one::<String>("path").unwrap();
            let offset = sub.get_one::<String>("offset").unwrap();
            let insert = sub.get_one::<String>("insert").unwrap();
            handle_simulate_command(rules, path, offset, insert);
        }
        _ => unreachable!(),
    }
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, json: bool) {
    let source = read_file(path);
    let tokens = grammar::tokenize(&source);
    let vocab = grammar::vocabulary();

    if json {
        let rows: Vec<serde_json::Value> = tokens
            .iter()
            .map(|t| {
                serde_json::json!({
                    "kind": vocab.name(t.kind),
                    "start": t.span.start,
                    "end": t.span.end,
                    "text": t.text(&source),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        for t in &tokens {
            println!(
                "{:>5}..{:<5} {:<14} {:?}",
                t.span.start,
                t.span.end,
                vocab.name(t.kind).unwrap_or("?"),
                t.text(&source)
            );
        }
    }
}

/// Handle the check command
fn handle_check_command(rules_path: &str) {
    match config::load_rules(rules_path, grammar::vocabulary()) {
        Ok(rules) => {
            print!("{}", config::summarize(&rules));
            println!("{} rule(s) ok", rules.len());
        }
        Err(e) => {
            eprintln!("Invalid rule file: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the simulate command
fn handle_simulate_command(rules_path: &str, path: &str, offset: &str, insert: &str) {
    let offset: usize = offset.parse().unwrap_or_else(|_| {
        eprintln!("--offset must be a byte offset");
        std::process::exit(1);
    });
    let mut chars = insert.chars();
    let typed = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            eprintln!("--insert must be a single character");
            std::process::exit(1);
        }
    };

    let rules = config::load_rules(rules_path, grammar::vocabulary()).unwrap_or_else(|e| {
        eprintln!("Invalid rule file: {}", e);
        std::process::exit(1);
    });
    let registry = RuleRegistry::new(rules);
    let mut doc = DocumentContext::new(read_file(path));
    let mut session = EditSession::new(&registry);

    let typed_text = typed.to_string();
    let state = session.advance(
        &EditEvent::BeforeInsert {
            offset,
            text: typed_text.as_str(),
        },
        &mut doc,
    );
    let matched = session.pinned_rule().map(str::to_owned);

    // the host's own keystroke lands between the before and insert phases
    if doc.insert(offset, &typed_text).is_err() {
        eprintln!("Offset {} is outside the document", offset);
        std::process::exit(1);
    }

    if state == SessionState::CandidateSelected {
        session.advance(
            &EditEvent::Insert {
                offset,
                text: typed_text.as_str(),
            },
            &mut doc,
        );
        session.advance(
            &EditEvent::AfterInsert {
                offset,
                text: typed_text.as_str(),
            },
            &mut doc,
        );
    }

    match &matched {
        Some(rule) => eprintln!("rule '{}' matched", rule),
        None => eprintln!("no rule matched; keystroke proceeds unmodified"),
    }
    eprintln!("caret at {}", doc.caret());
    print!("{}", doc.text());
}
