//! Simple interactive CLI mode
//!
//! Line-based predictor without TUI

use super::predict::predict_prefix;
use crate::core::PredictiveTrie;
use crate::output::{print_prediction_report, print_stats, print_word_list};
use colored::Colorize;
use std::io::{self, Write};

/// A parsed line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    Stats,
    Words(&'a str),
    Top(&'a str),
    Learn(String),
    Forget(String),
    Predict(&'a str),
    Empty,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        "quit" | "q" | "exit" | ":q" => Input::Quit,
        ":help" | "help" | "?" => Input::Help,
        ":stats" => Input::Stats,
        _ => {
            if let Some(word) = line.strip_prefix('+') {
                Input::Learn(word.trim().to_lowercase())
            } else if let Some(word) = line.strip_prefix('-') {
                Input::Forget(word.trim().to_lowercase())
            } else if let Some(prefix) = line.strip_prefix(":words") {
                Input::Words(prefix.trim())
            } else if let Some(prefix) = line.strip_prefix(":top") {
                Input::Top(prefix.trim())
            } else {
                Input::Predict(line)
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <prefix>         show predictions for a prefix");
    println!("  +word            learn one occurrence of a word");
    println!("  -word            forget one occurrence of a word");
    println!("  :words [prefix]  list known words (all, or under a prefix)");
    println!("  :top <prefix>    most frequent words under a prefix");
    println!("  :stats           trie statistics");
    println!("  quit             exit\n");
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or writing the prompt.
pub fn run_simple(trie: &mut PredictiveTrie, limit: usize) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║              Trie Next - Interactive Mode                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Type a prefix to see the likeliest next letters and words ({} words known).",
        trie.stats().distinct_words
    );
    print_help();

    let mut rng = rand::rng();

    loop {
        let Some(line) = get_user_input("Prefix")? else {
            println!("\n👋 Goodbye!\n");
            return Ok(());
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => {
                println!("\n👋 Goodbye!\n");
                return Ok(());
            }
            Input::Help => print_help(),
            Input::Stats => print_stats(&trie.stats()),
            Input::Words(prefix) => {
                print_word_list(&trie.word_listing(prefix, false));
            }
            Input::Top(prefix) => {
                let top = trie.top_k_words(prefix, limit);
                if top.is_empty() {
                    println!("{}\n", "No words under that prefix".red());
                } else {
                    for (i, word) in top.iter().enumerate() {
                        println!("  {}. {word} ({})", i + 1, trie.frequency(word));
                    }
                    println!();
                }
            }
            Input::Learn(word) => {
                if word.is_empty() {
                    println!("{}\n", "Nothing to learn".red());
                } else {
                    trie.insert(&word);
                    println!(
                        "✓ Learned '{}' (frequency {})\n",
                        word.bright_white().bold(),
                        trie.frequency(&word)
                    );
                }
            }
            Input::Forget(word) => {
                if trie.delete(&word) {
                    println!(
                        "✓ Forgot one '{}' (frequency {})\n",
                        word.bright_white().bold(),
                        trie.frequency(&word)
                    );
                } else {
                    println!("{}\n", format!("'{word}' is not a known word").red());
                }
            }
            Input::Predict(prefix) => match predict_prefix(trie, prefix, limit, &mut rng) {
                Ok(report) => print_prediction_report(&report),
                Err(e) => println!("{}\n", e.red()),
            },
        }
    }
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    Ok((read > 0).then(|| input.trim().to_string()))
}
