//! Trie Next - CLI
//!
//! Predictive typing over a character trie, with TUI and CLI modes.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;
use trie_next::{
    commands::{predict_prefix, run_benchmark, run_simple, run_verify},
    config::TrieConfig,
    core::PredictiveTrie,
    corpus::{build_trie, load_from_file, sample_words},
    output::{
        print_benchmark_result, print_prediction_report, print_stats, print_structure,
        print_verify_result, print_word_list,
    },
};

#[derive(Parser)]
#[command(
    name = "trie_next",
    about = "Next-letter and next-word prediction from a cached character trie",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Corpus: 'sample' (default, embedded text) or path to a text file
    #[arg(short, long, global = true, default_value = "sample")]
    corpus: String,

    /// Longest prefix answered from the accelerator (0 disables it)
    #[arg(long, global = true)]
    cache_len: Option<usize>,

    /// Number of predictions listed per category
    #[arg(short = 'k', long, global = true)]
    limit: Option<usize>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default - type and watch predictions)
    Play,

    /// Simple CLI mode (line-based predictor without TUI)
    Simple,

    /// Show every prediction for one prefix
    Predict {
        /// The prefix to complete
        prefix: String,

        /// Seed for the alternative suggestions
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print trie statistics
    Stats,

    /// List known words with their frequencies
    Words {
        /// Only words starting with this prefix
        prefix: Option<String>,

        /// Sort by frequency instead of alphabetically
        #[arg(short = 'f', long)]
        by_frequency: bool,
    },

    /// Dump every word with its counts and cached predictions
    Structure,

    /// Benchmark cached lookups against full subtree scans
    Benchmark {
        /// Maximum number of distinct prefixes to query
        #[arg(short = 'n', long, default_value = "5000")]
        prefixes: usize,

        /// Number of corpus words to delete and reinsert
        #[arg(long, default_value = "1000")]
        churn: usize,
    },

    /// Randomly churn the trie and audit every cache
    Verify {
        /// Number of insert/delete operations
        #[arg(short = 'n', long, default_value = "10000")]
        steps: usize,

        /// Seed for the operation sequence
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Load corpus words based on the -c flag
fn load_corpus(corpus: &str) -> Result<Vec<String>> {
    match corpus {
        "sample" => Ok(sample_words()),
        path => load_from_file(path).with_context(|| format!("failed to read corpus '{path}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = TrieConfig::default();
    if let Some(len) = cli.cache_len {
        config = config.with_prefix_cache_len(len);
    }
    if let Some(limit) = cli.limit {
        config = config.with_display_limit(limit);
    }

    let words = load_corpus(&cli.corpus)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(build_trie(&words, config)),
        Commands::Simple => {
            let mut trie = build_trie(&words, config);
            run_simple(&mut trie, config.display_limit).map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Predict { prefix, seed } => {
            run_predict_command(&build_trie(&words, config), &prefix, seed)
        }
        Commands::Stats => {
            print_stats(&build_trie(&words, config).stats());
            Ok(())
        }
        Commands::Words {
            prefix,
            by_frequency,
        } => {
            run_words_command(&build_trie(&words, config), prefix.as_deref(), by_frequency);
            Ok(())
        }
        Commands::Structure => {
            print_structure(&build_trie(&words, config).structure());
            Ok(())
        }
        Commands::Benchmark { prefixes, churn } => {
            println!(
                "Running benchmark on {} corpus words ({} prefixes max)...",
                words.len(),
                prefixes
            );
            let result = run_benchmark(&words, config, prefixes, churn);
            print_benchmark_result(&result);
            Ok(())
        }
        Commands::Verify { steps, seed } => {
            let mut trie = build_trie(&words, config);
            let result = run_verify(&mut trie, steps, seed);
            print_verify_result(&result);
            if !result.is_consistent() {
                bail!(
                    "cache verification failed with {} violations",
                    result.violations.len()
                );
            }
            Ok(())
        }
    }
}

fn run_predict_command(trie: &PredictiveTrie, prefix: &str, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let limit = trie.config().display_limit;
    let report = predict_prefix(trie, prefix, limit, &mut rng).map_err(|e| anyhow::anyhow!(e))?;
    print_prediction_report(&report);
    Ok(())
}

fn run_words_command(trie: &PredictiveTrie, prefix: Option<&str>, by_frequency: bool) {
    let words = trie.word_listing(prefix.unwrap_or_default(), by_frequency);
    print_word_list(&words);
}

fn run_play_command(trie: PredictiveTrie) -> Result<()> {
    use trie_next::interactive::{App, run_tui};

    let limit = trie.config().display_limit;
    let app = App::new(trie, limit);
    run_tui(app)
}
