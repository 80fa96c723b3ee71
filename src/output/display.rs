//! Display functions for command results

use super::formatters::{char_or_placeholder, join_options, percent_bar};
use crate::commands::{BenchmarkResult, PredictionReport, VerifyResult};
use crate::core::{ScoredOption, StructureEntry, TrieStats};
use colored::Colorize;

fn print_ranked(title: &str, options: &[ScoredOption]) {
    println!("\n📊 {}", title.bright_cyan().bold());
    if options.is_empty() {
        println!("   {}", "none".bright_black());
        return;
    }
    for option in options {
        println!(
            "   {:<14} [{}] {:5.1}%",
            option.label,
            percent_bar(option.percent, 20).green(),
            option.percent
        );
    }
}

/// Print every prediction for a prefix
pub fn print_prediction_report(report: &PredictionReport) {
    println!("\n{}", "─".repeat(60).cyan());
    let status = if report.is_word {
        report.prefix.bright_green().bold()
    } else if report.next_char.is_none() {
        report.prefix.red().bold()
    } else {
        report.prefix.bright_white().bold()
    };
    println!("Prefix: {status}");
    println!("{}", "─".repeat(60).cyan());

    println!(
        "   Next letter:  {}",
        char_or_placeholder(report.next_char)
            .to_string()
            .bright_yellow()
            .bold()
    );
    println!(
        "   Completion:   {}",
        report
            .next_word
            .as_deref()
            .unwrap_or("—")
            .bright_yellow()
            .bold()
    );
    println!("   Frequency:    {}", report.frequency);
    println!("   Traffic:      {} insertions", report.traffic);

    print_ranked("Top next letters:", &report.top_letters);
    print_ranked("Top next words:", &report.top_words);

    println!(
        "\n🎲 Alternative letters: {}",
        join_options(&report.alternative_letters)
    );
    println!(
        "🎲 Alternative words:   {}",
        join_options(&report.alternative_words)
    );
    if !report.most_frequent.is_empty() {
        println!("🏆 Most frequent:       {}", report.most_frequent.join(", "));
    }
    println!();
}

/// Print whole-tree statistics
pub fn print_stats(stats: &TrieStats) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "TRIE STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!(
        "   Total inserts:   {}",
        stats.total_insertions.to_string().bright_yellow()
    );
    println!("   Total nodes:     {}", stats.nodes);
    println!("   Distinct words:  {}", stats.distinct_words);
    println!("   Max depth:       {}\n", stats.max_depth);
}

/// Print (word, count) pairs one per line
pub fn print_word_list(words: &[(String, u64)]) {
    if words.is_empty() {
        println!("{}\n", "No words".red());
        return;
    }
    for (word, count) in words {
        println!("{word} ({count})");
    }
    println!("\n{} words\n", words.len().to_string().bright_cyan());
}

/// Print every complete word with its counts and cached answers
pub fn print_structure(entries: &[StructureEntry]) {
    for entry in entries {
        println!(
            "{} -> (pass = {}, end = {}) bestWord={} bestWordCount={} bestNextChar={}",
            entry.word.bright_white(),
            entry.pass_count,
            entry.end_count,
            entry.best_word.green(),
            entry.best_word_count,
            char_or_placeholder(entry.best_next)
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Ingestion:".bright_cyan().bold());
    println!("   Words inserted:   {}", result.words);
    println!("   Nodes:            {}", result.nodes);
    println!("   Time taken:       {:.3}s", result.build_time.as_secs_f64());
    println!("   Words/second:     {:.0}", result.words_per_second());

    println!("\n📈 {}", "Best completion lookups:".bright_cyan().bold());
    println!("   Prefixes queried: {}", result.prefixes);
    println!(
        "   Cached:           {:.3}ms",
        result.cached_query_time.as_secs_f64() * 1000.0
    );
    println!(
        "   Subtree scan:     {:.3}ms",
        result.scan_query_time.as_secs_f64() * 1000.0
    );
    println!(
        "   Speedup:          {}",
        format!("{:.1}x", result.speedup()).bright_yellow().bold()
    );
    if result.mismatches == 0 {
        println!("   Agreement:        {}", "all answers match".green());
    } else {
        println!(
            "   Agreement:        {}",
            format!("{} mismatches", result.mismatches).red().bold()
        );
    }

    println!("\n🔁 {}", "Delete churn:".bright_cyan().bold());
    println!("   Operations:       {}", result.churn_operations);
    println!("   Time taken:       {:.3}s\n", result.churn_time.as_secs_f64());
}

/// Print the result of a cache verification run
pub fn print_verify_result(result: &VerifyResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "CACHE VERIFICATION".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!("   Seed:             {}", result.seed);
    println!("   Inserts:          {}", result.inserts);
    println!("   Deletes:          {}", result.deletes);
    println!("   Words afterwards: {}", result.words_after);

    if result.is_consistent() {
        println!("\n{}\n", "✅ Every cache matches a full recomputation".green().bold());
        return;
    }

    if result.failed_deletes > 0 {
        println!(
            "{}",
            format!("❌ {} deletes of present words failed", result.failed_deletes).red()
        );
    }
    println!(
        "{}",
        format!("❌ {} violations", result.violations.len())
            .red()
            .bold()
    );
    for violation in result.violations.iter().take(20) {
        println!("   • {violation}");
    }
    println!();
}
