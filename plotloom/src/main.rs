// Plotloom CLI: score a document and reorder its units.
//
// Pipeline: load config -> load document -> report per-unit scores ->
// anneal unit order -> attach fresh scores -> write JSON.
//
// Usage:
//   cargo run -p plotloom -- <document.json> [--output PATH] [--config PATH]
//     [--iterations N] [--seed N] [--start-temp T] [--end-temp T] [--scores-only]
//
// Logging goes through `tracing`; set RUST_LOG=plotloom=debug to see the
// annealer's run summary.

use plotloom::composite::{
    attach_scores_with, score_to_band_with, story_score_with, unit_scores_with,
};
use plotloom::config::{EngineConfig, ScoringWeights};
use plotloom::sa::anneal_order;
use plotloom::types::{Document, Unit};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let Some(input) = args.get(1).filter(|s| !s.starts_with("--")) else {
        eprintln!(
            "usage: plotloom <document.json> [--output PATH] [--config PATH] \
             [--iterations N] [--seed N] [--start-temp T] [--end-temp T] [--scores-only]"
        );
        std::process::exit(2);
    };
    let input = Path::new(input);
    let output: PathBuf = parse_flag::<String>(&args, "--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("optimized.json"));
    let scores_only = args.iter().any(|a| a == "--scores-only");

    let mut config = match parse_flag::<String>(&args, "--config") {
        Some(path) => match EngineConfig::load(Path::new(&path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(n) = parse_flag(&args, "--iterations") {
        config.anneal.iterations = n;
    }
    if let Some(seed) = parse_flag(&args, "--seed") {
        config.anneal.seed = Some(seed);
    }
    if let Some(t) = parse_flag(&args, "--start-temp") {
        config.anneal.start_temp = t;
    }
    if let Some(t) = parse_flag(&args, "--end-temp") {
        config.anneal.end_temp = t;
    }

    let mut document = match Document::load(input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to load document {}: {e}", input.display());
            std::process::exit(1);
        }
    };
    let weights = &config.weights;

    println!("=== Plotloom ===");
    println!("Document: {} ({} units)", document.title, document.units.len());
    println!("Genre: {}", document.intent.genre);
    println!("Theme: {}", document.intent.theme_or_claim);
    println!("Values: {}", document.intent.core_values);
    println!("Constraints: {}", document.intent.constraints.join(", "));
    println!();

    println!("[1/3] Scoring current order...");
    print_scores(&document, weights);
    let before = story_score_with(&document.intent, &document.units, weights);
    println!("  Story score: {before:.3}");

    if scores_only {
        println!("[2/3] Skipping reorder (--scores-only).");
    } else {
        println!(
            "[2/3] Annealing ({} iterations, T {} -> {})...",
            config.anneal.iterations, config.anneal.start_temp, config.anneal.end_temp
        );
        if let Some(seed) = config.anneal.seed {
            println!("  Seed: {seed}");
        }
        let mut rng = config.anneal.rng();
        let result = anneal_order(
            &document.intent,
            &document.units,
            &config.anneal,
            weights,
            &mut rng,
        );
        println!(
            "  Accepted: {} ({:.1}%), new bests: {}",
            result.accepted,
            if result.iterations > 0 {
                result.accepted as f64 / result.iterations as f64 * 100.0
            } else {
                0.0
            },
            result.improvements
        );
        println!(
            "  Story score: {:.3} -> {:.3} (delta {:+.3})",
            result.initial_score,
            result.best_score,
            result.best_score - result.initial_score
        );
        document.units = result.apply(&document.units);
        print_order(&document.units);
    }

    attach_scores_with(&document.intent, &mut document.units, weights);

    println!("[3/3] Writing {}...", output.display());
    let json = match document.to_json_pretty() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("  Error encoding document: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&output, json) {
        eprintln!("  Error writing {}: {e}", output.display());
        std::process::exit(1);
    }
    println!("  Done.");
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plotloom=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_scores(document: &Document, weights: &ScoringWeights) {
    let scores = unit_scores_with(&document.intent, &document.units, weights);
    for (i, (unit, score)) in document.units.iter().zip(&scores).enumerate() {
        let band = score_to_band_with(score.intent, weights);
        println!(
            "  {:>3}. {:<24} intent {} [{}/{}]  prev {}  next {}",
            i + 1,
            unit.title,
            fmt_score(score.intent),
            band.label(),
            band.color(),
            fmt_score(score.prev),
            fmt_score(score.next),
        );
    }
}

fn print_order(units: &[Unit]) {
    println!("  New order:");
    for (i, unit) in units.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, unit.title);
    }
}

fn fmt_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.3}")).unwrap_or_else(|| "  -  ".to_string())
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
