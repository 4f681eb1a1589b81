//! Benchmark command - time move generation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_opening_benchmark(), run_scattered_benchmark(), report_results()
//! - Level 3: benchmark_positions(), create_scattered_position()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sternhalma_core::{
    active_triangles, find_valid_moves, GameState, Hex, Topology, TriangleIndex,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Passes over each position set
    #[arg(long, default_value = "100")]
    pub iterations: usize,

    /// Players seated in every benchmark position
    #[arg(long, default_value = "6")]
    pub players: usize,

    /// Random seed for scattered positions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of scattered positions to generate
    #[arg(long, default_value = "20")]
    pub positions: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Results of a single benchmark run
#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: String,
    queries: usize,
    total_time: Duration,
    avg_time_per_query: Duration,
    queries_per_second: f64,
    notes: String,
}

/// All benchmark results
#[derive(Clone, Debug, Default)]
struct AllResults {
    results: Vec<BenchmarkResult>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Time every piece of the opening position
/// 2. Time every piece of randomly scattered positions
/// 3. Report all results
pub fn run(args: BenchmarkArgs) -> Result<()> {
    tracing::info!(
        "Starting benchmarks: {} iterations, {} players",
        args.iterations,
        args.players
    );

    let mut all_results = AllResults::default();

    run_opening_benchmark(&args, &mut all_results)?;
    run_scattered_benchmark(&args, &mut all_results)?;

    report_results(&all_results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Time move generation over the standard opening
fn run_opening_benchmark(args: &BenchmarkArgs, results: &mut AllResults) -> Result<()> {
    tracing::info!("Benchmarking opening position...");
    let state = GameState::with_players(args.players);
    let result = benchmark_positions("Opening", &[state], args.iterations)?;
    results.results.push(result);
    Ok(())
}

/// Time move generation over random mid-game positions
fn run_scattered_benchmark(args: &BenchmarkArgs, results: &mut AllResults) -> Result<()> {
    tracing::info!("Benchmarking {} scattered positions...", args.positions);
    let mut rng = create_rng(args.seed);

    let states = (0..args.positions)
        .map(|_| create_scattered_position(&mut rng, args.players))
        .collect::<Result<Vec<_>>>()?;

    let result = benchmark_positions("Scattered", &states, args.iterations)?;
    results.results.push(result);
    Ok(())
}

/// Report all benchmark results
fn report_results(results: &AllResults, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Query the moves of every piece in every state, `iterations` times
fn benchmark_positions(
    name: &str,
    states: &[GameState],
    iterations: usize,
) -> Result<BenchmarkResult> {
    let starts: Vec<(usize, Hex)> = states
        .iter()
        .enumerate()
        .flat_map(|(index, state)| state.board().pieces().map(move |piece| (index, piece.pos)))
        .collect();

    let start = Instant::now();
    let mut queries = 0;
    let mut total_moves = 0;
    let mut total_jumps = 0;

    for _ in 0..iterations {
        for &(index, pos) in &starts {
            let moves = find_valid_moves(states[index].board(), pos);
            total_moves += moves.len();
            total_jumps += moves.iter().filter(|mv| mv.is_jump()).count();
            queries += 1;
        }
    }

    let total_time = start.elapsed();
    let avg_time = if queries > 0 {
        total_time.div_f64(queries as f64)
    } else {
        Duration::ZERO
    };

    Ok(BenchmarkResult {
        name: name.to_string(),
        queries,
        total_time,
        avg_time_per_query: avg_time,
        queries_per_second: per_second(queries, total_time),
        notes: format!(
            "Avg moves/piece: {:.1}, jumps: {:.1}",
            ratio(total_moves, queries),
            ratio(total_jumps, queries)
        ),
    })
}

/// Scatter each active player's ten pieces over random distinct cells
fn create_scattered_position(rng: &mut ChaCha8Rng, players: usize) -> Result<GameState> {
    let topology = Topology::standard();
    let cells: Vec<Hex> = topology.cells().iter().map(|&(pos, _)| pos).collect();
    let active: &[TriangleIndex] = active_triangles(players);

    let pieces = active.len() * 10;
    let placements: Vec<(Hex, TriangleIndex)> = cells
        .choose_multiple(rng, pieces)
        .enumerate()
        .map(|(i, &pos)| (pos, active[i % active.len()]))
        .collect();

    GameState::from_position(players, &placements).context("Failed to build scattered position")
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn per_second(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Largest unit that keeps the value at or above one
fn format_duration(d: Duration) -> String {
    let micros = d.as_secs_f64() * 1_000_000.0;
    match micros {
        m if m >= 1_000_000.0 => format!("{:.2}s", m / 1_000_000.0),
        m if m >= 1_000.0 => format!("{:.1}ms", m / 1_000.0),
        m => format!("{:.1}us", m),
    }
}

/// Print results as JSON
fn print_json_results(results: &AllResults) {
    #[derive(serde::Serialize)]
    struct JsonBenchmark {
        name: String,
        queries: usize,
        total_time_ms: u64,
        avg_time_us: f64,
        queries_per_second: f64,
        notes: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        benchmarks: Vec<JsonBenchmark>,
    }

    let output = JsonOutput {
        benchmarks: results
            .results
            .iter()
            .map(|r| JsonBenchmark {
                name: r.name.clone(),
                queries: r.queries,
                total_time_ms: r.total_time.as_millis() as u64,
                avg_time_us: r.avg_time_per_query.as_secs_f64() * 1_000_000.0,
                queries_per_second: r.queries_per_second,
                notes: r.notes.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &AllResults) {
    println!("\n=== Sternhalma Move Generation Benchmark ===\n");

    println!(
        "{:<12} {:>10} {:>12} {:>12} {:>12}  {}",
        "Benchmark", "Queries", "Total Time", "Avg/Query", "Queries/s", "Notes"
    );
    println!("{}", "-".repeat(90));

    for r in &results.results {
        println!(
            "{:<12} {:>10} {:>12} {:>12} {:>12.0}  {}",
            r.name,
            r.queries,
            format_duration(r.total_time),
            format_duration(r.avg_time_per_query),
            r.queries_per_second,
            r.notes
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scattered_position_is_seeded() {
        let a = create_scattered_position(&mut create_rng(Some(7)), 3).unwrap();
        let b = create_scattered_position(&mut create_rng(Some(7)), 3).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.board().pieces().count(), 30);
        for player in a.players() {
            assert_eq!(player.piece_count(), 10);
        }
    }

    #[test]
    fn test_benchmark_opening_counts_queries() {
        let state = GameState::with_players(2);
        let result = benchmark_positions("Opening", &[state], 3).unwrap();
        assert_eq!(result.queries, 60);
        assert!(result.notes.starts_with("Avg moves/piece"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_micros(2500)), "2.5ms");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.5us");
    }

    #[test]
    fn test_average_query_time_has_no_integer_divisor() {
        let state = GameState::with_players(6);
        let result = benchmark_positions("Opening", &[state], 2).unwrap();
        assert_eq!(result.queries, 120);
        let expected = result.total_time.as_secs_f64() / 120.0;
        assert!((result.avg_time_per_query.as_secs_f64() - expected).abs() < 1e-8);

        let empty = benchmark_positions("Empty", &[], 5).unwrap();
        assert_eq!(empty.queries, 0);
        assert_eq!(empty.avg_time_per_query, Duration::ZERO);
    }
}
