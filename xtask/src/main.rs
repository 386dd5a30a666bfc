use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "handle-list workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run comparative benchmarks
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH: &str = "handle_list_benchmark";

/// Containers in report column order. The first one is the baseline.
const CONTAINERS: &[&str] = &["std_linked_list", "vec_deque", "handle_list", "handle_list_shuffled"];

/// Subset of criterion's `estimates.json`.
#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Subset of criterion's `benchmark.json`.
#[derive(Deserialize)]
struct BenchmarkInfo {
    group_id: String,
    function_id: Option<String>,
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(u64),
    Bytes(u64),
    BytesDecimal(u64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running comparative benchmarks...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "-p", "handle-list", "--bench", BENCH]);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run cargo bench")?;
    if !status.success() {
        anyhow::bail!("Benchmark run failed with {status}");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Operations per second, keyed by workload then container.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("Failed to create {}", report_path.display()))?;
    write_report(&mut file, &results)?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn write_report(out: &mut impl Write, results: &Results) -> Result<()> {
    writeln!(out, "# Comparative Benchmark Report")?;
    writeln!(out)?;

    write!(out, "| Workload |")?;
    for name in CONTAINERS {
        write!(out, " {name} (Ops/s) | vs LinkedList |")?;
    }
    writeln!(out)?;

    write!(out, "|---|")?;
    for _ in CONTAINERS {
        write!(out, "---|---|")?;
    }
    writeln!(out)?;

    for (workload, by_container) in results {
        write!(out, "| {workload} |")?;

        let baseline = by_container.get(CONTAINERS[0]).copied().unwrap_or(0.0);

        for name in CONTAINERS {
            match by_container.get(*name) {
                Some(ops) => {
                    let rel = if baseline > 0.0 { ops / baseline } else { 0.0 };
                    write!(out, " {} | **{rel:.2}x** |", format_ops(*ops))?;
                }
                None => write!(out, " N/A | - |")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree and reads every `new/` measurement.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) == Some("new") {
            if let Some((workload, container, ops)) = read_measurement(&path)? {
                results.entry(workload).or_default().insert(container, ops);
            }
        } else {
            collect_results(&path, results)?;
        }
    }
    Ok(())
}

fn read_measurement(dir: &Path) -> Result<Option<(String, String, f64)>> {
    let bench_json = dir.join("benchmark.json");
    let estimates_json = dir.join("estimates.json");
    if !bench_json.exists() || !estimates_json.exists() {
        return Ok(None);
    }

    let info: BenchmarkInfo = serde_json::from_str(&fs::read_to_string(&bench_json)?)
        .with_context(|| format!("Malformed {}", bench_json.display()))?;
    let estimates: Estimates = serde_json::from_str(&fs::read_to_string(&estimates_json)?)
        .with_context(|| format!("Malformed {}", estimates_json.display()))?;

    let Some(container) = info.function_id else {
        return Ok(None);
    };
    let time_ns = estimates.mean.point_estimate;
    if time_ns <= 0.0 {
        return Ok(None);
    }

    #[allow(clippy::cast_precision_loss)]
    let elements = match info.throughput {
        Some(Throughput::Elements(n) | Throughput::Bytes(n) | Throughput::BytesDecimal(n)) => n as f64,
        None => 1.0,
    };
    Ok(Some((info.group_id, container, elements * 1e9 / time_ns)))
}
