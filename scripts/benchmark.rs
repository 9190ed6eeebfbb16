// scripts/benchmark.rs
use option_payoffs::analytics::{par_sweep, price_option, sweep, MarketParameters, SweepVariable};
use option_payoffs::math_utils::{linspace, Timer};
use option_payoffs::strategy::NamedStrategy;
use option_payoffs::OptionResult;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    points: usize,
    time_ms: f64,
    throughput_points_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: &str, points: usize, time_ms: f64, checksum: f64) -> Self {
        BenchmarkResult {
            name: name.to_string(),
            points,
            time_ms,
            throughput_points_per_sec: points as f64 / (time_ms / 1000.0).max(f64::EPSILON),
            checksum,
        }
    }
}

fn run_pricing_benchmarks() -> OptionResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let params = MarketParameters::default();

    for &points in &[10_000, 100_000, 1_000_000] {
        println!("Running pricing benchmarks with {} points...", points);
        let spots = linspace(20.0, 300.0, points);

        let mut timer = Timer::new();
        timer.start();
        let quotes = sweep(&params, 100.0, SweepVariable::Spot, &spots)?;
        let sequential_ms = timer.elapsed_ms();
        let checksum: f64 = quotes.iter().map(|q| q.call_price).sum();
        results.push(BenchmarkResult::new("Spot Sweep (sequential)", points, sequential_ms, checksum));

        timer.start();
        let par_quotes = par_sweep(&params, 100.0, SweepVariable::Spot, &spots)?;
        let parallel_ms = timer.elapsed_ms();
        let par_checksum: f64 = par_quotes.iter().map(|q| q.call_price).sum();
        results.push(BenchmarkResult::new("Spot Sweep (rayon)", points, parallel_ms, par_checksum));

        if par_quotes != quotes {
            eprintln!("Warning: parallel sweep diverged from sequential sweep at {} points", points);
        }
    }

    // Single quote latency
    let iterations = 100_000;
    let mut timer = Timer::new();
    timer.start();
    let mut checksum = 0.0;
    for i in 0..iterations {
        let strike = 80.0 + (i % 40) as f64;
        checksum += price_option(&params, strike)?.put_price;
    }
    results.push(BenchmarkResult::new("Single Quote", iterations, timer.elapsed_ms(), checksum));

    Ok(results)
}

fn run_strategy_benchmarks() -> OptionResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let book = [
        NamedStrategy::bull_call_spread(90.0, 110.0)?,
        NamedStrategy::strangle(90.0, 110.0)?,
        NamedStrategy::butterfly(80.0, 100.0, 120.0)?,
    ];

    for &points in &[10_000, 1_000_000] {
        println!("Running strategy benchmarks with {} points...", points);
        let prices = linspace(0.0, 300.0, points);

        for named in &book {
            let strategy = named.strategy()?;
            let mut timer = Timer::new();
            timer.start();
            let profile = strategy.profile(&prices, Some(4.0))?;
            let time_ms = timer.elapsed_ms();
            let crossings = profile.break_evens.map_or(0, |b| b.len());
            let name = format!("{} Profile", named.name());
            results.push(BenchmarkResult::new(&name, points, time_ms, crossings as f64));
        }
    }

    Ok(results)
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Points,Time_ms,Throughput_points_per_sec,Checksum")?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6}",
            result.name, result.points, result.time_ms, result.throughput_points_per_sec, result.checksum
        )?;
    }
    file.flush()
}

fn main() {
    println!("option-payoffs Benchmark Suite");
    println!("==============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let all_results = match run_pricing_benchmarks().and_then(|mut pricing| {
        pricing.extend(run_strategy_benchmarks()?);
        Ok(pricing)
    }) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Benchmark aborted: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<32} {:>10} {:>12} {:>14} {:>10}",
        "Benchmark", "Points", "Time (ms)", "Points/sec", "Checksum"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>10} {:>12.2} {:>14.0} {:>10.2}",
            result.name, result.points, result.time_ms, result.throughput_points_per_sec, result.checksum
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("Could not write {}: {}", filename, e),
    }

    println!("\nTo reproduce these results:");
    println!("1. Use Rust version: {}", system_info.rust_version);
    println!("2. Set RUSTFLAGS: {}", system_info.rustc_flags);
    println!("3. Run: cargo run --bin benchmark --release");
    println!("4. Ensure {} CPU threads available", system_info.rayon_threads);
}
