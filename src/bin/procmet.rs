use clap::Parser;
use colored::*;
use procmet::monitor::{default_sources, metrics};
use procmet::{exit_code, logging, Sampler, SamplerConfig, Shutdown};
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;
use tabled::{Table, Tabled};

/// Periodically print memory, file descriptor, CPU and I/O metrics of a process
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Process ID (PID) to monitor
    #[clap(short, long, required_unless_present = "list_metrics")]
    pid: Option<u32>,

    /// Seconds between samples, fractions allowed
    #[clap(short, long, default_value = "1.0", allow_negative_numbers = true)]
    interval: f64,

    /// Comma-separated metric names (default: all of them)
    #[clap(short, long, value_delimiter = ',')]
    metrics: Vec<String>,

    /// Output field separator
    #[clap(short, long, default_value = " ")]
    delimiter: String,

    /// strftime pattern for the timestamp column
    #[clap(long, default_value = "%Y-%m-%d_%H:%M:%S%.6f")]
    dt_format: String,

    /// Report failures in full and log every source that came back empty
    #[clap(long)]
    debug: bool,

    /// Print the available metrics and exit
    #[clap(long)]
    list_metrics: bool,

    /// Mount point of the proc filesystem
    #[clap(long, default_value = "/proc", hide = true)]
    proc_root: PathBuf,
}

#[derive(Tabled)]
struct MetricRow {
    metric: &'static str,
    source: &'static str,
    unit: &'static str,
}

fn unit_of(name: &str) -> &'static str {
    match name {
        metrics::VM_SIZE | metrics::VM_RSS => "kB",
        metrics::FD => "count",
        metrics::CPU_PERCENT => "percent",
        metrics::READ_BYTES | metrics::WRITE_BYTES => "bytes",
        _ => "",
    }
}

fn list_metrics(proc_root: &Path) {
    let rows: Vec<MetricRow> = default_sources(proc_root)
        .iter()
        .flat_map(|source| {
            source.names().iter().map(move |name| MetricRow {
                metric: *name,
                source: source.label(),
                unit: unit_of(name),
            })
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn main() {
    // clap exits with 2 on usage errors; this tool reports them as 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            exit(code);
        }
    };

    // clap only lets --pid be missing when --list-metrics is set
    let Some(pid) = args.pid.filter(|_| !args.list_metrics) else {
        list_metrics(&args.proc_root);
        return;
    };

    logging::init(args.debug);

    let config = SamplerConfig::builder(pid)
        .interval_secs(args.interval)
        .metrics(&args.metrics)
        .delimiter(args.delimiter)
        .dt_format(args.dt_format)
        .debug(args.debug)
        .proc_root(args.proc_root)
        .build();
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", "error:".red(), err);
            exit(1);
        }
    };

    let shutdown = match Shutdown::install_ctrlc() {
        Ok(shutdown) => shutdown,
        Err(err) => {
            eprintln!("{} {}", "error:".red(), err);
            exit(1);
        }
    };

    let sources = default_sources(&config.proc_root);
    let debug = config.debug;
    let sampler = Sampler::new(config, sources);

    let result = sampler.run(&mut io::stdout().lock(), &shutdown);
    exit(exit_code(&result, debug, &mut io::stderr()));
}
