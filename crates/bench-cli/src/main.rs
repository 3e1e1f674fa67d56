use anyhow::{Context, Result};
use bench_core::{read_stats_file, write_stats_file, BenchConfig, Comparison, Runner};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "HTTP load testing tool - runs benchmarks and compares recorded results")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a benchmark against a target URL and print its stats
    Run(RunArgs),

    /// Compare two exported stats files (old vs new)
    Cmp {
        /// Stats file from the baseline run
        old: PathBuf,
        /// Stats file from the new run
        new: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Target URL (may also come from --config)
    url: Option<String>,

    /// HTTP method for the requests
    #[arg(short, long)]
    method: Option<String>,

    /// HTTP body for the requests
    #[arg(short, long)]
    body: Option<String>,

    /// Content type of the HTTP body
    #[arg(long)]
    content_type: Option<String>,

    /// Number of requests to be performed in the benchmark
    #[arg(short, long)]
    requests: Option<u64>,

    /// Number of concurrent requests (users) to run benchmark
    #[arg(short, long)]
    concurrency: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// User agent to be used in the HTTP calls
    #[arg(long)]
    user_agent: Option<String>,

    /// Path to a TOML configuration file (flags override its values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Export the stats record to a file under the output path
    #[arg(short = 's', long)]
    export_stats: bool,

    /// Directory for exported files
    #[arg(short, long, default_value = "./")]
    output_path: PathBuf,

    /// Print the stats record as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Cmp { old, new } => cmp(&old, &new),
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BenchConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => BenchConfig::default(),
    };
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(body) = args.body {
        config.body = Some(body);
    }
    if let Some(content_type) = args.content_type {
        config.content_type = Some(content_type);
    }
    if let Some(requests) = args.requests {
        config.requests = requests;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }

    info!(
        "benchmarking {} with {} requests, concurrency {}",
        config.url, config.requests, config.concurrency
    );

    let mut runner = Runner::new(config).context("invalid benchmark configuration")?;
    let stats = runner.run().await.context("benchmark run failed")?;

    if let Some(elapsed) = runner.elapsed() {
        info!("run completed in {:.3}s", elapsed.as_secs_f64());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }

    if args.export_stats {
        std::fs::create_dir_all(&args.output_path).with_context(|| {
            format!("failed to create output path {}", args.output_path.display())
        })?;
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = args.output_path.join(format!("stats_{timestamp}.txt"));
        write_stats_file(&path, &stats)
            .with_context(|| format!("failed to write stats to {}", path.display()))?;
        info!("stats written to {}", path.display());
    }

    Ok(())
}

fn cmp(old: &PathBuf, new: &PathBuf) -> Result<()> {
    let old_stats = read_stats_file(old)
        .with_context(|| format!("failed to read stats from {}", old.display()))?;
    let new_stats = read_stats_file(new)
        .with_context(|| format!("failed to read stats from {}", new.display()))?;
    let comparison = Comparison::new(&old_stats, &new_stats)?;
    print!("{comparison}");
    Ok(())
}
