//! scan-stats CLI: list statistics, print one snippet, or assemble the block.

use clap::{Parser, Subcommand};
use scan_stats::cache::SqliteCache;
use scan_stats::{build_providers, ProviderSet, Scope, StatKind, StatsConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::List => run_list(),
        Command::Get(args) => run_get(&args),
        Command::Context(args) => run_context(&args),
    }
}

#[derive(Parser)]
#[command(name = "scan-stats")]
#[command(author = "gorusys <goru.connector@outlook.com>")]
#[command(about = "Cached network-statistic snippets from scan APIs (core + EVM spaces)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List enabled scopes and their statistics.
    List,
    /// Print one statistic's snippet.
    Get(GetArgs),
    /// Gather every enabled statistic and print the assembled context block.
    Context(ContextArgs),
}

#[derive(Parser)]
struct GetArgs {
    /// Chain space: core or evm.
    #[arg(long)]
    scope: String,
    /// Statistic name, e.g. active_accounts or top_miners.
    #[arg(long)]
    stat: String,
    #[arg(long, default_value = "./data/cache")]
    cache_dir: PathBuf,
}

#[derive(Parser)]
struct ContextArgs {
    #[arg(long, default_value = "./data/cache")]
    cache_dir: PathBuf,
}

fn cache_path(cache_dir: &std::path::Path) -> PathBuf {
    cache_dir.join("stats.sqlite")
}

fn build(
    config: &StatsConfig,
    cache_dir: &std::path::Path,
) -> Result<ProviderSet, Box<dyn std::error::Error>> {
    let cache = Arc::new(SqliteCache::open(cache_path(cache_dir))?);
    Ok(build_providers(config, cache)?)
}

fn parse_scope(scope: &str) -> Result<Scope, Box<dyn std::error::Error>> {
    match scope {
        "core" => Ok(Scope::Core),
        "evm" => Ok(Scope::Evm),
        other => Err(format!("unknown scope: {other}").into()),
    }
}

fn run_list() -> Result<(), Box<dyn std::error::Error>> {
    let config = StatsConfig::load();
    for (scope, enabled) in [
        (Scope::Core, config.core.is_some()),
        (Scope::Evm, config.evm.is_some()),
    ] {
        if !enabled {
            println!("{scope}: disabled");
            continue;
        }
        println!("{scope}:");
        for kind in scope.catalog() {
            println!("  {kind}");
        }
    }
    Ok(())
}

fn run_get(args: &GetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scope = parse_scope(&args.scope)?;
    let Some(kind) = StatKind::from_name(&args.stat) else {
        return Err(format!("unknown stat: {}", args.stat).into());
    };
    let config = StatsConfig::load();
    let providers = build(&config, &args.cache_dir)?;
    let Some(provider) = providers.find(scope, kind) else {
        return Err(format!("stat {} not enabled for scope {scope}", args.stat).into());
    };
    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(provider.get()) {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => {
            eprintln!("no data for {scope}:{kind}");
            std::process::exit(1);
        }
    }
}

fn run_context(args: &ContextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = StatsConfig::load();
    let providers = build(&config, &args.cache_dir)?;
    if providers.is_empty() {
        eprintln!("no scopes enabled; set SCAN_STATS_CORE_URL or SCAN_STATS_EVM_URL");
        std::process::exit(1);
    }
    let rt = tokio::runtime::Runtime::new()?;
    let snippets = rt.block_on(scan_stats_context::gather(&providers));
    info!(count = snippets.len(), "gathered snippets");
    println!("{}", scan_stats_context::render(&snippets));
    Ok(())
}
