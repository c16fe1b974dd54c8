//! Tripgraph CLI: query a trip graph stored as a JSON document
//!
//! Every command loads the document through a `JsonFileSource`, projects it
//! and runs one query.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tripgraph::{GraphClient, JsonFileSource, PathStep, TripGraphConfig};

#[derive(Parser)]
#[command(name = "tripgraph", version, about = "Shortest paths and PageRank over a trip graph")]
struct Cli {
    /// Graph document (JSON with `nodes` and `edges`)
    #[arg(long, global = true, env = "TRIPGRAPH_DATA")]
    data: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true, env = "TRIPGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Weighted shortest path between two locations
    ShortestPath {
        from: String,
        to: String,
    },
    /// Fewest-hops path between two locations
    Bfs {
        from: String,
        to: String,
    },
    /// Highest and lowest ranked locations
    PageRank {
        #[arg(long, default_value_t = 20)]
        max_iterations: usize,

        /// Edge property used as weight (defaults to the configured one)
        #[arg(long)]
        weight: Option<String>,

        /// Print every location instead of the top and bottom
        #[arg(long)]
        all: bool,
    },
    /// Node and edge counts of the projection
    Stats,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let data = cli
        .data
        .context("no graph document given (use --data or TRIPGRAPH_DATA)")?;
    let config = match &cli.config {
        Some(path) => TripGraphConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TripGraphConfig::default(),
    };
    debug!("Using config {:?}", config);

    let client = GraphClient::with_config(JsonFileSource::new(&data), config);

    match cli.command {
        Commands::ShortestPath { from, to } => {
            let path = client.shortest_path(&from, &to).await?;
            print_path(&path, &cli.format)
        }
        Commands::Bfs { from, to } => {
            let path = client.bfs(&from, &to).await?;
            print_path(&path, &cli.format)
        }
        Commands::PageRank {
            max_iterations,
            weight,
            all,
        } => {
            let weight = weight.unwrap_or_else(|| client.defaults().weight_property.clone());
            if all {
                run_full_rank(&client, max_iterations, &weight, &cli.format).await
            } else {
                let (top, bottom) = client.page_rank(max_iterations, &weight).await?;
                match cli.format {
                    OutputFormat::Json => {
                        let value = serde_json::json!({ "max": top, "min": bottom });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    }
                    OutputFormat::Table => {
                        let mut table = new_table(&["", "name", "score"]);
                        table.add_row(vec!["max".to_string(), top.name, format!("{:.6}", top.score)]);
                        table.add_row(vec!["min".to_string(), bottom.name, format!("{:.6}", bottom.score)]);
                        println!("{}", table);
                    }
                }
                Ok(())
            }
        }
        Commands::Stats => run_stats(&client, &cli.format).await,
    }
}

async fn run_full_rank(
    client: &GraphClient<JsonFileSource>,
    max_iterations: usize,
    weight: &str,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let handle = client.projection_for(weight).await?;
    let ranked = client
        .service()
        .run_pagerank(&handle, max_iterations, Some(weight))
        .await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        OutputFormat::Table => {
            let mut table = new_table(&["rank", "id", "name", "score"]);
            for (i, entry) in ranked.entries.iter().enumerate() {
                table.add_row(vec![
                    (i + 1).to_string(),
                    entry.id.to_string(),
                    entry.name.clone(),
                    format!("{:.6}", entry.score),
                ]);
            }
            println!("{}", table);
            println!("{} node(s), {} iteration(s)", ranked.entries.len(), ranked.iterations);
        }
    }
    Ok(())
}

async fn run_stats(client: &GraphClient<JsonFileSource>, format: &OutputFormat) -> anyhow::Result<()> {
    let handle = client.projection_for(&client.defaults().weight_property).await?;
    let info = client.service().info(&handle).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Table => {
            let stats = &info.statistics;
            println!("Projection: {} (generation {})", info.handle.name(), info.handle.generation());
            println!("Nodes:      {}", stats.node_count);
            println!("Edges:      {}", stats.edge_count);
            println!("Sinks:      {}", stats.sink_count);
            if !stats.edges_per_type.is_empty() {
                let mut table = new_table(&["type", "edges"]);
                for (edge_type, count) in &stats.edges_per_type {
                    table.add_row(vec![edge_type.clone(), count.to_string()]);
                }
                println!("{}", table);
            }
        }
    }
    Ok(())
}

fn print_path(path: &[PathStep], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(path)?);
        }
        OutputFormat::Table => {
            if path.is_empty() {
                println!("(unreachable)");
                return Ok(());
            }
            let mut table = new_table(&["step", "name"]);
            for (i, step) in path.iter().enumerate() {
                table.add_row(vec![i.to_string(), step.name.clone()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}
