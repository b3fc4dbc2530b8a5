//! Portico CLI - command-line toolkit for room snapshot documents

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{index, init, merge, query, schema, summary, validate};

#[derive(Parser)]
#[command(name = "portico")]
#[command(about = "Validate, query, patch and index 3D room snapshots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new room directory with a starter snapshot
    Init {
        /// Room directory to create
        dir: String,
    },

    /// Validate a snapshot against the prefab catalog
    Validate {
        /// Path to snapshot.json
        snapshot: String,

        /// Path to a local schemas directory (overrides builtins)
        #[arg(long, default_value = "schemas")]
        schemas: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Query items (e.g. "items where prefab == 'Trigger'")
    Query {
        /// Path to snapshot.json
        snapshot: String,

        /// Query string
        query: String,

        /// Center point for a spatial query (requires --radius)
        #[arg(long, value_parser = parse_vec3)]
        near: Option<[f32; 3]>,

        /// Radius for a spatial query (requires --near)
        #[arg(long)]
        radius: Option<f32>,

        /// Only items with at least one task subscription
        #[arg(long)]
        has_tasks: bool,

        /// Only items with at least one wired effect
        #[arg(long)]
        has_effects: bool,

        /// Only children of this item id
        #[arg(long)]
        parent: Option<u64>,

        /// Case-insensitive text search across item fields
        #[arg(long)]
        search: Option<String>,

        /// Only items whose task wiring mentions this quest name
        #[arg(long)]
        quest: Option<String>,
    },

    /// Generate the Markdown room index
    Index {
        /// Path to snapshot.json
        snapshot: String,

        /// Output path (default: room_index.md next to the snapshot)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a compact build summary for quality review
    Summary {
        /// Path to snapshot.json
        snapshot: String,

        /// Room name shown in the report header
        #[arg(long)]
        name: Option<String>,
    },

    /// Apply a patch file to a snapshot
    Merge {
        /// Path to snapshot.json
        snapshot: String,

        /// Path to the patch JSON file
        #[arg(long)]
        patch: String,

        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show prefab schema information
    Schema {
        /// Prefab name; omit to list all known prefabs
        name: Option<String>,

        /// Path to a local schemas directory (overrides builtins)
        #[arg(long, default_value = "schemas")]
        schemas: String,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {e}"))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {e}"))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {e}"))?;
    Ok([x, y, z])
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir } => init::run(&dir),
        Commands::Validate {
            snapshot,
            schemas,
            format,
        } => validate::run(&snapshot, &schemas, &format),
        Commands::Query {
            snapshot,
            query,
            near,
            radius,
            has_tasks,
            has_effects,
            parent,
            search,
            quest,
        } => query::run(query::QueryArgs {
            snapshot,
            query,
            near,
            radius,
            has_tasks,
            has_effects,
            parent,
            search,
            quest,
        }),
        Commands::Index { snapshot, output } => index::run(&snapshot, output.as_deref()),
        Commands::Summary { snapshot, name } => summary::run(&snapshot, name.as_deref()),
        Commands::Merge {
            snapshot,
            patch,
            dry_run,
        } => merge::run(&snapshot, &patch, dry_run),
        Commands::Schema { name, schemas } => schema::run(name.as_deref(), &schemas),
    }
}
