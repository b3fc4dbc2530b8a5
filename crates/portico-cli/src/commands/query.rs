//! Item query command

use anyhow::Result;
use portico_core::Vec3;
use portico_query::{execute_query, format_json, parse_query, ItemFilter};
use portico_room::load_snapshot;

/// Matches above this count suggest the filters are too broad for
/// selective reads
const WARN_THRESHOLD: usize = 50;

pub struct QueryArgs {
    pub snapshot: String,
    pub query: String,
    pub near: Option<[f32; 3]>,
    pub radius: Option<f32>,
    pub has_tasks: bool,
    pub has_effects: bool,
    pub parent: Option<u64>,
    pub search: Option<String>,
    pub quest: Option<String>,
}

pub fn run(args: QueryArgs) -> Result<()> {
    if args.near.is_some() != args.radius.is_some() {
        anyhow::bail!("--near and --radius must be given together");
    }

    let snapshot = load_snapshot(&args.snapshot)?;
    let query = parse_query(&args.query)?;

    let filter = ItemFilter {
        near: args
            .near
            .zip(args.radius)
            .map(|(center, radius)| (Vec3::from_array(center), radius)),
        has_tasks: args.has_tasks,
        has_effects: args.has_effects,
        parent: args.parent,
        search: args.search,
        quest: args.quest,
    };

    let result = execute_query(&snapshot, &query, &filter);

    if result.is_empty() {
        eprintln!("No items matched");
    } else if result.len() > WARN_THRESHOLD {
        eprintln!("WARNING: {} matches. Consider narrowing the filters.", result.len());
    }

    println!("{}", format_json(&result));
    Ok(())
}
