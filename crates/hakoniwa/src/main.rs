//! Hakoniwa - generate a chunk of voxel terrain and walk it

use anyhow::{Context, bail};
use clap::Parser;

use hakoniwa_core::pathfind::{PathFinder, PathOutcome};
use hakoniwa_core::world::{
    CHUNK_MAX_HEIGHT, CHUNK_SIZE, ChunkStore, MemoryStore, NullStore, World, seed_from_str,
};
use hakoniwa_core::voxel::Coordinate;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed: a number, or any string (hashed to a number)
    #[arg(long, default_value = "hakoniwa")]
    seed: String,

    /// Do not record cell changes (no persistence)
    #[arg(long)]
    no_save: bool,

    /// Start column as "x,y" in the active chunk
    #[arg(long, default_value = "0,0")]
    start: String,

    /// Destination column as "x,y" in the active chunk
    #[arg(long, default_value = "8,8")]
    dest: String,
}

fn parse_column(text: &str) -> anyhow::Result<(i32, i32)> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("column '{text}' is not of the form x,y"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

/// Topmost standing spot in a column.
fn top_foothold(world: &World, x: i32, y: i32) -> Option<Coordinate> {
    world
        .nearest_ground_below(x, y, CHUNK_MAX_HEIGHT as i32 - 1)
        .map(|z| Coordinate::new(x, y, z))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seed = args.seed.parse().unwrap_or_else(|_| seed_from_str(&args.seed));
    let store: Box<dyn ChunkStore> = if args.no_save {
        Box::new(NullStore)
    } else {
        Box::new(MemoryStore::new())
    };

    log::info!("Starting Hakoniwa (seed {seed})");
    let world = World::new(seed, store);

    let (sx, sy) = parse_column(&args.start)?;
    let (dx, dy) = parse_column(&args.dest)?;
    let size = CHUNK_SIZE as i32;
    for (x, y) in [(sx, sy), (dx, dy)] {
        if x < 0 || y < 0 || x >= size || y >= size {
            bail!("column ({x}, {y}) is outside the active chunk (0..{size})");
        }
    }

    let start = top_foothold(&world, sx, sy)
        .with_context(|| format!("no standing spot in column ({sx}, {sy})"))?;
    let dest = top_foothold(&world, dx, dy)
        .with_context(|| format!("no standing spot in column ({dx}, {dy})"))?;

    if start == dest {
        println!("Already standing at ({}, {}, {})", dest.x, dest.y, dest.z);
        return Ok(());
    }

    let mut finder = PathFinder::new(start, dest, &world);
    let (label, node) = match finder.find() {
        PathOutcome::Destination(id) => ("Reached", id),
        PathOutcome::Closest(id) => ("Closest reachable", id),
        PathOutcome::Unreachable => bail!(
            "no reachable spot anywhere near ({}, {}, {})",
            dest.x,
            dest.y,
            dest.z
        ),
    };

    let pos = finder.node(node).pos;
    println!(
        "{label}: ({}, {}, {}) from ({}, {}, {})",
        pos.x, pos.y, pos.z, start.x, start.y, start.z
    );
    for (i, mv) in finder.move_sequence(node).iter().enumerate() {
        println!("  {:>3}. {:?} ({:?})", i + 1, mv.direction, mv.kind);
    }
    Ok(())
}
