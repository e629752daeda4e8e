use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use trackbreak_analysis::{
    checkpoint_statistics, find_ghost_checkpoints, find_ghost_checkpoints_with_points, render,
    Bounds, RenderOptions, UNAVAILABLE,
};
use trackbreak_gamedata::{controller_name, driver_name, find_regular_track, vehicle_name};
use trackbreak_kmp::{decode, detect, extract, Container, Kmp};

#[derive(Parser)]
#[command(name = "trackbreak")]
#[command(about = "Checkpoint analysis for Mario Kart Wii course files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only errors (stdout is reserved for command output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the section inventory of a course file
    Info(InfoArgs),

    /// Checkpoint statistics: counts, key checkpoints and the 95% rule
    Stats(StatsArgs),

    /// Find checkpoints crossable out of order
    Ghosts(GhostsArgs),

    /// Render the checkpoint map to a Desmos HTML page
    Graph(GraphArgs),

    /// Look up regular tracks, vehicles, drivers and controllers
    Lookup(LookupArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Course file (.kmp, or a U8 archive containing course.kmp)
    file: PathBuf,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct StatsArgs {
    /// Course file (.kmp, or a U8 archive containing course.kmp)
    file: PathBuf,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GhostsArgs {
    /// Course file (.kmp, or a U8 archive containing course.kmp)
    file: PathBuf,

    /// Include a witness point inside each reachable region
    #[arg(long)]
    points: bool,

    /// Clip the search region to [MIN, MAX] on both axes
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    bounds: Option<Vec<f64>>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GraphArgs {
    /// Course file (.kmp, or a U8 archive containing course.kmp)
    file: PathBuf,

    /// Output path (defaults to the input with a .desmos.html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overlay path splits in orange
    #[arg(long)]
    split_paths: bool,

    /// Clip ghost regions to [MIN, MAX] on both axes
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    bounds: Option<Vec<f64>>,
}

#[derive(Args)]
struct LookupArgs {
    /// Track name or alias to look up
    query: Option<String>,

    /// Vehicle id to name
    #[arg(long)]
    vehicle: Option<usize>,

    /// Driver id to name
    #[arg(long)]
    driver: Option<usize>,

    /// Controller id to name
    #[arg(long)]
    controller: Option<usize>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Auto-enable quiet mode when --json is used (stdout stays parseable)
    let json_output = match &cli.command {
        Commands::Info(args) => args.json,
        Commands::Stats(args) => args.json,
        Commands::Ghosts(args) => args.json,
        Commands::Lookup(args) => args.json,
        Commands::Graph(_) => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Info(args) => run_info(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Ghosts(args) => run_ghosts(args),
        Commands::Graph(args) => run_graph(args),
        Commands::Lookup(args) => run_lookup(args),
    }
}

/// Read a course file, unwrapping a U8 archive when handed one.
fn load_course(path: &Path) -> Result<Kmp> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let container = detect(&data);
    log::debug!("{}: container {:?}", path.display(), container);

    let raw = match container {
        Container::U8 => extract(&data, "course.kmp")
            .with_context(|| format!("failed to extract course.kmp from {}", path.display()))?,
        Container::Yaz0 => bail!("{} is Yaz0-compressed; decompress it first", path.display()),
        Container::Unknown => &data[..],
    };
    let kmp = decode(raw).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(kmp)
}

fn course_bounds(values: Option<&Vec<f64>>) -> Bounds {
    match values.map(Vec::as_slice) {
        Some(&[min, max]) => Bounds { min, max },
        _ => Bounds::default(),
    }
}

#[derive(Serialize)]
struct InfoReport {
    version: u32,
    sections: u16,
    ktpt: usize,
    enpt: usize,
    enph: usize,
    itpt: usize,
    itph: usize,
    ckpt: usize,
    ckph: usize,
    gobj: usize,
    poti: usize,
    area: usize,
    came: usize,
    jgpt: usize,
    cnpt: usize,
    mspt: usize,
    stgi: usize,
    laps: Option<u8>,
    speed_modifier: Option<f32>,
}

fn info_report(kmp: &Kmp) -> InfoReport {
    let stage = kmp.stgi.entries.first();
    InfoReport {
        version: kmp.header.version,
        sections: kmp.header.section_count,
        ktpt: kmp.ktpt.entries.len(),
        enpt: kmp.enpt.entries.len(),
        enph: kmp.enph.entries.len(),
        itpt: kmp.itpt.entries.len(),
        itph: kmp.itph.entries.len(),
        ckpt: kmp.ckpt.entries.len(),
        ckph: kmp.ckph.entries.len(),
        gobj: kmp.gobj.entries.len(),
        poti: kmp.poti.entries.len(),
        area: kmp.area.entries.len(),
        came: kmp.came.entries.len(),
        jgpt: kmp.jgpt.entries.len(),
        cnpt: kmp.cnpt.entries.len(),
        mspt: kmp.mspt.entries.len(),
        stgi: kmp.stgi.entries.len(),
        laps: stage.map(|s| s.laps),
        speed_modifier: stage.map(|s| s.speed_mod),
    }
}

fn run_info(args: InfoArgs) -> Result<()> {
    let kmp = load_course(&args.file)?;
    let report = info_report(&kmp);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Version: {}", report.version);
    println!("Sections: {}", report.sections);
    println!();
    let counts = [
        ("KTPT", report.ktpt),
        ("ENPT", report.enpt),
        ("ENPH", report.enph),
        ("ITPT", report.itpt),
        ("ITPH", report.itph),
        ("CKPT", report.ckpt),
        ("CKPH", report.ckph),
        ("GOBJ", report.gobj),
        ("POTI", report.poti),
        ("AREA", report.area),
        ("CAME", report.came),
        ("JGPT", report.jgpt),
        ("CNPT", report.cnpt),
        ("MSPT", report.mspt),
        ("STGI", report.stgi),
    ];
    for (tag, count) in counts {
        println!("{tag}: {count}");
    }
    if let Some(laps) = report.laps {
        println!();
        println!("Laps: {laps}");
    }
    if let Some(speed) = report.speed_modifier {
        println!("Speed modifier: {speed}");
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let kmp = load_course(&args.file)?;
    let stats = checkpoint_statistics(&kmp)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    // A course with several lap-start checkpoints has no single answer
    // for the derived numbers.
    if stats.from_cp0 == UNAVAILABLE {
        println!("Checkpoint info unavailable for this track (multiple finish lines).");
        return Ok(());
    }

    println!("Checkpoints: {}", stats.checkpoint_count);
    println!("Checkpoint Groups: {}", stats.group_count);
    println!("Key Checkpoints: {}", stats.key_checkpoint_count);
    println!("Last Key Checkpoint: {}", stats.last_key_checkpoint);
    println!();
    println!("95% from Checkpoint 0: {}", stats.from_cp0);
    println!("95% from Checkpoint 1: {}", stats.from_cp1);
    println!(
        "Last Key Checkpoint %: {:.2}%",
        stats.last_key_completion * 100.0
    );
    println!(
        "Maximum % for Ultra: {:.2}%",
        stats.max_ultra_completion * 100.0
    );
    println!();
    println!("Anomalies: {}", stats.anomalies.as_deref().unwrap_or("Unknown"));
    Ok(())
}

fn run_ghosts(args: GhostsArgs) -> Result<()> {
    let kmp = load_course(&args.file)?;
    let bounds = course_bounds(args.bounds.as_ref());
    let ghosts = find_ghost_checkpoints_with_points(&kmp, bounds);

    if args.json {
        if args.points {
            println!("{}", serde_json::to_string_pretty(&ghosts)?);
        } else {
            let indices: Vec<usize> = ghosts.iter().map(|g| g.index).collect();
            println!("{}", serde_json::to_string_pretty(&indices)?);
        }
        return Ok(());
    }

    if ghosts.is_empty() {
        println!("No ghost checkpoints found.");
        return Ok(());
    }

    let list = ghosts
        .iter()
        .map(|g| g.index.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Ghost checkpoints found at: {list}");
    if args.points {
        for g in &ghosts {
            println!("  {} at ({:.3}, {:.3})", g.index, g.point[0], g.point[1]);
        }
    }
    Ok(())
}

fn run_graph(args: GraphArgs) -> Result<()> {
    let kmp = load_course(&args.file)?;
    let bounds = course_bounds(args.bounds.as_ref());
    let ghosts = find_ghost_checkpoints(&kmp, bounds);

    let list = ghosts
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let opts = RenderOptions {
        ghosts,
        split_paths: args.split_paths,
        bounds: Some(bounds),
    };
    // The ghost list rides along as a trailing comment so a rerun can
    // report it without regenerating the page.
    let page = format!("{}\n<!--{list}-->", render(&kmp, &opts));

    let out = args
        .output
        .unwrap_or_else(|| args.file.with_extension("desmos.html"));
    fs::write(&out, &page).with_context(|| format!("failed to write {}", out.display()))?;

    if opts.ghosts.is_empty() {
        println!("No ghost checkpoints found.");
    } else {
        println!("Ghost checkpoints found at: {list}");
    }
    println!("Wrote {}", out.display());
    Ok(())
}

fn print_id_lookup(id: usize, name: Option<&'static str>, what: &str, json: bool) -> Result<()> {
    let name = name.with_context(|| format!("no {what} with id {id}"))?;
    if json {
        let entry = serde_json::json!({ "id": id, "name": name });
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{name}");
    }
    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<()> {
    if let Some(id) = args.vehicle {
        return print_id_lookup(id, vehicle_name(id), "vehicle", args.json);
    }
    if let Some(id) = args.driver {
        return print_id_lookup(id, driver_name(id), "driver", args.json);
    }
    if let Some(id) = args.controller {
        return print_id_lookup(id, controller_name(id), "controller", args.json);
    }

    let query = match &args.query {
        Some(query) => query,
        None => bail!("nothing to look up: pass a track name or an id flag"),
    };
    let track = find_regular_track(query)
        .with_context(|| format!("no regular track matches {query:?}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(track)?);
    } else {
        println!("{} ({})", track.name, track.alias);
        println!("Slot: {}", track.slot);
        println!("SHA-1: {}", track.sha1);
    }
    Ok(())
}
