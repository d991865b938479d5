//! footfall CLI - headless procedural-locomotion simulator.
//!
//! - `footfall simulate` - walk a creature over a terrain scenario and report the result
//! - `footfall profiles` - list the built-in creature presets or dump one as YAML
//! - `footfall probe` - resolve a safe foot placement at a point

mod scenario;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use footfall_core::{
    CreatureProfile, FootEvent, FootEventKind, FootState, Vec3, WalkController, PRESET_NAMES,
};

#[derive(Parser)]
#[command(name = "footfall")]
#[command(about = "Procedural locomotion simulator", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a creature across a terrain scenario
    Simulate {
        /// Preset name or path to a YAML/JSON profile
        #[arg(long, default_value = "biped")]
        profile: String,

        /// Terrain scenario
        #[arg(long, default_value = "flat", value_parser = ["flat", "stairs", "gap"])]
        terrain: String,

        /// Target velocity as x,y,z in units per second
        #[arg(long, default_value = "0,100,0", allow_hyphen_values = true, value_parser = parse_vec3)]
        velocity: Vec3,

        /// Number of ticks to run
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Output format
        #[arg(long, default_value = "summary", value_parser = ["summary", "jsonl"])]
        format: String,
    },

    /// List built-in creature presets
    Profiles {
        /// Print this preset as YAML instead of listing names
        #[arg(long)]
        dump: Option<String>,
    },

    /// Resolve a safe foot placement near a point
    Probe {
        #[arg(long, allow_hyphen_values = true)]
        x: f32,

        #[arg(long, allow_hyphen_values = true)]
        y: f32,

        /// Terrain scenario
        #[arg(long, default_value = "flat", value_parser = ["flat", "stairs", "gap"])]
        terrain: String,

        /// Preset name or path whose probe settings are used
        #[arg(long, default_value = "biped")]
        profile: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON lines on stdout stay machine-readable.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            profile,
            terrain,
            velocity,
            ticks,
            dt,
            format,
        } => simulate(&profile, &terrain, velocity, ticks, dt, &format),
        Commands::Profiles { dump } => profiles(dump.as_deref()),
        Commands::Probe {
            x,
            y,
            terrain,
            profile,
        } => probe(x, y, &terrain, &profile),
    }
}

/// One tick of a `jsonl` run.
#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    time: f64,
    position: Vec3,
    pelvis_offset: Vec3,
    feet: Vec<&'a FootState>,
    events: &'a [FootEvent],
}

fn simulate(
    profile: &str,
    terrain: &str,
    velocity: Vec3,
    ticks: u32,
    dt: f32,
    format: &str,
) -> Result<()> {
    let profile = load_profile(profile)?;
    let grid = scenario::build(terrain)?;
    let mut walker = WalkController::from_profile(grid, &profile)
        .with_context(|| format!("profile '{}' has an invalid leg layout", profile.name))?;
    walker.rest_at(scenario::START);

    tracing::info!(
        profile = %profile.name,
        terrain,
        ticks,
        legs = walker.legs().len(),
        "Starting simulation"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let jsonl = format == "jsonl";
    let mut lifts = 0_usize;
    let mut plants = 0_usize;

    for _ in 0..ticks {
        walker.tick(dt, velocity);
        for event in walker.events() {
            match event.kind {
                FootEventKind::Lifted => lifts += 1,
                FootEventKind::Planted => plants += 1,
            }
        }
        if jsonl {
            let frame = Frame {
                tick: walker.clock().tick(),
                time: walker.clock().elapsed(),
                position: walker.character().position,
                pelvis_offset: walker.pelvis_offset(),
                feet: walker.feet().collect(),
                events: walker.events(),
            };
            serde_json::to_writer(&mut out, &frame)?;
            writeln!(out)?;
        }
    }

    if !jsonl {
        let travelled = walker.character().position - scenario::START;
        writeln!(out, "profile:        {}", profile.name)?;
        writeln!(out, "terrain:        {terrain}")?;
        writeln!(out, "simulated:      {:.2}s over {ticks} ticks", walker.clock().elapsed())?;
        writeln!(out, "travelled:      {:.1}", travelled.length())?;
        writeln!(out, "stride:         {:.3}s", walker.stride_duration())?;
        writeln!(out, "steps:          {lifts} lifts, {plants} plants")?;
        writeln!(out, "pelvis offset:  {:.2}", walker.pelvis_offset().z)?;
        for (i, foot) in walker.feet().enumerate() {
            let state = if foot.planted { "planted" } else { "swinging" };
            writeln!(
                out,
                "foot {i}:         ({:.1}, {:.1}, {:.1}) {state}",
                foot.position.x, foot.position.y, foot.position.z
            )?;
        }
    }
    out.flush()?;

    tracing::info!(lifts, plants, "Simulation complete");
    Ok(())
}

fn profiles(dump: Option<&str>) -> Result<()> {
    match dump {
        Some(name) => {
            let Some(profile) = CreatureProfile::preset(name) else {
                bail!("unknown preset '{name}' (expected one of {PRESET_NAMES:?})");
            };
            print!("{}", serde_yaml::to_string(&profile)?);
        }
        None => {
            for name in PRESET_NAMES {
                if let Some(profile) = CreatureProfile::preset(name) {
                    println!("{name:<12} {} legs", profile.layout.leg_count());
                }
            }
        }
    }
    Ok(())
}

fn probe(x: f32, y: f32, terrain: &str, profile: &str) -> Result<()> {
    let profile = load_profile(profile)?;
    let grid = scenario::build(terrain)?;
    let walker = WalkController::from_profile(grid, &profile)
        .with_context(|| format!("profile '{}' has an invalid leg layout", profile.name))?;

    let desired = Vec3::new(x, y, 0.0);
    match walker.find_safe_placement(desired) {
        Some(placement) => println!("{}", serde_json::to_string_pretty(&placement)?),
        None => {
            tracing::warn!(x, y, terrain, "No walkable placement within the search radius");
            println!("null");
        }
    }
    Ok(())
}

/// A preset name, or a path to a `.yaml`/`.yml`/`.json` profile.
fn load_profile(source: &str) -> Result<CreatureProfile> {
    if let Some(profile) = CreatureProfile::preset(source) {
        return Ok(profile);
    }

    let path = Path::new(source);
    let text = fs::read_to_string(path)
        .with_context(|| format!("'{source}' is neither a preset nor a readable profile file"))?;
    let profile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML profile {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON profile {}", path.display()))?,
        _ => bail!("profile file {} must end in .yaml, .yml or .json", path.display()),
    };
    tracing::debug!(path = %path.display(), "Loaded profile");
    Ok(profile)
}

fn parse_vec3(text: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected x,y,z but got '{text}'"));
    };
    let component = |s: &str| {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{s}' is not a finite number"))
    };
    Ok(Vec3::new(component(x)?, component(y)?, component(z)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_three_components() {
        assert_eq!(parse_vec3("1, -2.5,0").unwrap(), Vec3::new(1.0, -2.5, 0.0));
    }

    #[test]
    fn parse_vec3_rejects_malformed_input() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
        assert!(parse_vec3("1,nan,3").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn presets_load_by_name() {
        for name in PRESET_NAMES {
            assert_eq!(load_profile(name).unwrap().name, name);
        }
        assert!(load_profile("no/such/profile.yaml").is_err());
    }

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "footfall",
            "simulate",
            "--profile",
            "hexapod",
            "--velocity",
            "-50,0,0",
            "--ticks",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                profile,
                velocity,
                ticks,
                ..
            } => {
                assert_eq!(profile, "hexapod");
                assert_eq!(velocity, Vec3::new(-50.0, 0.0, 0.0));
                assert_eq!(ticks, 10);
            }
            _ => panic!("expected simulate"),
        }
    }
}
