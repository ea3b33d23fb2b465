//! Shot sweep: classify every (angle, power) pair from a launch point
//!
//! Flies one shot per grid cell with the same physics the game uses and
//! records whether it scored, left the field, or was still airborne when
//! the tick budget ran out.
//!
//! Usage:
//!   cargo run --bin shot_sweep                          # From the player start
//!   cargo run --bin shot_sweep -- --origin 250 450      # From a custom point
//!   cargo run --bin shot_sweep -- --tuning config/shot_tuning.json
//!   cargo run --bin shot_sweep -- --threads 4
//!
//! Outputs land in showcase/ as:
//!   shot_sweep_<x>_<y>.png  (columns = angle left to right, rows = power, full power on top)
//!   shot_sweep_<x>_<y>.txt  (angle,power,outcome,ticks)

use bevy::prelude::Vec2;
use frogball::{
    Arena, FlightOutcome, SHOT_TUNING_FILE, ShotTuning, load_shot_tuning_from_file, simulate_flight,
};
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

// Grid settings
const ANGLE_STEPS: u32 = 96;
const POWER_STEPS: u32 = 64;
const CELL_SIZE: u32 = 8; // pixels per cell

/// Ticks before a shot counts as stuck in the air
const MAX_FLIGHT_TICKS: u32 = 600;

const OUTPUT_DIR: &str = "showcase";

struct SweepConfig {
    origin: Option<Vec2>,
    tuning_path: Option<String>,
    threads: usize,
}

#[derive(Debug, Clone, Copy)]
struct SweepCell {
    angle: f32,
    power: f32,
    outcome: FlightOutcome,
    ticks: u32,
}

fn parse_args() -> SweepConfig {
    let mut origin = None;
    let mut tuning_path = None;
    let mut threads = 0;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--origin" => {
                let x = args.next().and_then(|v| v.parse::<f32>().ok());
                let y = args.next().and_then(|v| v.parse::<f32>().ok());
                if let (Some(x), Some(y)) = (x, y) {
                    origin = Some(Vec2::new(x, y));
                }
            }
            "--tuning" => tuning_path = args.next(),
            "--threads" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    threads = value;
                }
            }
            _ => {}
        }
    }

    SweepConfig {
        origin,
        tuning_path,
        threads,
    }
}

fn load_tuning(path: Option<&str>) -> Result<ShotTuning, String> {
    match path {
        Some(path) => load_shot_tuning_from_file(path),
        None if Path::new(SHOT_TUNING_FILE).exists() => load_shot_tuning_from_file(SHOT_TUNING_FILE),
        None => Ok(ShotTuning::default()),
    }
}

/// Angle at grid column `i`, spanning the full aiming arc inclusive of both edges
fn angle_at(i: u32, tuning: &ShotTuning) -> f32 {
    let t = i as f32 / (ANGLE_STEPS - 1) as f32;
    -tuning.half_arc() + t * tuning.angle_range
}

/// Power at grid row `j`; zero power is skipped since it never leaves the hand
fn power_at(j: u32) -> f32 {
    (j + 1) as f32 / POWER_STEPS as f32
}

fn sweep(origin: Vec2, tuning: &ShotTuning, arena: &Arena) -> Vec<SweepCell> {
    let cells: Vec<(u32, u32)> = (0..POWER_STEPS)
        .flat_map(|j| (0..ANGLE_STEPS).map(move |i| (i, j)))
        .collect();

    cells
        .par_iter()
        .map(|&(i, j)| {
            let angle = angle_at(i, tuning);
            let power = power_at(j);
            let (outcome, ticks) = simulate_flight(origin, angle, power, tuning, arena, MAX_FLIGHT_TICKS);
            SweepCell {
                angle,
                power,
                outcome,
                ticks,
            }
        })
        .collect()
}

fn outcome_to_color(outcome: FlightOutcome) -> Rgb<u8> {
    match outcome {
        FlightOutcome::Scored => Rgb([60, 200, 80]),
        FlightOutcome::OutOfBounds => Rgb([200, 60, 50]),
        FlightOutcome::InFlight => Rgb([110, 110, 110]),
    }
}

fn outcome_label(outcome: FlightOutcome) -> &'static str {
    match outcome {
        FlightOutcome::Scored => "scored",
        FlightOutcome::OutOfBounds => "out",
        FlightOutcome::InFlight => "airborne",
    }
}

fn render(cells: &[SweepCell]) -> RgbImage {
    let mut img = RgbImage::new(ANGLE_STEPS * CELL_SIZE, POWER_STEPS * CELL_SIZE);
    for (index, cell) in cells.iter().enumerate() {
        let i = index as u32 % ANGLE_STEPS;
        let j = index as u32 / ANGLE_STEPS;
        // Full power on the top row
        let y_start = (POWER_STEPS - 1 - j) * CELL_SIZE;
        let x_start = i * CELL_SIZE;
        let color = outcome_to_color(cell.outcome);
        for dy in 0..CELL_SIZE {
            for dx in 0..CELL_SIZE {
                img.put_pixel(x_start + dx, y_start + dy, color);
            }
        }
    }
    img
}

fn table(cells: &[SweepCell]) -> String {
    let mut out = String::from("angle,power,outcome,ticks\n");
    for cell in cells {
        let _ = writeln!(
            out,
            "{:.4},{:.4},{},{}",
            cell.angle,
            cell.power,
            outcome_label(cell.outcome),
            cell.ticks
        );
    }
    out
}

fn main() {
    let config = parse_args();

    if config.threads > 0
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
    {
        eprintln!("Failed to size thread pool: {}", e);
    }

    let tuning = match load_tuning(config.tuning_path.as_deref()) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let arena = Arena::default();
    let origin = config.origin.unwrap_or(arena.start);
    println!(
        "Sweeping {}x{} shots from ({:.0}, {:.0})",
        ANGLE_STEPS, POWER_STEPS, origin.x, origin.y
    );

    let cells = sweep(origin, &tuning, &arena);
    let scored = cells.iter().filter(|c| c.outcome == FlightOutcome::Scored).count();
    println!(
        "{} of {} shots scored ({:.1}%)",
        scored,
        cells.len(),
        100.0 * scored as f32 / cells.len() as f32
    );

    if let Err(e) = fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Failed to create {}: {}", OUTPUT_DIR, e);
        std::process::exit(1);
    }

    let stem = format!("{}/shot_sweep_{:.0}_{:.0}", OUTPUT_DIR, origin.x, origin.y);
    let image_path = format!("{}.png", stem);
    match render(&cells).save(&image_path) {
        Ok(()) => println!("Saved {}", image_path),
        Err(e) => eprintln!("Failed to save {}: {}", image_path, e),
    }

    let table_path = format!("{}.txt", stem);
    match fs::write(&table_path, table(&cells)) {
        Ok(()) => println!("Saved {}", table_path),
        Err(e) => eprintln!("Failed to save {}: {}", table_path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spans_full_arc() {
        let tuning = ShotTuning::default();
        assert_eq!(angle_at(0, &tuning), -tuning.half_arc());
        assert!((angle_at(ANGLE_STEPS - 1, &tuning) - tuning.half_arc()).abs() < 1e-6);
        assert_eq!(power_at(POWER_STEPS - 1), 1.0);
        assert!(power_at(0) > 0.0);
    }

    #[test]
    fn test_sweep_covers_every_cell_and_finds_a_basket() {
        let tuning = ShotTuning::default();
        let arena = Arena::default();
        let cells = sweep(arena.start, &tuning, &arena);
        assert_eq!(cells.len(), (ANGLE_STEPS * POWER_STEPS) as usize);
        assert!(cells.iter().any(|c| c.outcome == FlightOutcome::OutOfBounds));
        assert!(cells.iter().any(|c| c.outcome == FlightOutcome::Scored));
    }
}
