// cli.rs - Command-line interface configuration
use clap::Parser;
use glam::Vec3;
use std::path::PathBuf;

use crate::core::Action;

#[derive(Parser, Debug, Clone)]
#[command(name = "node-navigator")]
#[command(about = "Fly through a point cloud of nodes", long_about = None)]
pub struct Cli {
    /// Scene data file ({"nodes": [{"id": .., "position": [x, y, z]}]})
    #[arg(long, default_value = "data/nodes.json")]
    pub data: PathBuf,

    /// Seed for scattering nodes that have no position
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Camera start position as X,Y,Z
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,50")]
    pub start: Vec3,

    /// Navigation steps per second
    #[arg(long = "step-hz", default_value_t = 60.0, value_parser = parse_step_hz)]
    pub step_hz: f32,

    /// Run this many steps without a window and print a JSON report
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u32>,

    /// Action held for the whole headless run (repeatable)
    #[arg(long, value_enum, requires = "headless")]
    pub hold: Vec<Action>,

    /// Hide the on-screen overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{:?}: {}", p, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => Ok(Vec3::new(*x, *y, *z)),
        [_, _, _] => Err("coordinates must be finite".to_string()),
        _ => Err(format!("expected X,Y,Z, got {} values", parts.len())),
    }
}

fn parse_step_hz(s: &str) -> Result<f32, String> {
    let hz: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if hz.is_finite() && hz > 0.0 {
        Ok(hz)
    } else {
        Err("step rate must be positive".to_string())
    }
}
