use serde::Deserialize;
use thiserror::Error;

use crate::solver::SolverParams;
use crate::state::{Grid, Obstacle};

/// Configuration rejected at construction time. These are the only failure
/// modes the simulation has: every later stage is a pure deterministic
/// transform of in-memory state.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGridDimensions { width: usize, height: usize },
    #[error("obstacle radius {radius} does not fit a {width}x{height} grid")]
    ObstacleTooLarge { radius: f64, width: usize, height: usize },
    #[error("relaxation iteration count must be positive")]
    ZeroIterations,
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub obstacle: ObstacleConfig,
    pub forcing: ForcingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub dt: f64,
    pub diff: f64,
    pub visc: f64,
    pub iterations: usize,
    pub inflow_vel: f64,
    pub force_scale: f64,
    pub source_strength: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Initial center. Negative values mean "use the grid default"
    /// (width/4, height/2).
    pub x: f64,
    pub y: f64,
    /// Radius in cells. Zero means "use the grid default" (height/8).
    pub radius: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ForcingConfig {
    /// Upper bound for the prime scan.
    pub prime_bound: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            physics: PhysicsConfig::default(),
            obstacle: ObstacleConfig::default(),
            forcing: ForcingConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { width: 512, height: 256 }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            diff: 0.0001,
            visc: 0.00005,
            iterations: 10,
            inflow_vel: 1.0,
            force_scale: 0.005,
            source_strength: 100.0,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self { x: -1.0, y: -1.0, radius: 0.0 }
    }
}

impl Default for ForcingConfig {
    fn default() -> Self {
        Self { prime_bound: 1000 }
    }
}

impl Config {
    /// Fail-fast validation, run before any simulation state is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = self.grid.width;
        let h = self.grid.height;
        if w < 3 || h < 3 {
            return Err(ConfigError::InvalidGridDimensions { width: w, height: h });
        }
        let radius = self.obstacle_radius();
        if radius <= 0.0 || radius * 2.0 >= w.min(h) as f64 {
            return Err(ConfigError::ObstacleTooLarge { radius, width: w, height: h });
        }
        if self.physics.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.physics.dt <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.physics.dt));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid.width, self.grid.height)
    }

    fn obstacle_radius(&self) -> f64 {
        if self.obstacle.radius > 0.0 {
            self.obstacle.radius
        } else {
            (self.grid.height / 8) as f64
        }
    }

    pub fn obstacle(&self) -> Obstacle {
        let cx = if self.obstacle.x >= 0.0 {
            self.obstacle.x
        } else {
            (self.grid.width / 4) as f64
        };
        let cy = if self.obstacle.y >= 0.0 {
            self.obstacle.y
        } else {
            (self.grid.height / 2) as f64
        };
        Obstacle { cx, cy, radius: self.obstacle_radius() }
    }

    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.physics.dt,
            diff: self.physics.diff,
            visc: self.physics.visc,
            iterations: self.physics.iterations,
            inflow_vel: self.physics.inflow_vel,
            force_scale: self.physics.force_scale,
            source_strength: self.physics.source_strength,
        }
    }
}

/// Load `primewake.yaml` from the working directory, falling back to the
/// defaults (with a warning) if it is missing or malformed.
pub fn load() -> Config {
    let path = std::path::Path::new("primewake.yaml");
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("failed to parse primewake.yaml: {e}; using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read primewake.yaml: {e}; using defaults");
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
