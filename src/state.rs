/// Grid dimensions, fixed for the lifetime of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total cell count.
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Larger grid dimension, used to normalize projection and advection.
    pub fn scale(&self) -> f64 {
        self.width.max(self.height) as f64
    }

    /// Flat index for in-bounds coordinates.
    #[inline(always)]
    pub const fn at(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// Xorshift128 PRNG. Deterministic for a given seed, which is what the
/// forcing table relies on: the same prime always yields the same vector.
pub struct Xor128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xor128 {
    pub fn new(seed: u32) -> Self {
        Self {
            x: seed,
            y: seed.wrapping_mul(1812433253).wrapping_add(1),
            z: seed.wrapping_mul(1812433253).wrapping_mul(2).wrapping_add(2),
            w: seed.wrapping_mul(1812433253).wrapping_mul(3).wrapping_add(3),
        }
    }

    pub fn next(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Returns a float in [0.0, 1.0].
    pub fn next_f64(&mut self) -> f64 {
        self.next() as f64 / u32::MAX as f64
    }
}

/// Circular obstacle. The center is real-valued so dragging is smooth;
/// masking floors it to cell coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Obstacle {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.cx;
        let dy = py - self.cy;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

/// Input-originated commands, queued by the event loop and applied only at
/// frame boundaries so the mask never changes mid-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimCommand {
    Relocate { x: f64, y: f64 },
}

/// All mutable simulation state. Fields are flat row-major arrays indexed
/// by `grid.at(x, y)`. The `*0` fields are previous-step snapshots used by
/// the diffusion and advection solvers; pressure and divergence are
/// dedicated projection scratch, never aliased with velocity.
pub struct SimState {
    pub grid: Grid,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub u0: Vec<f64>,
    pub v0: Vec<f64>,
    pub density: Vec<f64>,
    pub density0: Vec<f64>,
    pub pressure: Vec<f64>,
    pub divergence: Vec<f64>,
    pub vorticity: Vec<f64>,
    /// Solid cells. Fully regenerated whenever the obstacle moves.
    pub mask: Vec<bool>,
    pub obstacle: Obstacle,
    /// Simulation time, advanced by dt each step, never rewound.
    pub t: f64,
}

impl SimState {
    pub fn new(grid: Grid, obstacle: Obstacle) -> Self {
        let size = grid.size();
        let mask = build_solid_mask(grid, &obstacle);
        Self {
            grid,
            u: vec![0.0; size],
            v: vec![0.0; size],
            u0: vec![0.0; size],
            v0: vec![0.0; size],
            density: vec![0.0; size],
            density0: vec![0.0; size],
            pressure: vec![0.0; size],
            divergence: vec![0.0; size],
            vorticity: vec![0.0; size],
            mask,
            obstacle,
            t: 0.0,
        }
    }

    /// Apply queued input commands. Called between frames only.
    pub fn apply_commands(&mut self, commands: &mut Vec<SimCommand>) {
        for cmd in commands.drain(..) {
            match cmd {
                SimCommand::Relocate { x, y } => {
                    crate::solver::relocate_obstacle(self, x, y);
                }
            }
        }
    }
}

/// Build the boolean solid mask for the obstacle disk. The center is
/// floored to integer cell coordinates before the distance test.
pub fn build_solid_mask(grid: Grid, obstacle: &Obstacle) -> Vec<bool> {
    let cx = obstacle.cx.floor();
    let cy = obstacle.cy.floor();
    let r2 = obstacle.radius * obstacle.radius;
    let mut mask = vec![false; grid.size()];
    for y in 0..grid.height {
        for x in 0..grid.width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            mask[grid.at(x, y)] = dx * dx + dy * dy < r2;
        }
    }
    mask
}
