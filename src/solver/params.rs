/// Numeric parameters for one simulation, fixed at construction.
#[derive(Clone, Debug)]
pub struct SolverParams {
    /// Time step per frame.
    pub dt: f64,
    /// Tracer diffusion rate.
    pub diff: f64,
    /// Velocity viscosity.
    pub visc: f64,
    /// Relaxation pass count for diffusion and pressure solves.
    pub iterations: usize,
    /// Base inlet horizontal velocity.
    pub inflow_vel: f64,
    /// Scale applied to the forcing sample before it perturbs the inlet.
    pub force_scale: f64,
    /// Tracer amount added per frame inside the inlet band.
    pub source_strength: f64,
}

impl Default for SolverParams {
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
