use crate::state::{build_solid_mask, SimState};

/// Move the obstacle center, clamping so the full disk stays inside the
/// interior, then rebuild the solid mask from scratch. The mask is never
/// patched incrementally.
pub fn relocate_obstacle(state: &mut SimState, x: f64, y: f64) {
    let r = state.obstacle.radius;
    let w = state.grid.width as f64;
    let h = state.grid.height as f64;
    state.obstacle.cx = x.clamp(r, w - 1.0 - r);
    state.obstacle.cy = y.clamp(r, h - 1.0 - r);
    state.mask = build_solid_mask(state.grid, &state.obstacle);
}

/// Zero velocity and tracer on every solid cell: no-slip, and no tracer
/// inside the obstacle. Runs once per frame after all solves.
pub fn enforce_obstacle(state: &mut SimState) {
    for (i, &solid) in state.mask.iter().enumerate() {
        if solid {
            state.u[i] = 0.0;
            state.v[i] = 0.0;
            state.density[i] = 0.0;
        }
    }
}

/// Drag-start hit test against the real-valued obstacle center.
pub fn hit_test(state: &SimState, px: f64, py: f64) -> bool {
    state.obstacle.contains(px, py)
}
