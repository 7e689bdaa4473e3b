use crate::state::{Grid, SimState};

/// Pack the density field into a 0RGB framebuffer: positive tracer renders
/// light blue against a white background.
pub fn fill_density_buffer(state: &SimState, buffer: &mut [u32]) {
    let grid = state.grid;
    for (i, px) in buffer.iter_mut().enumerate().take(grid.size()) {
        let d = state.density[i].clamp(0.0, 255.0) as u32;
        *px = if d > 0 {
            let g = d / 2;
            (g << 8) | d
        } else {
            0x00ff_ffff
        };
    }
}

/// Read-only per-frame view handed to the presentation layer.
pub struct FrameView<'a> {
    pub grid: Grid,
    pub density: &'a [f64],
    pub vorticity: &'a [f64],
}

impl SimState {
    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            grid: self.grid,
            density: &self.density,
            vorticity: &self.vorticity,
        }
    }
}
