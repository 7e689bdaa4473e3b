mod config;
mod forcing;
mod renderer;
mod solver;
mod state;

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use forcing::ForcingTable;
use state::{SimCommand, SimState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cfg = config::load();
    cfg.validate()?;

    let grid = cfg.grid();
    let params = cfg.solver_params();
    let forcing = ForcingTable::build(cfg.forcing.prime_bound);
    let mut state = SimState::new(grid, cfg.obstacle());

    log::info!(
        "grid {}x{}, obstacle r={} at ({}, {}), {} forcing entries",
        grid.width,
        grid.height,
        state.obstacle.radius,
        state.obstacle.cx,
        state.obstacle.cy,
        forcing.len()
    );

    let mut window = Window::new(
        "primewake - prime-forced vortex street",
        grid.width,
        grid.height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(60);

    let mut buffer = vec![0u32; grid.size()];
    let mut commands: Vec<SimCommand> = Vec::new();
    let mut dragging = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Translate mouse input into relocation commands. The commands are
        // applied only between frames so the mask never tears mid-step.
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Discard) {
            let (px, py) = (mx as f64, my as f64);
            if mouse_down && !dragging && solver::hit_test(&state, px, py) {
                dragging = true;
            }
            if dragging && mouse_down {
                commands.push(SimCommand::Relocate { x: px, y: py });
            }
        }
        if !mouse_down {
            dragging = false;
        }

        state.apply_commands(&mut commands);
        solver::fluid_step(&mut state, &forcing, &params);
        solver::compute_vorticity(&state.u, &state.v, &mut state.vorticity, grid);

        renderer::fill_density_buffer(&state, &mut buffer);
        window.update_with_buffer(&buffer, grid.width, grid.height)?;
    }

    Ok(())
}
