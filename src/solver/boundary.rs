use crate::state::Grid;

/// Boundary kind for a channel.
/// `U` reflects at the left wall (no-penetration for horizontal velocity),
/// `V` reflects at the top/bottom walls, `Free` is zero-gradient everywhere.
/// The right edge is always zero-gradient: open outflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Free,
    U,
    V,
}

/// Apply edge and corner conditions to one channel. Must run after every
/// relaxation pass and after every advection; skipping a call leaves stale
/// edge values that bleed back into the interior.
pub fn set_bnd(field: FieldType, x: &mut [f64], grid: Grid) {
    let w = grid.width;
    let h = grid.height;

    // Top/bottom rows over interior columns.
    for i in 1..w - 1 {
        match field {
            FieldType::V => {
                x[grid.at(i, 0)] = -x[grid.at(i, 1)];
                x[grid.at(i, h - 1)] = -x[grid.at(i, h - 2)];
            }
            _ => {
                x[grid.at(i, 0)] = x[grid.at(i, 1)];
                x[grid.at(i, h - 1)] = x[grid.at(i, h - 2)];
            }
        }
    }

    // Left/right columns over interior rows. Right edge is open outflow
    // regardless of kind.
    for j in 1..h - 1 {
        match field {
            FieldType::U => x[grid.at(0, j)] = -x[grid.at(1, j)],
            _ => x[grid.at(0, j)] = x[grid.at(1, j)],
        }
        x[grid.at(w - 1, j)] = x[grid.at(w - 2, j)];
    }

    // Corners average their two adjacent edge cells.
    x[grid.at(0, 0)] = 0.5 * (x[grid.at(1, 0)] + x[grid.at(0, 1)]);
    x[grid.at(w - 1, 0)] = 0.5 * (x[grid.at(w - 2, 0)] + x[grid.at(w - 1, 1)]);
    x[grid.at(0, h - 1)] = 0.5 * (x[grid.at(1, h - 1)] + x[grid.at(0, h - 2)]);
    x[grid.at(w - 1, h - 1)] = 0.5 * (x[grid.at(w - 2, h - 1)] + x[grid.at(w - 1, h - 2)]);
}
