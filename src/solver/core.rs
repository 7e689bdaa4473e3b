use super::boundary::{set_bnd, FieldType};
use crate::state::Grid;

/// Gauss-Seidel relaxation of x[i,j] = (x0[i,j] + a * neighbors) / c for a
/// fixed pass count. Neighbor reads see in-progress values from the current
/// pass; boundaries are re-enforced after every pass, not just the last.
pub fn lin_solve(
    field: FieldType,
    x: &mut [f64],
    x0: &[f64],
    a: f64,
    c: f64,
    iterations: usize,
    grid: Grid,
) {
    let c_inv = 1.0 / c;
    for _ in 0..iterations {
        for j in 1..grid.height - 1 {
            for i in 1..grid.width - 1 {
                let neighbors = x[grid.at(i - 1, j)]
                    + x[grid.at(i + 1, j)]
                    + x[grid.at(i, j - 1)]
                    + x[grid.at(i, j + 1)];
                x[grid.at(i, j)] = (x0[grid.at(i, j)] + a * neighbors) * c_inv;
            }
        }
        set_bnd(field, x, grid);
    }
}

/// Implicit diffusion: solves x = x0 + a * Laplacian(x) with
/// a = dt * kappa * (width-2) * (height-2). A zero rate leaves the interior
/// untouched (only the boundary ring is re-enforced).
pub fn diffuse(
    field: FieldType,
    x: &mut [f64],
    x0: &[f64],
    kappa: f64,
    dt: f64,
    iterations: usize,
    grid: Grid,
) {
    let a = dt * kappa * (grid.width - 2) as f64 * (grid.height - 2) as f64;
    let c = 1.0 + 4.0 * a;
    x.copy_from_slice(x0);
    lin_solve(field, x, x0, a, c, iterations, grid);
}

/// Semi-Lagrangian advection: each interior cell traces backward through
/// the velocity field and bilinearly samples the previous snapshot `d0`.
/// The trace is clamped to the sampleable interior on both axes.
pub fn advect(
    field: FieldType,
    d: &mut [f64],
    d0: &[f64],
    u: &[f64],
    v: &[f64],
    dt: f64,
    grid: Grid,
) {
    let dt0 = dt * (grid.scale() - 2.0);
    let w_f = grid.width as f64;
    let h_f = grid.height as f64;

    for j in 1..grid.height - 1 {
        for i in 1..grid.width - 1 {
            let ii = grid.at(i, j);
            let x = (i as f64 - dt0 * u[ii]).clamp(0.5, w_f - 1.5);
            let y = (j as f64 - dt0 * v[ii]).clamp(0.5, h_f - 1.5);

            let i0 = x.floor() as usize;
            let i1 = i0 + 1;
            let j0 = y.floor() as usize;
            let j1 = j0 + 1;
            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            d[ii] = s0 * (t0 * d0[grid.at(i0, j0)] + t1 * d0[grid.at(i0, j1)])
                + s1 * (t0 * d0[grid.at(i1, j0)] + t1 * d0[grid.at(i1, j1)]);
        }
    }
    set_bnd(field, d, grid);
}

/// Pressure projection: removes divergence from the velocity field.
/// Central-difference divergence normalized by the larger grid dimension,
/// fixed-count Poisson relaxation with free boundaries, then the pressure
/// gradient is subtracted and the velocity boundaries re-enforced.
pub fn project(
    u: &mut [f64],
    v: &mut [f64],
    p: &mut [f64],
    div: &mut [f64],
    iterations: usize,
    grid: Grid,
) {
    let scale = grid.scale();

    for j in 1..grid.height - 1 {
        for i in 1..grid.width - 1 {
            div[grid.at(i, j)] = -0.5
                * (u[grid.at(i + 1, j)] - u[grid.at(i - 1, j)] + v[grid.at(i, j + 1)]
                    - v[grid.at(i, j - 1)])
                / scale;
            p[grid.at(i, j)] = 0.0;
        }
    }
    set_bnd(FieldType::Free, div, grid);
    set_bnd(FieldType::Free, p, grid);

    lin_solve(FieldType::Free, p, div, 1.0, 4.0, iterations, grid);

    for j in 1..grid.height - 1 {
        for i in 1..grid.width - 1 {
            u[grid.at(i, j)] -= 0.5 * (p[grid.at(i + 1, j)] - p[grid.at(i - 1, j)]) * scale;
            v[grid.at(i, j)] -= 0.5 * (p[grid.at(i, j + 1)] - p[grid.at(i, j - 1)]) * scale;
        }
    }
    set_bnd(FieldType::U, u, grid);
    set_bnd(FieldType::V, v, grid);
}

/// Curl-like vorticity on interior cells, for visualization only.
pub fn compute_vorticity(u: &[f64], v: &[f64], vort: &mut [f64], grid: Grid) {
    for j in 1..grid.height - 1 {
        for i in 1..grid.width - 1 {
            vort[grid.at(i, j)] = (v[grid.at(i + 1, j)] - v[grid.at(i - 1, j)])
                - (u[grid.at(i, j + 1)] - u[grid.at(i, j - 1)]);
        }
    }
}
