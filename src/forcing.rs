use crate::state::Xor128;

pub const DIM: usize = 8;

/// Character chi(n) mod 6: 0 for multiples of 2 or 3, +1 for n = 1 (mod 6),
/// -1 for n = 5 (mod 6).
pub fn chi(n: u32) -> i32 {
    if n % 2 == 0 || n % 3 == 0 {
        0
    } else if n % 6 == 1 {
        1
    } else {
        -1
    }
}

/// Trial-division primality test skipping multiples of 2 and 3.
pub fn is_prime(n: u32) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u32;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// One stored forcing entry: a prime and its reflected, scaled 8-vector.
#[derive(Clone, Debug)]
pub struct ForcingEntry {
    pub prime: u32,
    pub vector: [f64; DIM],
}

/// Precomputed table of prime-derived 8-vectors. Built once, immutable
/// afterward; queried every frame at the current simulation time.
pub struct ForcingTable {
    entries: Vec<ForcingEntry>,
}

/// Deterministic unit direction in 8 dimensions, seeded by the prime.
/// Returns `None` if the draw has zero norm (contributes nothing by
/// contract).
fn unit_direction(p: u32) -> Option<[f64; DIM]> {
    let mut rng = Xor128::new(p);
    let mut v = [0.0; DIM];
    for c in v.iter_mut() {
        *c = rng.next_f64();
    }
    let norm = v.iter().map(|c| c * c).sum::<f64>().sqrt();
    if norm == 0.0 {
        return None;
    }
    for c in v.iter_mut() {
        *c /= norm;
    }
    Some(v)
}

/// Householder reflection through the hyperplane with unit normal e0:
/// v' = v - 2(v.n)n, which negates the first component.
fn reflect(mut v: [f64; DIM]) -> [f64; DIM] {
    v[0] = -v[0];
    v
}

impl ForcingTable {
    /// Build entries for every prime p <= bound with chi(p) != 0. Each
    /// vector is a seeded unit direction scaled by chi(p) * ln(p) / sqrt(2)
    /// and reflected through the e0 hyperplane.
    pub fn build(bound: u32) -> Self {
        let mut entries = Vec::new();
        for p in 2..=bound {
            let chi_p = chi(p);
            if chi_p == 0 || !is_prime(p) {
                continue;
            }
            let Some(dir) = unit_direction(p) else {
                continue;
            };
            let scale = chi_p as f64 * (p as f64).ln() / std::f64::consts::SQRT_2;
            let mut vector = dir;
            for c in vector.iter_mut() {
                *c *= scale;
            }
            entries.push(ForcingEntry { prime: p, vector: reflect(vector) });
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry vectors decayed by exp(-t * ln(p)) = p^-t. The
    /// decay rate grows with the prime, so the tail of the sum is carried
    /// by the smallest stored primes.
    pub fn sample(&self, t: f64) -> [f64; DIM] {
        let mut sum = [0.0; DIM];
        for entry in &self.entries {
            let decay = (-t * (entry.prime as f64).ln()).exp();
            for (s, c) in sum.iter_mut().zip(entry.vector.iter()) {
                *s += c * decay;
            }
        }
        sum
    }
}
