//! Rival selection for 1軸流し

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How rivals of an axis are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Deterministic ranking by summed score
    #[default]
    Ranked,
    /// Draw rivals with probability proportional to score
    Weighted { seed: u64 },
}

impl Sampling {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Sampling::Weighted { seed },
            None => Sampling::Ranked,
        }
    }
}

/// Draw up to `wanted` distinct items, weighted by `weights`.
///
/// Makes `wanted * 2` draws with replacement and keeps first occurrences,
/// so fewer than `wanted` items may come back. Non-positive or
/// non-finite weights fall back to a uniform draw.
pub fn weighted_distinct<T: Copy + PartialEq>(
    items: &[(T, f64)],
    wanted: usize,
    seed: u64,
) -> Vec<T> {
    if items.is_empty() || wanted == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total: f64 = items.iter().map(|(_, w)| w.max(0.0)).sum();
    let uniform = !(total.is_finite() && total > 0.0);

    let mut picked = Vec::with_capacity(wanted);
    for _ in 0..wanted * 2 {
        let idx = if uniform {
            rng.gen_range(0..items.len())
        } else {
            pick_index(items, total, &mut rng)
        };

        let item = items[idx].0;
        if !picked.contains(&item) {
            picked.push(item);
        }
        if picked.len() >= wanted {
            break;
        }
    }

    picked
}

fn pick_index<T>(items: &[(T, f64)], total: f64, rng: &mut impl Rng) -> usize {
    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;

    for (i, (_, w)) in items.iter().enumerate() {
        cumulative += w.max(0.0);
        if roll < cumulative {
            return i;
        }
    }

    // Rounding can leave roll == total
    items
        .iter()
        .rposition(|(_, w)| *w > 0.0)
        .unwrap_or(items.len() - 1)
}
