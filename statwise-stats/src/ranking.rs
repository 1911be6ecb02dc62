//! Average ranks with tie grouping, shared by the rank-based procedures.

use serde::{Deserialize, Serialize};

/// 1-based ranks in input order, plus the tie term Σ(c³ − c)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankVector {
    /// Rank of each input value; tied values share the mean of their positions
    pub ranks: Vec<f64>,
    /// Σ(c³ − c) over groups of c tied values
    pub tie_correction: f64,
}

/// Rank `values`, giving each run of equal values the mean of its positions.
pub fn rank(values: &[f64]) -> RankVector {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut tie_correction = 0.0;

    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }

        // Positions i..=j (0-based) share rank (i + j + 2) / 2
        let shared = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = shared;
        }

        let c = (j - i + 1) as f64;
        tie_correction += c * c * c - c;
        i = j + 1;
    }

    RankVector {
        ranks,
        tie_correction,
    }
}
