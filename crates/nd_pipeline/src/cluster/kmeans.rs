//! Seeded k-means over dense feature rows.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_ITERATIONS: usize = 100;

/// Assign each row of `data` to one of `k` clusters.
///
/// Centroids start from `k` distinct rows drawn from a seeded RNG, so
/// identical data, `k` and seed always produce identical labels. The
/// caller must ensure `1 <= k <= data.nrows()`.
pub fn kmeans_labels(data: &Array2<f64>, k: usize, seed: u64) -> Vec<usize> {
    let n = data.nrows();
    debug_assert!(k >= 1 && k <= n);
    if n == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picks = rand::seq::index::sample(&mut rng, n, k).into_vec();
    let mut centroids = Array2::zeros((k, data.ncols()));
    for (c, &row_idx) in picks.iter().enumerate() {
        centroids.row_mut(c).assign(&data.row(row_idx));
    }

    let mut labels = vec![0usize; n];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for i in 0..n {
            let row = data.row(i);
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for c in 0..k {
                let dist = squared_distance(row, centroids.row(c));
                if dist < best_dist {
                    best_dist = dist;
                    best = c;
                }
            }
            if labels[i] != best {
                labels[i] = best;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        // Recompute centroids; empty clusters keep their previous one.
        let mut sums = Array2::<f64>::zeros((k, data.ncols()));
        let mut counts = vec![0usize; k];
        for i in 0..n {
            let mut sum_row = sums.row_mut(labels[i]);
            sum_row += &data.row(i);
            counts[labels[i]] += 1;
        }
        for c in 0..k {
            if counts[c] > 0 {
                let mean = &sums.row(c) / counts[c] as f64;
                centroids.row_mut(c).assign(&mean);
            }
        }
    }

    labels
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identical_seed_gives_identical_labels() {
        let data = array![
            [0.0, 0.1],
            [0.1, 0.0],
            [5.0, 5.1],
            [5.1, 5.0],
            [10.0, 0.0]
        ];
        assert_eq!(kmeans_labels(&data, 3, 42), kmeans_labels(&data, 3, 42));
    }

    #[test]
    fn every_label_is_in_range() {
        let data = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let labels = kmeans_labels(&data, 2, 42);
        assert_eq!(labels.len(), 4);
        assert!(labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn well_separated_groups_end_up_apart() {
        let data = array![
            [0.0, 0.0],
            [0.1, 0.1],
            [9.0, 9.0],
            [9.1, 9.1]
        ];
        let labels = kmeans_labels(&data, 2, 42);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn k_equal_to_n_is_a_valid_call() {
        let data = array![[0.0], [1.0], [2.0]];
        let labels = kmeans_labels(&data, 3, 42);
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }
}
