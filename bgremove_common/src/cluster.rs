//! Greedy single-pass color clustering.

use crate::color::Color;

/// Threshold used when summarizing checker samples.
pub const CHECKER_CLUSTER_THRESHOLD: u32 = 15;

/// Groups `samples` into representatives.
///
/// The first sample always founds a cluster. Each later sample is absorbed by
/// the first representative closer than `threshold` (L1), otherwise it
/// founds a new cluster. Representatives are never averaged, so the result
/// depends on sample order.
pub fn cluster(samples: &[Color], threshold: u32) -> Vec<Color> {
    let mut clusters: Vec<Color> = Vec::new();
    for &sample in samples {
        if !clusters.iter().any(|c| c.distance(sample) < threshold) {
            clusters.push(sample);
        }
    }
    clusters
}

/// First color in `candidates` within `max_distance` of `color`.
pub(crate) fn nearest_within(color: Color, candidates: &[Color], max_distance: f32) -> Option<Color> {
    candidates
        .iter()
        .copied()
        .find(|c| c.distance(color) as f32 <= max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single() {
        assert!(cluster(&[], 15).is_empty());
        let c = Color::new(3, 4, 5);
        assert_eq!(cluster(&[c], 15), vec![c]);
    }

    #[test]
    fn first_seen_wins() {
        let a = Color::new(100, 100, 100);
        let b = Color::new(105, 105, 100);
        let far = Color::new(200, 200, 200);
        assert_eq!(cluster(&[a, b, far], 15), vec![a, far]);
        assert_eq!(cluster(&[b, a, far], 15), vec![b, far]);
    }

    #[test]
    fn threshold_is_strict() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(15, 0, 0);
        assert_eq!(cluster(&[a, b], 15).len(), 2);
        assert_eq!(cluster(&[a, b], 16).len(), 1);
    }

    #[test]
    fn nearest_within_is_inclusive() {
        let list = [Color::new(0, 0, 0), Color::new(50, 0, 0)];
        assert_eq!(nearest_within(Color::new(45, 0, 0), &list, 5.0), Some(list[1]));
        assert_eq!(nearest_within(Color::new(30, 0, 0), &list, 5.0), None);
    }
}
