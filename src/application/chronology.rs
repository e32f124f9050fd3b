// Chronological normalizer
use crate::domain::series::Sample;

/// Stable ascending sort on `x`. Idempotent; equal instants keep their relative order.
pub fn sort_by_instant(mut samples: Vec<Sample>) -> Vec<Sample> {
    if !is_chronological(&samples) {
        samples.sort_by_key(|s| s.x);
    }
    samples
}

pub fn is_chronological(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].x <= w[1].x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T1: i64 = 1_622_548_800_000;
    const T2: i64 = 1_622_552_400_000;

    #[test]
    fn test_reorders_out_of_sequence_samples() {
        let sorted = sort_by_instant(vec![Sample { x: T2, y: 0.7 }, Sample { x: T1, y: 0.2 }]);
        assert_eq!(sorted, vec![Sample { x: T1, y: 0.2 }, Sample { x: T2, y: 0.7 }]);
    }

    #[test]
    fn test_idempotent_and_stable() {
        let input = vec![
            Sample { x: T2, y: 1.0 },
            Sample { x: T1, y: 2.0 },
            Sample { x: T2, y: 3.0 },
            Sample { x: T1, y: 4.0 },
        ];

        let once = sort_by_instant(input);
        assert_eq!(
            once,
            vec![
                Sample { x: T1, y: 2.0 },
                Sample { x: T1, y: 4.0 },
                Sample { x: T2, y: 1.0 },
                Sample { x: T2, y: 3.0 },
            ]
        );
        assert_eq!(sort_by_instant(once.clone()), once);
    }

    #[test]
    fn test_is_chronological() {
        assert!(is_chronological(&[]));
        assert!(is_chronological(&[Sample { x: T1, y: 0.0 }, Sample { x: T1, y: 1.0 }]));
        assert!(!is_chronological(&[Sample { x: T2, y: 0.0 }, Sample { x: T1, y: 1.0 }]));
    }
}
