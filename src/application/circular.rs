// Circular-quantity corrector for angular readings such as compass bearings
//
// This is a threshold heuristic, not continuity tracking. It assumes readings cluster well below
// or well above the wraparound point with a clear gap at `split_threshold`. Readings that sit
// near the threshold itself will still be split across two bands.
use crate::domain::series::{AxisConfig, AxisTick, Sample};

pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const DEFAULT_STEP_DEGREES: f64 = 30.0;

/// Shift every sample with `y < split_threshold` up by one `period`.
///
/// Reapplying with the same threshold is a no-op as long as inputs lie in `[0, period)` and
/// `split_threshold <= period`.
pub fn unwrap_circular(samples: Vec<Sample>, period: f64, split_threshold: f64) -> Vec<Sample> {
    samples
        .into_iter()
        .map(|s| {
            if s.y < split_threshold {
                Sample { x: s.x, y: s.y + period }
            } else {
                s
            }
        })
        .collect()
}

/// Map a displayed tick value back into the native `[0, period)` range.
pub fn wrap_tick(tick: f64, period: f64) -> f64 {
    tick.rem_euclid(period)
}

/// Upper bound on ticks per axis; wider ranges get a coarser step.
pub const MAX_AXIS_TICKS: usize = 48;

/// Tick positions covering `[lo, hi]`, labelled in native units.
///
/// Ticks fall every `step_size`, or every whole multiple of it when the range would otherwise
/// need more than `MAX_AXIS_TICKS` ticks (an outlier reading can stretch the range arbitrarily).
pub fn axis_ticks(lo: f64, hi: f64, axis: &AxisConfig) -> Vec<AxisTick> {
    if !(lo.is_finite() && hi.is_finite()) || axis.step_size <= 0.0 || lo > hi {
        return Vec::new();
    }

    let span = (hi / axis.step_size).ceil() - (lo / axis.step_size).floor();
    // Two intervals of slack for the floor/ceil at either end
    let stride = (span / (MAX_AXIS_TICKS - 2) as f64).ceil().max(1.0);
    let step = axis.step_size * stride;

    let first = (lo / step).floor() as i64;
    let last = (hi / step).ceil() as i64;

    (first..=last)
        .take(MAX_AXIS_TICKS + 1)
        .map(|i| {
            let value = i as f64 * step;
            AxisTick {
                value,
                label: wrap_tick(value, axis.period),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::record_parser::parse_csv_records;
    use crate::application::series_extractor::extract_series;

    fn samples(ys: &[f64]) -> Vec<Sample> {
        ys.iter().enumerate().map(|(i, y)| Sample { x: i as i64, y: *y }).collect()
    }

    fn ys(samples: &[Sample]) -> Vec<f64> {
        samples.iter().map(|s| s.y).collect()
    }

    #[test]
    fn test_low_band_moves_above_wraparound() {
        let corrected = unwrap_circular(samples(&[359.0, 1.0, 99.9, 100.0, 270.0]), 360.0, 100.0);
        assert_eq!(ys(&corrected), vec![359.0, 361.0, 459.9, 100.0, 270.0]);
        assert_eq!(corrected[1].x, 1);
    }

    #[test]
    fn test_reapplication_is_a_no_op() {
        let once = unwrap_circular(samples(&[5.0, 180.0, 350.0, 0.0]), 360.0, 100.0);
        let twice = unwrap_circular(once.clone(), 360.0, 100.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_csv_wind_bearing_round_trip() {
        let raw = "datetime,wind_from_direction_at_10m_above_ground_level\n2021-01-01T00:00:00Z,5\n";
        let records = parse_csv_records(raw).unwrap();
        let series = extract_series(&records, "wind_from_direction_at_10m_above_ground_level", "Wind");
        let corrected = unwrap_circular(series.points, FULL_TURN_DEGREES, 100.0);

        assert_eq!(corrected, vec![Sample { x: 1_609_459_200_000, y: 365.0 }]);
    }

    #[test]
    fn test_wrap_tick() {
        assert_eq!(wrap_tick(390.0, 360.0), 30.0);
        assert_eq!(wrap_tick(360.0, 360.0), 0.0);
        assert_eq!(wrap_tick(270.0, 360.0), 270.0);
        assert_eq!(wrap_tick(-30.0, 360.0), 330.0);
    }

    #[test]
    fn test_axis_ticks_read_as_bearings() {
        let axis = AxisConfig {
            period: 360.0,
            step_size: 30.0,
        };
        let ticks = axis_ticks(290.0, 365.0, &axis);

        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        let labels: Vec<f64> = ticks.iter().map(|t| t.label).collect();
        assert_eq!(values, vec![270.0, 300.0, 330.0, 360.0, 390.0]);
        assert_eq!(labels, vec![270.0, 300.0, 330.0, 0.0, 30.0]);
    }

    #[test]
    fn test_axis_ticks_bounded_for_outlier_reading() {
        let axis = AxisConfig {
            period: 360.0,
            step_size: 30.0,
        };

        assert!(axis_ticks(350.0, 1e300, &axis).len() <= MAX_AXIS_TICKS + 1);

        for hi in [3e8, 3e10] {
            let ticks = axis_ticks(350.0, hi, &axis);
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= MAX_AXIS_TICKS + 1);
            assert!(ticks[0].value <= 350.0);
            assert!(ticks[ticks.len() - 1].value >= hi);
            for tick in &ticks {
                assert!(tick.label >= 0.0 && tick.label < 360.0);
                assert_eq!((tick.value / 30.0).fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_axis_ticks_degenerate_range() {
        let axis = AxisConfig {
            period: 360.0,
            step_size: 30.0,
        };
        assert!(axis_ticks(10.0, 5.0, &axis).is_empty());
        assert!(axis_ticks(f64::NAN, 5.0, &axis).is_empty());
    }
}
