//! Adaptive grid spacing.
//!
//! The major grid step is chosen from the larger coordinate range of the
//! schema so that small schemas get unit lines and large ones stay readable.
//! Minor lines are drawn halfway between major ones once the major step is
//! at least 2.

use log::warn;

/// Above this many lines along one axis a warning is logged.
const MANY_LINES: usize = 1000;

/// Returns the major grid step for a coordinate range.
///
/// | Range | Step |
/// |-------|------|
/// | `<= 20` | 1 |
/// | `<= 50` | 5 |
/// | `<= 200` | 10 |
/// | otherwise | 20 |
///
/// ```
/// # use topoview::grid::step_for_range;
/// assert_eq!(step_for_range(15.0), 1.0);
/// assert_eq!(step_for_range(35.0), 5.0);
/// assert_eq!(step_for_range(150.0), 10.0);
/// assert_eq!(step_for_range(500.0), 20.0);
/// ```
pub fn step_for_range(range: f32) -> f32 {
    if range <= 20.0 {
        1.0
    } else if range <= 50.0 {
        5.0
    } else if range <= 200.0 {
        10.0
    } else {
        20.0
    }
}

/// Major and optional minor grid spacing, in schema units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    major_step: f32,
    minor_step: Option<f32>,
}

impl GridSpec {
    /// Grid for a schema whose larger coordinate range is `range`.
    pub fn for_range(range: f32) -> Self {
        let major_step = step_for_range(range);
        Self {
            major_step,
            minor_step: (major_step >= 2.0).then_some(major_step / 2.0),
        }
    }

    /// Grid for a schema with the given per-axis ranges.
    ///
    /// When either range is zero (a point or a straight line of nodes) the
    /// grid falls back to unit spacing without minor lines.
    pub fn for_ranges(x_range: f32, y_range: f32) -> Self {
        if x_range > 0.0 && y_range > 0.0 {
            Self::for_range(x_range.max(y_range))
        } else {
            Self::unit()
        }
    }

    /// Unit spacing without minor lines.
    pub fn unit() -> Self {
        Self {
            major_step: 1.0,
            minor_step: None,
        }
    }

    pub fn major_step(&self) -> f32 {
        self.major_step
    }

    pub fn minor_step(&self) -> Option<f32> {
        self.minor_step
    }

    /// Multiples of the major step within `[low, high]`.
    pub fn major_positions(&self, low: f32, high: f32) -> Vec<f32> {
        multiples(self.major_step, low, high, |_| true)
    }

    /// Multiples of the minor step within `[low, high]` that are not major positions.
    pub fn minor_positions(&self, low: f32, high: f32) -> Vec<f32> {
        match self.minor_step {
            Some(step) => multiples(step, low, high, |k| k % 2 != 0),
            None => Vec::new(),
        }
    }
}

fn multiples(step: f32, low: f32, high: f32, keep: impl Fn(i64) -> bool) -> Vec<f32> {
    if !(step > 0.0) || !low.is_finite() || !high.is_finite() || low > high {
        return Vec::new();
    }

    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    let count = usize::try_from(last - first + 1).unwrap_or(0);
    if count > MANY_LINES {
        warn!(step, count; "Grid produces a very large number of lines");
    }

    (first..=last)
        .filter(|&k| keep(k))
        .map(|k| k as f32 * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_thresholds_are_inclusive() {
        assert_eq!(step_for_range(0.5), 1.0);
        assert_eq!(step_for_range(20.0), 1.0);
        assert_eq!(step_for_range(20.5), 5.0);
        assert_eq!(step_for_range(50.0), 5.0);
        assert_eq!(step_for_range(200.0), 10.0);
        assert_eq!(step_for_range(200.1), 20.0);
    }

    #[test]
    fn test_minor_step_only_from_two() {
        assert_eq!(GridSpec::for_range(15.0).minor_step(), None);
        assert_eq!(GridSpec::for_range(35.0).minor_step(), Some(2.5));
        assert_eq!(GridSpec::for_range(150.0).minor_step(), Some(5.0));
        assert_eq!(GridSpec::for_range(500.0).minor_step(), Some(10.0));
    }

    #[test]
    fn test_for_ranges_uses_larger_range() {
        let grid = GridSpec::for_ranges(10.0, 120.0);
        assert_eq!(grid.major_step(), 10.0);
    }

    #[test]
    fn test_for_ranges_degenerate_falls_back_to_unit() {
        assert_eq!(GridSpec::for_ranges(0.0, 500.0), GridSpec::unit());
        assert_eq!(GridSpec::for_ranges(300.0, 0.0), GridSpec::unit());
        assert_eq!(GridSpec::for_ranges(0.0, 0.0).minor_step(), None);
    }

    #[test]
    fn test_major_positions() {
        let grid = GridSpec::for_range(35.0);
        assert_eq!(
            grid.major_positions(-6.0, 12.0),
            vec![-5.0, 0.0, 5.0, 10.0]
        );
    }

    #[test]
    fn test_minor_positions_skip_major() {
        let grid = GridSpec::for_range(35.0);
        assert_eq!(grid.minor_positions(-6.0, 12.0), vec![-2.5, 2.5, 7.5]);
        assert!(GridSpec::unit().minor_positions(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_positions_empty_range() {
        let grid = GridSpec::unit();
        assert!(grid.major_positions(0.2, 0.8).is_empty());
        assert!(grid.major_positions(5.0, 1.0).is_empty());
    }
}
