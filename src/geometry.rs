//! Radial gauge geometry.
//!
//! [`compute_arc`] maps a gauge's value, range and sweep configuration to an
//! [`ArcSpec`]: the track arcs (full sweep), the fill arcs (filled part of the
//! sweep) and the label to center on the ring. It is a pure function and
//! the only place gauge angles are computed.
//!
//! # Angle Convention
//!
//! Degrees, 0° at 3 o'clock, increasing clockwise on screen. See
//! [`widgets::RadialGauge`](crate::widgets::RadialGauge).
//!
//! # Clamping
//!
//! Values outside `[min, max]` are clamped, never rejected. A NaN value, a
//! NaN bound or an empty range (`min == max`) all map to a fraction of 0.
//!
//! # Separators
//!
//! With a [`Separator`] of `n` segments and a gap of `g` degrees, the sweep is
//! cut into `n` equal sub-arcs with `g` degrees between each pair. The first
//! sub-arc starts exactly at the sweep start and the last ends exactly at the
//! sweep end. Fill arcs are the intersection of the filled range with each
//! sub-arc, so the gaps stay visible at any fill level.

use crate::widgets::{Direction, GaugeLabel, RadialGauge, Separator};

/// One contiguous arc, `start < end`, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub start: f32,
    pub end: f32,
}

impl ArcSegment {
    #[inline]
    pub const fn new(
        start: f32,
        end: f32,
    ) -> Self {
        Self { start, end }
    }

    /// Angular length in degrees.
    #[inline]
    pub fn sweep(&self) -> f32 { self.end - self.start }

    /// Overlap with another segment, if it has positive length.
    #[inline]
    fn intersect(
        &self,
        other: &ArcSegment,
    ) -> Option<ArcSegment> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(ArcSegment { start, end })
    }
}

/// Renderable description of one gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSpec {
    /// Clamped position of the value within the range, in `[0, 1]`.
    pub fraction: f32,
    /// Full sweep, split at separators. Drawn in the track color.
    pub track: Vec<ArcSegment>,
    /// Filled part of the sweep, split the same way. Drawn in the bar color.
    pub fill: Vec<ArcSegment>,
    pub label: Option<GaugeLabel>,
}

/// Map a gauge to its arcs.
pub fn compute_arc(gauge: &RadialGauge) -> ArcSpec {
    let fraction = fraction(gauge.value, gauge.min, gauge.max);
    let lo = gauge.angle_start.min(gauge.angle_end);
    let hi = gauge.angle_start.max(gauge.angle_end);

    let mut spec = ArcSpec {
        fraction,
        track: Vec::new(),
        fill: Vec::new(),
        label: gauge.label.clone(),
    };
    if !(lo.is_finite() && hi.is_finite()) {
        return spec;
    }

    spec.track = split_sweep(lo, hi, gauge.separator);

    let filled = filled_range(gauge.angle_start, gauge.angle_end, fraction, gauge.direction);
    spec.fill = spec.track.iter().filter_map(|segment| segment.intersect(&filled)).collect();
    spec
}

/// Clamped fraction of `value` within `[min, max]`.
///
/// Inverted ranges (`min > max`) are allowed and map `min` to 0.
pub fn fraction(
    value: f32,
    min: f32,
    max: f32,
) -> f32 {
    let lo = min.min(max);
    let hi = min.max(max);
    // Also rejects NaN bounds: comparisons with NaN are false
    if !(hi > lo) || value.is_nan() {
        return 0.0;
    }
    let clamped = value.clamp(lo, hi);
    ((clamped - min) / (max - min)).clamp(0.0, 1.0)
}

/// The angular range covered by the fill, as an ascending segment.
fn filled_range(
    angle_start: f32,
    angle_end: f32,
    fraction: f32,
    direction: Direction,
) -> ArcSegment {
    let span = angle_end - angle_start;
    let (origin, head) = match direction {
        Direction::Clockwise => (angle_start, angle_start + fraction * span),
        Direction::CounterClockwise => (angle_end, angle_end - fraction * span),
    };
    ArcSegment::new(origin.min(head), origin.max(head))
}

/// Split `[lo, hi]` into the sub-arcs left between separator gaps.
fn split_sweep(
    lo: f32,
    hi: f32,
    separator: Option<Separator>,
) -> Vec<ArcSegment> {
    let span = hi - lo;
    let Some(Separator { gap, segments }) = separator.filter(|s| s.segments >= 2 && s.gap > 0.0) else {
        return if span > 0.0 { vec![ArcSegment::new(lo, hi)] } else { Vec::new() };
    };

    let gaps = f32::from(segments - 1);
    let gap = gap.min(span / gaps);
    let width = (span - gap * gaps) / f32::from(segments);

    (0..segments)
        .map(|k| {
            let start = if k == 0 { lo } else { lo + f32::from(k) * (width + gap) };
            let end = if k == segments - 1 { hi } else { start + width };
            ArcSegment::new(start, end)
        })
        .filter(|segment| segment.sweep() > 0.0)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::Point;

    use super::*;

    fn gauge(value: f32) -> RadialGauge {
        let mut gauge = RadialGauge::new(Point::new(155, 105), 40, 4);
        gauge.value = value;
        gauge
    }

    // -------------------------------------------------------------------------
    // Fraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_value_below_min_clamps_to_zero() {
        assert_eq!(compute_arc(&gauge(-10.0)).fraction, 0.0, "Below-range value should clamp to 0");
    }

    #[test]
    fn test_value_above_max_clamps_to_one() {
        assert_eq!(compute_arc(&gauge(150.0)).fraction, 1.0, "Above-range value should clamp to 1");
    }

    #[test]
    fn test_degenerate_range_is_zero() {
        let g = gauge(50.0).with_range(20.0, 20.0);
        let spec = compute_arc(&g);
        assert_eq!(spec.fraction, 0.0, "min == max should yield 0 without dividing by zero");
        assert!(spec.fill.is_empty(), "Nothing is filled at fraction 0");
    }

    #[test]
    fn test_nan_value_is_zero() {
        assert_eq!(compute_arc(&gauge(f32::NAN)).fraction, 0.0, "NaN should render as empty");
    }

    #[test]
    fn test_nan_bound_is_zero() {
        assert_eq!(fraction(50.0, f32::NAN, 100.0), 0.0, "NaN bound should not panic in clamp");
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(fraction(25.0, 100.0, 0.0), 0.75, "Inverted range maps min to 0");
        assert_eq!(fraction(150.0, 100.0, 0.0), 0.0, "Inverted range still clamps");
    }

    // -------------------------------------------------------------------------
    // Sweep
    // -------------------------------------------------------------------------

    #[test]
    fn test_half_fill_clockwise() {
        let spec = compute_arc(&gauge(50.0));
        assert_eq!(spec.fraction, 0.5);
        assert_eq!(spec.fill, vec![ArcSegment::new(135.0, 270.0)], "Half of 135..405 ends at 270");
        assert_eq!(spec.track, vec![ArcSegment::new(135.0, 405.0)], "Track covers the full sweep");
    }

    #[test]
    fn test_quarter_fill_counterclockwise() {
        let g = gauge(25.0).with_sweep(135.0, 405.0, Direction::CounterClockwise);
        let spec = compute_arc(&g);
        assert_eq!(spec.fill, vec![ArcSegment::new(337.5, 405.0)], "CCW fill grows back from the end");
    }

    #[test]
    fn test_full_fill_covers_track() {
        let spec = compute_arc(&gauge(100.0));
        assert_eq!(spec.fill, spec.track, "100% fill should equal the track");
    }

    #[test]
    fn test_reversed_angles_normalized() {
        let g = gauge(50.0).with_sweep(405.0, 135.0, Direction::Clockwise);
        let spec = compute_arc(&g);
        assert_eq!(spec.track, vec![ArcSegment::new(135.0, 405.0)], "Segments are always ascending");
        assert_eq!(spec.fill, vec![ArcSegment::new(270.0, 405.0)], "Fill grows from angle_start");
    }

    #[test]
    fn test_non_finite_angles_draw_nothing() {
        let g = gauge(50.0).with_sweep(0.0, f32::INFINITY, Direction::Clockwise);
        let spec = compute_arc(&g);
        assert!(spec.track.is_empty() && spec.fill.is_empty(), "Infinite sweep must not produce arcs");
    }

    #[test]
    fn test_deterministic() {
        let g = gauge(63.0).with_separator(Separator::midpoint(8.0));
        assert_eq!(compute_arc(&g), compute_arc(&g), "Same input should give the same spec");
    }

    // -------------------------------------------------------------------------
    // Separators
    // -------------------------------------------------------------------------

    #[test]
    fn test_midpoint_separator_splits_track() {
        let g = gauge(0.0).with_separator(Separator::midpoint(10.0));
        let spec = compute_arc(&g);
        assert_eq!(spec.track.len(), 2, "Separator should yield two sub-arcs");
        let (a, b) = (spec.track[0], spec.track[1]);
        assert_eq!(a.start, 135.0, "First sub-arc starts at the sweep start");
        assert_eq!(b.end, 405.0, "Last sub-arc ends at the sweep end");
        assert!(a.end < b.start, "Sub-arcs must be disjoint");
        assert_eq!(a.sweep() + b.sweep(), 260.0, "Covered span is the sweep minus the gap");
        assert_eq!((a.end + b.start) / 2.0, 270.0, "Gap is centered at the midpoint");
    }

    #[test]
    fn test_separator_visible_at_full_fill() {
        let g = gauge(100.0).with_separator(Separator::midpoint(10.0));
        let spec = compute_arc(&g);
        assert_eq!(spec.fill.len(), 2, "Full fill keeps the break");
        assert_eq!(spec.fill, spec.track);
    }

    #[test]
    fn test_separator_partial_fill_stops_before_gap() {
        let g = gauge(50.0).with_separator(Separator::midpoint(10.0));
        let spec = compute_arc(&g);
        assert_eq!(spec.fill, vec![ArcSegment::new(135.0, 265.0)], "Fill is clipped at the gap");
    }

    #[test]
    fn test_stepped_segments() {
        let g = gauge(0.0).with_separator(Separator { gap: 15.0, segments: 3 });
        let spec = compute_arc(&g);
        assert_eq!(
            spec.track,
            vec![
                ArcSegment::new(135.0, 215.0),
                ArcSegment::new(230.0, 310.0),
                ArcSegment::new(325.0, 405.0),
            ]
        );
    }

    #[test]
    fn test_oversized_gap_clamped() {
        let g = gauge(100.0).with_separator(Separator::midpoint(1000.0));
        let spec = compute_arc(&g);
        assert!(spec.track.is_empty(), "A gap wider than the sweep leaves nothing to draw");
    }

    #[test]
    fn test_single_segment_separator_ignored() {
        let g = gauge(50.0).with_separator(Separator { gap: 10.0, segments: 1 });
        assert_eq!(compute_arc(&g).track.len(), 1, "One segment means no gap");
    }

    #[test]
    fn test_label_carried_through() {
        let style = crate::widgets::LabelStyle::new(
            std::sync::Arc::from(std::path::Path::new("font.ttf")),
            20,
            crate::colors::WHITE,
        );
        let g = gauge(42.0).with_label(style, "42%");
        assert_eq!(compute_arc(&g).label.map(|l| l.text.to_string()), Some("42%".to_string()));
    }
}
