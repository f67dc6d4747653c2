//! Axis tick rescaling policy.
//!
//! Channel statistics span from double-digit upload counts to hundreds of
//! billions of views. When the maximum axis value crosses the 1e6 / 1e7
//! thresholds, tick labels are divided down and the axis name gains a unit
//! suffix. This is purely a display policy: the underlying series values
//! are never altered.

/// How tick labels on one axis are rescaled for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub divisor: f64,
    pub suffix: &'static str,
}

impl AxisScale {
    const NONE: AxisScale = AxisScale { divisor: 1.0, suffix: "" };

    /// Pick a scale from the maximum value the axis must show.
    pub fn for_max(max_value: f64) -> AxisScale {
        if !max_value.is_finite() || max_value <= 1e6 {
            return AxisScale::NONE;
        }
        if max_value > 1e7 {
            AxisScale { divisor: 1e6, suffix: " (million)" }
        } else {
            AxisScale { divisor: 1e5, suffix: " (hundred thousand)" }
        }
    }

    /// Axis name with the unit suffix applied.
    pub fn axis_label(&self, base: &str) -> String {
        format!("{base}{}", self.suffix)
    }

    /// Format one tick label. Only the label is divided; callers keep the
    /// raw value.
    pub fn format(&self, value: f64) -> String {
        let v = value / self.divisor;
        if self.divisor > 1.0 || v.abs() >= 10.0 {
            format!("{v:.0}")
        } else {
            format!("{v:.1}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_the_display_policy() {
        assert_eq!(AxisScale::for_max(500.0), AxisScale::NONE);
        assert_eq!(AxisScale::for_max(1e6), AxisScale::NONE);

        let hundred_k = AxisScale::for_max(5e6);
        assert_eq!(hundred_k.divisor, 1e5);
        assert_eq!(hundred_k.suffix, " (hundred thousand)");

        let million = AxisScale::for_max(2e7);
        assert_eq!(million.divisor, 1e6);
        assert_eq!(million.suffix, " (million)");
    }

    #[test]
    fn labels_scale_but_values_do_not() {
        let scale = AxisScale::for_max(2e7);
        assert_eq!(scale.format(3_000_000.0), "3");
        assert_eq!(scale.axis_label("subscribers"), "subscribers (million)");
    }

    #[test]
    fn unscaled_axis_formats_plainly() {
        let scale = AxisScale::for_max(100.0);
        assert_eq!(scale.format(42.0), "42");
        assert_eq!(scale.format(2.5), "2.5");
        assert_eq!(scale.axis_label("uploads"), "uploads");
    }
}
