//! Visual parameters of a row as pure functions of its offset.
//!
//! Every function here takes the signed row offset (zero at rest, negative when dragged towards
//! the delete affordance) and maps the drag distance `-offset` through a clamped piecewise-linear
//! curve whose breakpoints are fractions of the reveal threshold.

use serde::Serialize;

/// Interpolates `x` over ordered `(input, output)` breakpoints.
///
/// Inputs before the first breakpoint take its output and inputs after the last one take the
/// last output; nothing is ever extrapolated. Coinciding breakpoints form a step rather than a
/// division by zero.
pub fn interpolate(x: f64, stops: &[(f64, f64)]) -> f64 {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (stops.first(), stops.last()) else {
        return 0.;
    };

    if x.is_nan() || x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }

    for pair in stops.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x > x1 {
            continue;
        }

        let span = x1 - x0;
        if span <= 0. {
            return y1;
        }

        return y0 + (y1 - y0) * (x - x0) / span;
    }

    last_y
}

/// Geometry of one row, parameterized by its reveal threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    threshold: f64,
}

/// All offset-derived visual parameters of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OffsetVisuals {
    /// Horizontal translation of the row content.
    pub translate_x: f64,
    /// Diameter of the reveal circle behind the row.
    pub reveal_size: f64,
    pub reveal_scale: f64,
    /// Width of the container holding the icon and the labels.
    pub label_window_width: f64,
    pub icon_opacity: f64,
    pub icon_scale: f64,
    /// Opacity of the "remove item" label.
    pub primary_label_opacity: f64,
    /// Opacity of the "removing" label, shown past the point of no return.
    pub secondary_label_opacity: f64,
}

impl RowGeometry {
    pub fn new(threshold: f64) -> Self {
        // f64::max also maps NaN to zero.
        Self {
            threshold: threshold.max(0.),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn reveal_size(&self, offset: f64) -> f64 {
        distance(offset)
    }

    pub fn reveal_scale(&self, offset: f64) -> f64 {
        let t = self.threshold;
        interpolate(distance(offset), &[(0., 1.), (t * 0.6, 0.8), (t, 1.2)])
    }

    pub fn label_window_width(&self, offset: f64) -> f64 {
        distance(offset)
    }

    pub fn icon_opacity(&self, offset: f64) -> f64 {
        let t = self.threshold;
        interpolate(
            distance(offset),
            &[(0., 0.), (t * 0.4, 0.4), (t * 0.6, 0.7), (t, 0.)],
        )
    }

    pub fn icon_scale(&self, offset: f64) -> f64 {
        let t = self.threshold;
        interpolate(distance(offset), &[(0., 0.), (t * 0.4, 0.5), (t * 0.7, 1.3)])
    }

    pub fn primary_label_opacity(&self, offset: f64) -> f64 {
        let t = self.threshold;
        interpolate(
            distance(offset),
            &[(0., 0.), (t * 0.8, 0.), (t, 1.), (t * 1.5, 1.), (t * 2., 0.)],
        )
    }

    pub fn secondary_label_opacity(&self, offset: f64) -> f64 {
        let t = self.threshold;
        interpolate(distance(offset), &[(t * 1.5, 0.), (t * 2., 1.)])
    }

    pub fn visuals(&self, offset: f64) -> OffsetVisuals {
        OffsetVisuals {
            translate_x: offset.min(0.),
            reveal_size: self.reveal_size(offset),
            reveal_scale: self.reveal_scale(offset),
            label_window_width: self.label_window_width(offset),
            icon_opacity: self.icon_opacity(offset),
            icon_scale: self.icon_scale(offset),
            primary_label_opacity: self.primary_label_opacity(offset),
            secondary_label_opacity: self.secondary_label_opacity(offset),
        }
    }
}

/// Drag distance; offsets past rest count as no drag at all.
fn distance(offset: f64) -> f64 {
    (-offset).max(0.)
}
