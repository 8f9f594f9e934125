use swipe_row_config::Config;

/// Resolved settings of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowOptions {
    pub width: f64,
    /// Resting height.
    pub height: f64,
    pub reveal_fraction: f64,
    pub rubber_band: f64,
    pub animations: RowAnimations,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowAnimations {
    pub settle: swipe_row_config::Animation,
    pub commit: swipe_row_config::Animation,
    pub collapse: swipe_row_config::Animation,
}

impl Default for RowOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RowOptions {
    pub fn from_config(config: &Config) -> Self {
        let row = &config.row;
        let animations = &config.animations;

        Self {
            width: row.width.0,
            height: row.height.0,
            reveal_fraction: row.reveal_fraction.0,
            rubber_band: row.rubber_band.0,
            animations: RowAnimations {
                settle: animations.settle(),
                commit: animations.commit(),
                collapse: animations.collapse(),
            },
        }
        .sanitized()
    }

    /// Creates options for the given row size with default fraction and animations.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
        .sanitized()
    }

    /// Distance at which the delete affordance is fully revealed.
    pub fn threshold(&self) -> f64 {
        self.width * self.reveal_fraction
    }

    fn sanitized(mut self) -> Self {
        // f64::max also maps NaN to zero.
        self.width = self.width.max(0.);
        self.height = self.height.max(0.);
        self.reveal_fraction = self.reveal_fraction.clamp(0., 1.);
        if self.reveal_fraction.is_nan() {
            self.reveal_fraction = 0.;
        }
        self.rubber_band = self.rubber_band.max(0.);
        self
    }
}
