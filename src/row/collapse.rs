use crate::animation::{Animation, Clock};

/// Height collapse of a committed row.
#[derive(Debug)]
pub struct Collapse {
    anim: Animation,
    resting_height: f64,
}

impl Collapse {
    pub fn new(clock: Clock, resting_height: f64, config: swipe_row_config::Animation) -> Self {
        Self {
            anim: Animation::new(clock, resting_height, 0., 0., config),
            resting_height,
        }
    }

    /// Current row height; never grows and never leaves `[0, resting_height]`.
    pub fn height(&self) -> f64 {
        self.anim.clamped_value().clamp(0., self.resting_height)
    }

    /// Row opacity, fading out together with the height.
    pub fn opacity(&self) -> f64 {
        if self.resting_height <= 0. {
            return 0.;
        }
        self.height() / self.resting_height
    }

    pub fn is_done(&self) -> bool {
        self.anim.is_clamped_done()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn height_decreases_to_zero() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let collapse = Collapse::new(
            clock.clone(),
            56.,
            swipe_row_config::Animation::default_collapse(),
        );
        assert_eq!(collapse.height(), 56.);
        assert_eq!(collapse.opacity(), 1.);

        let mut last = collapse.height();
        for ms in (0..=300).step_by(10) {
            clock.set_unadjusted(Duration::from_millis(ms));
            let height = collapse.height();
            assert!(height <= last);
            last = height;
        }

        assert!(collapse.is_done());
        assert_eq!(collapse.height(), 0.);
        assert_eq!(collapse.opacity(), 0.);
    }

    #[test]
    fn zero_resting_height() {
        let clock = Clock::with_time(Duration::ZERO);
        let collapse = Collapse::new(clock, 0., swipe_row_config::Animation::default_collapse());
        assert_eq!(collapse.height(), 0.);
        assert_eq!(collapse.opacity(), 0.);
    }
}
