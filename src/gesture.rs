//! Drag tracking for a single swipe gesture.
//!
//! A [`GestureTracker`] exists only while a drag is in progress: it's created from the offset
//! the row had when the finger went down and consumed when the finger lifts. Raw translations
//! are cumulative since the start of the gesture; negative values point towards the delete
//! affordance.

use tracing::trace;

/// Per-gesture state that only lives between drag start and drag end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    /// Row offset when the drag began.
    pub start_offset: f64,
    /// Raw translation of the previous update.
    pub previous_translation: Option<f64>,
    /// Offset produced by the last damped update past the threshold.
    pub latched_delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureTracker {
    offset: f64,
    context: DragContext,
    threshold: f64,
    rubber_band: f64,
}

impl GestureTracker {
    /// Begins a drag at the given row offset.
    pub fn new(offset: f64, threshold: f64, rubber_band: f64) -> Self {
        let offset = offset.min(0.);
        Self {
            offset,
            context: DragContext {
                start_offset: offset,
                previous_translation: None,
                latched_delta: None,
            },
            threshold,
            rubber_band,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn context(&self) -> &DragContext {
        &self.context
    }

    /// Applies one raw translation and returns the new offset.
    ///
    /// Every update must be applied in order: the damped regime past the threshold continues
    /// from deltas against the previous translation.
    pub fn update(&mut self, translation: f64) -> f64 {
        let ctx = &mut self.context;

        // A zero previous translation counts as no previous translation.
        let towards_reveal = match ctx.previous_translation {
            Some(previous) if previous != 0. => previous >= translation,
            _ => true,
        };

        if self.offset >= 0. && !towards_reveal {
            // Already at rest and pulled further away from the affordance.
            self.offset = 0.;
            trace!("drag clamped at rest: translation={translation}");
            return self.offset;
        }

        let offset = if -self.offset > self.threshold && towards_reveal {
            let damped = (translation + ctx.start_offset) * self.rubber_band + self.offset;
            ctx.latched_delta = Some(damped);
            damped
        } else if let (Some(_), Some(previous)) = (ctx.latched_delta, ctx.previous_translation) {
            self.offset - (previous - translation)
        } else {
            translation + ctx.start_offset
        };

        self.offset = offset.min(0.);
        ctx.previous_translation = Some(translation);

        trace!(
            "drag update: translation={translation} offset={} latched={:?}",
            self.offset,
            ctx.latched_delta
        );
        self.offset
    }

    /// Ends the drag, returning the final offset.
    pub fn end(self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;

    use super::*;

    const THRESHOLD: f64 = 120.;
    const RUBBER_BAND: f64 = 0.005;

    fn tracker(offset: f64) -> GestureTracker {
        GestureTracker::new(offset, THRESHOLD, RUBBER_BAND)
    }

    #[test]
    fn tracks_one_to_one_below_threshold() {
        let mut t = tracker(0.);
        assert_eq!(t.update(-20.), -20.);
        assert_eq!(t.update(-60.), -60.);
        assert_eq!(t.update(-45.), -45.);
        assert_eq!(t.context().latched_delta, None);
        assert_eq!(t.end(), -45.);
    }

    #[test]
    fn continues_from_start_offset() {
        let mut t = tracker(-120.);
        assert_eq!(t.context().start_offset, -120.);
        assert_eq!(t.update(30.), -90.);
        assert_eq!(t.update(120.), 0.);
    }

    #[test]
    fn never_moves_past_rest() {
        let mut t = tracker(-10.);
        assert_eq!(t.update(5.), -5.);
        // Ordinary tracking would land at +40.
        assert_eq!(t.update(50.), 0.);
        assert_eq!(t.update(80.), 0.);
        assert_eq!(t.update(120.), 0.);
    }

    #[test]
    fn reversal_clamp_holds_until_direction_changes() {
        let mut t = tracker(0.);
        t.update(-30.);
        assert_eq!(t.update(10.), 0.);

        for translation in [20., 35., 60.] {
            assert_eq!(t.update(translation), 0.);
        }

        // Direction is judged against the last applied translation, so the row follows again
        // once the finger is back on the affordance side of where it started.
        assert_eq!(t.update(5.), 0.);
        assert_eq!(t.update(-15.), -15.);
    }

    #[test]
    fn rubber_band_past_threshold() {
        let mut t = tracker(0.);
        t.update(-100.);
        assert_eq!(t.update(-130.), -130.);

        let offset = t.update(-150.);
        assert_abs_diff_eq!(offset, -150. * RUBBER_BAND - 130., epsilon = 1e-9);
        assert_eq!(t.context().latched_delta, Some(offset));

        // Further motion is heavily damped compared to the raw translation.
        let next = t.update(-250.);
        assert!(next < offset);
        assert!(offset - next < 5.);
    }

    #[test]
    fn latched_regime_uses_deltas_when_pulling_back() {
        let mut t = tracker(0.);
        t.update(-130.);
        let damped = t.update(-150.);

        // Pulling back continues from the damped offset instead of jumping to raw + start.
        let offset = t.update(-140.);
        assert_abs_diff_eq!(offset, damped + 10., epsilon = 1e-9);
        let offset = t.update(-100.);
        assert_abs_diff_eq!(offset, damped + 50., epsilon = 1e-9);
    }

    #[test]
    fn zero_previous_translation_counts_as_none() {
        let mut t = tracker(-130.);
        let damped = t.update(0.);
        assert_abs_diff_eq!(damped, -130.65, epsilon = 1e-9);
        assert_eq!(t.context().previous_translation, Some(0.));

        // Still damped rather than treated as a pull back against a previous translation of 0.
        let offset = t.update(10.);
        assert_abs_diff_eq!(offset, -131.25, epsilon = 1e-9);
    }

    #[derive(Debug, Clone, Copy, Arbitrary)]
    enum Step {
        Move(#[proptest(strategy = "-40f64..40.")] f64),
        Jump(#[proptest(strategy = "-800f64..800.")] f64),
    }

    proptest! {
        #[test]
        fn offset_never_positive(
            start in -500f64..=0.,
            steps in prop::collection::vec(any::<Step>(), 1..100),
        ) {
            let mut t = tracker(start);
            let mut translation = 0.;
            for step in steps {
                translation = match step {
                    Step::Move(delta) => translation + delta,
                    Step::Jump(value) => value,
                };
                let offset = t.update(translation);
                prop_assert!(offset <= 0., "offset {offset} after translation {translation}");
                prop_assert_eq!(offset, t.offset());
            }
        }
    }
}
