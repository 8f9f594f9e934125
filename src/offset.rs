//! Row offset that can be static, animating, or controlled by a drag.

use tracing::debug;

use crate::animation::{Animation, Clock};
use crate::gesture::GestureTracker;
use crate::options::RowOptions;

/// The row offset in one of its three regimes.
#[derive(Debug)]
pub enum AnimatedOffset {
    /// The offset is static.
    Static(f64),
    /// The offset is animating toward a target.
    Animation(Animation),
    /// The offset is controlled by an ongoing drag.
    Gesture(GestureTracker),
}

impl AnimatedOffset {
    /// Returns the current value.
    pub fn current(&self) -> f64 {
        let value = match self {
            AnimatedOffset::Static(offset) => *offset,
            AnimatedOffset::Animation(anim) => anim.value(),
            AnimatedOffset::Gesture(tracker) => tracker.offset(),
        };
        value.min(0.)
    }

    /// Returns the value this offset is heading to.
    pub fn target(&self) -> f64 {
        match self {
            AnimatedOffset::Static(offset) => *offset,
            AnimatedOffset::Animation(anim) => anim.to(),
            AnimatedOffset::Gesture(tracker) => tracker.offset(),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Gesture(_))
    }

    pub fn is_animation_ongoing(&self) -> bool {
        matches!(self, Self::Animation(anim) if !anim.is_done())
    }
}

/// Where a released drag settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleTarget {
    /// Back to rest at offset zero.
    Rest,
    /// Held open at the reveal threshold.
    Revealed,
}

/// Owns the row offset and every animation that moves it.
#[derive(Debug)]
pub struct OffsetAnimator {
    value: AnimatedOffset,
    clock: Clock,
    width: f64,
    threshold: f64,
    rubber_band: f64,
    settle: swipe_row_config::Animation,
    commit: swipe_row_config::Animation,
}

impl OffsetAnimator {
    pub fn new(clock: Clock, options: &RowOptions) -> Self {
        Self {
            value: AnimatedOffset::Static(0.),
            clock,
            width: options.width,
            threshold: options.threshold(),
            rubber_band: options.rubber_band,
            settle: options.animations.settle,
            commit: options.animations.commit,
        }
    }

    pub fn current(&self) -> f64 {
        self.value.current()
    }

    pub fn target(&self) -> f64 {
        self.value.target()
    }

    pub fn value(&self) -> &AnimatedOffset {
        &self.value
    }

    /// Hands the offset to a new drag, stopping any animation at its current value.
    pub fn begin_gesture(&mut self) {
        let current = self.current();
        if self.value.is_animation_ongoing() {
            debug!("drag preempts offset animation at {current}");
        }
        self.value =
            AnimatedOffset::Gesture(GestureTracker::new(current, self.threshold, self.rubber_band));
    }

    /// Feeds a raw translation to the ongoing drag.
    ///
    /// Returns `None` if no drag is in progress.
    pub fn gesture_update(&mut self, translation: f64) -> Option<f64> {
        let AnimatedOffset::Gesture(tracker) = &mut self.value else {
            return None;
        };
        Some(tracker.update(translation))
    }

    /// Ends the drag and starts the settle animation.
    ///
    /// The decision looks at the final raw translation of the gesture: anything up to half the
    /// threshold snaps back to rest, anything further snaps to the revealed position.
    pub fn gesture_end(&mut self, translation: f64) -> Option<SettleTarget> {
        let AnimatedOffset::Gesture(tracker) = &self.value else {
            return None;
        };
        let current = tracker.offset();

        // Inclusive on purpose: a release at exactly half the threshold snaps back, unlike the
        // strict comparison this behavior was first written with.
        let (target, to) = if -translation <= self.threshold / 2. {
            (SettleTarget::Rest, 0.)
        } else {
            (SettleTarget::Revealed, -self.threshold)
        };

        debug!("drag ended at {current}, settling to {target:?} ({to})");
        self.value = AnimatedOffset::Animation(Animation::new(
            self.clock.clone(),
            current,
            to,
            0.,
            self.settle,
        ));
        Some(target)
    }

    /// Flings the row out by its full width.
    pub fn fling_out(&mut self) {
        let current = self.current();
        self.value = AnimatedOffset::Animation(Animation::new(
            self.clock.clone(),
            current,
            -self.width,
            0.,
            self.commit,
        ));
    }

    /// Returns `true` if an animation has arrived at its target.
    pub fn is_animation_done(&self) -> bool {
        matches!(&self.value, AnimatedOffset::Animation(anim) if anim.is_done())
    }

    /// Replaces a running animation with its target value.
    pub fn finish(&mut self) {
        if let AnimatedOffset::Animation(anim) = &self.value {
            self.value = AnimatedOffset::Static(anim.to().min(0.));
        }
    }
}
