use std::time::Duration;

use keyframe::functions::{EaseInOutQuad, EaseInQuad, EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod clock;
mod spring;

pub use clock::Clock;
pub use spring::{Spring, SpringParams};

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    initial_velocity: f64,
    is_off: bool,
    duration: Duration,
    /// Time until the animation first reaches `to`.
    clamped_duration: Duration,
    start_time: Duration,
    clock: Clock,
    kind: Kind,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Easing { curve: Curve },
    Spring(Spring),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(
        clock: Clock,
        from: f64,
        to: f64,
        initial_velocity: f64,
        config: swipe_row_config::Animation,
    ) -> Self {
        let mut rv = Self::ease(clock, from, to, initial_velocity, 0, Curve::EaseOutCubic);
        if config.off {
            rv.is_off = true;
            return rv;
        }

        rv.replace_config(config);
        rv
    }

    fn replace_config(&mut self, config: swipe_row_config::Animation) {
        self.is_off = config.off;
        if config.off {
            self.duration = Duration::ZERO;
            self.clamped_duration = Duration::ZERO;
            return;
        }

        let start_time = self.start_time;

        match config.kind {
            swipe_row_config::Kind::Spring(p) => {
                let params = SpringParams::new(p.damping_ratio, f64::from(p.stiffness), p.epsilon);

                let spring = Spring {
                    from: self.from,
                    to: self.to,
                    initial_velocity: self.initial_velocity,
                    params,
                };
                *self = Self::spring(self.clock.clone(), spring);
            }
            swipe_row_config::Kind::Easing(p) => {
                *self = Self::ease(
                    self.clock.clone(),
                    self.from,
                    self.to,
                    self.initial_velocity,
                    u64::from(p.duration_ms),
                    Curve::from(p.curve),
                );
            }
        }

        self.start_time = start_time;
    }

    pub fn ease(
        clock: Clock,
        from: f64,
        to: f64,
        initial_velocity: f64,
        duration_ms: u64,
        curve: Curve,
    ) -> Self {
        let duration = Duration::from_millis(duration_ms);
        let kind = Kind::Easing { curve };

        Self {
            from,
            to,
            initial_velocity,
            is_off: false,
            duration,
            // Our current curves never overshoot.
            clamped_duration: duration,
            start_time: clock.now(),
            clock,
            kind,
        }
    }

    pub fn spring(clock: Clock, spring: Spring) -> Self {
        let duration = spring.duration();
        let clamped_duration = spring.clamped_duration().unwrap_or(duration);
        let kind = Kind::Spring(spring);

        Self {
            from: spring.from,
            to: spring.to,
            initial_velocity: spring.initial_velocity,
            is_off: false,
            duration,
            clamped_duration,
            start_time: clock.now(),
            clock,
            kind,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time.saturating_add(self.duration)
    }

    pub fn is_clamped_done(&self) -> bool {
        if self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time.saturating_add(self.clamped_duration)
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);

        match self.kind {
            Kind::Easing { curve } => {
                let passed = passed.as_secs_f64();
                let total = self.duration.as_secs_f64();
                let x = (passed / total).clamp(0., 1.);
                curve.y(x) * (self.to - self.from) + self.from
            }
            Kind::Spring(spring) => {
                let value = spring.value_at(passed);

                // Protect against numerical instability.
                let range = (self.to - self.from) * 10.;
                let a = self.from - range;
                let b = self.to + range;
                if self.from <= self.to {
                    value.clamp(a, b)
                } else {
                    value.clamp(b, a)
                }
            }
        }
    }

    /// Returns a value that stops at the target value after first reaching it.
    ///
    /// Best effort; not always exactly precise.
    pub fn clamped_value(&self) -> f64 {
        if self.is_clamped_done() {
            return self.to;
        }

        self.value()
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn is_off(&self) -> bool {
        self.is_off
    }

    pub fn end_time(&self) -> Duration {
        self.start_time.saturating_add(self.duration)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseInQuad => EaseInQuad.y(x),
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseInOutQuad => EaseInOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<swipe_row_config::Curve> for Curve {
    fn from(value: swipe_row_config::Curve) -> Self {
        match value {
            swipe_row_config::Curve::Linear => Curve::Linear,
            swipe_row_config::Curve::EaseInQuad => Curve::EaseInQuad,
            swipe_row_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            swipe_row_config::Curve::EaseInOutQuad => Curve::EaseInOutQuad,
            swipe_row_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            swipe_row_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use swipe_row_config::{EasingParams, Kind as ConfigKind};

    use super::*;

    fn easing(duration_ms: u32, curve: swipe_row_config::Curve) -> swipe_row_config::Animation {
        swipe_row_config::Animation {
            off: false,
            kind: ConfigKind::Easing(EasingParams { duration_ms, curve }),
        }
    }

    #[test]
    fn easing_reaches_target() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let config = easing(300, swipe_row_config::Curve::EaseInOutQuad);
        let anim = Animation::new(clock.clone(), -150., -120., 0., config);

        assert_eq!(anim.value(), -150.);
        assert!(!anim.is_done());

        clock.set_unadjusted(Duration::from_millis(150));
        assert_abs_diff_eq!(anim.value(), -135., epsilon = 1e-9);

        clock.set_unadjusted(Duration::from_millis(300));
        assert!(anim.is_done());
        assert_eq!(anim.value(), -120.);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        for x in [0.1, 0.25, 0.4] {
            let a = Curve::EaseInOutQuad.y(x);
            let b = Curve::EaseInOutQuad.y(1. - x);
            assert_abs_diff_eq!(a + b, 1., epsilon = 1e-9);
        }
        assert_eq!(Curve::EaseInOutQuad.y(0.), 0.);
        assert_eq!(Curve::EaseInOutQuad.y(1.), 1.);
    }

    #[test]
    fn off_completes_immediately() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut config = swipe_row_config::Animation::default_settle();
        config.off = true;
        let anim = Animation::new(clock, 0., -120., 0., config);
        assert!(anim.is_off());
        assert!(anim.is_done());
        assert_eq!(anim.value(), -120.);
    }

    #[test]
    fn complete_instantly_clock() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            0.,
            -400.,
            0.,
            swipe_row_config::Animation::default_commit(),
        );
        assert!(!anim.is_done());

        clock.set_complete_instantly(true);
        assert!(anim.is_done());
        assert_eq!(anim.value(), -400.);
    }

    #[test]
    fn spring_from_config() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            -120.,
            -400.,
            0.,
            swipe_row_config::Animation::default_commit(),
        );
        assert_abs_diff_eq!(anim.value(), -120., epsilon = 1e-9);
        assert!(anim.duration() > Duration::ZERO);

        clock.set_unadjusted(anim.end_time());
        assert!(anim.is_done());
        assert_eq!(anim.value(), -400.);
    }

    #[test]
    fn slowdown_stretches_easing() {
        let mut clock = Clock::with_time(Duration::ZERO);
        clock.set_rate(0.5);
        let anim = Animation::new(
            clock.clone(),
            0.,
            100.,
            0.,
            easing(100, swipe_row_config::Curve::Linear),
        );

        clock.set_unadjusted(Duration::from_millis(100));
        assert_abs_diff_eq!(anim.value(), 50., epsilon = 1e-9);

        clock.set_unadjusted(Duration::from_millis(200));
        assert!(anim.is_done());
    }

    #[test]
    fn clamped_value_stops_at_target() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(
            clock.clone(),
            56.,
            0.,
            0.,
            swipe_row_config::Animation::default_commit(),
        );

        let mut t = Duration::ZERO;
        let mut last = anim.clamped_value();
        while t < anim.duration() {
            clock.set_unadjusted(t);
            let value = anim.clamped_value();
            assert!(value >= 0.);
            assert!(value <= last + 1e-9);
            last = value;
            t += Duration::from_millis(4);
        }
    }
}
