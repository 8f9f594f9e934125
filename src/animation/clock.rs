use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Shared animation clock.
///
/// The host sets the frame time once per frame with [`Clock::set_unadjusted`]; every animation
/// created from clones of the same clock then observes the same instant, which keeps all values
/// of one frame consistent. If no time was set, the clock lazily falls back to monotonic time.
///
/// The adjusted time runs at [`Clock::rate`] relative to the unadjusted time, which is how the
/// `slowdown` setting is applied.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    inner: LazyClock,
    current_time: Duration,
    last_seen_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

#[derive(Debug, Default)]
struct LazyClock {
    time: Option<Duration>,
}

impl Clock {
    /// Creates a new clock with the given time.
    pub fn with_time(time: Duration) -> Self {
        let clock = AdjustableClock::new(LazyClock::new(Some(time)));
        Self {
            inner: Rc::new(RefCell::new(clock)),
        }
    }

    /// Returns the current adjusted time.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().now()
    }

    /// Returns the current unadjusted time.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow_mut().inner.now()
    }

    /// Overrides the current unadjusted time.
    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().inner.set(time);
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().set_rate(rate);
    }

    /// Returns whether animations should complete instantly.
    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }

    /// Applies the global animation settings.
    pub fn configure(&mut self, config: &swipe_row_config::Animations) {
        let slowdown = config.slowdown.0;
        let rate = if slowdown <= f64::EPSILON {
            1.
        } else {
            1. / slowdown
        };
        self.set_rate(rate);
        self.set_complete_instantly(config.off);
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl Default for AdjustableClock {
    fn default() -> Self {
        Self::new(LazyClock::default())
    }
}

impl AdjustableClock {
    fn new(mut inner: LazyClock) -> Self {
        let time = inner.now();
        Self {
            inner,
            current_time: time,
            last_seen_time: time,
            rate: 1.,
            complete_instantly: false,
        }
    }

    fn set_rate(&mut self, rate: f64) {
        // Advance the adjusted time with the old rate before switching.
        self.now();
        self.rate = rate.clamp(0., 1000.);
    }

    fn now(&mut self) -> Duration {
        let time = self.inner.now();

        if self.last_seen_time == time {
            return self.current_time;
        }

        if self.last_seen_time < time {
            let delta = time - self.last_seen_time;
            let delta = delta.mul_f64(self.rate);
            self.current_time = self.current_time.saturating_add(delta);
        } else {
            let delta = self.last_seen_time - time;
            let delta = delta.mul_f64(self.rate);
            self.current_time = self.current_time.saturating_sub(delta);
        }

        self.last_seen_time = time;
        self.current_time
    }
}

impl LazyClock {
    fn new(time: Option<Duration>) -> Self {
        Self { time }
    }

    fn set(&mut self, time: Duration) {
        self.time = Some(time);
    }

    fn now(&mut self) -> Duration {
        *self.time.get_or_insert_with(monotonic_time)
    }
}

fn monotonic_time() -> Duration {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_time() {
        let clock = Clock::with_time(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));
    }

    #[test]
    fn clones_share_time() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let other = clock.clone();
        clock.set_unadjusted(Duration::from_millis(16));
        assert_eq!(other.now(), Duration::from_millis(16));
        assert_eq!(clock, other);
        assert_ne!(clock, Clock::with_time(Duration::ZERO));
    }

    #[test]
    fn rate_scales_progress() {
        let mut clock = Clock::with_time(Duration::ZERO);
        clock.set_rate(0.5);
        clock.set_unadjusted(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(50));
        assert_eq!(clock.now_unadjusted(), Duration::from_millis(100));

        clock.set_rate(2.);
        clock.set_unadjusted(Duration::from_millis(200));
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[test]
    fn time_going_backwards() {
        let mut clock = Clock::with_time(Duration::from_millis(100));
        clock.set_unadjusted(Duration::from_millis(40));
        assert_eq!(clock.now(), Duration::from_millis(40));
    }

    #[test]
    fn configure_from_animations() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let mut config = swipe_row_config::Animations::default();
        config.slowdown = swipe_row_config::FloatOrInt(4.);
        config.off = true;
        clock.configure(&config);
        assert_eq!(clock.rate(), 0.25);
        assert!(clock.should_complete_instantly());
    }
}
