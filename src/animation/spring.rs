use std::time::Duration;

/// Springs are never allowed to run longer than this.
const MAX_DURATION: Duration = Duration::from_secs(10);

/// Step used when searching for the settle time numerically.
const STEP: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    pub epsilon: f64,
}

/// Analytic damped harmonic oscillator moving from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub params: SpringParams,
}

impl SpringParams {
    pub fn new(damping_ratio: f64, stiffness: f64, epsilon: f64) -> Self {
        let damping_ratio = damping_ratio.max(0.);
        let stiffness = stiffness.max(0.);
        let epsilon = epsilon.max(0.);

        let mass = 1.;
        let critical_damping = 2. * (mass * stiffness).sqrt();
        let damping = damping_ratio * critical_damping;

        Self {
            damping,
            mass,
            stiffness,
            epsilon,
        }
    }
}

impl Spring {
    pub fn value_at(&self, t: Duration) -> f64 {
        self.oscillate(t.as_secs_f64())
    }

    /// Time until the oscillation stays within `epsilon` of the target.
    pub fn duration(&self) -> Duration {
        let SpringParams {
            damping,
            mass,
            stiffness,
            epsilon,
        } = self.params;

        let x0 = self.from - self.to;
        let v0 = self.initial_velocity;
        if x0.abs() <= epsilon && v0.abs() <= epsilon {
            return Duration::ZERO;
        }

        let beta = damping / (2. * mass);
        if beta <= f64::EPSILON || stiffness <= f64::EPSILON {
            return MAX_DURATION;
        }

        let omega0 = (stiffness / mass).sqrt();
        if beta < omega0 {
            // Underdamped: the envelope bounds every later peak.
            let omega1 = (omega0 * omega0 - beta * beta).sqrt();
            let amplitude = x0.hypot((beta * x0 + v0) / omega1);
            let epsilon = epsilon.max(f64::EPSILON);
            if amplitude <= epsilon {
                return Duration::ZERO;
            }
            let secs = (amplitude / epsilon).ln() / beta;
            return Duration::try_from_secs_f64(secs)
                .unwrap_or(MAX_DURATION)
                .min(MAX_DURATION);
        }

        // Critically and overdamped springs cross the target at most once, so the first time
        // they come within epsilon and are heading home is the settle time.
        let mut t = STEP;
        while t < MAX_DURATION {
            let x = self.value_at(t) - self.to;
            let x_next = self.value_at(t + STEP) - self.to;
            if x.abs() <= epsilon && x_next.abs() <= x.abs() {
                return t;
            }
            t += STEP;
        }
        MAX_DURATION
    }

    /// Time until the spring first reaches the target.
    pub fn clamped_duration(&self) -> Option<Duration> {
        if self.from == self.to {
            return Some(Duration::ZERO);
        }

        let end = self.duration();
        let increasing = self.to > self.from;

        let mut t = Duration::ZERO;
        while t <= end {
            let value = self.value_at(t);
            if (increasing && value >= self.to) || (!increasing && value <= self.to) {
                return Some(t);
            }
            t += STEP;
        }

        None
    }

    fn oscillate(&self, t: f64) -> f64 {
        let b = self.params.damping;
        let m = self.params.mass;
        let k = self.params.stiffness;
        let v0 = self.initial_velocity;

        let beta = b / (2. * m);
        let omega0 = (k / m).sqrt();

        let x0 = self.from - self.to;

        let envelope = (-beta * t).exp();

        // Solutions are taken from https://en.wikipedia.org/wiki/Harmonic_oscillator.
        if (beta - omega0).abs() <= f64::EPSILON {
            // Critically damped.
            self.to + envelope * (x0 + (beta * x0 + v0) * t)
        } else if beta < omega0 {
            // Underdamped.
            let omega1 = ((omega0 * omega0) - (beta * beta)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega1 * t).cos() + ((beta * x0 + v0) / omega1) * (omega1 * t).sin())
        } else {
            // Overdamped.
            let omega2 = ((beta * beta) - (omega0 * omega0)).sqrt();

            self.to
                + envelope
                    * (x0 * (omega2 * t).cosh() + ((beta * x0 + v0) / omega2) * (omega2 * t).sinh())
        }
    }
}
