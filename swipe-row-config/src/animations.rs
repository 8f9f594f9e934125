use crate::FloatOrInt;

/// Animation settings for the three phases a row goes through.
///
/// Each phase is resolved against its own default with [`AnimationPart::resolve`], so a
/// document may override only the duration of an easing or switch a phase to a spring.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(1.))]
    pub slowdown: FloatOrInt<0, 100>,
    #[knuffel(child, default)]
    pub settle: AnimationPart,
    #[knuffel(child, default)]
    pub commit: AnimationPart,
    #[knuffel(child, default)]
    pub collapse: AnimationPart,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: FloatOrInt(1.),
            settle: AnimationPart::default(),
            commit: AnimationPart::default(),
            collapse: AnimationPart::default(),
        }
    }
}

impl Animations {
    /// Snap back to rest or to the revealed position after a drag.
    pub fn settle(&self) -> Animation {
        self.resolve(&self.settle, Animation::default_settle())
    }

    /// Fling-out of a row after the delete press.
    pub fn commit(&self) -> Animation {
        self.resolve(&self.commit, Animation::default_commit())
    }

    /// Height collapse before the row is removed.
    pub fn collapse(&self) -> Animation {
        self.resolve(&self.collapse, Animation::default_collapse())
    }

    fn resolve(&self, part: &AnimationPart, default: Animation) -> Animation {
        let mut anim = part.resolve(default);
        anim.off |= self.off;
        anim
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub kind: Kind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Easing(EasingParams),
    Spring(SpringParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingParams {
    pub duration_ms: u32,
    pub curve: Curve,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping_ratio: f64,
    pub stiffness: u32,
    pub epsilon: f64,
}

#[derive(knuffel::DecodeScalar, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

const DEFAULT_EASING: EasingParams = EasingParams {
    duration_ms: 300,
    curve: Curve::EaseInOutQuad,
};

impl Animation {
    pub const fn default_settle() -> Self {
        Self {
            off: false,
            kind: Kind::Easing(DEFAULT_EASING),
        }
    }

    pub const fn default_commit() -> Self {
        Self {
            off: false,
            kind: Kind::Spring(SpringParams {
                damping_ratio: 0.5,
                stiffness: 100,
                epsilon: 0.01,
            }),
        }
    }

    pub const fn default_collapse() -> Self {
        Self {
            off: false,
            kind: Kind::Easing(DEFAULT_EASING),
        }
    }
}

/// One animation node as written in the document.
#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationPart {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument))]
    pub duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    pub curve: Option<Curve>,
    #[knuffel(child)]
    pub spring: Option<SpringPart>,
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct SpringPart {
    #[knuffel(property, default = FloatOrInt(0.5))]
    pub damping_ratio: FloatOrInt<0, 10>,
    #[knuffel(property, default = 100)]
    pub stiffness: u32,
    #[knuffel(property, default = FloatOrInt(0.01))]
    pub epsilon: FloatOrInt<0, 1>,
}

impl AnimationPart {
    /// Fills in whatever the document left out from `default`.
    ///
    /// A `spring` child wins over easing parameters. An easing that only sets one of
    /// `duration-ms` and `curve` takes the other one from `default`, or from the stock easing
    /// when `default` is a spring.
    pub fn resolve(&self, default: Animation) -> Animation {
        let off = self.off || default.off;

        if let Some(spring) = self.spring {
            return Animation {
                off,
                kind: Kind::Spring(SpringParams {
                    damping_ratio: spring.damping_ratio.0,
                    stiffness: spring.stiffness,
                    epsilon: spring.epsilon.0,
                }),
            };
        }

        if self.duration_ms.is_none() && self.curve.is_none() {
            return Animation {
                off,
                kind: default.kind,
            };
        }

        let base = match default.kind {
            Kind::Easing(params) => params,
            Kind::Spring(_) => DEFAULT_EASING,
        };

        Animation {
            off,
            kind: Kind::Easing(EasingParams {
                duration_ms: self.duration_ms.unwrap_or(base.duration_ms),
                curve: self.curve.unwrap_or(base.curve),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_part_keeps_default() {
        let part = AnimationPart::default();
        assert_eq!(part.resolve(Animation::default_commit()), Animation::default_commit());
        assert_eq!(part.resolve(Animation::default_settle()), Animation::default_settle());
    }

    #[test]
    fn off_part_keeps_kind() {
        let part = AnimationPart {
            off: true,
            ..Default::default()
        };
        let anim = part.resolve(Animation::default_settle());
        assert!(anim.off);
        assert_eq!(anim.kind, Animation::default_settle().kind);
    }
}
