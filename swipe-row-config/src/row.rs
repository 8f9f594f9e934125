use crate::FloatOrInt;

/// Geometry of a single swipe row.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct RowConfig {
    /// Full width of the row; a committed row is flung out by this distance.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(400.))]
    pub width: FloatOrInt<0, 65535>,
    /// Resting height, collapsed to zero on removal.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(56.))]
    pub height: FloatOrInt<0, 65535>,
    /// Fraction of the width at which the delete affordance is fully revealed.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.3))]
    pub reveal_fraction: FloatOrInt<0, 1>,
    /// Speed factor applied to raw motion past the reveal threshold.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.005))]
    pub rubber_band: FloatOrInt<0, 1>,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            width: FloatOrInt(400.),
            height: FloatOrInt(56.),
            reveal_fraction: FloatOrInt(0.3),
            rubber_band: FloatOrInt(0.005),
        }
    }
}

