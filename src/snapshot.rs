//! Read-only view of a row for the render side.

use serde::Serialize;

use crate::geometry::{OffsetVisuals, RowGeometry};
use crate::row::{Completion, RowState};

/// Everything needed to draw one frame of a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub state: RowState,
    pub offset: f64,
    pub target_offset: f64,
    pub height: f64,
    pub opacity: f64,
    pub threshold: f64,
    pub generation: u64,
    pub animating: bool,
}

/// Visual parameters of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParams {
    #[serde(flatten)]
    pub offset: OffsetVisuals,
    pub height: f64,
    pub opacity: f64,
}

impl RowSnapshot {
    pub fn visuals(&self) -> VisualParams {
        VisualParams {
            offset: RowGeometry::new(self.threshold).visuals(self.offset),
            height: self.height,
            opacity: self.opacity,
        }
    }

    /// Completion for the phase this snapshot was taken in.
    ///
    /// A render-side evaluator posts this once it sees the phase arrive at its target.
    pub fn completion(&self) -> Completion {
        Completion {
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visuals_follow_offset() {
        let snapshot = RowSnapshot {
            state: RowState::Idle,
            offset: -120.,
            target_offset: -120.,
            height: 56.,
            opacity: 1.,
            threshold: 120.,
            generation: 3,
            animating: false,
        };

        let visuals = snapshot.visuals();
        assert_eq!(visuals.offset.translate_x, -120.);
        assert_eq!(visuals.offset.reveal_size, 120.);
        assert_eq!(visuals.height, 56.);
        assert_eq!(snapshot.completion(), Completion { generation: 3 });
    }

    #[test]
    fn serializes_flat() {
        let snapshot = RowSnapshot {
            state: RowState::Collapsing,
            offset: -400.,
            target_offset: -400.,
            height: 28.,
            opacity: 0.5,
            threshold: 120.,
            generation: 5,
            animating: true,
        };

        let value = serde_json::to_value(snapshot.visuals()).unwrap();
        assert_eq!(value["translate_x"], -400.);
        assert_eq!(value["height"], 28.);

        let value = serde_json::to_value(snapshot).unwrap();
        assert_eq!(value["state"], "Collapsing");
    }
}
