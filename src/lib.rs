//! Swipe-to-reveal and swipe-to-delete list rows.
//!
//! A [`SwipeRow`] follows a horizontal drag, settles closed or revealed on release, and on the
//! delete press flings itself out, collapses its height and reports its item as removed.
//! Drawing is left to the host, which reads [`RowSnapshot`]s every frame.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod offset;
pub mod options;
pub mod row;
pub mod snapshot;

pub use host::{DragEvent, ItemData, RecognizerHandle, RowBinding, RowItem};
pub use options::RowOptions;
pub use row::{Completion, CompletionSender, RowState, SwipeRow};
pub use snapshot::{RowSnapshot, VisualParams};
