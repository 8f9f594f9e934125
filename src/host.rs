//! Seams between a row and the application hosting it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Payload shown by a row.
///
/// Rows treat their item as opaque apart from the identifier reported on removal.
pub trait RowItem {
    type Id: Clone + PartialEq + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// Stock row payload: an order line with a label, a formatted amount and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub id: u64,
    pub label: String,
    pub amount: String,
    pub quantity: u32,
}

impl RowItem for ItemData {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Opaque token identifying a gesture recognizer.
///
/// Hosts use these to let the horizontal row drag run simultaneously with the vertical scroll
/// of the enclosing list; arbitration itself happens outside of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecognizerHandle(u64);

impl RecognizerHandle {
    /// Returns a handle not equal to any other handle of this process.
    pub fn unique() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Raw drag input, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragEvent {
    Begin,
    /// Cumulative horizontal translation since `Begin`.
    Update { translation: f64 },
    End { translation: f64 },
}

/// Callbacks and handles a row receives from its host at construction.
pub struct RowBinding<Id> {
    pub(crate) on_remove: Option<Box<dyn FnMut(Id)>>,
    pub(crate) simultaneous_with: Option<RecognizerHandle>,
    pub(crate) register_self: Option<Box<dyn FnMut(RecognizerHandle)>>,
}

impl<Id> RowBinding<Id> {
    pub fn new() -> Self {
        Self {
            on_remove: None,
            simultaneous_with: None,
            register_self: None,
        }
    }

    /// Receiver of the removal notification, invoked once when the row is removed.
    pub fn on_remove(mut self, f: impl FnMut(Id) + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    /// Recognizer of the enclosing scrollable, passed through to the drag source.
    pub fn simultaneous_with(mut self, handle: RecognizerHandle) -> Self {
        self.simultaneous_with = Some(handle);
        self
    }

    /// Receiver of the row's own recognizer handle, invoked once at construction.
    pub fn register_self(mut self, f: impl FnMut(RecognizerHandle) + 'static) -> Self {
        self.register_self = Some(Box::new(f));
        self
    }

    pub fn has_remove_receiver(&self) -> bool {
        self.on_remove.is_some()
    }
}

impl<Id> Default for RowBinding<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> fmt::Debug for RowBinding<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBinding")
            .field("on_remove", &self.on_remove.is_some())
            .field("simultaneous_with", &self.simultaneous_with)
            .field("register_self", &self.register_self.is_some())
            .finish()
    }
}
