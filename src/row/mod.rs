//! Lifecycle of a swipe row.
//!
//! A row is owned and mutated by a single control thread. Inputs arrive as drag events and
//! delete presses; time advances through the shared [`Clock`] and [`SwipeRow::advance_animations`]
//! once per frame. Anything happening on the render side only reads [`RowSnapshot`]s.
//!
//! Animation completions are messages. The row posts its own through the same queue that a
//! render-side evaluator would use with a [`CompletionSender`], and only the control thread
//! drains that queue in [`SwipeRow::dispatch_completions`]. Every completion is tagged with the
//! generation of the phase it belongs to, so a completion for a phase that was preempted is
//! dropped.
//!
//! ```text
//! Idle --drag--> Dragging --release--> Settling --arrive--> Idle
//!                   ^                     |
//!                   +-------drag----------+
//! Idle | Settling --delete press--> Committed --arrive--> Collapsing --arrive--> Removed
//!                                       |                 ^
//!                                       +------drag-------+
//! ```

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::animation::Clock;
use crate::geometry::RowGeometry;
use crate::host::{DragEvent, RecognizerHandle, RowBinding, RowItem};
use crate::offset::{OffsetAnimator, SettleTarget};
use crate::options::RowOptions;
use crate::snapshot::{RowSnapshot, VisualParams};

mod collapse;

pub use collapse::Collapse;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowState {
    /// At rest, either closed or held open at the reveal threshold.
    Idle,
    /// Following an ongoing drag.
    Dragging,
    /// Animating to rest or to the revealed position after a release.
    Settling,
    /// Flung out after the delete press.
    Committed,
    /// Height animating to zero.
    Collapsing,
    /// Gone; the host is expected to drop the row.
    Removed,
}

/// Notice that the animation of a phase has arrived at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub generation: u64,
}

/// Posts completions to a row from any thread.
#[derive(Debug, Clone)]
pub struct CompletionSender(async_channel::Sender<Completion>);

impl CompletionSender {
    /// Queues a completion; returns `false` if the row is gone.
    pub fn send(&self, completion: Completion) -> bool {
        self.0.try_send(completion).is_ok()
    }
}

#[derive(Debug)]
pub struct SwipeRow<I: RowItem> {
    item: I,
    options: RowOptions,
    geometry: RowGeometry,
    clock: Clock,
    state: RowState,
    offset: OffsetAnimator,
    collapse: Option<Collapse>,
    /// Bumped on every state change.
    generation: u64,
    recognizer: RecognizerHandle,
    binding: RowBinding<I::Id>,
    completion_tx: CompletionSender,
    completion_rx: async_channel::Receiver<Completion>,
}

impl<I: RowItem> SwipeRow<I> {
    pub fn new(item: I, options: RowOptions, clock: Clock, mut binding: RowBinding<I::Id>) -> Self {
        let recognizer = RecognizerHandle::unique();
        if let Some(register) = &mut binding.register_self {
            register(recognizer);
        }

        if !binding.has_remove_receiver() {
            warn!(
                "row {:?} has no removal receiver, deleting it will only collapse it",
                item.id()
            );
        }

        let (tx, completion_rx) = async_channel::unbounded();

        Self {
            item,
            geometry: RowGeometry::new(options.threshold()),
            offset: OffsetAnimator::new(clock.clone(), &options),
            options,
            clock,
            state: RowState::Idle,
            collapse: None,
            generation: 0,
            recognizer,
            binding,
            completion_tx: CompletionSender(tx),
            completion_rx,
        }
    }

    pub fn item(&self) -> &I {
        &self.item
    }

    pub fn id(&self) -> I::Id {
        self.item.id()
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn geometry(&self) -> &RowGeometry {
        &self.geometry
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// This row's own recognizer, registered with the host at construction.
    pub fn recognizer(&self) -> RecognizerHandle {
        self.recognizer
    }

    /// Recognizer the drag source must run simultaneously with.
    pub fn simultaneous_with(&self) -> Option<RecognizerHandle> {
        self.binding.simultaneous_with
    }

    pub fn completion_sender(&self) -> CompletionSender {
        self.completion_tx.clone()
    }

    pub fn offset(&self) -> f64 {
        self.offset.current()
    }

    pub fn collapse_height(&self) -> f64 {
        match (self.state, &self.collapse) {
            (RowState::Removed, _) => 0.,
            (_, Some(collapse)) => collapse.height(),
            (_, None) => self.options.height,
        }
    }

    pub fn opacity(&self) -> f64 {
        match (self.state, &self.collapse) {
            (RowState::Removed, _) => 0.,
            (_, Some(collapse)) => collapse.opacity(),
            (_, None) => 1.,
        }
    }

    /// Returns `true` if the row rests with the delete affordance revealed.
    pub fn is_revealed(&self) -> bool {
        let threshold = self.geometry.threshold();
        self.state == RowState::Idle && threshold > 0. && self.offset.current() == -threshold
    }

    pub fn are_animations_ongoing(&self) -> bool {
        matches!(
            self.state,
            RowState::Settling | RowState::Committed | RowState::Collapsing
        )
    }

    pub fn handle_drag_event(&mut self, event: DragEvent) {
        match event {
            DragEvent::Begin => {
                self.drag_begin();
            }
            DragEvent::Update { translation } => {
                self.drag_update(translation);
            }
            DragEvent::End { translation } => {
                self.drag_end(translation);
            }
        }
    }

    /// Starts following a drag. Returns `false` if the row can't be dragged right now.
    ///
    /// A drag during the fling-out stops it where it is and skips straight to the collapse, so
    /// the delete still goes through. A drag during the collapse only moves the offset.
    pub fn drag_begin(&mut self) -> bool {
        match self.state {
            RowState::Idle | RowState::Settling => {
                self.offset.begin_gesture();
                self.set_state(RowState::Dragging);
                true
            }
            RowState::Committed => {
                self.offset.begin_gesture();
                self.start_collapse();
                true
            }
            RowState::Collapsing => {
                if self.offset.value().is_gesture() {
                    debug!("row {:?}: ignoring drag start, already dragging", self.id());
                    return false;
                }
                self.offset.begin_gesture();
                true
            }
            RowState::Dragging => {
                debug!("row {:?}: ignoring drag start, already dragging", self.id());
                false
            }
            RowState::Removed => {
                debug!("row {:?}: ignoring drag start, row was removed", self.id());
                false
            }
        }
    }

    /// Applies one raw translation of the ongoing drag and returns the new offset.
    pub fn drag_update(&mut self, translation: f64) -> Option<f64> {
        if !self.is_drag_ongoing() {
            trace!("row {:?}: ignoring drag update in {:?}", self.id(), self.state);
            return None;
        }

        self.offset.gesture_update(translation)
    }

    /// Releases the drag and starts settling.
    ///
    /// During the collapse the offset settles while the row keeps collapsing.
    pub fn drag_end(&mut self, translation: f64) -> Option<SettleTarget> {
        if !self.is_drag_ongoing() {
            trace!("row {:?}: ignoring drag end in {:?}", self.id(), self.state);
            return None;
        }

        let target = self.offset.gesture_end(translation)?;
        if self.state == RowState::Dragging {
            self.set_state(RowState::Settling);
        }
        Some(target)
    }

    /// Handles the delete press. Returns `false` if the press was ignored.
    ///
    /// Once committed there is no way back: the row flings out, collapses and gets removed.
    pub fn commit(&mut self) -> bool {
        match self.state {
            RowState::Idle | RowState::Settling => {
                self.offset.fling_out();
                self.set_state(RowState::Committed);
                true
            }
            state => {
                debug!("row {:?}: ignoring delete press in {state:?}", self.id());
                false
            }
        }
    }

    /// Moves the lifecycle forward according to the current clock time.
    ///
    /// Call this once per frame after updating the clock.
    pub fn advance_animations(&mut self) {
        self.dispatch_completions();

        while let Some(completion) = self.finished_animation() {
            let state = self.state;
            // The row holds the receiver, so its own queue is never closed.
            let sent = self.completion_tx.send(completion);
            debug_assert!(sent);
            self.dispatch_completions();
            if self.state == state {
                break;
            }
        }
    }

    /// Applies every queued completion.
    pub fn dispatch_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.handle_completion(completion);
        }
    }

    pub fn snapshot(&self) -> RowSnapshot {
        RowSnapshot {
            state: self.state,
            offset: self.offset.current(),
            target_offset: self.offset.target(),
            height: self.collapse_height(),
            opacity: self.opacity(),
            threshold: self.geometry.threshold(),
            generation: self.generation,
            animating: self.are_animations_ongoing(),
        }
    }

    pub fn visuals(&self) -> VisualParams {
        self.snapshot().visuals()
    }

    fn finished_animation(&self) -> Option<Completion> {
        let done = match self.state {
            RowState::Settling | RowState::Committed => self.offset.is_animation_done(),
            RowState::Collapsing => self.collapse.as_ref().map_or(true, Collapse::is_done),
            RowState::Idle | RowState::Dragging | RowState::Removed => false,
        };

        done.then_some(Completion {
            generation: self.generation,
        })
    }

    fn handle_completion(&mut self, completion: Completion) {
        if completion.generation != self.generation {
            trace!(
                "row {:?}: dropping stale completion {} (current {})",
                self.id(),
                completion.generation,
                self.generation
            );
            return;
        }

        match self.state {
            RowState::Settling => {
                self.offset.finish();
                self.set_state(RowState::Idle);
            }
            RowState::Committed => {
                self.offset.finish();
                self.start_collapse();
            }
            RowState::Collapsing => self.enter_removed(),
            RowState::Idle | RowState::Dragging | RowState::Removed => {
                trace!("row {:?}: nothing to complete in {:?}", self.id(), self.state);
            }
        }
    }

    fn is_drag_ongoing(&self) -> bool {
        match self.state {
            RowState::Dragging => true,
            RowState::Collapsing => self.offset.value().is_gesture(),
            _ => false,
        }
    }

    fn start_collapse(&mut self) {
        self.collapse = Some(Collapse::new(
            self.clock.clone(),
            self.options.height,
            self.options.animations.collapse,
        ));
        self.set_state(RowState::Collapsing);
    }

    fn enter_removed(&mut self) {
        if self.state == RowState::Removed {
            return;
        }
        self.set_state(RowState::Removed);

        let id = self.item.id();
        match &mut self.binding.on_remove {
            Some(on_remove) => on_remove(id),
            None => warn!("row {id:?} was removed but nobody was listening"),
        }
    }

    fn set_state(&mut self, state: RowState) {
        debug!("row {:?}: {:?} -> {state:?}", self.id(), self.state);
        self.state = state;
        self.generation += 1;
    }
}
