use std::collections::{BTreeMap, VecDeque};

use crate::{
    foundation::core::{ContainerId, Rect, ViewHandle},
    host::{BoundsChange, BoundsObservation, InsetAdjustment, ScrollHost},
    layout::container::ContainerFrame,
};

/// Container as currently inserted into a [`SimScrollView`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SimContainer {
    pub id: ContainerId,
    pub view: ViewHandle,
    pub frame: ContainerFrame,
}

/// In-memory scroll container.
///
/// Offsets jump immediately, animated or not. While a bounds observation is
/// held, every offset change queues a [`BoundsChange`]; the embedder drains
/// the queue with [`SimScrollView::next_bounds_change`] (or
/// [`crate::sim::dispatch_pending`]). Ending the observation discards
/// whatever is still queued.
#[derive(Clone, Debug)]
pub struct SimScrollView {
    width: f64,
    height: f64,
    content_offset_y: f64,
    content_inset_top: f64,
    safe_area_top: f64,
    inset_adjustment: InsetAdjustment,
    views: BTreeMap<ViewHandle, f64>,
    children: Vec<SimContainer>,
    observation: Option<u64>,
    next_observation: u64,
    pending: VecDeque<BoundsChange>,
    last_animated_target: Option<f64>,
}

impl SimScrollView {
    /// Creates a scroll view whose frame is `width` x `height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            content_offset_y: 0.0,
            content_inset_top: 0.0,
            safe_area_top: 0.0,
            inset_adjustment: InsetAdjustment::Automatic,
            views: BTreeMap::new(),
            children: Vec::new(),
            observation: None,
            next_observation: 0,
            pending: VecDeque::new(),
            last_animated_target: None,
        }
    }

    pub fn with_safe_area_top(mut self, top: f64) -> Self {
        self.safe_area_top = top;
        self
    }

    pub fn with_inset_adjustment(mut self, adjustment: InsetAdjustment) -> Self {
        self.inset_adjustment = adjustment;
        self
    }

    /// Registers a content view and its intrinsic height.
    pub fn with_view(mut self, view: ViewHandle, intrinsic_height: f64) -> Self {
        self.register_view(view, intrinsic_height);
        self
    }

    pub fn register_view(&mut self, view: ViewHandle, intrinsic_height: f64) {
        self.views.insert(view, intrinsic_height);
    }

    /// Simulates a safe-area change (e.g. a navigation bar resizing).
    ///
    /// No bounds change is queued; the next scroll picks the new value up.
    pub fn set_safe_area_top(&mut self, top: f64) {
        self.safe_area_top = top;
    }

    /// Visible rectangle in content coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            self.content_offset_y,
            self.width,
            self.content_offset_y + self.height,
        )
    }

    /// Inserted containers, back-most first.
    pub fn children(&self) -> &[SimContainer] {
        &self.children
    }

    pub fn container(&self, id: ContainerId) -> Option<&SimContainer> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn is_observed(&self) -> bool {
        self.observation.is_some()
    }

    /// Pops the oldest queued bounds notification.
    pub fn next_bounds_change(&mut self) -> Option<BoundsChange> {
        self.pending.pop_front()
    }

    /// Drains queued bounds notifications, oldest first.
    pub fn take_bounds_changes(&mut self) -> Vec<BoundsChange> {
        self.pending.drain(..).collect()
    }

    /// Target of the most recent animated offset change.
    pub fn last_animated_target(&self) -> Option<f64> {
        self.last_animated_target
    }
}

impl ScrollHost for SimScrollView {
    fn content_offset_y(&self) -> f64 {
        self.content_offset_y
    }

    fn set_content_offset_y(&mut self, y: f64, animated: bool) {
        let old = self.bounds();
        self.content_offset_y = y;
        if animated {
            self.last_animated_target = Some(y);
        }
        let new = self.bounds();
        if self.observation.is_some() && old != new {
            self.pending.push_back(BoundsChange { old, new });
        }
    }

    fn content_inset_top(&self) -> f64 {
        self.content_inset_top
    }

    fn set_content_inset_top(&mut self, top: f64) {
        self.content_inset_top = top;
    }

    fn safe_area_top(&self) -> f64 {
        self.safe_area_top
    }

    fn inset_adjustment(&self) -> InsetAdjustment {
        self.inset_adjustment
    }

    fn intrinsic_height(&self, view: ViewHandle) -> f64 {
        match self.views.get(&view) {
            Some(&height) => height,
            None => {
                tracing::trace!(view = view.0, "unregistered view measured as zero height");
                0.0
            }
        }
    }

    fn insert_container(&mut self, id: ContainerId, view: ViewHandle, frame: ContainerFrame) {
        self.children.retain(|c| c.id != id);
        self.children.push(SimContainer { id, view, frame });
    }

    fn remove_container(&mut self, id: ContainerId) {
        self.children.retain(|c| c.id != id);
    }

    fn apply_container_frame(&mut self, id: ContainerId, frame: ContainerFrame) {
        if let Some(container) = self.children.iter_mut().find(|c| c.id == id) {
            container.frame = frame;
        }
    }

    fn bring_to_front(&mut self, id: ContainerId) {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            let container = self.children.remove(pos);
            self.children.push(container);
        }
    }

    fn observe_bounds(&mut self) -> BoundsObservation {
        self.next_observation += 1;
        self.observation = Some(self.next_observation);
        BoundsObservation::new(self.next_observation)
    }

    fn invalidate_observation(&mut self, observation: BoundsObservation) {
        if self.observation == Some(observation.id()) {
            self.observation = None;
            self.pending.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/scroll_view.rs"]
mod tests;
