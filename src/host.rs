//! Contract between the parallax controller and the scroll container it
//! drives.
//!
//! The controller never owns the scroll container or the content views. It
//! reads scroll state, adjusts insets and offsets, and manages one container
//! per item through [`ScrollHost`]. Toolkit bindings implement the trait over
//! their native scroll view; [`crate::SimScrollView`] implements it in memory
//! for tests and the demo binary.
//!
//! # Event delivery
//!
//! Geometry notifications flow the other way. While the controller holds a
//! [`BoundsObservation`], the embedder forwards every bounds change to
//! [`crate::Parallax::handle_bounds_change`] and every drag release to
//! [`crate::Parallax::will_end_dragging`]:
//!
//! ```rust,ignore
//! fn on_bounds_changed(old: Rect, new: Rect) {
//!     parallax.handle_bounds_change(BoundsChange { old, new })?;
//! }
//!
//! fn on_will_end_dragging(velocity: Vec2, target: &mut Point) {
//!     let mut drag = DragEnd { velocity, target_offset: *target };
//!     parallax.will_end_dragging(&mut drag);
//!     *target = drag.target_offset;
//! }
//! ```

use crate::{
    foundation::core::{ContainerId, Point, Rect, Vec2, ViewHandle},
    layout::container::ContainerFrame,
};

/// Whether the host folds the safe-area inset into the adjusted content
/// inset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InsetAdjustment {
    /// Safe-area inset is added to the content inset.
    #[default]
    Automatic,
    /// Content inset is used verbatim.
    Never,
}

/// Old and new bounds of the scroll container.
///
/// The bounds origin tracks the content offset, so a scroll shows up as a
/// change of `y0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BoundsChange {
    pub old: Rect,
    pub new: Rect,
}

impl BoundsChange {
    /// Content moved up under the finger (offset increased).
    pub fn is_scrolling_up(&self) -> bool {
        self.old.y0 < self.new.y0
    }
}

/// Drag release carrying the momentum target the host is about to use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEnd {
    /// Release velocity.
    pub velocity: Vec2,
    /// Where momentum scrolling would stop; may be overridden.
    pub target_offset: Point,
}

/// Token for the single bounds subscription held by an active controller.
///
/// Deliberately not `Clone`: handing it back through
/// [`ScrollHost::invalidate_observation`] ends the subscription.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundsObservation(u64);

impl BoundsObservation {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Scroll container as seen by the parallax controller.
pub trait ScrollHost {
    /// Current content offset (y).
    fn content_offset_y(&self) -> f64;

    /// Moves the content offset, optionally animated.
    fn set_content_offset_y(&mut self, y: f64, animated: bool);

    /// Content inset top as set by [`ScrollHost::set_content_inset_top`].
    fn content_inset_top(&self) -> f64;

    fn set_content_inset_top(&mut self, top: f64);

    /// Safe-area inset top reported by the toolkit.
    fn safe_area_top(&self) -> f64;

    fn inset_adjustment(&self) -> InsetAdjustment;

    /// Content inset with the safe area folded in when applicable.
    fn adjusted_content_inset_top(&self) -> f64 {
        match self.inset_adjustment() {
            InsetAdjustment::Automatic => self.content_inset_top() + self.safe_area_top(),
            InsetAdjustment::Never => self.content_inset_top(),
        }
    }

    /// Intrinsic height of `view`, used when an item has no explicit height.
    fn intrinsic_height(&self, view: ViewHandle) -> f64;

    /// Inserts a clipping container hosting `view`, pinned to the content top
    /// and spanning the frame width.
    fn insert_container(&mut self, id: ContainerId, view: ViewHandle, frame: ContainerFrame);

    fn remove_container(&mut self, id: ContainerId);

    fn apply_container_frame(&mut self, id: ContainerId, frame: ContainerFrame);

    /// Moves the container to the end of the child order (front-most).
    fn bring_to_front(&mut self, id: ContainerId);

    /// Starts delivering bounds-change notifications.
    fn observe_bounds(&mut self) -> BoundsObservation;

    /// Stops the subscription identified by `observation`.
    fn invalidate_observation(&mut self, observation: BoundsObservation);
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn content_offset_y(&self) -> f64 {
        (**self).content_offset_y()
    }

    fn set_content_offset_y(&mut self, y: f64, animated: bool) {
        (**self).set_content_offset_y(y, animated);
    }

    fn content_inset_top(&self) -> f64 {
        (**self).content_inset_top()
    }

    fn set_content_inset_top(&mut self, top: f64) {
        (**self).set_content_inset_top(top);
    }

    fn safe_area_top(&self) -> f64 {
        (**self).safe_area_top()
    }

    fn inset_adjustment(&self) -> InsetAdjustment {
        (**self).inset_adjustment()
    }

    fn adjusted_content_inset_top(&self) -> f64 {
        (**self).adjusted_content_inset_top()
    }

    fn intrinsic_height(&self, view: ViewHandle) -> f64 {
        (**self).intrinsic_height(view)
    }

    fn insert_container(&mut self, id: ContainerId, view: ViewHandle, frame: ContainerFrame) {
        (**self).insert_container(id, view, frame);
    }

    fn remove_container(&mut self, id: ContainerId) {
        (**self).remove_container(id);
    }

    fn apply_container_frame(&mut self, id: ContainerId, frame: ContainerFrame) {
        (**self).apply_container_frame(id, frame);
    }

    fn bring_to_front(&mut self, id: ContainerId) {
        (**self).bring_to_front(id);
    }

    fn observe_bounds(&mut self) -> BoundsObservation {
        (**self).observe_bounds()
    }

    fn invalidate_observation(&mut self, observation: BoundsObservation) {
        (**self).invalidate_observation(observation);
    }
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
