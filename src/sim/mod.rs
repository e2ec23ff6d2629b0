//! Headless scroll host and helpers for driving a controller without a UI
//! toolkit.

pub mod scroll_view;

use std::borrow::BorrowMut;

use crate::{
    controller::parallax::Parallax,
    foundation::core::{Point, Vec2},
    foundation::error::ParallaxResult,
    host::{DragEnd, ScrollHost},
    layout::pass::LayoutReport,
    sim::scroll_view::SimScrollView,
};

/// Delivers every queued bounds change to `parallax`, the way a toolkit's
/// observer would, and returns the reports of the passes that ran.
///
/// Changes are delivered one at a time. A change that makes the controller
/// rebuild ends its observation, which discards the rest of the queue.
pub fn dispatch_pending<H>(parallax: &mut Parallax<H>) -> ParallaxResult<Vec<LayoutReport>>
where
    H: ScrollHost + BorrowMut<SimScrollView>,
{
    let mut reports = Vec::new();
    while let Some(change) =
        BorrowMut::<SimScrollView>::borrow_mut(parallax.host_mut()).next_bounds_change()
    {
        if let Some(report) = parallax.handle_bounds_change(change)? {
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Moves the content offset without animation and dispatches the resulting
/// notification. Returns the last pass, if one ran.
pub fn scroll_to<H>(parallax: &mut Parallax<H>, offset_y: f64) -> ParallaxResult<Option<LayoutReport>>
where
    H: ScrollHost + BorrowMut<SimScrollView>,
{
    parallax.host_mut().set_content_offset_y(offset_y, false);
    Ok(dispatch_pending(parallax)?.pop())
}

/// Releases a drag at the current offset.
///
/// Returns the snap target chosen by the controller, if any, after the
/// animated scroll to it has been dispatched.
pub fn release_drag<H>(parallax: &mut Parallax<H>, velocity: Vec2) -> ParallaxResult<Option<f64>>
where
    H: ScrollHost + BorrowMut<SimScrollView>,
{
    let current = parallax.host().content_offset_y();
    let mut drag = DragEnd {
        velocity,
        target_offset: Point::new(0.0, current),
    };
    let target = parallax.will_end_dragging(&mut drag);
    dispatch_pending(parallax)?;
    Ok(target)
}
