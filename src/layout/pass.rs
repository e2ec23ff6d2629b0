use crate::{
    foundation::core::ItemId,
    foundation::math::finite,
    item::content_mode::ContentPlacement,
    layout::container::ItemContainer,
    transform::resolver::ResolvedItem,
};

/// Scroll state sampled once per layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollMetrics {
    /// Current content offset (y).
    pub content_offset_y: f64,
    /// Adjusted top content inset (safe area folded in when applicable).
    pub inset_top: f64,
}

impl ScrollMetrics {
    /// Scroll position measured from the unadjusted top of the content.
    pub fn scroll_position(self) -> f64 {
        self.content_offset_y + self.inset_top
    }
}

/// Raw output of the clamp solver for one item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolvedGeometry {
    /// Container top after clamping.
    pub top: f64,
    /// Container height after shrinking or stretching.
    pub height: f64,
    /// Unguarded vertical progress; NaN or infinite for zero spans.
    pub y_ratio: f64,
    /// Unguarded height ratio `(height - rest) / (rest - min_height)`.
    pub height_ratio: f64,
}

/// Clamps one item against the current scroll position.
///
/// `max_y` is applied after `min_y`, so its progress ratio wins when both are
/// set.
pub fn solve(item: &ResolvedItem, metrics: ScrollMetrics) -> SolvedGeometry {
    let inset_top = metrics.inset_top;
    let scroll = metrics.scroll_position();

    let mut top = item.y - inset_top;
    let mut y_ratio = 1.0;
    let mut height = item.height;

    if let Some(item_min_y) = item.min_y {
        let min_y = item_min_y - inset_top + scroll;
        let y_diff = top - min_y;
        y_ratio = y_diff / (item.y - item_min_y);
        top = top.max(min_y);

        if let Some(min_height) = item.min_height
            && y_diff < 0.0
        {
            height = min_height.max(height + y_diff);
        }
    }

    if let Some(item_max_y) = item.max_y {
        let max_y = item_max_y - inset_top + scroll;
        let y_diff = top - max_y;
        y_ratio = y_diff / (item.y - item_max_y);
        top = top.min(max_y);

        if y_diff > 0.0 {
            height += y_diff;
        }
    }

    let height_ratio = (height - item.height) / (item.height - item.min_height.unwrap_or(0.0));

    SolvedGeometry {
        top,
        height,
        y_ratio,
        height_ratio,
    }
}

/// Progress values that changed during a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressChange {
    /// New vertical progress, when it changed.
    pub y: Option<f64>,
    /// New height progress, when it changed.
    pub height: Option<f64>,
}

/// Stores guarded progress on `item`, reporting what changed.
///
/// Non-finite ratios leave the stored value alone. Change detection is exact
/// floating-point inequality.
pub fn publish_progress(item: &mut ResolvedItem, solved: &SolvedGeometry) -> ProgressChange {
    let mut change = ProgressChange::default();

    if let Some(ratio) = finite(solved.y_ratio) {
        let progress = ratio.max(0.0);
        if item.y_progress != progress {
            item.y_progress = progress;
            change.y = Some(progress);
        }
    }

    if let Some(ratio) = finite(solved.height_ratio) {
        let progress = 1.0 + ratio;
        if item.height_progress != progress {
            item.height_progress = progress;
            change.height = Some(progress);
        }
    }

    change
}

/// Result of laying out one container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ItemFrame {
    /// Item the container wraps.
    pub item: ItemId,
    /// Applied container top.
    pub top: f64,
    /// Applied container height.
    pub height: f64,
    /// Content frame inside the container.
    pub content: ContentPlacement,
    /// Current vertical progress.
    pub y_progress: f64,
    /// Current height progress.
    pub height_progress: f64,
    /// Whether `y_progress` changed during this pass.
    pub y_progress_changed: bool,
    /// Whether `height_progress` changed during this pass.
    pub height_progress_changed: bool,
}

/// One full layout pass over every container.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutReport {
    /// Scroll state the pass was computed against.
    pub metrics: ScrollMetrics,
    /// Frames in application order (back-most first).
    pub frames: Vec<ItemFrame>,
}

impl LayoutReport {
    pub fn frame(&self, item: ItemId) -> Option<&ItemFrame> {
        self.frames.iter().find(|f| f.item == item)
    }

    /// Whether any progress value changed during the pass.
    pub fn any_progress_changed(&self) -> bool {
        self.frames
            .iter()
            .any(|f| f.y_progress_changed || f.height_progress_changed)
    }
}

/// Solves one container, stores its progress and applies the new box.
pub(crate) fn layout_container(
    container: &mut ItemContainer,
    metrics: ScrollMetrics,
) -> (ItemFrame, ProgressChange) {
    let solved = solve(container.item(), metrics);
    let change = publish_progress(container.item_mut(), &solved);
    container.set(solved.top, solved.height);

    let item = container.item();
    let frame = ItemFrame {
        item: item.id,
        top: container.top(),
        height: container.height(),
        content: container.content(),
        y_progress: item.y_progress,
        height_progress: item.height_progress,
        y_progress_changed: change.y.is_some(),
        height_progress_changed: change.height.is_some(),
    };
    (frame, change)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pass.rs"]
mod tests;
