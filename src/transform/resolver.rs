use crate::{
    foundation::core::{ItemId, ViewHandle},
    foundation::error::{ParallaxError, ParallaxResult},
    item::content_mode::ContentMode,
    item::descriptor::{ItemSet, ParallaxItem},
};

/// Fully resolved snapshot of one descriptor.
///
/// Positions are absolute (safe-area offsets already applied). Only the two
/// progress fields change after resolution; they are rewritten by every
/// layout pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedItem {
    /// Descriptor this snapshot was resolved from.
    pub id: ItemId,
    /// Referenced content view.
    pub view: ViewHandle,
    /// Rest position in content coordinates.
    pub y: f64,
    /// Rest height.
    pub height: f64,
    /// Resolved lower clamp bound.
    pub min_y: Option<f64>,
    /// Resolved upper clamp bound.
    pub max_y: Option<f64>,
    /// Height floor while held at `min_y`.
    pub min_height: Option<f64>,
    /// Paint-order key.
    pub z_index: i32,
    /// Scroll-snap stopping point.
    pub is_page: bool,
    /// Content alignment inside the container.
    pub content_mode: ContentMode,
    /// Takes part in the top inset reservation.
    pub adjusts_scroll_view_top_inset: bool,
    /// Last published vertical progress.
    pub y_progress: f64,
    /// Last published height progress.
    pub height_progress: f64,
}

impl ResolvedItem {
    /// Bottom edge at rest.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Resolves descriptors into absolute snapshots, strictly in declaration
/// order.
///
/// `measure` answers the intrinsic height of a view and is only consulted for
/// items without an explicit height. The output has one entry per descriptor,
/// at the same index.
#[tracing::instrument(skip(items, measure), fields(count = items.len()))]
pub fn resolve_items<M>(
    items: &ItemSet,
    safe_area_top: f64,
    mut measure: M,
) -> ParallaxResult<Vec<ResolvedItem>>
where
    M: FnMut(ViewHandle) -> f64,
{
    let mut resolved = Vec::<ResolvedItem>::with_capacity(items.len());
    for (id, item) in items.iter() {
        let next = resolve_item(id, item, &resolved, safe_area_top, &mut measure)?;
        tracing::trace!(
            item = id.index(),
            y = next.y,
            height = next.height,
            min_y = ?next.min_y,
            max_y = ?next.max_y,
            "resolved parallax item"
        );
        resolved.push(next);
    }
    Ok(resolved)
}

fn resolve_item<M>(
    id: ItemId,
    item: &ParallaxItem,
    resolved: &[ResolvedItem],
    safe_area_top: f64,
    measure: &mut M,
) -> ParallaxResult<ResolvedItem>
where
    M: FnMut(ViewHandle) -> f64,
{
    let y = resolve_y(id, item, resolved, safe_area_top)?;

    let limits_offset = if item.limits_relative_to_safe_area {
        safe_area_top
    } else {
        0.0
    };
    let mut min_y = item.min_y.map(|v| v + limits_offset);
    let mut max_y = item.max_y.map(|v| v + limits_offset);

    let height = match item.height {
        Some(h) => h,
        None => measure(item.view),
    };
    let min_height = item.min_height;

    // Shrinking needs a floor even without an explicit lower bound.
    if min_height.is_some() && min_y.is_none() {
        min_y = Some(y);
    }
    // Filling items do not travel above their rest position on pull-down.
    if item.max_y.is_none() && item.content_mode.is_filling() {
        max_y = Some(y);
    }

    Ok(ResolvedItem {
        id,
        view: item.view,
        y,
        height,
        min_y,
        max_y,
        min_height,
        z_index: item.z_index,
        is_page: item.is_page,
        content_mode: item.content_mode,
        adjusts_scroll_view_top_inset: item.adjusts_scroll_view_top_inset,
        y_progress: 1.0,
        height_progress: 0.0,
    })
}

fn resolve_y(
    id: ItemId,
    item: &ParallaxItem,
    resolved: &[ResolvedItem],
    safe_area_top: f64,
) -> ParallaxResult<f64> {
    if let Some(anchor) = item.anchor {
        let Some(anchor_item) = resolved.get(anchor.index()) else {
            tracing::warn!(
                item = id.index(),
                anchor = anchor.index(),
                "anchor position has not been resolved yet"
            );
            return Err(ParallaxError::configuration(format!(
                "item {} is anchored to item {} which has not been resolved yet",
                id.index(),
                anchor.index()
            )));
        };
        return Ok(anchor_item.bottom() + item.top_margin);
    }

    if item.positioned_relative_to_item_before {
        return Ok(match resolved.last() {
            Some(previous) => previous.bottom() + item.top_margin,
            None => item.top_margin,
        });
    }

    if item.y_relative_to_safe_area {
        return Ok(item.y + safe_area_top);
    }

    Ok(item.y)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resolver.rs"]
mod tests;
