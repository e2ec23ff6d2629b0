use std::fmt;

use crate::{
    foundation::core::{ItemId, ViewHandle, all_finite},
    foundation::error::{ParallaxError, ParallaxResult},
    item::content_mode::ContentMode,
};

/// Handler invoked synchronously whenever a progress value changes.
pub type ProgressCallback = Box<dyn FnMut(f64)>;

/// Declarative description of one parallax element.
///
/// Built with consuming setters and handed to an [`ItemSet`], which owns it
/// from then on. The content view is only referenced through its
/// [`ViewHandle`].
///
/// Positioning precedence during resolution:
/// 1. an anchor set with [`ParallaxItem::anchored_to`] (anchor bottom + margin),
/// 2. the item declared just before (the default),
/// 3. the explicit `y`, optionally offset by the safe-area inset.
pub struct ParallaxItem {
    pub(crate) view: ViewHandle,
    pub(crate) content_mode: ContentMode,
    pub(crate) height: Option<f64>,
    pub(crate) min_height: Option<f64>,
    pub(crate) y: f64,
    pub(crate) min_y: Option<f64>,
    pub(crate) max_y: Option<f64>,
    pub(crate) z_index: i32,
    pub(crate) is_page: bool,
    pub(crate) anchor: Option<ItemId>,
    pub(crate) top_margin: f64,
    pub(crate) positioned_relative_to_item_before: bool,
    pub(crate) adjusts_scroll_view_top_inset: bool,
    pub(crate) y_relative_to_safe_area: bool,
    pub(crate) limits_relative_to_safe_area: bool,
    pub(crate) on_y_progress: Option<ProgressCallback>,
    pub(crate) on_height_progress: Option<ProgressCallback>,
}

impl ParallaxItem {
    /// Describes `view`, stacked directly below the previously declared item.
    pub fn new(view: ViewHandle) -> Self {
        Self {
            view,
            content_mode: ContentMode::Top,
            height: None,
            min_height: None,
            y: 0.0,
            min_y: None,
            max_y: None,
            z_index: 0,
            is_page: false,
            anchor: None,
            top_margin: 0.0,
            positioned_relative_to_item_before: true,
            adjusts_scroll_view_top_inset: true,
            y_relative_to_safe_area: false,
            limits_relative_to_safe_area: false,
            on_y_progress: None,
            on_height_progress: None,
        }
    }

    /// Positions the item `top_margin` below the bottom of `anchor`.
    ///
    /// With `anchor == None` the item falls back to its explicit `y` and the
    /// margin is ignored.
    pub fn anchored_to(mut self, anchor: Option<ItemId>, top_margin: f64) -> Self {
        self.anchor = anchor;
        self.top_margin = top_margin;
        self.positioned_relative_to_item_before = false;
        self
    }

    /// Positions the item `top_margin` below the item declared just before it.
    pub fn top_margin_to_item_before(mut self, top_margin: f64) -> Self {
        self.anchor = None;
        self.top_margin = top_margin;
        self.positioned_relative_to_item_before = true;
        self
    }

    /// Places the item at an explicit rest position.
    pub fn at_y(mut self, y: f64, relative_to_safe_area: bool) -> Self {
        self.anchor = None;
        self.y = y;
        self.y_relative_to_safe_area = relative_to_safe_area;
        self.positioned_relative_to_item_before = false;
        self
    }

    /// Pins the item: `y`, `min_y` and `max_y` all become `y`, so scrolling
    /// never moves it.
    pub fn fixed_y(mut self, y: f64, relative_to_safe_area: bool) -> Self {
        self.anchor = None;
        self.y = y;
        self.min_y = Some(y);
        self.max_y = Some(y);
        self.y_relative_to_safe_area = relative_to_safe_area;
        self.limits_relative_to_safe_area = relative_to_safe_area;
        self.positioned_relative_to_item_before = false;
        self
    }

    /// Sets the vertical clamp bounds, measured from the top of the scroll
    /// container frame (or from the safe-area inset).
    ///
    /// `min_y` gives sticky-header behavior; `max_y` lets stretchy headers
    /// grow when pulled down.
    pub fn limits(
        mut self,
        min_y: Option<f64>,
        max_y: Option<f64>,
        relative_to_safe_area: bool,
    ) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self.limits_relative_to_safe_area = relative_to_safe_area;
        self
    }

    /// Sets the rest height (`None` measures the view) and the floor the item
    /// shrinks to while it is held at `min_y`.
    pub fn height(mut self, height: Option<f64>, min_height: Option<f64>) -> Self {
        self.height = height;
        self.min_height = min_height;
        self
    }

    /// Called with the vertical progress: `0` at `min_y`, `>= 1` at rest and
    /// beyond.
    pub fn on_y_progress(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_y_progress = Some(Box::new(callback));
        self
    }

    /// Called with the height progress: `1` at rest height, `0` at
    /// `min_height`, above `1` while stretched.
    pub fn on_height_progress(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_height_progress = Some(Box::new(callback));
        self
    }

    /// Higher values draw on top; lower items scroll underneath.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets how the content view sits inside its container.
    pub fn content_mode(mut self, mode: ContentMode) -> Self {
        self.content_mode = mode;
        self
    }

    /// Marks the item as a scroll-snap stopping point.
    pub fn page(mut self) -> Self {
        self.is_page = true;
        self
    }

    /// Whether `y + height` of this item takes part in the top inset
    /// reservation. Defaults to `true`.
    pub fn adjusting_scroll_view_top_inset(mut self, value: bool) -> Self {
        self.adjusts_scroll_view_top_inset = value;
        self
    }

    /// Referenced content view.
    pub fn view(&self) -> ViewHandle {
        self.view
    }

    /// Anchor item, if positioned relative to one.
    pub fn anchor(&self) -> Option<ItemId> {
        self.anchor
    }

    /// Current content mode.
    pub fn mode(&self) -> ContentMode {
        self.content_mode
    }

    pub(crate) fn notify_y_progress(&mut self, progress: f64) {
        if let Some(callback) = self.on_y_progress.as_mut() {
            callback(progress);
        }
    }

    pub(crate) fn notify_height_progress(&mut self, progress: f64) {
        if let Some(callback) = self.on_height_progress.as_mut() {
            callback(progress);
        }
    }

    fn validate_at(&self, position: usize) -> ParallaxResult<()> {
        if let Some(anchor) = self.anchor
            && anchor.index() >= position
        {
            return Err(ParallaxError::configuration(format!(
                "item {position} is anchored to item {} which is not declared before it",
                anchor.index()
            )));
        }

        let optional = [self.height, self.min_height, self.min_y, self.max_y];
        let mut values = vec![self.y, self.top_margin];
        values.extend(optional.into_iter().flatten());
        if !all_finite(&values) {
            return Err(ParallaxError::validation(format!(
                "item {position} has non-finite geometry"
            )));
        }
        if self.height.is_some_and(|h| h < 0.0) || self.min_height.is_some_and(|h| h < 0.0) {
            return Err(ParallaxError::validation(format!(
                "item {position} has a negative height"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ParallaxItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallaxItem")
            .field("view", &self.view)
            .field("content_mode", &self.content_mode)
            .field("height", &self.height)
            .field("min_height", &self.min_height)
            .field("y", &self.y)
            .field("min_y", &self.min_y)
            .field("max_y", &self.max_y)
            .field("z_index", &self.z_index)
            .field("is_page", &self.is_page)
            .field("anchor", &self.anchor)
            .field("top_margin", &self.top_margin)
            .field(
                "positioned_relative_to_item_before",
                &self.positioned_relative_to_item_before,
            )
            .field(
                "adjusts_scroll_view_top_inset",
                &self.adjusts_scroll_view_top_inset,
            )
            .field("y_relative_to_safe_area", &self.y_relative_to_safe_area)
            .field(
                "limits_relative_to_safe_area",
                &self.limits_relative_to_safe_area,
            )
            .field("on_y_progress", &self.on_y_progress.is_some())
            .field("on_height_progress", &self.on_height_progress.is_some())
            .finish()
    }
}

/// Ordered arena of descriptors.
///
/// Declaration order is resolution order: an item may only anchor to an item
/// pushed before it.
#[derive(Debug, Default)]
pub struct ItemSet {
    items: Vec<ParallaxItem>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from items in declaration order.
    pub fn from_items(items: impl IntoIterator<Item = ParallaxItem>) -> ParallaxResult<Self> {
        let mut set = Self::new();
        for item in items {
            set.push(item)?;
        }
        Ok(set)
    }

    /// Appends `item` and returns the id other items can anchor to.
    pub fn push(&mut self, item: ParallaxItem) -> ParallaxResult<ItemId> {
        let position = self.items.len();
        if let Err(err) = item.validate_at(position) {
            tracing::warn!(position, error = %err, "rejected parallax item");
            return Err(err);
        }
        self.items.push(item);
        Ok(ItemId(position))
    }

    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, item: ParallaxItem) -> ItemId {
        self.items.push(item);
        ItemId(self.items.len() - 1)
    }

    /// Re-checks every item against its position.
    pub fn validate(&self) -> ParallaxResult<()> {
        self.items
            .iter()
            .enumerate()
            .try_for_each(|(position, item)| item.validate_at(position))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&ParallaxItem> {
        self.items.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut ParallaxItem> {
        self.items.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ParallaxItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId(idx), item))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/item/descriptor.rs"]
mod tests;
