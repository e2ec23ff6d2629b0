use crate::{
    controller::snap::{self, ScrollDirection, SnapConfig},
    foundation::core::ItemId,
    foundation::error::{ParallaxError, ParallaxResult},
    host::{BoundsChange, BoundsObservation, DragEnd, InsetAdjustment, ScrollHost},
    item::content_mode::ContentMode,
    item::descriptor::ItemSet,
    layout::container::ItemContainer,
    layout::pass::{LayoutReport, ScrollMetrics, layout_container},
    transform::resolver::{ResolvedItem, resolve_items},
};

/// Drives a set of parallax items inside one scroll container.
///
/// Inactive after construction. [`Parallax::activate`] resolves the items,
/// reserves the top inset, inserts one container per item and starts
/// observing bounds changes; [`Parallax::deactivate`] undoes all of it and
/// also runs on drop.
pub struct Parallax<H: ScrollHost> {
    host: H,
    items: ItemSet,
    resolved: Vec<ResolvedItem>,
    containers: Vec<ItemContainer>,
    observation: Option<BoundsObservation>,
    saved_safe_area_top: f64,
    direction: ScrollDirection,
    is_active: bool,
    snap_config: SnapConfig,
}

impl<H: ScrollHost> Parallax<H> {
    pub fn new(host: H, items: ItemSet) -> ParallaxResult<Self> {
        items.validate()?;
        Ok(Self {
            host,
            items,
            resolved: Vec::new(),
            containers: Vec::new(),
            observation: None,
            saved_safe_area_top: 0.0,
            direction: ScrollDirection::default(),
            is_active: false,
            snap_config: SnapConfig::default(),
        })
    }

    pub fn with_snap_config(mut self, config: SnapConfig) -> Self {
        self.snap_config = config;
        self
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    /// Resolved snapshots in declaration order; empty while inactive.
    pub fn resolved_items(&self) -> &[ResolvedItem] {
        &self.resolved
    }

    /// Live containers, front-most first.
    pub fn containers(&self) -> &[ItemContainer] {
        &self.containers
    }

    /// Direction of the last observed bounds change.
    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn snap_config(&self) -> SnapConfig {
        self.snap_config
    }

    /// Resolves the items and attaches them to the host.
    ///
    /// Returns the report of the initial layout pass. Activating an active
    /// controller rebuilds it from scratch.
    #[tracing::instrument(skip(self), fields(items = self.items.len()))]
    pub fn activate(&mut self) -> ParallaxResult<LayoutReport> {
        if self.is_active {
            tracing::warn!("activate called on an active parallax; rebuilding");
            self.deactivate();
        }

        let safe_area_top = self.host.safe_area_top();
        let host = &self.host;
        self.resolved = resolve_items(&self.items, safe_area_top, |view| {
            host.intrinsic_height(view)
        })?;
        self.saved_safe_area_top = safe_area_top;
        self.is_active = true;

        self.reserve_top_inset();
        self.insert_containers();
        let report = self.layout_containers();
        self.observation = Some(self.host.observe_bounds());

        tracing::debug!(
            safe_area_top,
            containers = self.containers.len(),
            "parallax activated"
        );
        Ok(report)
    }

    /// Detaches from the host and restores its offset and inset.
    ///
    /// The bounds observation is dropped before anything else changes. Does
    /// nothing while inactive.
    pub fn deactivate(&mut self) {
        if !self.is_active {
            return;
        }
        if let Some(observation) = self.observation.take() {
            self.host.invalidate_observation(observation);
        }
        self.is_active = false;

        for container in self.containers.drain(..) {
            self.host.remove_container(container.id());
        }
        self.resolved.clear();

        let safe_area_top = self.host.safe_area_top();
        self.host.set_content_offset_y(-safe_area_top, false);
        self.host
            .set_content_inset_top(match self.host.inset_adjustment() {
                InsetAdjustment::Never => safe_area_top,
                InsetAdjustment::Automatic => 0.0,
            });
        tracing::debug!("parallax deactivated");
    }

    /// Rebuilds everything when the host's safe-area top moved since the last
    /// activation. Returns whether a rebuild happened.
    pub fn apply_safe_area_changes_if_needed(&mut self) -> ParallaxResult<bool> {
        let safe_area_top = self.host.safe_area_top();
        if !self.is_active || self.saved_safe_area_top == safe_area_top {
            return Ok(false);
        }
        tracing::debug!(
            old = self.saved_safe_area_top,
            new = safe_area_top,
            "safe area changed, rebuilding parallax"
        );
        self.deactivate();
        self.activate()?;
        Ok(true)
    }

    /// Reacts to a bounds notification from the host.
    ///
    /// Returns `None` when no observation is held, in which case the change is
    /// ignored entirely.
    pub fn handle_bounds_change(
        &mut self,
        change: BoundsChange,
    ) -> ParallaxResult<Option<LayoutReport>> {
        if self.observation.is_none() {
            tracing::trace!(?change, "ignoring bounds change without observation");
            return Ok(None);
        }
        self.apply_safe_area_changes_if_needed()?;
        let report = self.layout_containers();
        self.direction = if change.is_scrolling_up() {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        Ok(Some(report))
    }

    /// Runs one layout pass over every container, back-most first.
    ///
    /// Each container is clamped, its progress published (firing callbacks on
    /// change), brought to the front and given its new frame.
    pub fn layout_containers(&mut self) -> LayoutReport {
        let metrics = ScrollMetrics {
            content_offset_y: self.host.content_offset_y(),
            inset_top: self.host.adjusted_content_inset_top(),
        };

        let mut frames = Vec::with_capacity(self.containers.len());
        for container in self.containers.iter_mut().rev() {
            let (frame, change) = layout_container(container, metrics);

            if let Some(item) = self.items.get_mut(frame.item) {
                if let Some(progress) = change.y {
                    item.notify_y_progress(progress);
                }
                if let Some(progress) = change.height {
                    item.notify_height_progress(progress);
                }
            }
            if let Some(resolved) = self.resolved.get_mut(frame.item.index()) {
                resolved.y_progress = frame.y_progress;
                resolved.height_progress = frame.height_progress;
            }

            self.host.bring_to_front(container.id());
            self.host
                .apply_container_frame(container.id(), container.frame());
            frames.push(frame);
        }

        tracing::trace!(
            offset = metrics.content_offset_y,
            inset = metrics.inset_top,
            frames = frames.len(),
            "layout pass"
        );
        LayoutReport { metrics, frames }
    }

    /// Snap target for the current offset and last scroll direction.
    pub fn snap_target(&self) -> Option<f64> {
        let inset_top = self.host.adjusted_content_inset_top();
        let up = snap::offsets_up(&self.resolved, inset_top);
        let down = snap::offsets_down(&self.resolved, inset_top);
        snap::snap_target(
            &up,
            &down,
            self.host.content_offset_y(),
            self.direction,
            self.snap_config,
        )
    }

    /// Handles a drag release.
    ///
    /// When a page qualifies, momentum is cancelled by pinning the target to
    /// the current offset, and an animated scroll to the page is started.
    /// Only `target_offset.y` is rewritten; the host scrolls vertically, so
    /// `x` is passed through as the toolkit reported it.
    pub fn will_end_dragging(&mut self, drag: &mut DragEnd) -> Option<f64> {
        let target = self.snap_target()?;
        let current = self.host.content_offset_y();
        drag.target_offset.y = current;
        tracing::debug!(current, target, velocity = drag.velocity.y, "snapping to page");
        self.host.set_content_offset_y(target, true);
        Some(target)
    }

    /// Changes the content mode of `id`, re-placing its content immediately
    /// when active. The change survives re-activation.
    pub fn set_content_mode(&mut self, id: ItemId, mode: ContentMode) -> ParallaxResult<()> {
        let Some(item) = self.items.get_mut(id) else {
            return Err(ParallaxError::configuration(format!(
                "no parallax item with id {}",
                id.index()
            )));
        };
        item.content_mode = mode;

        if let Some(resolved) = self.resolved.get_mut(id.index()) {
            resolved.content_mode = mode;
        }
        if let Some(container) = self.containers.iter_mut().find(|c| c.item().id == id)
            && container.set_content_mode(mode)
        {
            self.host
                .apply_container_frame(container.id(), container.frame());
        }
        Ok(())
    }

    fn reserve_top_inset(&mut self) {
        let reservation = self
            .resolved
            .iter()
            .filter(|item| item.adjusts_scroll_view_top_inset)
            .map(ResolvedItem::bottom)
            .reduce(f64::max)
            .unwrap_or(0.0);
        let folded = match self.host.inset_adjustment() {
            InsetAdjustment::Never => 0.0,
            InsetAdjustment::Automatic => self.host.safe_area_top(),
        };
        tracing::trace!(reservation, folded, "reserving top inset");
        self.host.set_content_offset_y(-reservation, false);
        self.host.set_content_inset_top(reservation - folded);
    }

    fn insert_containers(&mut self) {
        let mut containers: Vec<ItemContainer> = self
            .resolved
            .iter()
            .rev()
            .cloned()
            .map(ItemContainer::new)
            .collect();
        containers.sort_by(|a, b| b.item().z_index.cmp(&a.item().z_index));

        for container in &containers {
            self.host
                .insert_container(container.id(), container.item().view, container.frame());
        }
        self.containers = containers;
    }
}

impl<H: ScrollHost> Drop for Parallax<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl<H: ScrollHost> std::fmt::Debug for Parallax<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parallax")
            .field("items", &self.items)
            .field("containers", &self.containers)
            .field("direction", &self.direction)
            .field("is_active", &self.is_active)
            .field("snap_config", &self.snap_config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/parallax.rs"]
mod tests;
