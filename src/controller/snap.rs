use crate::transform::resolver::ResolvedItem;

/// Tunables for scroll-snap targeting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Downward snapping only engages while the current offset is less than
    /// this far past the largest "down" candidate.
    pub down_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            down_threshold: 50.0,
        }
    }
}

/// Last observed scroll direction.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Offset increasing: content moving up.
    #[default]
    Up,
    /// Offset decreasing: content moving down.
    Down,
}

/// Offsets at which a page item has fully collapsed (reached `min_y` and
/// `min_height`), ascending.
pub fn offsets_up(items: &[ResolvedItem], inset_top: f64) -> Vec<f64> {
    let mut offsets: Vec<f64> = items
        .iter()
        .filter(|item| item.is_page)
        .map(|item| {
            let mut offset = item.y - item.min_y.unwrap_or(0.0);
            if let Some(min_height) = item.min_height {
                offset += item.height - min_height;
            }
            offset - inset_top
        })
        .collect();
    offsets.sort_by(f64::total_cmp);
    offsets
}

/// Offsets at which a page item sits at the top of the frame, ascending.
pub fn offsets_down(items: &[ResolvedItem], inset_top: f64) -> Vec<f64> {
    let mut offsets: Vec<f64> = items
        .iter()
        .filter(|item| item.is_page)
        .map(|item| item.y - inset_top)
        .collect();
    offsets.sort_by(f64::total_cmp);
    offsets
}

/// Picks the offset to settle on after a drag, or `None` to let momentum
/// scrolling proceed.
///
/// Scrolling up snaps forward to the nearest "up" candidate past `current`.
/// Scrolling down snaps back to the nearest "down" candidate before
/// `current`, but only near the page region. Both candidate lists must be
/// ascending, as returned by [`offsets_up`] and [`offsets_down`].
pub fn snap_target(
    up: &[f64],
    down: &[f64],
    current: f64,
    direction: ScrollDirection,
    config: SnapConfig,
) -> Option<f64> {
    match direction {
        ScrollDirection::Up => up.iter().copied().find(|&offset| offset > current),
        ScrollDirection::Down => {
            let max_down = down.iter().copied().reduce(f64::max);
            if current - max_down.unwrap_or(0.0) < config.down_threshold {
                down.iter().copied().rev().find(|&offset| offset < current)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/snap.rs"]
mod tests;
