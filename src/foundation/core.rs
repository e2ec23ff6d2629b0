pub use kurbo::{Point, Rect, Vec2};

/// Opaque identity of a content view owned by the scroll host.
///
/// Descriptors only reference views; the host decides what a handle means and
/// answers measurement queries for it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ViewHandle(pub u64);

/// Position of a descriptor inside its [`crate::ItemSet`].
///
/// Anchors are expressed as `ItemId`s, so "declared earlier" is a plain index
/// comparison.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ItemId(pub usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Host-side identity of a container inserted by the controller.
///
/// One container exists per resolved item, so the id mirrors the item it wraps.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ContainerId(pub usize);

impl From<ItemId> for ContainerId {
    fn from(value: ItemId) -> Self {
        Self(value.0)
    }
}

/// Returns `true` when every value is a finite number.
pub(crate) fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
