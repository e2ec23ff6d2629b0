//! Parallax is a scroll-driven layout engine.
//!
//! Views placed on top of a scrollable container are repositioned and resized
//! on every scroll event according to declarative per-item rules: sticky
//! headers clamped at a minimum position, stretchy headers that grow when
//! pulled down, items that shrink toward a minimum height, and paging snap
//! points.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build [`ParallaxItem`]s and collect them in an [`ItemSet`]
//! 2. **Resolve**: [`resolve_items`] turns descriptors into absolute [`ResolvedItem`]s
//! 3. **Lay out**: on every bounds change, [`Parallax`] clamps each container and
//!    publishes `y` / height progress through callbacks and a [`LayoutReport`]
//! 4. **Snap** (optional): on drag release, [`Parallax::will_end_dragging`] picks a page
//!
//! The scroll container is abstracted by [`ScrollHost`]; [`SimScrollView`] is an
//! in-memory implementation used by the tests, the scene loader and the CLI.
#![forbid(unsafe_code)]

mod controller;
mod foundation;
mod host;
mod item;
mod layout;
mod scene;
mod transform;

/// Built-in demo screen.
pub mod demo;
/// Headless scroll host and dispatch helpers.
pub mod sim;

pub use controller::parallax::Parallax;
pub use controller::snap::{
    ScrollDirection, SnapConfig, offsets_down, offsets_up, snap_target,
};
pub use foundation::core::{ContainerId, ItemId, Point, Rect, Vec2, ViewHandle};
pub use foundation::error::{ParallaxError, ParallaxResult};
pub use host::{BoundsChange, BoundsObservation, DragEnd, InsetAdjustment, ScrollHost};
pub use item::content_mode::{ContentMode, ContentPlacement};
pub use item::descriptor::{ItemSet, ParallaxItem, ProgressCallback};
pub use layout::container::{ContainerFrame, ItemContainer};
pub use layout::pass::{
    ItemFrame, LayoutReport, ProgressChange, ScrollMetrics, SolvedGeometry, publish_progress,
    solve,
};
pub use scene::loader::Scene;
pub use sim::scroll_view::{SimContainer, SimScrollView};
pub use transform::resolver::{ResolvedItem, resolve_items};
