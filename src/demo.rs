//! Built-in demo screen: a status header pinned below the navigation bar that
//! shrinks as content scrolls under it, a sticky card slider, and a drag
//! indicator stacked below the cards.

use std::{cell::Cell, rc::Rc};

use crate::{
    controller::parallax::Parallax,
    foundation::core::{ItemId, ViewHandle},
    foundation::error::ParallaxResult,
    foundation::math::lerp_clamped,
    host::ScrollHost,
    item::content_mode::ContentMode,
    item::descriptor::{ItemSet, ParallaxItem},
    layout::pass::LayoutReport,
    sim::{self, scroll_view::SimScrollView},
};

pub const HEADER_VIEW: ViewHandle = ViewHandle(1);
pub const CARDS_VIEW: ViewHandle = ViewHandle(2);
pub const INDICATOR_VIEW: ViewHandle = ViewHandle(3);

/// Device and view measurements the demo is laid out with.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DemoMetrics {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub safe_area_top: f64,
    /// Bottom edge of the navigation bar; the header is pinned here.
    pub navigation_bar_max_y: f64,
    pub status_height: f64,
    /// Header floor, and the line the cards stick to.
    pub cards_min_y: f64,
    pub cards_height: f64,
    pub indicator_height: f64,
}

impl Default for DemoMetrics {
    fn default() -> Self {
        Self {
            viewport_width: 390.0,
            viewport_height: 844.0,
            safe_area_top: 47.0,
            navigation_bar_max_y: 91.0,
            status_height: 120.0,
            cards_min_y: 43.0,
            cards_height: 150.0,
            indicator_height: 16.0,
        }
    }
}

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self::from_hex(0xFFFFFF);

    /// Builds a color from `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f64 / 255.0,
            g: ((hex >> 8) & 0xFF) as f64 / 255.0,
            b: (hex & 0xFF) as f64 / 255.0,
        }
    }

    /// Moves toward `other` by `t`, clamped; `t <= 0` and `t >= 1` return the
    /// endpoints exactly.
    pub fn translated(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp_clamped(self.r, other.r, t),
            g: lerp_clamped(self.g, other.g, t),
            b: lerp_clamped(self.b, other.b, t),
        }
    }

    /// `#RRGGBB`, channels rounded to the nearest byte.
    pub fn to_hex_string(self) -> String {
        fn byte(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Header background at full progress.
pub const HEADER_TINT: Rgb = Rgb::from_hex(0xDFCAE4);

/// Visual state of the status header for a given height progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HeaderStyle {
    pub alpha: f64,
    pub scale: f64,
    pub background: Rgb,
}

impl HeaderStyle {
    /// `progress` is the header's height progress: 1 at rest, 0 fully
    /// collapsed, above 1 while stretched.
    pub fn from_progress(progress: f64) -> Self {
        Self {
            alpha: progress.clamp(0.0, 1.0),
            scale: 0.5 + progress * 0.5,
            background: HEADER_TINT.translated(Rgb::WHITE, 1.0 - progress),
        }
    }
}

/// The demo screen running over a simulated scroll view.
pub struct DemoScreen {
    parallax: Parallax<SimScrollView>,
    header_progress: Rc<Cell<f64>>,
    header: ItemId,
    cards: ItemId,
    indicator: ItemId,
}

impl DemoScreen {
    pub fn new(metrics: DemoMetrics) -> ParallaxResult<Self> {
        let host = SimScrollView::new(metrics.viewport_width, metrics.viewport_height)
            .with_safe_area_top(metrics.safe_area_top)
            .with_view(HEADER_VIEW, metrics.status_height)
            .with_view(CARDS_VIEW, metrics.cards_height)
            .with_view(INDICATOR_VIEW, metrics.indicator_height);

        let header_progress = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&header_progress);

        let mut items = ItemSet::new();
        let header = items.push(
            ParallaxItem::new(HEADER_VIEW)
                .fixed_y(metrics.navigation_bar_max_y, false)
                .content_mode(ContentMode::TopFill)
                .height(Some(metrics.status_height), Some(metrics.cards_min_y))
                .on_height_progress(move |p| sink.set(p))
                .z_index(1),
        )?;
        let cards = items.push(
            ParallaxItem::new(CARDS_VIEW).limits(Some(metrics.cards_min_y), None, false),
        )?;
        let indicator = items.push(ParallaxItem::new(INDICATOR_VIEW))?;

        Ok(Self {
            parallax: Parallax::new(host, items)?,
            header_progress,
            header,
            cards,
            indicator,
        })
    }

    pub fn activate(&mut self) -> ParallaxResult<LayoutReport> {
        self.parallax.activate()
    }

    /// Scrolls to `position` points past the rest offset.
    pub fn scroll_to_position(&mut self, position: f64) -> ParallaxResult<Option<LayoutReport>> {
        let rest = -self.parallax.host().adjusted_content_inset_top();
        sim::scroll_to(&mut self.parallax, rest + position)
    }

    /// Last height progress reported for the header.
    pub fn header_progress(&self) -> f64 {
        self.header_progress.get()
    }

    pub fn header_style(&self) -> HeaderStyle {
        HeaderStyle::from_progress(self.header_progress())
    }

    pub fn header(&self) -> ItemId {
        self.header
    }

    pub fn cards(&self) -> ItemId {
        self.cards
    }

    pub fn indicator(&self) -> ItemId {
        self.indicator
    }

    pub fn parallax(&self) -> &Parallax<SimScrollView> {
        &self.parallax
    }
}

#[cfg(test)]
#[path = "../tests/unit/demo.rs"]
mod tests;
