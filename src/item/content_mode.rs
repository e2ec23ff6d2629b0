/// How a content view is aligned or stretched inside its container when the
/// container height differs from the content's natural height.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Content always matches the container, stretching and shrinking with it.
    Fill,
    /// Pinned to the top; clipped at the bottom when the container shrinks.
    #[default]
    Top,
    /// Pinned to the top and stretched when the container grows; clipped at
    /// the bottom when it shrinks.
    TopFill,
    /// Centered; clipped at both edges when the container shrinks.
    Center,
    /// Centered and stretched when the container grows; clipped at both edges
    /// when it shrinks.
    CenterFill,
    /// Pinned to the bottom; clipped at the top when the container shrinks.
    Bottom,
    /// Pinned to the bottom and stretched when the container grows; clipped at
    /// the top when it shrinks.
    BottomFill,
}

impl ContentMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Fill,
        Self::Top,
        Self::TopFill,
        Self::Center,
        Self::CenterFill,
        Self::Bottom,
        Self::BottomFill,
    ];

    /// Filling modes grow with the container. Items using them default their
    /// `max_y` to their rest position.
    pub fn is_filling(self) -> bool {
        matches!(
            self,
            Self::Fill | Self::TopFill | Self::CenterFill | Self::BottomFill
        )
    }

    /// Places content of `natural_height` inside a box of `box_height`.
    ///
    /// The returned frame is relative to the box top and may extend outside
    /// `[0, box_height]`; the container clips it.
    pub fn place(self, box_height: f64, natural_height: f64) -> ContentPlacement {
        let stretched = natural_height.max(box_height);
        let (top, height) = match self {
            Self::Fill => (0.0, box_height),
            Self::Top => (0.0, natural_height),
            Self::TopFill => (0.0, stretched),
            Self::Center => ((box_height - natural_height) * 0.5, natural_height),
            Self::CenterFill => ((box_height - stretched) * 0.5, stretched),
            Self::Bottom => (box_height - natural_height, natural_height),
            Self::BottomFill => (box_height - stretched, stretched),
        };
        ContentPlacement { top, height }
    }
}

/// Content frame inside its container, in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentPlacement {
    /// Offset of the content top from the container top.
    pub top: f64,
    /// Content height.
    pub height: f64,
}

impl ContentPlacement {
    /// Portion of the content hidden by the container bounds, as
    /// `(clipped_top, clipped_bottom)`.
    pub fn clipped(self, box_height: f64) -> (f64, f64) {
        let clipped_top = (-self.top).max(0.0);
        let clipped_bottom = (self.top + self.height - box_height).max(0.0);
        (clipped_top, clipped_bottom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/item/content_mode.rs"]
mod tests;
