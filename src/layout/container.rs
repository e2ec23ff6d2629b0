use crate::{
    foundation::core::ContainerId,
    item::content_mode::{ContentMode, ContentPlacement},
    transform::resolver::ResolvedItem,
};

/// Geometry the host applies to one container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContainerFrame {
    /// Container top relative to the scroll content top.
    pub top: f64,
    /// Container height.
    pub height: f64,
    /// Content view frame inside the container.
    pub content: ContentPlacement,
}

/// Runtime wrapper around one resolved item.
///
/// Owns the live top and height applied to the scroll container and keeps
/// the content placement in sync with them. The content's natural height is
/// the resolved rest height.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemContainer {
    id: ContainerId,
    item: ResolvedItem,
    top: f64,
    height: f64,
    content: ContentPlacement,
}

impl ItemContainer {
    pub fn new(item: ResolvedItem) -> Self {
        let content = item.content_mode.place(item.height, item.height);
        Self {
            id: ContainerId::from(item.id),
            top: item.y,
            height: item.height,
            content,
            item,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn item(&self) -> &ResolvedItem {
        &self.item
    }

    pub(crate) fn item_mut(&mut self) -> &mut ResolvedItem {
        &mut self.item
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn content(&self) -> ContentPlacement {
        self.content
    }

    pub fn frame(&self) -> ContainerFrame {
        ContainerFrame {
            top: self.top,
            height: self.height,
            content: self.content,
        }
    }

    /// Applies a new live box and re-aligns the content inside it.
    pub fn set(&mut self, top: f64, height: f64) {
        self.top = top;
        self.height = height;
        self.content = self.item.content_mode.place(height, self.item.height);
    }

    /// Switches the content mode; returns `false` when nothing changed.
    pub fn set_content_mode(&mut self, mode: ContentMode) -> bool {
        if self.item.content_mode == mode {
            return false;
        }
        self.item.content_mode = mode;
        self.content = mode.place(self.height, self.item.height);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/container.rs"]
mod tests;
