use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    controller::{parallax::Parallax, snap::SnapConfig},
    foundation::core::{ItemId, ViewHandle, all_finite},
    foundation::error::{ParallaxError, ParallaxResult},
    item::descriptor::{ItemSet, ParallaxItem},
    scene::model::{ItemDef, PositionDef, SceneDef},
    sim::scroll_view::SimScrollView,
};

/// Scroll scene loaded from JSON: host parameters plus the item list.
///
/// Each item gets its own simulated view, identified by
/// `ViewHandle(index)`, which measures as the item's `intrinsic_height`.
///
/// ```json
/// {
///   "viewport": [390, 844],
///   "safe_area_top": 47,
///   "items": [
///     { "name": "header", "height": 120, "min_height": 43,
///       "position": { "kind": "fixed", "y": 91 }, "content_mode": "top_fill" },
///     { "name": "cards", "intrinsic_height": 150, "limits": { "min_y": 43 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parses a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ParallaxResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| ParallaxError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    pub fn from_json_str(s: &str) -> ParallaxResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parses a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ParallaxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Checks host parameters and item geometry.
    ///
    /// Anchor ordering is checked later, when the items are pushed into an
    /// [`ItemSet`].
    pub fn validate(&self) -> ParallaxResult<()> {
        let def = &self.def;
        if !all_finite(&[def.viewport.width, def.viewport.height, def.safe_area_top]) {
            return Err(ParallaxError::validation("scene host parameters must be finite"));
        }
        if def.viewport.width <= 0.0 || def.viewport.height <= 0.0 {
            return Err(ParallaxError::validation("viewport must have a positive size"));
        }
        if !def.snap.down_threshold.is_finite() {
            return Err(ParallaxError::validation("snap.down_threshold must be finite"));
        }

        for (idx, item) in def.items.iter().enumerate() {
            let label = item_label(idx, item);
            if !item.intrinsic_height.is_finite() || item.intrinsic_height < 0.0 {
                return Err(ParallaxError::validation(format!(
                    "{label}: intrinsic_height must be finite and >= 0"
                )));
            }
            if matches!(item.position, PositionDef::Fixed { .. }) && item.limits.is_some() {
                return Err(ParallaxError::validation(format!(
                    "{label}: fixed items cannot declare limits"
                )));
            }
        }
        Ok(())
    }

    pub fn snap_config(&self) -> SnapConfig {
        self.def.snap
    }

    /// Item names in declaration order; unnamed items are labelled by index.
    pub fn item_labels(&self) -> Vec<String> {
        self.def
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| item_label(idx, item))
            .collect()
    }

    /// Builds the simulated host and the descriptor set.
    #[tracing::instrument(skip(self), fields(items = self.def.items.len()))]
    pub fn build(&self) -> ParallaxResult<(SimScrollView, ItemSet)> {
        self.validate()?;
        let def = &self.def;

        let mut host = SimScrollView::new(def.viewport.width, def.viewport.height)
            .with_safe_area_top(def.safe_area_top)
            .with_inset_adjustment(def.inset_adjustment);
        let mut items = ItemSet::new();

        for (idx, item_def) in def.items.iter().enumerate() {
            let view = ViewHandle(idx as u64);
            host.register_view(view, item_def.intrinsic_height);
            items.push(item_from_def(view, item_def)).map_err(|e| match e {
                ParallaxError::Configuration(msg) => {
                    ParallaxError::configuration(format!("{}: {msg}", item_label(idx, item_def)))
                }
                other => other,
            })?;
        }
        Ok((host, items))
    }

    /// Builds a ready-to-activate controller over a fresh simulated host.
    pub fn build_parallax(&self) -> ParallaxResult<Parallax<SimScrollView>> {
        let (host, items) = self.build()?;
        Ok(Parallax::new(host, items)?.with_snap_config(self.def.snap))
    }
}

fn item_label(idx: usize, item: &ItemDef) -> String {
    match &item.name {
        Some(name) => name.clone(),
        None => format!("item[{idx}]"),
    }
}

fn item_from_def(view: ViewHandle, def: &ItemDef) -> ParallaxItem {
    let mut item = ParallaxItem::new(view)
        .content_mode(def.content_mode)
        .height(def.height, def.min_height)
        .z_index(def.z_index)
        .adjusting_scroll_view_top_inset(def.adjusts_scroll_view_top_inset);

    item = match def.position {
        PositionDef::ItemBefore { top_margin } => item.top_margin_to_item_before(top_margin),
        PositionDef::Anchor { item: anchor, top_margin } => {
            item.anchored_to(Some(ItemId(anchor)), top_margin)
        }
        PositionDef::Absolute {
            y,
            relative_to_safe_area,
        } => item.at_y(y, relative_to_safe_area),
        PositionDef::Fixed {
            y,
            relative_to_safe_area,
        } => item.fixed_y(y, relative_to_safe_area),
    };

    if let Some(limits) = def.limits {
        item = item.limits(limits.min_y, limits.max_y, limits.relative_to_safe_area);
    }
    if def.page {
        item = item.page();
    }
    item
}

#[cfg(test)]
#[path = "../../tests/unit/scene/loader.rs"]
mod tests;
