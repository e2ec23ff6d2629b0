use serde::{Deserialize, Serialize};

use crate::{
    controller::snap::SnapConfig, host::InsetAdjustment, item::content_mode::ContentMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct ViewportDef {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl<'de> Deserialize<'de> for ViewportDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { width: f64, height: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([width, height]) => Ok(Self { width, height }),
            Repr::Obj { width, height } => Ok(Self { width, height }),
        }
    }
}

impl Default for ViewportDef {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum PositionDef {
    ItemBefore {
        #[serde(default)]
        top_margin: f64,
    },
    Anchor {
        item: usize,
        #[serde(default)]
        top_margin: f64,
    },
    Absolute {
        y: f64,
        #[serde(default)]
        relative_to_safe_area: bool,
    },
    Fixed {
        y: f64,
        #[serde(default)]
        relative_to_safe_area: bool,
    },
}

impl Default for PositionDef {
    fn default() -> Self {
        Self::ItemBefore { top_margin: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct LimitsDef {
    #[serde(default)]
    pub(crate) min_y: Option<f64>,
    #[serde(default)]
    pub(crate) max_y: Option<f64>,
    #[serde(default)]
    pub(crate) relative_to_safe_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ItemDef {
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Height the simulated view reports when measured.
    #[serde(default)]
    pub(crate) intrinsic_height: f64,
    #[serde(default)]
    pub(crate) content_mode: ContentMode,
    #[serde(default)]
    pub(crate) height: Option<f64>,
    #[serde(default)]
    pub(crate) min_height: Option<f64>,
    #[serde(default)]
    pub(crate) position: PositionDef,
    #[serde(default)]
    pub(crate) limits: Option<LimitsDef>,
    #[serde(default)]
    pub(crate) z_index: i32,
    #[serde(default)]
    pub(crate) page: bool,
    #[serde(default = "default_true")]
    pub(crate) adjusts_scroll_view_top_inset: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SceneDef {
    #[serde(default)]
    pub(crate) viewport: ViewportDef,
    #[serde(default)]
    pub(crate) safe_area_top: f64,
    #[serde(default)]
    pub(crate) inset_adjustment: InsetAdjustment,
    #[serde(default)]
    pub(crate) snap: SnapConfig,
    pub(crate) items: Vec<ItemDef>,
}
