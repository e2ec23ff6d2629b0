use super::*;
use crate::{
    host::{InsetAdjustment, ScrollHost},
    item::content_mode::ContentMode,
};

const HEADER_SCENE: &str = r#"{
    "viewport": [390, 844],
    "safe_area_top": 47,
    "snap": { "down_threshold": 80 },
    "items": [
        {
            "name": "header",
            "height": 120,
            "min_height": 43,
            "content_mode": "top_fill",
            "position": { "kind": "fixed", "y": 91 },
            "z_index": 1
        },
        { "name": "cards", "intrinsic_height": 150, "limits": { "min_y": 43 }, "page": true },
        { "name": "indicator", "intrinsic_height": 16 }
    ]
}"#;

#[test]
fn parses_and_builds_header_scene() {
    let scene = Scene::from_json_str(HEADER_SCENE).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.snap_config().down_threshold, 80.0);
    assert_eq!(scene.item_labels(), vec!["header", "cards", "indicator"]);

    let (host, items) = scene.build().unwrap();
    assert_eq!(host.safe_area_top(), 47.0);
    assert_eq!(host.bounds().width(), 390.0);
    assert_eq!(host.intrinsic_height(ViewHandle(1)), 150.0);
    assert_eq!(items.len(), 3);

    let header = items.get(ItemId(0)).unwrap();
    assert_eq!(header.mode(), ContentMode::TopFill);
    assert_eq!(header.min_y, Some(91.0));
    assert_eq!(header.z_index, 1);
    assert!(items.get(ItemId(1)).unwrap().is_page);
}

#[test]
fn defaults_fill_in_missing_fields() {
    let scene = Scene::from_json_str(r#"{ "items": [ {} ] }"#).unwrap();
    assert_eq!(scene.def.viewport.height, 844.0);
    assert_eq!(scene.def.inset_adjustment, InsetAdjustment::Automatic);
    assert_eq!(scene.snap_config(), SnapConfig::default());

    let item = &scene.def.items[0];
    assert_eq!(item.position, PositionDef::ItemBefore { top_margin: 0.0 });
    assert!(item.adjusts_scroll_view_top_inset);
    assert_eq!(scene.item_labels(), vec!["item[0]"]);
}

#[test]
fn viewport_accepts_object_form() {
    let scene =
        Scene::from_json_str(r#"{ "viewport": { "width": 320, "height": 568 }, "items": [] }"#)
            .unwrap();
    assert_eq!(scene.def.viewport.width, 320.0);
    assert_eq!(scene.def.viewport.height, 568.0);
}

#[test]
fn anchors_resolve_by_index() {
    let scene = Scene::from_json_str(
        r#"{ "items": [
            { "height": 40, "position": { "kind": "absolute", "y": 0 } },
            { "intrinsic_height": 10, "position": { "kind": "anchor", "item": 0, "top_margin": 10 } }
        ] }"#,
    )
    .unwrap();
    let mut p = scene.build_parallax().unwrap();
    p.activate().unwrap();
    assert_eq!(p.resolved_items()[1].y, 50.0);
}

#[test]
fn forward_anchor_is_a_configuration_error() {
    let scene = Scene::from_json_str(
        r#"{ "items": [
            { "name": "a", "position": { "kind": "anchor", "item": 1 } },
            { "name": "b" }
        ] }"#,
    )
    .unwrap();
    let err = scene.build().unwrap_err();
    assert!(matches!(err, ParallaxError::Configuration(_)));
    assert!(err.to_string().contains("a:"), "{err}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Scene::from_json_str("{ \"items\": 3 }").unwrap_err();
    assert!(matches!(err, ParallaxError::Serde(_)));

    let err = Scene::from_json_str(r#"{ "items": [ { "position": { "kind": "sideways" } } ] }"#)
        .unwrap_err();
    assert!(matches!(err, ParallaxError::Serde(_)));
}

#[test]
fn validation_rejects_bad_host_and_items() {
    for json in [
        r#"{ "viewport": [0, 844], "items": [] }"#,
        r#"{ "items": [ { "intrinsic_height": -1 } ] }"#,
        r#"{ "items": [ { "position": { "kind": "fixed", "y": 1 }, "limits": { "min_y": 0 } } ] }"#,
    ] {
        let scene = Scene::from_json_str(json).unwrap();
        let err = scene.validate().unwrap_err();
        assert!(matches!(err, ParallaxError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = Scene::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
    let ParallaxError::Other(inner) = &err else {
        panic!("expected an io failure, got {err:?}");
    };
    let io = inner.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
}
