use super::*;
use crate::sim::scroll_view::SimScrollView;

#[test]
fn adjusted_inset_folds_safe_area_unless_disabled() {
    let mut host = SimScrollView::new(390.0, 844.0).with_safe_area_top(47.0);
    host.set_content_inset_top(100.0);
    assert_eq!(host.adjusted_content_inset_top(), 147.0);

    let mut never = SimScrollView::new(390.0, 844.0)
        .with_safe_area_top(47.0)
        .with_inset_adjustment(InsetAdjustment::Never);
    never.set_content_inset_top(100.0);
    assert_eq!(never.adjusted_content_inset_top(), 100.0);
}

fn scroll_generic<H: ScrollHost>(mut host: H) -> f64 {
    host.set_content_offset_y(-64.0, false);
    host.adjusted_content_inset_top()
}

#[test]
fn borrowed_host_forwards_to_the_underlying_host() {
    let mut host = SimScrollView::new(390.0, 844.0).with_safe_area_top(20.0);
    assert_eq!(scroll_generic(&mut host), 20.0);
    assert_eq!(host.content_offset_y(), -64.0);
}

#[test]
fn scrolling_up_means_bounds_origin_moved_down() {
    let up = BoundsChange {
        old: Rect::new(0.0, 10.0, 100.0, 110.0),
        new: Rect::new(0.0, 25.0, 100.0, 125.0),
    };
    assert!(up.is_scrolling_up());

    let down = BoundsChange {
        old: up.new,
        new: up.old,
    };
    assert!(!down.is_scrolling_up());

    let still = BoundsChange {
        old: up.old,
        new: up.old,
    };
    assert!(!still.is_scrolling_up());
}

#[test]
fn observation_token_exposes_its_id() {
    assert_eq!(BoundsObservation::new(9).id(), 9);
}
