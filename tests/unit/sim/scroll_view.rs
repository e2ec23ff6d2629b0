use super::*;
use crate::item::content_mode::ContentPlacement;

fn frame(top: f64) -> ContainerFrame {
    ContainerFrame {
        top,
        height: 10.0,
        content: ContentPlacement {
            top: 0.0,
            height: 10.0,
        },
    }
}

#[test]
fn offset_changes_queue_only_while_observed() {
    let mut sv = SimScrollView::new(100.0, 200.0);
    sv.set_content_offset_y(10.0, false);
    assert!(sv.take_bounds_changes().is_empty());

    let obs = sv.observe_bounds();
    assert!(sv.is_observed());
    sv.set_content_offset_y(25.0, false);
    sv.set_content_offset_y(25.0, false);
    let changes = sv.take_bounds_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old.y0, 10.0);
    assert_eq!(changes[0].new.y0, 25.0);
    assert!(changes[0].is_scrolling_up());

    sv.set_content_offset_y(30.0, false);
    sv.invalidate_observation(obs);
    assert!(!sv.is_observed());
    assert!(sv.take_bounds_changes().is_empty());
}

#[test]
fn stale_observation_does_not_cancel_a_newer_one() {
    let mut sv = SimScrollView::new(100.0, 200.0);
    let first = sv.observe_bounds();
    let second = sv.observe_bounds();
    assert_ne!(first.id(), second.id());
    sv.invalidate_observation(first);
    assert!(sv.is_observed());
}

#[test]
fn bounds_track_offset() {
    let mut sv = SimScrollView::new(390.0, 844.0);
    sv.set_content_offset_y(-47.0, true);
    assert_eq!(sv.bounds(), Rect::new(0.0, -47.0, 390.0, 797.0));
    assert_eq!(sv.last_animated_target(), Some(-47.0));
}

#[test]
fn unknown_views_measure_zero() {
    let sv = SimScrollView::new(1.0, 1.0).with_view(ViewHandle(3), 120.0);
    assert_eq!(sv.intrinsic_height(ViewHandle(3)), 120.0);
    assert_eq!(sv.intrinsic_height(ViewHandle(4)), 0.0);
}

#[test]
fn child_order_follows_bring_to_front() {
    let mut sv = SimScrollView::new(1.0, 1.0);
    for i in 0..3 {
        sv.insert_container(ContainerId(i), ViewHandle(i as u64), frame(0.0));
    }
    sv.bring_to_front(ContainerId(0));
    let order: Vec<_> = sv.children().iter().map(|c| c.id.0).collect();
    assert_eq!(order, vec![1, 2, 0]);

    sv.apply_container_frame(ContainerId(2), frame(42.0));
    assert_eq!(sv.container(ContainerId(2)).map(|c| c.frame.top), Some(42.0));

    sv.remove_container(ContainerId(1));
    assert_eq!(sv.children().len(), 2);
    assert!(sv.container(ContainerId(1)).is_none());
}
