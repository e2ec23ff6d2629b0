use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    foundation::core::{ContainerId, Point, Vec2, ViewHandle},
    item::descriptor::ParallaxItem,
    sim::{self, scroll_view::SimScrollView},
};

const HEADER: ViewHandle = ViewHandle(1);
const CARDS: ViewHandle = ViewHandle(2);
const INDICATOR: ViewHandle = ViewHandle(3);

fn host(adjustment: InsetAdjustment) -> SimScrollView {
    SimScrollView::new(390.0, 844.0)
        .with_safe_area_top(47.0)
        .with_inset_adjustment(adjustment)
        .with_view(HEADER, 120.0)
        .with_view(CARDS, 150.0)
        .with_view(INDICATOR, 16.0)
}

fn header_items() -> ItemSet {
    ItemSet::from_items([
        ParallaxItem::new(HEADER)
            .fixed_y(91.0, false)
            .content_mode(ContentMode::TopFill)
            .height(Some(120.0), Some(43.0)),
        ParallaxItem::new(CARDS).limits(Some(43.0), None, false),
        ParallaxItem::new(INDICATOR),
    ])
    .unwrap()
}

#[test]
fn activation_reserves_the_top_inset() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    let report = p.activate().unwrap();

    assert!(p.is_active());
    assert!(p.host().is_observed());
    assert_eq!(p.host().content_offset_y(), -377.0);
    assert_eq!(p.host().content_inset_top(), 330.0);
    assert_eq!(report.metrics.inset_top, 377.0);
    assert_eq!(report.metrics.scroll_position(), 0.0);
    assert_eq!(report.frames.len(), 3);

    let ys: Vec<f64> = p.resolved_items().iter().map(|i| i.y).collect();
    assert_eq!(ys, vec![91.0, 211.0, 361.0]);
}

#[test]
fn activation_without_inset_adjustment_keeps_full_reservation() {
    let mut p = Parallax::new(host(InsetAdjustment::Never), header_items()).unwrap();
    p.activate().unwrap();
    assert_eq!(p.host().content_offset_y(), -377.0);
    assert_eq!(p.host().content_inset_top(), 377.0);
    assert_eq!(p.host().adjusted_content_inset_top(), 377.0);
}

#[test]
fn deactivation_restores_host() {
    for (adjustment, inset) in [
        (InsetAdjustment::Automatic, 0.0),
        (InsetAdjustment::Never, 47.0),
    ] {
        let mut p = Parallax::new(host(adjustment), header_items()).unwrap();
        p.activate().unwrap();
        p.deactivate();

        assert!(!p.is_active());
        assert!(!p.host().is_observed());
        assert!(p.host().children().is_empty());
        assert!(p.containers().is_empty());
        assert!(p.resolved_items().is_empty());
        assert_eq!(p.host().content_offset_y(), -47.0);
        assert_eq!(p.host().content_inset_top(), inset);

        // Second call is a no-op.
        p.deactivate();
        assert_eq!(p.host().content_offset_y(), -47.0);
    }
}

#[test]
fn reactivation_reproduces_the_same_state() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    let first = p.activate().unwrap();
    let resolved = p.resolved_items().to_vec();
    let containers = p.containers().to_vec();
    let children = p.host().children().to_vec();

    p.deactivate();
    let second = p.activate().unwrap();

    assert_eq!(first, second);
    assert_eq!(p.resolved_items(), resolved.as_slice());
    assert_eq!(p.containers(), containers.as_slice());
    assert_eq!(p.host().children(), children.as_slice());
}

#[test]
fn activating_twice_rebuilds_once() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    p.activate().unwrap();
    p.activate().unwrap();
    assert_eq!(p.host().children().len(), 3);
    assert!(p.host().is_observed());
}

#[test]
fn later_declared_items_draw_on_top_for_equal_z() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    p.activate().unwrap();
    let order: Vec<usize> = p.host().children().iter().map(|c| c.id.0).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn every_pass_restores_the_paint_order() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    p.activate().unwrap();

    p.host_mut().bring_to_front(ContainerId(0));
    let drifted: Vec<usize> = p.host().children().iter().map(|c| c.id.0).collect();
    assert_eq!(drifted, vec![1, 2, 0]);

    sim::scroll_to(&mut p, -377.0 + 10.0).unwrap();
    let order: Vec<usize> = p.host().children().iter().map(|c| c.id.0).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn higher_z_index_draws_on_top() {
    let items = ItemSet::from_items([
        ParallaxItem::new(HEADER).z_index(1),
        ParallaxItem::new(CARDS),
        ParallaxItem::new(INDICATOR),
    ])
    .unwrap();
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), items).unwrap();
    let report = p.activate().unwrap();

    let order: Vec<usize> = p.host().children().iter().map(|c| c.id.0).collect();
    assert_eq!(order, vec![1, 2, 0]);
    let applied: Vec<usize> = report.frames.iter().map(|f| f.item.index()).collect();
    assert_eq!(applied, order);
    assert_eq!(p.containers()[0].id(), ContainerId(0));
}

#[test]
fn scrolling_drives_progress_callbacks() {
    let heights = Rc::new(RefCell::new(Vec::new()));
    let ys = Rc::new(RefCell::new(Vec::new()));
    let h = Rc::clone(&heights);
    let y = Rc::clone(&ys);

    let items = ItemSet::from_items([
        ParallaxItem::new(HEADER)
            .fixed_y(91.0, false)
            .content_mode(ContentMode::TopFill)
            .height(Some(120.0), Some(43.0))
            .on_height_progress(move |p| h.borrow_mut().push(p)),
        ParallaxItem::new(CARDS)
            .limits(Some(43.0), None, false)
            .on_y_progress(move |p| y.borrow_mut().push(p)),
        ParallaxItem::new(INDICATOR),
    ])
    .unwrap();

    let mut p = Parallax::new(host(InsetAdjustment::Automatic), items).unwrap();
    p.activate().unwrap();
    assert_eq!(*heights.borrow(), vec![1.0]);
    assert!(ys.borrow().is_empty());

    let report = sim::scroll_to(&mut p, -377.0 + 38.5).unwrap().unwrap();
    let header = report.frame(ItemId(0)).unwrap();
    assert_eq!(header.height, 81.5);
    assert_eq!(header.top, -286.0 + 38.5);

    sim::scroll_to(&mut p, -377.0 + 84.0).unwrap();
    sim::scroll_to(&mut p, -377.0 + 200.0).unwrap();
    sim::scroll_to(&mut p, -377.0 + 300.0).unwrap();

    assert_eq!(*heights.borrow(), vec![1.0, 0.5, 0.0]);
    assert_eq!(*ys.borrow(), vec![129.5 / 168.0, 0.5, 0.0]);
    assert_eq!(p.resolved_items()[0].height_progress, 0.0);
    assert_eq!(p.resolved_items()[1].y_progress, 0.0);
}

#[test]
fn fixed_header_never_reports_y_progress() {
    let ys = Rc::new(RefCell::new(Vec::new()));
    let y = Rc::clone(&ys);
    let items = ItemSet::from_items([ParallaxItem::new(HEADER)
        .fixed_y(91.0, false)
        .on_y_progress(move |p| y.borrow_mut().push(p))])
    .unwrap();
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), items).unwrap();
    p.activate().unwrap();
    for offset in [-500.0, -211.0, -100.0, 0.0, 250.0] {
        sim::scroll_to(&mut p, offset).unwrap();
    }
    assert!(ys.borrow().is_empty());
}

#[test]
fn bounds_changes_are_ignored_while_inactive() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    let change = BoundsChange {
        old: p.host().bounds(),
        new: p.host().bounds(),
    };
    assert_eq!(p.handle_bounds_change(change).unwrap(), None);

    p.activate().unwrap();
    p.deactivate();
    assert_eq!(p.handle_bounds_change(change).unwrap(), None);
}

#[test]
fn safe_area_change_triggers_one_rebuild() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    assert!(!p.apply_safe_area_changes_if_needed().unwrap());

    p.activate().unwrap();
    assert!(!p.apply_safe_area_changes_if_needed().unwrap());

    p.host_mut().set_safe_area_top(20.0);
    sim::scroll_to(&mut p, -300.0).unwrap();

    // Rebuilding resets the offset to the reservation.
    assert_eq!(p.host().content_offset_y(), -377.0);
    assert_eq!(p.host().content_inset_top(), 357.0);
    assert!(p.host().is_observed());
    assert_eq!(p.host().children().len(), 3);
    assert!(!p.apply_safe_area_changes_if_needed().unwrap());
}

#[test]
fn changes_queued_before_a_rebuild_are_dropped() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    p.activate().unwrap();

    p.host_mut().set_content_offset_y(-300.0, false);
    p.host_mut().set_content_offset_y(-350.0, false);
    p.host_mut().set_safe_area_top(20.0);

    // The first change rebuilds; the -300 -> -350 change belonged to the old
    // observation and must not run a second pass.
    let reports = sim::dispatch_pending(&mut p).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(p.scroll_direction(), ScrollDirection::Up);
    assert_eq!(p.host().content_offset_y(), -377.0);
    assert!(p.host().is_observed());
    assert!(p.host_mut().take_bounds_changes().is_empty());
}

#[test]
fn safe_area_relative_items_move_on_rebuild() {
    let items = ItemSet::from_items([ParallaxItem::new(HEADER).at_y(10.0, true)]).unwrap();
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), items).unwrap();
    p.activate().unwrap();
    assert_eq!(p.resolved_items()[0].y, 57.0);

    p.host_mut().set_safe_area_top(0.0);
    assert!(p.apply_safe_area_changes_if_needed().unwrap());
    assert_eq!(p.resolved_items()[0].y, 10.0);
}

fn paged() -> Parallax<SimScrollView> {
    let page = |view| {
        ParallaxItem::new(view)
            .height(Some(300.0), None)
            .adjusting_scroll_view_top_inset(false)
            .page()
    };
    let items = ItemSet::from_items([page(HEADER), page(CARDS), page(INDICATOR)]).unwrap();
    let mut p = Parallax::new(SimScrollView::new(390.0, 844.0), items).unwrap();
    p.activate().unwrap();
    p
}

#[test]
fn drag_release_snaps_in_scroll_direction() {
    let mut p = paged();
    assert_eq!(p.host().content_offset_y(), 0.0);

    sim::scroll_to(&mut p, 310.0).unwrap();
    assert_eq!(p.scroll_direction(), ScrollDirection::Up);

    let mut drag = DragEnd {
        velocity: Vec2::new(0.0, 1.2),
        target_offset: Point::new(4.0, 900.0),
    };
    assert_eq!(p.will_end_dragging(&mut drag), Some(600.0));
    assert_eq!(drag.target_offset, Point::new(4.0, 310.0));
    assert_eq!(p.host().last_animated_target(), Some(600.0));
    sim::dispatch_pending(&mut p).unwrap();

    sim::scroll_to(&mut p, 290.0).unwrap();
    assert_eq!(p.scroll_direction(), ScrollDirection::Down);
    assert_eq!(sim::release_drag(&mut p, Vec2::ZERO).unwrap(), Some(0.0));
    assert_eq!(p.host().content_offset_y(), 0.0);
}

#[test]
fn drag_release_far_below_pages_keeps_momentum() {
    let mut p = paged();
    sim::scroll_to(&mut p, 800.0).unwrap();
    sim::scroll_to(&mut p, 700.0).unwrap();
    assert_eq!(p.scroll_direction(), ScrollDirection::Down);

    let mut drag = DragEnd {
        velocity: Vec2::new(0.0, -0.4),
        target_offset: Point::new(0.0, 640.0),
    };
    assert_eq!(p.will_end_dragging(&mut drag), None);
    assert_eq!(drag.target_offset.y, 640.0);
    assert_eq!(p.host().content_offset_y(), 700.0);

    let mut p = paged().with_snap_config(SnapConfig {
        down_threshold: 150.0,
    });
    sim::scroll_to(&mut p, 800.0).unwrap();
    sim::scroll_to(&mut p, 700.0).unwrap();
    assert_eq!(sim::release_drag(&mut p, Vec2::ZERO).unwrap(), Some(600.0));
}

#[test]
fn content_mode_change_replaces_content() {
    let mut p = Parallax::new(host(InsetAdjustment::Automatic), header_items()).unwrap();
    p.activate().unwrap();
    sim::scroll_to(&mut p, -377.0 + 50.0).unwrap();

    // Header is 70 tall now, content 120: bottom-aligned content moves up.
    p.set_content_mode(ItemId(0), ContentMode::Bottom).unwrap();
    let child = p.host().container(ContainerId(0)).unwrap();
    assert_eq!(child.frame.height, 70.0);
    assert_eq!(child.frame.content.top, -50.0);
    assert_eq!(p.items().get(ItemId(0)).map(|i| i.mode()), Some(ContentMode::Bottom));

    let err = p.set_content_mode(ItemId(9), ContentMode::Fill).unwrap_err();
    assert!(matches!(err, ParallaxError::Configuration(_)));
}

#[test]
fn dropping_the_controller_detaches_it() {
    let mut sv = host(InsetAdjustment::Automatic);
    {
        let mut p = Parallax::new(&mut sv, header_items()).unwrap();
        p.activate().unwrap();
        assert_eq!(p.host().children().len(), 3);
    }
    assert!(sv.children().is_empty());
    assert!(!sv.is_observed());
    assert_eq!(sv.content_offset_y(), -47.0);
}
