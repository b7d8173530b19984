//! Click routing around guarded action segments.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{ICON, attach, date_config};
use segfield::{FieldConfig, GUARD, JoinCodec, SegmentSpec};
use segfield_core::{KeyCode, KeyEvent, PointerEvent, TextField};

#[test]
fn display_text_carries_guards_around_the_icon() {
    let activations = Rc::new(RefCell::new(0));
    let mut ctrl = attach(date_config(&activations));
    ctrl.notify_focus();
    assert_eq!(
        ctrl.field().text(),
        format!("yyyy-mm-dd{GUARD}{ICON}{GUARD}")
    );
    // Guards stay internal: the clean value drops icon and markers.
    ctrl.set_segment_value(0, "2024");
    ctrl.set_segment_value(1, "01");
    ctrl.set_segment_value(2, "15");
    assert_eq!(ctrl.clean_value(), "2024-01-15");
}

#[test]
fn click_inside_the_icon_activates() {
    let activations = Rc::new(RefCell::new(0));
    let mut ctrl = attach(date_config(&activations));
    ctrl.notify_focus();
    ctrl.set_segment_value(2, "15");
    // Display "yyyy-mm-15<guard>📅<guard>": icon span is chars 11..12.
    ctrl.notify_click(&PointerEvent::new(11));
    assert_eq!(*activations.borrow(), 1);
    // Focus cannot stay on the non-selectable icon.
    assert_eq!(ctrl.active_segment(), 2);
}

#[test]
fn click_on_the_left_guard_lands_on_the_day() {
    let activations = Rc::new(RefCell::new(0));
    let mut ctrl = attach(date_config(&activations));
    ctrl.notify_focus();
    // Offset 10 is the inclusive end of the day span [8, 10].
    ctrl.notify_click(&PointerEvent::new(10));
    assert_eq!(*activations.borrow(), 0);
    assert_eq!(ctrl.active_segment(), 2);
}

#[test]
fn click_past_the_right_guard_reroutes_without_activating() {
    let activations = Rc::new(RefCell::new(0));
    let mut ctrl = attach(date_config(&activations));
    ctrl.notify_focus();
    ctrl.notify_click(&PointerEvent::new(12));
    assert_eq!(*activations.borrow(), 0);
    assert_eq!(ctrl.active_segment(), 2);
    // Way past the end of the text behaves the same.
    ctrl.notify_click(&PointerEvent::new(40));
    assert_eq!(*activations.borrow(), 0);
    assert_eq!(ctrl.active_segment(), 2);
}

#[test]
fn typing_on_an_action_segment_is_absorbed() {
    let activations = Rc::new(RefCell::new(0));
    let segments = vec![
        SegmentSpec::numeric("dd").with_min(1.0).with_max(31.0),
        SegmentSpec::action(ICON)
            .selectable(true)
            .on_activate({
                let counter = Rc::clone(&activations);
                move || *counter.borrow_mut() += 1
            }),
    ];
    let mut ctrl = attach(FieldConfig::new(segments, JoinCodec::new(" ")));
    ctrl.notify_focus();
    ctrl.notify_key(&KeyEvent::new(KeyCode::Tab));
    assert_eq!(ctrl.active_segment(), 1);
    let text = ctrl.field().text();
    ctrl.notify_key(&KeyEvent::new(KeyCode::Char('7')));
    assert_eq!(ctrl.field().text(), text);
}

#[test]
fn enter_activates_a_selectable_action_segment() {
    let activations = Rc::new(RefCell::new(0));
    let segments = vec![
        SegmentSpec::numeric("dd").with_min(1.0).with_max(31.0),
        SegmentSpec::action(ICON)
            .selectable(true)
            .on_activate({
                let counter = Rc::clone(&activations);
                move || *counter.borrow_mut() += 1
            }),
    ];
    let mut ctrl = attach(FieldConfig::new(segments, JoinCodec::new(" ")));
    ctrl.notify_focus();

    // Enter on the editable day segment passes through to the host.
    assert!(!ctrl.notify_key(&KeyEvent::new(KeyCode::Enter)).is_consumed());
    assert_eq!(*activations.borrow(), 0);

    ctrl.notify_key(&KeyEvent::new(KeyCode::Tab));
    assert!(ctrl.notify_key(&KeyEvent::new(KeyCode::Enter)).is_consumed());
    assert_eq!(*activations.borrow(), 1);
}

#[test]
fn non_selectable_action_is_skipped_by_navigation() {
    let activations = Rc::new(RefCell::new(0));
    let mut ctrl = attach(date_config(&activations));
    ctrl.notify_focus();
    ctrl.focus_segment(2);
    // Right from the day: the icon is not navigable, nothing past it.
    ctrl.notify_key(&KeyEvent::new(KeyCode::Right));
    assert_eq!(ctrl.active_segment(), 2);
    // Tab out instead of wrapping onto the icon.
    assert!(!ctrl.notify_key(&KeyEvent::new(KeyCode::Tab)).is_consumed());
}

#[test]
fn marker_class_tracks_action_focus() {
    let activations = Rc::new(RefCell::new(0));
    let segments = vec![
        SegmentSpec::numeric("dd").with_min(1.0).with_max(31.0),
        SegmentSpec::action(ICON)
            .selectable(true)
            .on_activate({
                let counter = Rc::clone(&activations);
                move || *counter.borrow_mut() += 1
            }),
    ];
    let config = FieldConfig::new(segments, JoinCodec::new(" ")).with_marker_class("seg-action");
    let mut ctrl = attach(config);
    ctrl.notify_focus();
    ctrl.flush_deferred();
    assert_eq!(ctrl.field().marker_class(), None);

    ctrl.notify_key(&KeyEvent::new(KeyCode::Tab));
    assert_eq!(ctrl.field().marker_class(), Some("seg-action"));

    let back = KeyEvent::new(KeyCode::Tab).with_modifiers(segfield_core::Modifiers::SHIFT);
    ctrl.notify_key(&back);
    assert_eq!(ctrl.field().marker_class(), None);
}
