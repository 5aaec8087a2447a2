//! Checkbox driven end to end through the host runtime

use std::cell::RefCell;
use std::rc::Rc;

use ion_core::events::{Event, KeyCode};
use ion_widgets::prelude::*;
use ion_widgets::{CheckboxChange, CheckboxStyle};

struct Harness {
    rt: Runtime,
    id: WidgetId,
    changes: Rc<RefCell<Vec<CheckboxChange>>>,
    styles: Rc<RefCell<Vec<CheckboxStyle>>>,
}

fn mount(builder: CheckboxBuilder) -> Harness {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let styles = Rc::new(RefCell::new(Vec::new()));
    let c = changes.clone();
    let s = styles.clone();

    let mut rt = Runtime::new();
    let id = rt.mount(move |ctx| {
        builder
            .on_change(move |ev| c.borrow_mut().push(*ev))
            .on_style(move |ev| s.borrow_mut().push(*ev))
            .build(ctx)
    });
    Harness {
        rt,
        id,
        changes,
        styles,
    }
}

#[test]
fn mount_reports_initial_style_once() {
    let mut h = mount(checkbox().checked(true));
    assert!(h.styles.borrow().is_empty());

    assert_eq!(h.rt.tick(), 1);
    assert_eq!(
        *h.styles.borrow(),
        vec![CheckboxStyle {
            disabled: false,
            checked: true
        }]
    );
    assert!(h.changes.borrow().is_empty());
}

#[test]
fn click_emits_change_then_style() {
    let mut h = mount(checkbox());
    h.rt.run_until_idle();
    h.styles.borrow_mut().clear();

    h.rt.dispatch(h.id, Event::click()).unwrap();
    assert_eq!(*h.changes.borrow(), vec![CheckboxChange { checked: true }]);
    assert!(h.styles.borrow().is_empty());

    h.rt.run_until_idle();
    assert_eq!(
        *h.styles.borrow(),
        vec![CheckboxStyle {
            disabled: false,
            checked: true
        }]
    );
    assert_eq!(
        serde_json::to_string(&h.styles.borrow()[0]).unwrap(),
        r#"{"checkbox-disabled":false,"checkbox-checked":true}"#
    );
}

#[test]
fn burst_within_a_tick_collapses_to_one_style() {
    let mut h = mount(checkbox());

    for _ in 0..5 {
        h.rt.dispatch(h.id, Event::click()).unwrap();
    }
    {
        let (cb, ctx) = h.rt.widget_mut::<Checkbox>(h.id).unwrap();
        cb.set_disabled(ctx, true);
    }

    assert_eq!(h.rt.tick(), 1);
    assert_eq!(h.changes.borrow().len(), 5);
    assert_eq!(
        *h.styles.borrow(),
        vec![CheckboxStyle {
            disabled: true,
            checked: true
        }]
    );
    assert_eq!(h.rt.tick(), 0);
}

#[test]
fn space_on_focused_checkbox_toggles_once_and_is_contained() {
    let mut h = mount(checkbox());
    h.rt.focus(h.id).unwrap();

    let ev = h.rt.dispatch_key(Event::key_down(KeyCode::Space)).unwrap();
    assert!(ev.propagation_stopped);
    assert!(ev.default_prevented);
    assert_eq!(*h.changes.borrow(), vec![CheckboxChange { checked: true }]);
    assert!(h.rt.widget::<Checkbox>(h.id).unwrap().is_checked());
}

#[test]
fn space_on_focused_disabled_checkbox_still_toggles() {
    let mut h = mount(checkbox().disabled(true));
    h.rt.focus(h.id).unwrap();

    let ev = h.rt.dispatch_key(Event::key_down(KeyCode::Space)).unwrap();
    assert!(ev.propagation_stopped);
    assert!(ev.default_prevented);
    assert_eq!(*h.changes.borrow(), vec![CheckboxChange { checked: true }]);

    // Pointer input stays blocked
    h.rt.dispatch(h.id, Event::click()).unwrap();
    assert_eq!(h.changes.borrow().len(), 1);
    assert!(h.rt.widget::<Checkbox>(h.id).unwrap().is_checked());
}

#[test]
fn space_dispatched_to_unfocused_checkbox_is_ignored() {
    let mut h = mount(checkbox());

    let ev = h.rt.dispatch(h.id, Event::key_down(KeyCode::Space)).unwrap();
    assert!(!ev.propagation_stopped);
    assert!(!ev.default_prevented);
    assert!(h.changes.borrow().is_empty());
    assert!(!h.rt.widget::<Checkbox>(h.id).unwrap().is_checked());
}

#[test]
fn property_assignment_through_runtime() {
    let mut h = mount(checkbox());
    h.rt.run_until_idle();
    h.styles.borrow_mut().clear();

    {
        let (cb, ctx) = h.rt.widget_mut::<Checkbox>(h.id).unwrap();
        cb.set_checked(ctx, true);
        cb.set_checked(ctx, true);
    }
    assert_eq!(h.changes.borrow().len(), 1);

    h.rt.run_until_idle();
    assert_eq!(h.styles.borrow().len(), 1);
}

#[test]
fn render_reflects_state_and_clears_dirty() {
    let mut h = mount(checkbox().id("cb").label_id("lbl").mode(Mode::Ios));
    h.rt.render(h.id).unwrap();
    assert!(!h.rt.context().is_dirty(h.id));

    h.rt.dispatch(h.id, Event::click()).unwrap();
    assert!(h.rt.context().is_dirty(h.id));

    let rendered = h.rt.render(h.id).unwrap();
    assert_eq!(
        rendered.markup(),
        concat!(
            r#"<div class="checkbox-icon checkbox-checked"><div class="checkbox-inner"></div></div>"#,
            r#"<button class="checkbox-cover" id="cb" aria-checked="true" aria-labelledby="lbl" role="checkbox" tabindex="0" onclick></button>"#
        )
    );
    assert_eq!(
        rendered.host.classes.class_string(),
        "checkbox checkbox-ios checkbox-checked"
    );
}

#[test]
fn unmount_cancels_pending_style() {
    let mut h = mount(checkbox());
    h.rt.dispatch(h.id, Event::click()).unwrap();
    h.rt.unmount(h.id).unwrap();

    assert_eq!(h.rt.tick(), 0);
    assert!(h.styles.borrow().is_empty());
    assert_eq!(h.rt.context().pending_timers(), 0);
}

#[test]
fn checkbox_built_from_config_document() {
    let config = CheckboxConfig::from_json(r#"{ "checked": true, "value": "sausage" }"#).unwrap();
    let mut h = mount(checkbox().config(config));

    let cb = h.rt.widget::<Checkbox>(h.id).unwrap();
    assert!(cb.is_checked());
    assert_eq!(cb.value(), Some("sausage"));

    h.rt.dispatch(h.id, Event::click()).unwrap();
    assert_eq!(*h.changes.borrow(), vec![CheckboxChange { checked: false }]);
}
