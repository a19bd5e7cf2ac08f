use crate::models::Part;
use crate::part_service::tests::{bench, Bench, WORKBENCH};
use crate::part_service::{PartEvent, PartListener, PartService};
use crate::ElementId;
use std::cell::Cell;

/// window(ctx) > { perspective(ctx) > sash > stack > {p1, p2}, side > p3 }
const NESTED: &str = r#"{
    "root": {
        "type": "container", "id": "window", "kind": "window", "context": true,
        "children": [
            { "type": "container", "id": "perspective", "kind": "sash", "context": true,
              "children": [
                { "type": "container", "id": "sash", "kind": "sash", "children": [
                    { "type": "container", "id": "stack", "kind": "stack", "children": [
                        { "type": "part", "id": "p1", "context": true },
                        { "type": "part", "id": "p2", "context": true }
                    ] }
                ] }
            ] },
            { "type": "container", "id": "side", "kind": "stack", "children": [
                { "type": "part", "id": "p3", "context": true }
            ] }
        ]
    }
}"#;

fn active_child(b: &Bench, owner: &str) -> Option<crate::core::ContextId> {
    b.service.application().contexts.active_child(b.ctx(owner))
}

#[test]
fn test_activate_aligns_every_context_level() {
    let mut b = bench(NESTED);
    let p1 = b.h("p1");

    b.service.activate(p1);

    assert_eq!(active_child(&b, "window"), Some(b.ctx("perspective")));
    assert_eq!(active_child(&b, "perspective"), Some(b.ctx("p1")));
    assert_eq!(
        b.service.application().contexts.active_path(b.ctx("window")),
        vec![b.ctx("window"), b.ctx("perspective"), b.ctx("p1")]
    );

    let model = b.service.model();
    assert_eq!(model.selected(b.h("stack")), Some(p1));
    assert_eq!(model.selected(b.h("sash")), Some(b.h("stack")));
    assert_eq!(model.selected(b.h("window")), Some(b.h("perspective")));
    assert_eq!(b.service.active_part(), Some(p1));
    assert_eq!(
        b.take(),
        vec![
            PartEvent::Visible(p1),
            PartEvent::BroughtToTop(p1),
            PartEvent::Activated(p1),
        ]
    );
}

#[test]
fn test_activate_switches_branches() {
    let mut b = bench(NESTED);
    let (p1, p3) = (b.h("p1"), b.h("p3"));
    b.service.activate(p1);
    b.take();

    b.service.activate(p3);

    assert_eq!(active_child(&b, "window"), Some(b.ctx("p3")));
    assert_eq!(b.service.model().selected(b.h("window")), Some(b.h("side")));
    assert_eq!(
        b.take(),
        vec![
            PartEvent::Visible(p3),
            PartEvent::BroughtToTop(p3),
            PartEvent::Deactivated(p1),
            PartEvent::Activated(p3),
        ]
    );
    assert_eq!(b.service.activation_history(), &[p3, p1]);
}

#[test]
fn test_activate_twice_fires_one_activated() {
    let mut b = bench(NESTED);
    let p1 = b.h("p1");
    b.service.activate(p1);
    b.service.activate(p1);

    let activated = b
        .take()
        .into_iter()
        .filter(|e| matches!(e, PartEvent::Activated(_)))
        .count();
    assert_eq!(activated, 1);
}

#[test]
fn test_activate_forces_rendering_along_the_path() {
    let mut b = bench(NESTED);
    let (p2, stack) = (b.h("p2"), b.h("stack"));
    b.service.update(|app| {
        app.model.set_to_be_rendered(p2, false);
        app.model.set_to_be_rendered(stack, false);
    });

    b.service.activate(p2);
    assert!(b.service.model().to_be_rendered(p2));
    assert!(b.service.model().to_be_rendered(stack));
}

#[test]
fn test_operations_on_parts_outside_the_tree_are_noops() {
    let mut b = bench(NESTED);
    let loose = b.service.update(|app| app.model.insert_part("p1", Part::new()));
    let before = b.service.active_part();

    b.service.activate(loose);
    b.service.bring_to_top(loose);
    b.service.deactivate(loose);
    b.service.hide_part(loose);

    assert!(b.take().is_empty());
    assert_eq!(b.service.active_part(), before);
    assert!(b.service.model().to_be_rendered(loose));
    assert_eq!(active_child(&b, "window"), None);
}

#[test]
fn test_deactivate_clears_selection_and_active_child() {
    let mut b = bench(NESTED);
    let p1 = b.h("p1");
    b.service.activate(p1);
    b.take();

    b.service.deactivate(p1);

    assert_eq!(b.service.model().selected(b.h("stack")), None);
    assert_eq!(active_child(&b, "perspective"), None);
    assert_eq!(b.service.active_part(), None);
    assert_eq!(
        b.take(),
        vec![PartEvent::Hidden(p1), PartEvent::Deactivated(p1)]
    );
}

#[test]
fn test_deactivate_keeps_a_concurrent_reselection() {
    let mut b = bench(NESTED);
    let p1 = b.h("p1");
    b.service.activate(p1);
    let (perspective, p2_ctx) = (b.ctx("perspective"), b.ctx("p2"));
    b.service
        .update(|app| app.contexts.set_active_child(perspective, Some(p2_ctx)))
        .unwrap();

    b.service.deactivate(p1);

    assert_eq!(b.service.model().selected(b.h("stack")), None);
    assert_eq!(active_child(&b, "perspective"), Some(p2_ctx));
}

#[test]
fn test_deactivate_of_unselected_part_is_noop() {
    let mut b = bench(NESTED);
    let (p1, p2) = (b.h("p1"), b.h("p2"));
    b.service.activate(p1);
    b.take();

    b.service.deactivate(p2);
    assert!(b.take().is_empty());
    assert_eq!(b.service.model().selected(b.h("stack")), Some(p1));
}

#[test]
fn test_bring_to_top_moves_active_child_with_selection() {
    let mut b = bench(NESTED);
    let (p1, p2) = (b.h("p1"), b.h("p2"));
    b.service.activate(p1);
    b.take();

    b.service.bring_to_top(p2);

    assert_eq!(b.service.model().selected(b.h("stack")), Some(p2));
    assert_eq!(active_child(&b, "perspective"), Some(b.ctx("p2")));
    assert_eq!(b.service.active_part(), Some(p1));
    assert_eq!(
        b.take(),
        vec![
            PartEvent::Hidden(p1),
            PartEvent::Visible(p2),
            PartEvent::BroughtToTop(p2),
        ]
    );
}

#[test]
fn test_bring_to_top_of_selected_rendered_part_is_silent() {
    let mut b = bench(WORKBENCH);
    let a = b.h("a.rs");
    b.service.bring_to_top(a);
    b.take();

    b.service.bring_to_top(a);
    assert!(b.take().is_empty());
}

#[test]
fn test_bring_to_top_leaves_foreign_active_child_alone() {
    let mut b = bench(NESTED);
    let (p1, p2) = (b.h("p1"), b.h("p2"));
    b.service.bring_to_top(p1);
    let (perspective, p2_ctx) = (b.ctx("perspective"), b.ctx("p2"));
    b.service
        .update(|app| app.contexts.set_active_child(perspective, Some(p2_ctx)))
        .unwrap();

    b.service.bring_to_top(p2);
    assert_eq!(active_child(&b, "perspective"), Some(p2_ctx));

    b.service.bring_to_top(p1);
    assert_eq!(active_child(&b, "perspective"), Some(b.ctx("p1")));
}

struct Redirect {
    from: ElementId,
    to: ElementId,
    calls: Cell<usize>,
}

impl PartListener for Redirect {
    fn part_activated(&self, service: &mut PartService, part: ElementId) {
        self.calls.set(self.calls.get() + 1);
        if part == self.from {
            service.activate(self.to);
        }
    }
}

#[test]
fn test_listener_may_activate_another_part() {
    let mut b = bench(NESTED);
    let (p1, p3) = (b.h("p1"), b.h("p3"));
    let redirect = std::rc::Rc::new(Redirect {
        from: p1,
        to: p3,
        calls: Cell::new(0),
    });
    b.service.add_part_listener(redirect.clone());

    b.service.activate(p1);

    assert_eq!(b.service.active_part(), Some(p3));
    assert_eq!(redirect.calls.get(), 2);
    let events = b.take();
    assert_eq!(events.first(), Some(&PartEvent::Visible(p1)));
    assert_eq!(events.last(), Some(&PartEvent::Activated(p3)));
    assert!(events.contains(&PartEvent::Deactivated(p1)));
}

struct StealFocus {
    from: ElementId,
    to: ElementId,
}

impl PartListener for StealFocus {
    fn part_brought_to_top(&self, service: &mut PartService, part: ElementId) {
        if part == self.from {
            service.activate(self.to);
        }
    }
}

#[test]
fn test_outer_activation_wins_over_one_made_during_the_walk() {
    let mut b = bench(NESTED);
    let (p2, p3) = (b.h("p2"), b.h("p3"));
    b.service.add_part_listener(std::rc::Rc::new(StealFocus { from: p2, to: p3 }));

    b.service.activate(p2);

    assert_eq!(b.service.active_part(), Some(p2));
    assert_eq!(active_child(&b, "window"), Some(b.ctx("perspective")));
    assert_eq!(active_child(&b, "perspective"), Some(b.ctx("p2")));
    assert_eq!(b.service.model().selected(b.h("window")), Some(b.h("perspective")));
    let events = b.take();
    assert!(events.contains(&PartEvent::Activated(p3)));
    assert_eq!(
        &events[events.len() - 2..],
        &[PartEvent::Deactivated(p3), PartEvent::Activated(p2)]
    );
}
