use super::*;

const LAYOUT: &str = r#"{
    "descriptors": [
        { "id": "console", "category": "bottom", "allow_multiple": true }
    ],
    "root": {
        "type": "container", "id": "window", "kind": "window", "context": true,
        "children": [
            { "type": "container", "id": "editors", "kind": "stack", "selected": 1,
              "children": [
                { "type": "part", "id": "a.rs", "context": true },
                { "type": "part", "id": "b.rs", "context": true, "dirty": true }
              ] }
        ]
    }
}"#;

#[test]
fn test_build_layout_tree() {
    let built = LayoutSpec::from_json(LAYOUT).unwrap().build().unwrap();
    let model = &built.application.model;
    let editors = built.handle("editors").unwrap();
    let b = built.handle("b.rs").unwrap();

    assert_eq!(model.element_id(built.root), Some("window"));
    assert_eq!(model.children(editors).len(), 2);
    assert_eq!(model.selected(editors), Some(b));
    assert!(model.is_dirty(b));
    assert!(!model.has_pending_events());
    assert_eq!(built.application.descriptors.len(), 1);
}

#[test]
fn test_contexts_nest_under_nearest_context_owner() {
    let built = LayoutSpec::from_json(LAYOUT).unwrap().build().unwrap();
    let app = &built.application;
    let window_ctx = app.model.context(built.root).unwrap();
    let a_ctx = app.model.context(built.handle("a.rs").unwrap()).unwrap();

    assert_eq!(app.contexts.parent(window_ctx), Some(app.context()));
    assert_eq!(app.contexts.parent(a_ctx), Some(window_ctx));
    assert!(app.model.context(built.handle("editors").unwrap()).is_none());
}

#[test]
fn test_selected_out_of_range_is_rejected() {
    let text = r#"{ "root": { "type": "container", "id": "w", "kind": "stack", "selected": 0 } }"#;
    let err = LayoutSpec::from_json(text).unwrap().build().unwrap_err();
    assert!(matches!(err, LayoutError::SelectedOutOfRange { index: 0, .. }));
}

#[test]
fn test_part_root_is_rejected() {
    let text = r#"{ "root": { "type": "part", "id": "p" } }"#;
    let err = LayoutSpec::from_json(text).unwrap().build().unwrap_err();
    assert!(matches!(err, LayoutError::RootNotContainer));
}
