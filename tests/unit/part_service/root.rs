use crate::models::{Application, LayoutHandles, LayoutSpec, Part};
use crate::part_service::tests::WORKBENCH;
use crate::part_service::{PartService, PartState};

fn unrooted(
    prepare: impl FnOnce(&mut Application, &LayoutHandles),
) -> (PartService, LayoutHandles) {
    let mut built = LayoutSpec::from_json(WORKBENCH).unwrap().build().unwrap();
    prepare(&mut built.application, &built.handles);
    let service = PartService::builder(built.application).build();
    (service, built.handles)
}

#[test]
fn test_without_root_queries_are_empty() {
    let (mut service, handles) = unrooted(|_, _| {});
    assert_eq!(service.root(), None);
    assert_eq!(service.find_part("a.rs"), None);
    assert!(service.parts().is_empty());
    assert!(!service.is_in_container(handles.get("a.rs").unwrap()));

    let v1 = service.show_part_by_id("v1", PartState::Visible).unwrap();
    assert_eq!(service.model().parent(v1), None);
}

#[test]
fn test_root_resolves_from_application_active_child() {
    let (mut service, handles) = unrooted(|_, _| {});
    let window = handles.get("window").unwrap();
    let app_ctx = service.application().context();
    let window_ctx = service.model().context(window).unwrap();

    service
        .update(|app| app.contexts.set_active_child(app_ctx, Some(window_ctx)))
        .unwrap();

    assert_eq!(service.root(), Some(window));
    assert_eq!(service.find_part("a.rs"), handles.get("a.rs"));
}

#[test]
fn test_root_tracking_ends_after_resolution() {
    let (mut service, handles) = unrooted(|_, _| {});
    let window = handles.get("window").unwrap();
    let app_ctx = service.application().context();
    let window_ctx = service.model().context(window).unwrap();
    service
        .update(|app| app.contexts.set_active_child(app_ctx, Some(window_ctx)))
        .unwrap();

    let other = service.update(|app| {
        let other = app.model.insert_container("other", crate::ContainerKind::Window);
        let ctx = app.contexts.create_child(app_ctx, "other").unwrap();
        app.model.set_context(other, Some(ctx));
        app.contexts.set_active_child(app_ctx, Some(ctx)).unwrap();
        other
    });

    assert_ne!(service.root(), Some(other));
    assert_eq!(service.root(), Some(window));
}

#[test]
fn test_part_context_does_not_become_root() {
    let (mut service, handles) = unrooted(|_, _| {});
    let window = handles.get("window").unwrap();
    let app_ctx = service.application().context();
    let window_ctx = service.model().context(window).unwrap();

    service.update(|app| {
        let loose = app.model.insert_part("loose", Part::new());
        let ctx = app.contexts.create_child(app_ctx, "loose").unwrap();
        app.model.set_context(loose, Some(ctx));
        app.contexts.set_active_child(app_ctx, Some(ctx)).unwrap();
    });
    assert_eq!(service.root(), None);

    service
        .update(|app| app.contexts.set_active_child(app_ctx, Some(window_ctx)))
        .unwrap();
    assert_eq!(service.root(), Some(window));
}

#[test]
fn test_active_child_set_before_construction_resolves_immediately() {
    let (service, handles) = unrooted(|app, handles| {
        let window = handles.get("window").unwrap();
        let window_ctx = app.model.context(window).unwrap();
        let app_ctx = app.context();
        app.contexts.set_active_child(app_ctx, Some(window_ctx)).unwrap();
    });
    assert_eq!(service.root(), handles.get("window"));
}

#[test]
fn test_pre_destroy_stops_root_tracking() {
    let (mut service, handles) = unrooted(|_, _| {});
    let window = handles.get("window").unwrap();
    let app_ctx = service.application().context();
    let window_ctx = service.model().context(window).unwrap();

    service.pre_destroy();
    service
        .update(|app| app.contexts.set_active_child(app_ctx, Some(window_ctx)))
        .unwrap();
    assert_eq!(service.root(), None);
}
