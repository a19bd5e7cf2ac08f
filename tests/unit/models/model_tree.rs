use super::*;

fn stack_with_parts() -> (ModelTree, ElementId, ElementId, ElementId) {
    let mut tree = ModelTree::new();
    let stack = tree.insert_container("stack", ContainerKind::Stack);
    let a = tree.insert_part("a", Part::new());
    let b = tree.insert_part("b", Part::new());
    tree.add_child(stack, a).unwrap();
    tree.add_child(stack, b).unwrap();
    tree.take_events();
    (tree, stack, a, b)
}

#[test]
fn test_add_child_sets_parent() {
    let (tree, stack, a, b) = stack_with_parts();
    assert_eq!(tree.parent(a), Some(stack));
    assert_eq!(tree.children(stack), &[a, b]);
    assert!(tree.is_descendant(stack, b));
    assert!(!tree.is_descendant(a, stack));
}

#[test]
fn test_add_child_rejects_second_parent() {
    let (mut tree, _stack, a, _b) = stack_with_parts();
    let other = tree.insert_container("other", ContainerKind::Stack);
    assert_eq!(tree.add_child(other, a), Err(ModelError::AlreadyParented));
}

#[test]
fn test_add_child_rejects_cycles_and_parts_as_parents() {
    let mut tree = ModelTree::new();
    let outer = tree.insert_container("outer", ContainerKind::Sash);
    let inner = tree.insert_container("inner", ContainerKind::Stack);
    tree.add_child(outer, inner).unwrap();

    let detached_outer = outer;
    assert_eq!(
        tree.add_child(inner, detached_outer),
        Err(ModelError::InsertIntoDescendant)
    );

    let part = tree.insert_part("p", Part::new());
    let leaf = tree.insert_part("q", Part::new());
    assert_eq!(tree.add_child(part, leaf), Err(ModelError::NotAContainer));
}

#[test]
fn test_set_selected_requires_child() {
    let (mut tree, stack, a, _b) = stack_with_parts();
    let stranger = tree.insert_part("x", Part::new());

    assert_eq!(tree.set_selected(stack, Some(stranger)), Err(ModelError::NotAChild));
    tree.set_selected(stack, Some(a)).unwrap();
    assert_eq!(tree.selected(stack), Some(a));
}

#[test]
fn test_selection_change_is_journaled_once() {
    let (mut tree, stack, a, b) = stack_with_parts();
    tree.set_selected(stack, Some(a)).unwrap();
    tree.set_selected(stack, Some(a)).unwrap();
    tree.set_selected(stack, Some(b)).unwrap();

    assert_eq!(
        tree.take_events(),
        vec![
            ModelEvent::SelectedElement {
                container: stack,
                old: None,
                new: Some(a),
            },
            ModelEvent::SelectedElement {
                container: stack,
                old: Some(a),
                new: Some(b),
            },
        ]
    );
}

#[test]
fn test_remove_selected_child_clears_selection() {
    let (mut tree, stack, a, b) = stack_with_parts();
    tree.set_selected(stack, Some(a)).unwrap();
    tree.take_events();

    assert!(tree.remove_child(stack, a).unwrap());
    assert_eq!(tree.selected(stack), None);
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.children(stack), &[b]);
    assert!(tree.contains(a));

    let events = tree.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], ModelEvent::SelectedElement { new: None, .. }));
}

#[test]
fn test_descendants_is_preorder() {
    let mut tree = ModelTree::new();
    let root = tree.insert_container("root", ContainerKind::Window);
    let left = tree.insert_container("left", ContainerKind::Stack);
    let right = tree.insert_container("right", ContainerKind::Stack);
    let p1 = tree.insert_part("p1", Part::new());
    let p2 = tree.insert_part("p2", Part::new());
    tree.add_child(root, left).unwrap();
    tree.add_child(root, right).unwrap();
    tree.add_child(left, p1).unwrap();
    tree.add_child(right, p2).unwrap();

    assert_eq!(tree.descendants(root), vec![root, left, p1, right, p2]);
}

#[test]
fn test_dispose_removes_subtree() {
    let (mut tree, stack, a, b) = stack_with_parts();
    let root = tree.insert_container("root", ContainerKind::Window);
    tree.add_child(root, stack).unwrap();

    tree.dispose(stack).unwrap();
    assert!(tree.children(root).is_empty());
    assert!(!tree.contains(a));
    assert!(!tree.contains(b));
}

#[test]
fn test_owner_of_context() {
    let mut contexts = crate::core::ContextTree::new();
    let ctx = contexts.create_root("w");
    let mut tree = ModelTree::new();
    let w = tree.insert(Element::container("w", ContainerKind::Window).with_context(ctx));
    assert_eq!(tree.owner_of_context(ctx), Some(w));
    assert_eq!(tree.context(w), Some(ctx));
}
