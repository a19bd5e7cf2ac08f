//! 模型树：容器与部件组成的 arena
//!
//! Nodes are addressed by [`ElementId`] handles and parent links are handles
//! too. Detached elements (created but never inserted, or removed) stay in the
//! arena until [`ModelTree::dispose`] is called.

use super::element::{Container, ContainerKind, Element, ElementId, ElementKind, Part};
use crate::core::ContextId;
use crate::services::ports::PartClient;
use slotmap::SlotMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid element id")]
    InvalidElement,
    #[error("element is not a container")]
    NotAContainer,
    #[error("element is not a part")]
    NotAPart,
    #[error("element already has a parent")]
    AlreadyParented,
    #[error("cannot insert a container into its own subtree")]
    InsertIntoDescendant,
    #[error("element is not a child of the container")]
    NotAChild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    SelectedElement {
        container: ElementId,
        old: Option<ElementId>,
        new: Option<ElementId>,
    },
    ChildAdded {
        container: ElementId,
        child: ElementId,
    },
    ChildRemoved {
        container: ElementId,
        child: ElementId,
    },
}

#[derive(Debug, Default)]
pub struct ModelTree {
    arena: SlotMap<ElementId, Element>,
    events: VecDeque<ModelEvent>,
}

impl ModelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached element to the arena.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let mut element = element;
        element.parent = None;
        if let ElementKind::Container(c) = &mut element.kind {
            // Children must be inserted through `add_child`.
            c.children.clear();
            c.selected = None;
        }
        self.arena.insert(element)
    }

    pub fn insert_container(&mut self, element_id: &str, kind: ContainerKind) -> ElementId {
        self.insert(Element::container(element_id, kind))
    }

    pub fn insert_part(&mut self, element_id: &str, part: Part) -> ElementId {
        self.insert(Element::part(element_id, part))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.arena.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn container(&self, id: ElementId) -> Option<&Container> {
        self.arena.get(id).and_then(Element::as_container)
    }

    fn container_mut(&mut self, id: ElementId) -> Result<&mut Container, ModelError> {
        match &mut self.arena.get_mut(id).ok_or(ModelError::InvalidElement)?.kind {
            ElementKind::Container(c) => Ok(c),
            ElementKind::Part(_) => Err(ModelError::NotAContainer),
        }
    }

    pub fn part(&self, id: ElementId) -> Option<&Part> {
        self.arena.get(id).and_then(Element::as_part)
    }

    pub fn part_mut(&mut self, id: ElementId) -> Option<&mut Part> {
        self.arena.get_mut(id).and_then(Element::as_part_mut)
    }

    pub fn is_container(&self, id: ElementId) -> bool {
        self.arena.get(id).is_some_and(Element::is_container)
    }

    pub fn is_part(&self, id: ElementId) -> bool {
        self.arena.get(id).is_some_and(Element::is_part)
    }

    pub fn is_stack(&self, id: ElementId) -> bool {
        self.container(id).is_some_and(|c| c.kind.is_stack())
    }

    pub fn element_id(&self, id: ElementId) -> Option<&str> {
        self.arena.get(id).map(Element::element_id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.arena.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.container(id).map(Container::children).unwrap_or(&[])
    }

    pub fn selected(&self, container: ElementId) -> Option<ElementId> {
        self.container(container).and_then(|c| c.selected)
    }

    pub fn context(&self, id: ElementId) -> Option<ContextId> {
        self.arena.get(id).and_then(|e| e.context)
    }

    pub fn set_context(&mut self, id: ElementId, context: Option<ContextId>) {
        if let Some(e) = self.arena.get_mut(id) {
            e.context = context;
        }
    }

    /// The element owning `context`, if any.
    pub fn owner_of_context(&self, context: ContextId) -> Option<ElementId> {
        self.arena
            .iter()
            .find(|(_, e)| e.context == Some(context))
            .map(|(id, _)| id)
    }

    pub fn to_be_rendered(&self, id: ElementId) -> bool {
        self.arena.get(id).is_some_and(|e| e.to_be_rendered)
    }

    pub fn set_to_be_rendered(&mut self, id: ElementId, value: bool) {
        if let Some(e) = self.arena.get_mut(id) {
            e.to_be_rendered = value;
        }
    }

    pub fn has_tag(&self, id: ElementId, tag: &str) -> bool {
        self.arena.get(id).is_some_and(|e| e.has_tag(tag))
    }

    pub fn add_tag(&mut self, id: ElementId, tag: &str) {
        if let Some(e) = self.arena.get_mut(id) {
            e.tags.insert(tag.into());
        }
    }

    pub fn remove_tag(&mut self, id: ElementId, tag: &str) -> bool {
        self.arena.get_mut(id).is_some_and(|e| e.tags.remove(tag))
    }

    pub fn is_dirty(&self, id: ElementId) -> bool {
        self.part(id).is_some_and(|p| p.dirty)
    }

    pub fn set_dirty(&mut self, id: ElementId, dirty: bool) {
        if let Some(p) = self.part_mut(id) {
            p.dirty = dirty;
        }
    }

    /// Installs the save target of `id`. Returns `false` if `id` is not a part.
    pub fn set_client(&mut self, id: ElementId, client: Box<dyn PartClient>) -> bool {
        match self.part_mut(id) {
            Some(part) => {
                part.client = Some(client);
                true
            }
            None => false,
        }
    }

    /// True when `descendant` sits anywhere below `ancestor`.
    pub fn is_descendant(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), ModelError> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    pub fn insert_child(
        &mut self,
        parent: ElementId,
        index: usize,
        child: ElementId,
    ) -> Result<(), ModelError> {
        let child_node = self.arena.get(child).ok_or(ModelError::InvalidElement)?;
        if child_node.parent.is_some() {
            return Err(ModelError::AlreadyParented);
        }
        if child == parent || self.is_descendant(child, parent) {
            return Err(ModelError::InsertIntoDescendant);
        }

        let container = self.container_mut(parent)?;
        let index = index.min(container.children.len());
        container.children.insert(index, child);

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        self.events.push_back(ModelEvent::ChildAdded {
            container: parent,
            child,
        });
        Ok(())
    }

    /// Detaches `child` from `parent`. Returns whether it was the selected
    /// element; in that case the selection is cleared.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<bool, ModelError> {
        let container = self.container_mut(parent)?;
        let pos = container
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(ModelError::NotAChild)?;
        container.children.remove(pos);
        let was_selected = container.selected == Some(child);

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = None;
        }
        self.events.push_back(ModelEvent::ChildRemoved {
            container: parent,
            child,
        });
        if was_selected {
            self.set_selected(parent, None)?;
        }
        Ok(was_selected)
    }

    pub fn set_selected(
        &mut self,
        container: ElementId,
        selected: Option<ElementId>,
    ) -> Result<(), ModelError> {
        let c = self.container_mut(container)?;
        if let Some(child) = selected {
            if !c.children.contains(&child) {
                return Err(ModelError::NotAChild);
            }
        }
        let old = c.selected;
        if old == selected {
            return Ok(());
        }
        c.selected = selected;
        self.events.push_back(ModelEvent::SelectedElement {
            container,
            old,
            new: selected,
        });
        Ok(())
    }

    /// Removes `id` and its subtree from the arena, detaching it first.
    pub fn dispose(&mut self, id: ElementId) -> Result<(), ModelError> {
        let parent = self.arena.get(id).ok_or(ModelError::InvalidElement)?.parent;
        if let Some(parent) = parent {
            self.remove_child(parent, id)?;
        }
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.arena.remove(node_id) {
                if let ElementKind::Container(c) = node.kind {
                    stack.extend(c.children);
                }
            }
        }
        Ok(())
    }

    /// Pre-order walk of `root` and everything below it.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.arena.contains_key(id) {
                continue;
            }
            out.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn pop_event(&mut self) -> Option<ModelEvent> {
        self.events.pop_front()
    }

    pub fn take_events(&mut self) -> Vec<ModelEvent> {
        self.events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/model_tree.rs"]
mod tests;
