//! 上下文链：层级化的键值作用域
//!
//! Every context has at most one *active child*. Reading the active-child
//! pointers from a root downward yields the path to the active part.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde_json::Value;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;

new_key_type! { pub struct ContextId; }

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("invalid context id")]
    InvalidContext,
    #[error("context is not an immediate child of the given parent")]
    NotAChild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    ActiveChildChanged {
        context: ContextId,
        old: Option<ContextId>,
        new: Option<ContextId>,
    },
    Disposed {
        context: ContextId,
    },
}

#[derive(Debug, Clone)]
pub struct Context {
    name: CompactString,
    parent: Option<ContextId>,
    children: Vec<ContextId>,
    active_child: Option<ContextId>,
    values: FxHashMap<CompactString, Value>,
}

impl Context {
    fn new(name: &str, parent: Option<ContextId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            active_child: None,
            values: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ContextId> {
        self.parent
    }

    pub fn children(&self) -> &[ContextId] {
        &self.children
    }

    pub fn active_child(&self) -> Option<ContextId> {
        self.active_child
    }
}

#[derive(Debug, Default)]
pub struct ContextTree {
    arena: SlotMap<ContextId, Context>,
    events: VecDeque<ContextEvent>,
}

impl ContextTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_root(&mut self, name: &str) -> ContextId {
        self.arena.insert(Context::new(name, None))
    }

    pub fn create_child(&mut self, parent: ContextId, name: &str) -> Result<ContextId, ContextError> {
        if !self.arena.contains_key(parent) {
            return Err(ContextError::InvalidContext);
        }
        let id = self.arena.insert(Context::new(name, Some(parent)));
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Disposes `id` and its whole subtree.
    pub fn dispose(&mut self, id: ContextId) -> Result<(), ContextError> {
        let parent = self.arena.get(id).ok_or(ContextError::InvalidContext)?.parent;

        if let Some(parent_id) = parent {
            let mut cleared = false;
            if let Some(p) = self.arena.get_mut(parent_id) {
                p.children.retain(|&c| c != id);
                if p.active_child == Some(id) {
                    p.active_child = None;
                    cleared = true;
                }
            }
            if cleared {
                self.events.push_back(ContextEvent::ActiveChildChanged {
                    context: parent_id,
                    old: Some(id),
                    new: None,
                });
            }
        }

        let mut stack = vec![id];
        while let Some(ctx) = stack.pop() {
            if let Some(node) = self.arena.remove(ctx) {
                stack.extend(node.children);
                self.events.push_back(ContextEvent::Disposed { context: ctx });
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: ContextId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn get(&self, id: ContextId) -> Option<&Context> {
        self.arena.get(id)
    }

    pub fn parent(&self, id: ContextId) -> Option<ContextId> {
        self.arena.get(id).and_then(|c| c.parent)
    }

    pub fn active_child(&self, id: ContextId) -> Option<ContextId> {
        self.arena.get(id).and_then(|c| c.active_child)
    }

    pub fn set_active_child(
        &mut self,
        parent: ContextId,
        child: Option<ContextId>,
    ) -> Result<(), ContextError> {
        let node = self.arena.get(parent).ok_or(ContextError::InvalidContext)?;
        if let Some(child) = child {
            if !node.children.contains(&child) {
                return Err(ContextError::NotAChild);
            }
        }
        let old = node.active_child;
        if old == child {
            return Ok(());
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.active_child = child;
        }
        self.events.push_back(ContextEvent::ActiveChildChanged {
            context: parent,
            old,
            new: child,
        });
        Ok(())
    }

    /// Follows active-child pointers from `root` to the deepest context.
    pub fn active_leaf(&self, root: ContextId) -> Option<ContextId> {
        self.active_path(root).last().copied()
    }

    /// `root` followed by every active child below it.
    pub fn active_path(&self, root: ContextId) -> Vec<ContextId> {
        let mut path = Vec::new();
        let mut current = Some(root);
        while let Some(id) = current {
            if !self.arena.contains_key(id) || path.contains(&id) {
                break;
            }
            path.push(id);
            current = self.active_child(id);
        }
        path
    }

    pub fn get_local(&self, id: ContextId, key: &str) -> Option<&Value> {
        self.arena.get(id).and_then(|c| c.values.get(key))
    }

    /// Looks `key` up in `id` and then in each ancestor.
    pub fn lookup(&self, id: ContextId, key: &str) -> Option<&Value> {
        let mut current = Some(id);
        while let Some(ctx) = current {
            let node = self.arena.get(ctx)?;
            if let Some(v) = node.values.get(key) {
                return Some(v);
            }
            current = node.parent;
        }
        None
    }

    pub fn set(&mut self, id: ContextId, key: &str, value: Value) -> Result<(), ContextError> {
        let node = self.arena.get_mut(id).ok_or(ContextError::InvalidContext)?;
        node.values.insert(key.into(), value);
        Ok(())
    }

    pub fn remove(&mut self, id: ContextId, key: &str) -> Option<Value> {
        self.arena.get_mut(id).and_then(|c| c.values.remove(key))
    }

    pub fn view(&self, id: Option<ContextId>) -> ContextView<'_> {
        ContextView { tree: self, id }
    }

    pub fn pop_event(&mut self) -> Option<ContextEvent> {
        self.events.pop_front()
    }

    pub fn take_events(&mut self) -> Vec<ContextEvent> {
        self.events.drain(..).collect()
    }
}

/// Read-only handle on one context, handed to part clients.
#[derive(Clone, Copy)]
pub struct ContextView<'a> {
    tree: &'a ContextTree,
    id: Option<ContextId>,
}

impl<'a> ContextView<'a> {
    pub fn id(&self) -> Option<ContextId> {
        self.id
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.id.and_then(|id| self.tree.lookup(id, key))
    }

    pub fn get_local(&self, key: &str) -> Option<&'a Value> {
        self.id.and_then(|id| self.tree.get_local(id, key))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.id.and_then(|id| self.tree.get(id)).map(|c| c.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/context.rs"]
mod tests;
