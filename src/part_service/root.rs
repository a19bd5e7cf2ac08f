//! Late resolution of the root container.
//!
//! Without an explicit root, the service watches the application context:
//! the first time its active child is a context owned by a container, that
//! container becomes the root and the subscription ends.

use super::PartService;
use crate::core::{ContextEvent, ContextId};

#[derive(Debug, Clone, Copy)]
pub(super) struct RootTracker {
    context: ContextId,
}

impl PartService {
    pub(super) fn start_root_tracking(&mut self) {
        if self.root.is_some() {
            return;
        }
        let context = self.application.context();
        self.root_tracker = Some(RootTracker { context });
        if let Some(child) = self.application.contexts.active_child(context) {
            self.try_resolve_root(child);
        }
    }

    /// Drains the context journal.
    pub fn process_context_events(&mut self) {
        while let Some(event) = self.application.contexts.pop_event() {
            tracing::trace!(event = ?event, "context event");
            let ContextEvent::ActiveChildChanged {
                context,
                new: Some(child),
                ..
            } = event
            else {
                continue;
            };
            if self.root_tracker.is_some_and(|t| t.context == context) {
                self.try_resolve_root(child);
            }
        }
    }

    fn try_resolve_root(&mut self, child: ContextId) -> bool {
        let model = &self.application.model;
        let Some(owner) = model.owner_of_context(child).filter(|&e| model.is_container(e)) else {
            return false;
        };
        self.root = Some(owner);
        self.root_tracker = None;
        tracing::info!(root = %self.describe(owner), "root container resolved");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/root.rs"]
mod tests;
