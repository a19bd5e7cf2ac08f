use super::{PartEvent, PartService};
use crate::core::ContextId;
use crate::models::ElementId;

impl PartService {
    /// Makes `part` the selected, rendered child of its parent.
    pub fn bring_to_top(&mut self, part: ElementId) {
        if !self.is_live_part(part) {
            return;
        }
        self.application.model.set_to_be_rendered(part, true);
        self.internal_bring_to_top(part);
    }

    fn internal_bring_to_top(&mut self, part: ElementId) {
        let Some(parent) = self.application.model.parent(part) else {
            return;
        };
        let old = self.application.model.selected(parent);
        if old == Some(part) {
            return;
        }
        tracing::debug!(part = %self.describe(part), "bring_to_top");
        let owner_context = old.and_then(|o| self.context_owner_context(o));
        let old_context = old.and_then(|o| self.application.model.context(o));
        self.select(parent, Some(part));
        if old.is_some() {
            self.fix_context(owner_context, old_context, Some(part));
        }
    }

    /// Selects `part` on every level up to the topmost context owner and
    /// points each context's active child along that path.
    ///
    /// If a listener activates another part while the path is being
    /// selected, this call still completes afterwards and `part` ends up
    /// active.
    pub fn activate(&mut self, part: ElementId) {
        if self.active_part == Some(part) || !self.is_live_part(part) {
            return;
        }
        tracing::debug!(part = %self.describe(part), "activate");

        let mut current_context = self.application.model.context(part);
        let mut owner = self.parent_with_context(part);
        let mut current = part;

        while let Some(owner_id) = owner {
            while current != owner_id {
                let Some(parent) = self.application.model.parent(current) else {
                    break;
                };
                self.application.model.set_to_be_rendered(current, true);
                if self.application.model.selected(parent) != Some(current) {
                    self.select(parent, Some(current));
                }
                current = parent;
            }

            if current_context.is_none() {
                current_context = self.application.model.context(part);
            }

            if let Some(parent_context) = self.application.model.context(owner_id) {
                self.set_active_child(parent_context, current_context);
                current_context = Some(parent_context);
            }

            owner = self.parent_with_context(owner_id);
        }

        self.process_context_events();
        self.record_activation(part);
        self.set_active_part(Some(part));
    }

    /// Clears `part` from its parent's selection. The owning context's active
    /// child is cleared only if it still points at `part`'s context.
    pub fn deactivate(&mut self, part: ElementId) {
        if !self.is_live_part(part) {
            return;
        }
        let Some(parent) = self.application.model.parent(part) else {
            return;
        };
        if self.application.model.selected(parent) != Some(part) {
            return;
        }
        tracing::debug!(part = %self.describe(part), "deactivate");

        let owner_context = self.context_owner_context(part);
        let old_context = self.application.model.context(part);
        self.select(parent, None);
        self.fix_context(owner_context, old_context, None);

        if self.active_part == Some(part) {
            self.set_active_part(None);
        }
    }

    /// Context of the nearest context-owning ancestor of `element`.
    pub(super) fn context_owner_context(&self, element: ElementId) -> Option<ContextId> {
        self.parent_with_context(element)
            .and_then(|owner| self.application.model.context(owner))
    }

    /// Moves `owner_context`'s active child from `old_context` to the context
    /// of `new`, unless someone else already replaced it.
    pub(super) fn fix_context(
        &mut self,
        owner_context: Option<ContextId>,
        old_context: Option<ContextId>,
        new: Option<ElementId>,
    ) {
        let Some(owner_context) = owner_context else {
            return;
        };
        if self.application.contexts.active_child(owner_context) != old_context {
            return;
        }
        let new_context = new.and_then(|n| self.application.model.context(n));
        self.set_active_child(owner_context, new_context);
        self.process_context_events();
    }

    /// Reaction to one container-level selection change.
    pub(super) fn on_selection_changed(&mut self, old: Option<ElementId>, new: Option<ElementId>) {
        if self.listeners.is_empty() {
            return;
        }
        if let Some(old) = old {
            if self.is_live_part(old) {
                self.fire(PartEvent::Hidden(old));
            }
        }
        if let Some(new) = new {
            if self.is_live_part(new) && self.application.model.to_be_rendered(new) {
                self.fire(PartEvent::Visible(new));
                self.fire(PartEvent::BroughtToTop(new));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/activation.rs"]
mod tests;
