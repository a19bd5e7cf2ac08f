use super::PartService;
use crate::models::{ContainerKind, ElementId};
use crate::services::ports::ElementFilter;
use crate::services::RemovalSelection;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartState {
    /// Materialize without touching the selection.
    Create,
    /// Make visible; keep focus where it is when sharing a container with the
    /// active part.
    Visible,
    Activate,
}

impl PartService {
    /// Clones the descriptor `id` into a new detached part.
    pub fn create_part(&mut self, id: &str) -> Option<ElementId> {
        let element = self.application.find_descriptor(id)?.instantiate();
        Some(self.application.model.insert(element))
    }

    /// Shows the live part `id`, or a new instance of descriptor `id`.
    pub fn show_part_by_id(&mut self, id: &str, state: PartState) -> Option<ElementId> {
        if let Some(part) = self.find_part(id) {
            return Some(self.show_part(part, state));
        }
        let part = self.create_part(id)?;
        Some(self.show_part_with(state, part, part))
    }

    /// Shows `part`. When an instance with the same id already lives in the
    /// model and the descriptor forbids multiple instances, that instance is
    /// shown and returned instead.
    ///
    /// # Panics
    ///
    /// Panics if `part` is not a part element of this service's model.
    pub fn show_part(&mut self, part: ElementId, state: PartState) -> ElementId {
        assert!(
            self.application.model.is_part(part),
            "show_part: {part:?} is not a part of this model"
        );
        let id = self.describe_id(part);
        let local = self.find_part(&id).unwrap_or(part);
        self.show_part_with(state, part, local)
    }

    fn show_part_with(
        &mut self,
        state: PartState,
        provided: ElementId,
        local: ElementId,
    ) -> ElementId {
        let part = self.add_part(provided, local);
        tracing::debug!(part = %self.describe(part), state = ?state, "show_part");
        match state {
            PartState::Activate => self.activate(part),
            PartState::Visible => {
                let same_parent = self.active_part.is_some_and(|active| {
                    self.application.model.parent(active) == self.application.model.parent(part)
                });
                if same_parent {
                    self.application.model.set_to_be_rendered(part, true);
                    self.create_gui(part);
                } else {
                    self.bring_to_top(part);
                }
            }
            PartState::Create => {
                self.application.model.set_to_be_rendered(part, true);
                self.create_gui(part);
            }
        }
        part
    }

    fn describe_id(&self, element: ElementId) -> String {
        self.application
            .model
            .element_id(element)
            .unwrap_or_default()
            .to_string()
    }

    fn add_part(&mut self, provided: ElementId, local: ElementId) -> ElementId {
        if provided == local && self.is_in_container(provided) {
            return provided;
        }

        let id = self.describe_id(provided);
        let descriptor = self.application.find_descriptor(&id).cloned();
        if let Some(descriptor) = &descriptor {
            if provided != local && !descriptor.allow_multiple {
                return local;
            }
        }
        if self.is_in_container(provided) {
            return provided;
        }
        let Some(root) = self.root else {
            tracing::warn!(part = %id, "no root container to add the part to");
            return provided;
        };

        if let Some(parent) = self.application.model.parent(provided) {
            if let Err(error) = self.application.model.remove_child(parent, provided) {
                self.log_model_error("remove_child", error);
            }
        }

        match descriptor {
            None => {
                let stack = self.application.model.insert_container("", ContainerKind::Stack);
                self.add_child(stack, provided);
                self.add_child(root, stack);
            }
            Some(descriptor) => match descriptor.category {
                None => self.add_to_last_container(None, provided),
                Some(category) => {
                    let tagged = self.model_service.find_elements(
                        &self.application.model,
                        root,
                        &ElementFilter::tagged(category.as_str()),
                    );
                    match tagged.first() {
                        Some(&container) if self.application.model.is_container(container) => {
                            self.add_child(container, provided);
                        }
                        _ => self.add_to_last_container(Some(category.as_str()), provided),
                    }
                }
            },
        }
        self.process_model_events();
        provided
    }

    fn add_to_last_container(&mut self, category: Option<&str>, part: ElementId) {
        let Some(container) = self.last_container() else {
            return;
        };
        self.add_child(container, part);
        if let Some(category) = category {
            if self.config.tag_category_containers {
                self.application.model.add_tag(container, category);
            }
        }
    }

    /// Deepest, rightmost non-empty container below the root, creating a new
    /// stack at the root when there is none.
    fn last_container(&mut self) -> Option<ElementId> {
        let root = self.root?;
        if !self.application.model.children(root).is_empty() {
            if let Some(found) = self.find_last_container(root) {
                return Some(found);
            }
        }
        let stack = self.application.model.insert_container("", ContainerKind::Stack);
        self.add_child(root, stack);
        Some(stack)
    }

    fn find_last_container(&self, container: ElementId) -> Option<ElementId> {
        let model = &self.application.model;
        let children = model.children(container);
        if children.is_empty() {
            return None;
        }
        children
            .iter()
            .rev()
            .filter(|&&child| model.is_container(child))
            .find_map(|&child| self.find_last_container(child))
            .or(Some(container))
    }

    /// Stops rendering `part`; parts tagged remove-on-hide also leave the model.
    pub fn hide_part(&mut self, part: ElementId) {
        if !self.is_live_part(part) {
            return;
        }
        tracing::debug!(part = %self.describe(part), "hide_part");
        self.application.model.set_to_be_rendered(part, false);

        if !self
            .application
            .model
            .has_tag(part, &self.config.remove_on_hide_tag)
        {
            return;
        }
        let Some(parent) = self.application.model.parent(part) else {
            return;
        };

        let owner_context = self.context_owner_context(part);
        let old_context = self.application.model.context(part);
        let was_selected = match self.application.model.remove_child(parent, part) {
            Ok(was_selected) => was_selected,
            Err(error) => {
                self.log_model_error("remove_child", error);
                return;
            }
        };
        self.process_model_events();

        if was_selected {
            let next = self.selection_after_removal(parent);
            if next.is_some() {
                self.select(parent, next);
            }
            self.fix_context(owner_context, old_context, next);
        }

        // A detached part cannot stay active.
        if self.active_part == Some(part) {
            self.set_active_part(None);
        }
    }

    fn selection_after_removal(&self, parent: ElementId) -> Option<ElementId> {
        let children = self.application.model.children(parent);
        let first = children.first().copied();
        match self.config.removal_selection {
            RemovalSelection::First => first,
            RemovalSelection::MostRecent => self
                .activation_history
                .iter()
                .copied()
                .find(|p| children.contains(p))
                .or(first),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/show.rs"]
mod tests;
