use crate::models::{ElementId, ModelTree};
use crate::services::ports::{ElementFilter, ModelService};

/// Depth-first search over the model arena, root included.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeModelService;

impl ModelService for TreeModelService {
    fn find(&self, model: &ModelTree, id: &str, root: ElementId) -> Option<ElementId> {
        model
            .descendants(root)
            .into_iter()
            .find(|&e| model.element_id(e) == Some(id))
    }

    fn find_elements(
        &self,
        model: &ModelTree,
        root: ElementId,
        filter: &ElementFilter,
    ) -> Vec<ElementId> {
        model
            .descendants(root)
            .into_iter()
            .filter(|&e| filter.matches(model, e))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/services/model.rs"]
mod tests;
