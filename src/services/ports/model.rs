use crate::models::{ElementId, ModelTree};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementType {
    #[default]
    Any,
    Part,
    Container,
}

/// Criteria for [`ModelService::find_elements`]; every set field must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementFilter {
    pub id: Option<String>,
    pub element_type: ElementType,
    pub tags: Vec<String>,
}

impl ElementFilter {
    pub fn parts() -> Self {
        Self {
            element_type: ElementType::Part,
            ..Self::default()
        }
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tags: vec![tag.into()],
            ..Self::default()
        }
    }

    pub fn matches(&self, model: &ModelTree, element: ElementId) -> bool {
        let Some(node) = model.get(element) else {
            return false;
        };
        let type_ok = match self.element_type {
            ElementType::Any => true,
            ElementType::Part => node.is_part(),
            ElementType::Container => node.is_container(),
        };
        type_ok
            && self.id.as_deref().map_or(true, |id| node.element_id() == id)
            && self.tags.iter().all(|t| node.has_tag(t))
    }
}

/// Tree search over the model.
pub trait ModelService {
    /// First element below (or at) `root` whose id is `id`.
    fn find(&self, model: &ModelTree, id: &str, root: ElementId) -> Option<ElementId>;

    /// Every element below (or at) `root` matching `filter`, in tree order.
    fn find_elements(
        &self,
        model: &ModelTree,
        root: ElementId,
        filter: &ElementFilter,
    ) -> Vec<ElementId>;
}
