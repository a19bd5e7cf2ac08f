use super::descriptor::PartDescriptor;
use super::model_tree::ModelTree;
use crate::core::{ContextId, ContextTree};

/// The model, its context tree and the registered part descriptors.
#[derive(Debug)]
pub struct Application {
    pub model: ModelTree,
    pub contexts: ContextTree,
    pub descriptors: Vec<PartDescriptor>,
    context: ContextId,
}

impl Application {
    pub fn new() -> Self {
        let mut contexts = ContextTree::new();
        let context = contexts.create_root("application");
        Self {
            model: ModelTree::new(),
            contexts,
            descriptors: Vec::new(),
            context,
        }
    }

    /// Root of the context tree.
    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn add_descriptor(&mut self, descriptor: PartDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn find_descriptor(&self, id: &str) -> Option<&PartDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
