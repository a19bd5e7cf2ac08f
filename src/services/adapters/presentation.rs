use crate::models::{Application, ElementId};
use crate::services::ports::PresentationEngine;
use std::cell::RefCell;
use std::rc::Rc;

/// A presentation engine without widgets: it only remembers what it was asked
/// to materialize. Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresentation {
    created: Rc<RefCell<Vec<ElementId>>>,
}

impl HeadlessPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialized elements in creation order, each listed once.
    pub fn created(&self) -> Vec<ElementId> {
        self.created.borrow().clone()
    }

    pub fn is_created(&self, element: ElementId) -> bool {
        self.created.borrow().contains(&element)
    }
}

impl PresentationEngine for HeadlessPresentation {
    fn create_gui(&mut self, application: &mut Application, element: ElementId) {
        if !application.model.contains(element) || self.is_created(element) {
            return;
        }
        tracing::trace!(element = ?element, "create_gui");
        self.created.borrow_mut().push(element);
    }
}
