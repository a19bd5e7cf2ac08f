use crate::models::{Application, ElementId};

/// Rendering collaborator: turns a model element into a live widget.
///
/// Implementations must tolerate repeated calls for an element that is
/// already materialized. They may update the model (e.g. install a part
/// client or create the element's context); selection changes made here are
/// reacted to like any other.
pub trait PresentationEngine {
    fn create_gui(&mut self, application: &mut Application, element: ElementId);
}
