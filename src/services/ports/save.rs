use crate::models::{ElementId, ModelTree};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Save {
    Yes,
    No,
    Cancel,
}

/// Asks the user whether dirty parts should be saved.
pub trait SaveHandler {
    fn prompt_to_save(&mut self, model: &ModelTree, part: ElementId) -> Save;

    /// One decision per part, same order and length as `parts`.
    fn prompt_to_save_all(&mut self, model: &ModelTree, parts: &[ElementId]) -> Vec<Save>;
}
