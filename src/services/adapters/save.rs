use crate::models::{ElementId, ModelTree};
use crate::services::ports::{Save, SaveHandler};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Answers prompts from a queue of prepared decisions, falling back to a
/// default once the queue runs dry. Clones share the same queue.
#[derive(Clone, Debug)]
pub struct ScriptedSaveHandler {
    queue: Rc<RefCell<VecDeque<Save>>>,
    fallback: Save,
    prompts: Rc<Cell<usize>>,
}

impl ScriptedSaveHandler {
    pub fn new(fallback: Save) -> Self {
        Self {
            queue: Rc::default(),
            fallback,
            prompts: Rc::default(),
        }
    }

    pub fn push(&self, decisions: impl IntoIterator<Item = Save>) {
        self.queue.borrow_mut().extend(decisions);
    }

    /// Number of times any prompt was shown.
    pub fn prompts(&self) -> usize {
        self.prompts.get()
    }

    fn next(&self) -> Save {
        self.queue.borrow_mut().pop_front().unwrap_or(self.fallback)
    }
}

impl SaveHandler for ScriptedSaveHandler {
    fn prompt_to_save(&mut self, _model: &ModelTree, _part: ElementId) -> Save {
        self.prompts.set(self.prompts.get() + 1);
        self.next()
    }

    fn prompt_to_save_all(&mut self, _model: &ModelTree, parts: &[ElementId]) -> Vec<Save> {
        self.prompts.set(self.prompts.get() + 1);
        parts.iter().map(|_| self.next()).collect()
    }
}
