//! 保存协调
//!
//! Save failures never escape: they are logged and reported as `false`.
//! A cancelled batch leaves already saved parts saved.

use super::PartService;
use crate::models::ElementId;
use crate::services::ports::{Save, SaveError};

impl PartService {
    /// Saves `part` if it is dirty, asking the save handler first when
    /// `confirm` is set. Returns `false` on cancel or failure.
    pub fn save_part(&mut self, part: ElementId, confirm: bool) -> bool {
        if !self.application.model.is_dirty(part) {
            return true;
        }

        if confirm {
            if let Some(handler) = self.save_handler.as_mut() {
                match handler.prompt_to_save(&self.application.model, part) {
                    Save::No => return true,
                    Save::Cancel => return false,
                    Save::Yes => {}
                }
            }
        }

        self.invoke_save(part)
    }

    /// Saves every dirty part in tree order.
    pub fn save_all(&mut self, confirm: bool) -> bool {
        let dirty = self.dirty_parts();
        if dirty.is_empty() {
            return true;
        }

        if confirm {
            if let Some(handler) = self.save_handler.as_mut() {
                let decisions = handler.prompt_to_save_all(&self.application.model, &dirty);
                if decisions.len() != dirty.len() {
                    tracing::error!(
                        parts = dirty.len(),
                        decisions = decisions.len(),
                        "save handler returned a mismatched decision list"
                    );
                    return false;
                }
                if decisions.contains(&Save::Cancel) {
                    tracing::debug!(parts = dirty.len(), "save_all cancelled");
                    return false;
                }
                for (part, decision) in dirty.into_iter().zip(decisions) {
                    if decision == Save::Yes && !self.save_part(part, false) {
                        return false;
                    }
                }
                return true;
            }
        }

        dirty.into_iter().all(|part| self.save_part(part, false))
    }

    fn invoke_save(&mut self, part: ElementId) -> bool {
        let context = self.application.model.context(part);
        let contexts = &self.application.contexts;
        let result = match self
            .application
            .model
            .part_mut(part)
            .and_then(|p| p.client.as_mut())
        {
            Some(client) => client.do_save(contexts.view(context)),
            None => Err(SaveError::injection("part has no client object")),
        };

        let label = self.describe(part);
        match result {
            Ok(()) => {
                self.application.model.set_dirty(part, false);
                tracing::debug!(part = %label, "saved");
                true
            }
            Err(SaveError::Target(error)) => {
                tracing::error!(part = %label, error = %error, "save failed");
                false
            }
            Err(SaveError::Injection { message, source }) => {
                match source {
                    Some(cause) => tracing::error!(part = %label, error = %cause, "save failed"),
                    None => tracing::error!(part = %label, error = %message, "save failed"),
                }
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/save.rs"]
mod tests;
