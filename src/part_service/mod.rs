//! 部件服务：部件生命周期与激活引擎
//!
//! Owns the [`Application`] and drives every part transition:
//! - `activation`: bring-to-top, activate, deactivate, selection reaction
//! - `show`: show / hide / create and the insertion policy
//! - `save`: save coordination with the save handler
//! - `root`: late resolution of the root container
//!
//! All model mutations made by the service, its collaborators or external code
//! (through [`PartService::update`]) land in the model journal; the service
//! drains it after every step and reacts to each selection change exactly once.

mod activation;
pub mod listeners;
mod root;
mod save;
mod show;

pub use listeners::{ListenerId, PartEvent, PartEventLog, PartListener};
pub use show::PartState;

use crate::core::ContextId;
use crate::models::{Application, ElementId, ModelError, ModelEvent, ModelTree};
use crate::services::adapters::{HeadlessPresentation, TreeModelService};
use crate::services::ports::{ElementFilter, ModelService, PresentationEngine, SaveHandler};
use crate::services::PartServiceConfig;
use listeners::PartListeners;
use root::RootTracker;
use std::rc::Rc;

pub struct PartService {
    application: Application,
    root: Option<ElementId>,
    model_service: Box<dyn ModelService>,
    presentation: Box<dyn PresentationEngine>,
    save_handler: Option<Box<dyn SaveHandler>>,
    config: PartServiceConfig,
    listeners: PartListeners,
    active_part: Option<ElementId>,
    last_active_part: Option<ElementId>,
    /// Most recently activated first.
    activation_history: Vec<ElementId>,
    constructed: bool,
    root_tracker: Option<RootTracker>,
}

pub struct PartServiceBuilder {
    application: Application,
    root: Option<ElementId>,
    model_service: Box<dyn ModelService>,
    presentation: Box<dyn PresentationEngine>,
    save_handler: Option<Box<dyn SaveHandler>>,
    config: PartServiceConfig,
    active_part: Option<ElementId>,
}

impl PartServiceBuilder {
    pub fn root(mut self, root: ElementId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn model_service(mut self, service: impl ModelService + 'static) -> Self {
        self.model_service = Box::new(service);
        self
    }

    pub fn presentation(mut self, engine: impl PresentationEngine + 'static) -> Self {
        self.presentation = Box::new(engine);
        self
    }

    pub fn save_handler(mut self, handler: impl SaveHandler + 'static) -> Self {
        self.save_handler = Some(Box::new(handler));
        self
    }

    pub fn config(mut self, config: PartServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Value of the active-part slot before the service is constructed.
    pub fn active_part(mut self, part: ElementId) -> Self {
        self.active_part = Some(part);
        self
    }

    pub fn build(self) -> PartService {
        let mut service = PartService {
            application: self.application,
            root: self.root,
            model_service: self.model_service,
            presentation: self.presentation,
            save_handler: self.save_handler,
            config: self.config,
            listeners: PartListeners::default(),
            active_part: None,
            last_active_part: None,
            activation_history: Vec::new(),
            constructed: false,
            root_tracker: None,
        };
        // Wiring happens before anything subscribes, so nothing fires here.
        service.set_active_part(self.active_part);
        service.application.model.take_events();
        service.application.contexts.take_events();
        service.post_construct();
        service
    }
}

impl PartService {
    pub fn builder(application: Application) -> PartServiceBuilder {
        PartServiceBuilder {
            application,
            root: None,
            model_service: Box::new(TreeModelService),
            presentation: Box::new(HeadlessPresentation::new()),
            save_handler: None,
            config: PartServiceConfig::default(),
            active_part: None,
        }
    }

    pub fn post_construct(&mut self) {
        self.constructed = true;
        self.start_root_tracking();
    }

    /// Tears the service down: no lifecycle events fire afterwards.
    pub fn pre_destroy(&mut self) {
        self.constructed = false;
        self.root_tracker = None;
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn model(&self) -> &ModelTree {
        &self.application.model
    }

    pub fn into_application(self) -> Application {
        self.application
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn config(&self) -> &PartServiceConfig {
        &self.config
    }

    /// Runs an external mutation of the application, then reacts to whatever
    /// it changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Application) -> R) -> R {
        let result = f(&mut self.application);
        self.process_model_events();
        self.process_context_events();
        result
    }

    // ---- active part ------------------------------------------------------

    pub fn active_part(&self) -> Option<ElementId> {
        self.active_part
    }

    pub fn last_active_part(&self) -> Option<ElementId> {
        self.last_active_part
    }

    pub fn activation_history(&self) -> &[ElementId] {
        &self.activation_history
    }

    /// The active-part slot. Fed by [`PartService::activate`] and by whatever
    /// layer tracks focus outside the service.
    pub fn set_active_part(&mut self, part: Option<ElementId>) {
        if self.active_part == part {
            return;
        }
        let previous = self.active_part;
        self.last_active_part = previous;
        self.active_part = part;

        if !self.constructed || self.listeners.is_empty() {
            return;
        }
        if let Some(previous) = previous {
            if Some(previous) != part {
                self.fire(PartEvent::Deactivated(previous));
            }
        }
        if let Some(part) = part {
            self.fire(PartEvent::Activated(part));
        }
    }

    fn record_activation(&mut self, part: ElementId) {
        self.activation_history.retain(|&p| p != part);
        self.activation_history.insert(0, part);
    }

    // ---- listeners --------------------------------------------------------

    pub fn add_part_listener(&mut self, listener: Rc<dyn PartListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_part_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn fire(&mut self, event: PartEvent) {
        tracing::trace!(event = event.name(), part = %self.describe(event.part()), "fire");
        for listener in self.listeners.snapshot() {
            event.deliver(listener.as_ref(), self);
        }
    }

    // ---- queries ----------------------------------------------------------

    pub fn find_part(&self, id: &str) -> Option<ElementId> {
        let root = self.root?;
        self.model_service
            .find(&self.application.model, id, root)
            .filter(|&e| self.application.model.is_part(e))
    }

    /// Every part below the root, in tree order.
    pub fn parts(&self) -> Vec<ElementId> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        self.model_service
            .find_elements(&self.application.model, root, &ElementFilter::parts())
    }

    pub fn dirty_parts(&self) -> Vec<ElementId> {
        self.parts()
            .into_iter()
            .filter(|&p| self.application.model.is_dirty(p))
            .collect()
    }

    /// Parts editing the input at `uri`.
    pub fn input_parts(&self, uri: &str) -> Vec<ElementId> {
        self.parts()
            .into_iter()
            .filter(|&p| {
                self.application
                    .model
                    .part(p)
                    .and_then(|part| part.input_uri.as_deref())
                    == Some(uri)
            })
            .collect()
    }

    /// Identity membership below the root container.
    pub fn is_in_container(&self, element: ElementId) -> bool {
        self.root
            .is_some_and(|root| self.application.model.is_descendant(root, element))
    }

    fn is_live_part(&self, element: ElementId) -> bool {
        self.application.model.is_part(element) && self.is_in_container(element)
    }

    pub fn is_part_visible(&self, part: ElementId) -> bool {
        if !self.is_live_part(part) {
            return false;
        }
        let model = &self.application.model;
        match model.parent(part) {
            Some(parent) if model.is_stack(parent) => model.selected(parent) == Some(part),
            _ => model.part(part).is_some_and(|p| p.visible),
        }
    }

    /// Nearest ancestor of `element` that owns a context.
    fn parent_with_context(&self, element: ElementId) -> Option<ElementId> {
        let model = &self.application.model;
        let mut current = model.parent(element);
        while let Some(id) = current {
            if model.context(id).is_some() {
                return Some(id);
            }
            current = model.parent(id);
        }
        None
    }

    fn describe(&self, element: ElementId) -> String {
        match self.application.model.element_id(element) {
            Some(id) if !id.is_empty() => id.to_string(),
            Some(_) => format!("{element:?}"),
            None => "<disposed>".to_string(),
        }
    }

    // ---- journal ----------------------------------------------------------

    /// Drains the model journal, reacting to every selection change.
    pub fn process_model_events(&mut self) {
        while let Some(event) = self.application.model.pop_event() {
            tracing::trace!(event = ?event, "model event");
            match event {
                ModelEvent::SelectedElement { old, new, .. } => {
                    if self.constructed {
                        self.on_selection_changed(old, new);
                    }
                }
                ModelEvent::ChildRemoved { .. } => self.prune_activation_history(),
                ModelEvent::ChildAdded { .. } => {}
            }
        }
    }

    fn prune_activation_history(&mut self) {
        let history = std::mem::take(&mut self.activation_history);
        self.activation_history = history
            .into_iter()
            .filter(|&p| self.is_in_container(p))
            .collect();
    }

    // ---- model mutation helpers ------------------------------------------

    fn select(&mut self, container: ElementId, child: Option<ElementId>) {
        if let Err(error) = self.application.model.set_selected(container, child) {
            self.log_model_error("set_selected", error);
        }
        self.process_model_events();
    }

    fn add_child(&mut self, container: ElementId, child: ElementId) {
        if let Err(error) = self.application.model.add_child(container, child) {
            self.log_model_error("add_child", error);
        }
    }

    fn set_active_child(&mut self, context: ContextId, child: Option<ContextId>) {
        if let Err(error) = self.application.contexts.set_active_child(context, child) {
            tracing::warn!(error = %error, "set_active_child rejected");
        }
    }

    fn log_model_error(&self, op: &'static str, error: ModelError) {
        tracing::warn!(op, error = %error, "model mutation rejected");
    }

    fn create_gui(&mut self, element: ElementId) {
        self.presentation.create_gui(&mut self.application, element);
        self.process_model_events();
        self.process_context_events();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/mod.rs"]
mod tests;
