//! 布局描述：从 JSON 构建模型树
//!
//! Used by the replay binary and as test fixture format. A layout carries the
//! descriptor list and the element tree below the root container.

use super::application::Application;
use super::descriptor::PartDescriptor;
use super::element::{ContainerKind, Element, ElementId, Part};
use super::model_tree::ModelError;
use crate::core::{ContextError, ContextId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("root of a layout must be a container")]
    RootNotContainer,
    #[error("selected index {index} out of range for container `{id}`")]
    SelectedOutOfRange { id: String, index: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Context(#[from] ContextError),
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub descriptors: Vec<PartDescriptor>,
    pub root: NodeSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeSpec {
    Container {
        #[serde(default)]
        id: String,
        kind: ContainerKind,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        context: bool,
        #[serde(default)]
        selected: Option<usize>,
        #[serde(default = "default_true")]
        to_be_rendered: bool,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
    Part {
        id: String,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        context: bool,
        #[serde(default)]
        dirty: bool,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        input_uri: Option<String>,
        #[serde(default = "default_true")]
        to_be_rendered: bool,
    },
}

/// Handles of the elements declared in a layout, by id.
#[derive(Debug, Clone, Default)]
pub struct LayoutHandles {
    by_id: FxHashMap<String, ElementId>,
}

impl LayoutHandles {
    /// Handle of the first element (pre-order) declared with `id`.
    pub fn get(&self, id: &str) -> Option<ElementId> {
        self.by_id.get(id).copied()
    }
}

/// Result of [`LayoutSpec::build`].
#[derive(Debug)]
pub struct BuiltLayout {
    pub application: Application,
    pub root: ElementId,
    pub handles: LayoutHandles,
}

impl BuiltLayout {
    pub fn handle(&self, id: &str) -> Option<ElementId> {
        self.handles.get(id)
    }
}

impl LayoutSpec {
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build(&self) -> Result<BuiltLayout, LayoutError> {
        if !matches!(self.root, NodeSpec::Container { .. }) {
            return Err(LayoutError::RootNotContainer);
        }

        let mut application = Application::new();
        for descriptor in &self.descriptors {
            application.add_descriptor(descriptor.clone());
        }

        let mut handles = FxHashMap::default();
        let app_context = application.context();
        let root = build_node(&mut application, &self.root, app_context, &mut handles)?;

        // A freshly built layout starts with an empty journal.
        application.model.take_events();
        application.contexts.take_events();

        Ok(BuiltLayout {
            application,
            root,
            handles: LayoutHandles { by_id: handles },
        })
    }
}

fn build_node(
    app: &mut Application,
    node: &NodeSpec,
    parent_context: ContextId,
    handles: &mut FxHashMap<String, ElementId>,
) -> Result<ElementId, LayoutError> {
    let (id, tags, wants_context, to_be_rendered) = match node {
        NodeSpec::Container {
            id,
            tags,
            context,
            to_be_rendered,
            ..
        }
        | NodeSpec::Part {
            id,
            tags,
            context,
            to_be_rendered,
            ..
        } => (id, tags, *context, *to_be_rendered),
    };

    let element = match node {
        NodeSpec::Container { kind, .. } => Element::container(id, *kind),
        NodeSpec::Part {
            dirty,
            visible,
            label,
            input_uri,
            ..
        } => Element::part(
            id,
            Part {
                dirty: *dirty,
                visible: *visible,
                label: label.clone(),
                input_uri: input_uri.clone(),
                ..Part::new()
            },
        ),
    };
    let mut element = tags.iter().fold(element, |e, tag| e.with_tag(tag));
    element.to_be_rendered = to_be_rendered;

    let mut own_context = parent_context;
    if wants_context {
        let name = if id.is_empty() { "element" } else { id.as_str() };
        own_context = app.contexts.create_child(parent_context, name)?;
        element = element.with_context(own_context);
    }

    let handle = app.model.insert(element);
    if !id.is_empty() {
        handles.entry(id.clone()).or_insert(handle);
    }

    if let NodeSpec::Container {
        children, selected, ..
    } = node
    {
        let mut child_handles = Vec::with_capacity(children.len());
        for child in children {
            let child_handle = build_node(app, child, own_context, handles)?;
            app.model.add_child(handle, child_handle)?;
            child_handles.push(child_handle);
        }
        if let Some(index) = *selected {
            let selected_handle =
                child_handles
                    .get(index)
                    .copied()
                    .ok_or_else(|| LayoutError::SelectedOutOfRange {
                        id: id.clone(),
                        index,
                    })?;
            app.model.set_selected(handle, Some(selected_handle))?;
        }
    }

    Ok(handle)
}

#[cfg(test)]
#[path = "../../tests/unit/models/layout.rs"]
mod tests;
