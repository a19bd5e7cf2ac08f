//! 模型元素：容器与部件

use crate::core::ContextId;
use crate::services::ports::PartClient;
use compact_str::CompactString;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! { pub struct ElementId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Window,
    Sash,
    /// Only the selected child of a stack is visible.
    Stack,
}

impl ContainerKind {
    pub fn is_stack(self) -> bool {
        matches!(self, ContainerKind::Stack)
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    pub(crate) kind: ContainerKind,
    pub(crate) children: Vec<ElementId>,
    pub(crate) selected: Option<ElementId>,
}

impl Container {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            selected: None,
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }
}

#[derive(Default)]
pub struct Part {
    pub dirty: bool,
    pub visible: bool,
    pub label: Option<String>,
    pub input_uri: Option<String>,
    pub(crate) client: Option<Box<dyn PartClient>>,
}

impl Part {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client: Box<dyn PartClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("dirty", &self.dirty)
            .field("visible", &self.visible)
            .field("label", &self.label)
            .field("input_uri", &self.input_uri)
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub enum ElementKind {
    Container(Container),
    Part(Part),
}

#[derive(Debug)]
pub struct Element {
    pub(crate) element_id: CompactString,
    pub(crate) parent: Option<ElementId>,
    pub(crate) tags: FxHashSet<CompactString>,
    pub(crate) to_be_rendered: bool,
    pub(crate) context: Option<ContextId>,
    pub(crate) kind: ElementKind,
}

impl Element {
    pub fn new(element_id: &str, kind: ElementKind) -> Self {
        Self {
            element_id: element_id.into(),
            parent: None,
            tags: FxHashSet::default(),
            to_be_rendered: true,
            context: None,
            kind,
        }
    }

    pub fn container(element_id: &str, kind: ContainerKind) -> Self {
        Self::new(element_id, ElementKind::Container(Container::new(kind)))
    }

    pub fn part(element_id: &str, part: Part) -> Self {
        Self::new(element_id, ElementKind::Part(part))
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_str())
    }

    pub fn to_be_rendered(&self) -> bool {
        self.to_be_rendered
    }

    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            ElementKind::Container(c) => Some(c),
            ElementKind::Part(_) => None,
        }
    }

    pub fn as_part(&self) -> Option<&Part> {
        match &self.kind {
            ElementKind::Part(p) => Some(p),
            ElementKind::Container(_) => None,
        }
    }

    pub fn as_part_mut(&mut self) -> Option<&mut Part> {
        match &mut self.kind {
            ElementKind::Part(p) => Some(p),
            ElementKind::Container(_) => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ElementKind::Container(_))
    }

    pub fn is_part(&self) -> bool {
        matches!(self.kind, ElementKind::Part(_))
    }
}
