//! 数据模型模块

pub mod application;
pub mod descriptor;
pub mod element;
pub mod layout;
pub mod model_tree;

pub use application::Application;
pub use descriptor::PartDescriptor;
pub use element::{Container, ContainerKind, Element, ElementId, ElementKind, Part};
pub use layout::{BuiltLayout, LayoutError, LayoutHandles, LayoutSpec, NodeSpec};
pub use model_tree::{ModelError, ModelEvent, ModelTree};
