//! Service ports: traits + data contracts.

pub mod client;
pub mod model;
pub mod presentation;
pub mod save;

pub use client::{PartClient, SaveError};
pub use model::{ElementFilter, ElementType, ModelService};
pub use presentation::PresentationEngine;
pub use save::{Save, SaveHandler};
