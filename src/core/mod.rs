//! 核心抽象
//!
//! - Context: hierarchical key/value scopes with an active-child chain

pub mod context;

pub use context::{Context, ContextError, ContextEvent, ContextId, ContextTree, ContextView};
