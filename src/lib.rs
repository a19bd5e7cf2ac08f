//! partbench - 工作台部件生命周期与激活引擎
//!
//! 模块结构：
//! - core: 上下文链（Context tree with active-child pointers）
//! - models: 模型树、部件描述符、布局 JSON
//! - services: 协作者端口与默认适配器、配置
//! - part_service: show/hide/activate/save 与监听器
//! - logging: tracing 初始化

pub mod core;
pub mod logging;
pub mod models;
pub mod part_service;
pub mod services;

pub use models::{Application, ContainerKind, ElementId, Part, PartDescriptor};
pub use part_service::{PartEvent, PartEventLog, PartListener, PartService, PartState};
