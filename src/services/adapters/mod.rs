//! Default implementations of the service ports.

pub mod model;
pub mod presentation;
pub mod save;
pub mod settings;

pub use model::TreeModelService;
pub use presentation::HeadlessPresentation;
pub use save::ScriptedSaveHandler;
pub use settings::{ensure_config_file, get_config_path, load_config, load_default_config};
