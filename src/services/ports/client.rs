use crate::core::ContextView;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The client's own save routine failed.
    #[error("save target failed: {0}")]
    Target(#[source] BoxError),
    /// The save routine could not be invoked at all.
    #[error("cannot invoke save: {message}")]
    Injection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl SaveError {
    pub fn target(err: impl Into<BoxError>) -> Self {
        SaveError::Target(err.into())
    }

    pub fn injection(message: impl Into<String>) -> Self {
        SaveError::Injection {
            message: message.into(),
            source: None,
        }
    }
}

/// The object behind a part: owns its content and knows how to persist it.
pub trait PartClient {
    /// Persists the part's content. `context` is the part's own context.
    fn do_save(&mut self, context: ContextView<'_>) -> Result<(), SaveError>;
}
