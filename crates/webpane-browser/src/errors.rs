#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser engine is not initialized")]
    NotInitialized,

    #[error("Browser engine is already initialized")]
    AlreadyInitialized,

    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No JavaScript binding named {0:?}")]
    UnknownBinding(String),

    #[error("Bad argument for binding {name:?}: {reason}")]
    BindingArgument { name: String, reason: String },

    #[error("Engine thread failure: {0}")]
    EngineThread(#[from] std::io::Error),
}
