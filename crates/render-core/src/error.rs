use thiserror::Error;

/// Errors surfaced to the caller of [`render`](crate::render).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Required option '{0}' was not set")]
    MissingRequiredOption(String),

    #[error("No formatter registered for renderer '{renderer}' and format '{format}'")]
    NoFormatterRegistered { renderer: String, format: String },

    #[error("Stage '{stage}' failed in {handler}: {source}")]
    StageExecutionFailure {
        stage: String,
        handler: String,
        #[source]
        source: FormatterError,
    },

    #[error("Formatter could not produce output: {0}")]
    OutputFailure(#[source] FormatterError),
}

impl RenderError {
    /// The stage that aborted the render, if a stage handler failed.
    pub fn failed_stage(&self) -> Option<&str> {
        match self {
            RenderError::StageExecutionFailure { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

/// Errors raised by formatter stage handlers and output retrieval.
#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("Option error: {0}")]
    Option(#[from] OptionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Formatter has no output; was the finalize stage run?")]
    MissingOutput,

    #[error("{0}")]
    Other(String),
}

impl From<&str> for FormatterError {
    fn from(s: &str) -> Self {
        FormatterError::Other(s.to_string())
    }
}

impl From<String> for FormatterError {
    fn from(s: String) -> Self {
        FormatterError::Other(s)
    }
}

/// Errors from reading or writing an [`OptionsContext`](crate::OptionsContext).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
    #[error("Option '{0}' has no accessor; declare it on the renderer or use `set`")]
    NoAccessor(String),

    #[error("Option '{name}' is not a {expected}")]
    InvalidType { name: String, expected: &'static str },

    #[error("Options do not match the expected shape: {0}")]
    Deserialize(String),
}

impl From<serde_json::Error> for OptionError {
    fn from(err: serde_json::Error) -> Self {
        OptionError::Deserialize(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("A global formatter registry has already been installed")]
    AlreadyInstalled,
}
