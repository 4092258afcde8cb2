use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("missing variable '{placeholder}' for template '{template}'")]
    MissingVariable {
        placeholder: String,
        template: String,
    },

    #[error("completion service error: {0}")]
    Upstream(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
