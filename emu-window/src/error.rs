use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

/// Failures reported by a [`HostContext`](crate::HostContext) implementation.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("host did not provide GL entry point `{0}`")]
    MissingEntryPoint(&'static str),

    #[error("host framebuffer handle {0} is out of range")]
    InvalidFramebuffer(usize),

    #[error("host context unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create graphics context: {0}")]
    ContextCreation(#[source] ContextError),

    #[error("graphics context error: {0}")]
    Context(#[source] ContextError),

    #[error("`{0}` called without an active graphics context")]
    NoContext(&'static str),

    #[error("config error: {0}")]
    Config(String),
}
