//! Error types for rendering.

use std::string::FromUtf8Error;

/// Error returned when rendering a node tree fails.
///
/// The first error raised anywhere in the tree aborts the whole render; any
/// partially written output is discarded by the entry points.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// An attribute value could not be serialized to JSON.
    #[error("failed to serialize attribute `{key}` as JSON")]
    Json {
        /// Attribute key whose value failed to serialize.
        key: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered output is not valid UTF-8.
    #[error("rendered output is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),

    /// The render context was cancelled or its deadline passed.
    #[error("render cancelled")]
    Cancelled,

    /// A user-defined node failed.
    #[error("component error: {0}")]
    Component(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wrap an arbitrary error raised by a user-defined node.
    pub fn component(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Component(err.into())
    }

    /// Build a component error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::Component(message.into())
    }
}
