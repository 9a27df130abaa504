use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutobindError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutobindError {
    #[error("'{declaration}' is a {kind} and cannot carry a {family} marker")]
    NotAResolvableDeclarationKind {
        declaration: String,
        kind: String,
        family: String,
    },

    #[error("'{declaration}' cannot use {multiplicity} with exposed type {exposed_type}: {reason}")]
    InvalidMultibindingShape {
        declaration: String,
        multiplicity: String,
        exposed_type: String,
        reason: String,
    },

    #[error("'{declaration}' declaration is not contained in a file")]
    MissingContainingFile { declaration: String },

    #[error("'{declaration}' function declaration has no resolvable return type")]
    MissingReturnType { declaration: String },

    #[error("'{declaration}' carries more than one binding marker: {}", .markers.join(", "))]
    AmbiguousMarker {
        declaration: String,
        markers: Vec<String>,
    },

    #[error("'{declaration}' has an invalid '{argument}' marker argument: {message}")]
    InvalidMarkerArgument {
        declaration: String,
        argument: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AutobindError {
    pub fn not_resolvable(
        declaration: impl Into<String>,
        kind: impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        Self::NotAResolvableDeclarationKind {
            declaration: declaration.into(),
            kind: kind.into(),
            family: family.into(),
        }
    }

    pub fn invalid_shape(
        declaration: impl Into<String>,
        multiplicity: impl Into<String>,
        exposed_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidMultibindingShape {
            declaration: declaration.into(),
            multiplicity: multiplicity.into(),
            exposed_type: exposed_type.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(
        declaration: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidMarkerArgument {
            declaration: declaration.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AutobindError {
    fn from(err: serde_json::Error) -> Self {
        AutobindError::Config(format!("Malformed configuration: {}", err))
    }
}

impl From<std::io::Error> for AutobindError {
    fn from(err: std::io::Error) -> Self {
        AutobindError::Config(format!("Unable to read configuration: {}", err))
    }
}
