use crate::error::AutobindError;
use crate::model::Declaration;
use std::fmt;

/// A resolution error attached to the declaration that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub declaration: String,
    pub file: Option<String>,
    pub error: AutobindError,
}

impl Diagnostic {
    pub fn new(declaration: &Declaration, error: AutobindError) -> Self {
        Self {
            declaration: declaration.display_name(),
            file: declaration.file().map(|file| file.path.clone()),
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(path) => write!(f, "{}: {}", path, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}
