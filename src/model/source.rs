use super::annotation::Annotation;
use super::declaration::{ClassKind, Declaration};
use super::name::ClassName;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declaration of an annotation class, kept only for its own (meta-)annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationClass {
    pub name: ClassName,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Every declaration visible to one processing round.
///
/// The set is immutable once built and is recomputed from scratch for every round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub annotation_classes: Vec<AnnotationClass>,
}

impl SourceSet {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            annotation_classes: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_annotation_class(mut self, class: AnnotationClass) -> Self {
        self.annotation_classes.push(class);
        self
    }

    /// Declarations in a fixed traversal order: file path first, then
    /// declaration order within the file. Declarations without a file come last.
    pub fn ordered(&self) -> Vec<&Declaration> {
        let mut ordered: Vec<&Declaration> = self.declarations.iter().collect();
        ordered.sort_by(|a, b| match (a.file(), b.file()) {
            (Some(a), Some(b)) => a.path.cmp(&b.path),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ordered
    }

    /// Maps every known annotation class to the annotations declared on it.
    pub fn meta_annotations(&self) -> HashMap<&ClassName, &[Annotation]> {
        let mut index: HashMap<&ClassName, &[Annotation]> = self
            .annotation_classes
            .iter()
            .map(|class| (&class.name, class.annotations.as_slice()))
            .collect();

        for declaration in &self.declarations {
            if let Declaration::Type(decl) = declaration {
                if decl.class_kind == ClassKind::AnnotationClass {
                    index
                        .entry(&decl.name)
                        .or_insert(decl.annotations.as_slice());
                }
            }
        }
        index
    }
}
