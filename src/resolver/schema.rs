use crate::annotation::{Marker, Multiplicity};
use crate::model::{Annotation, ClassName, Declaration, Parameter, SourceFile, TypeName, Visibility};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Interface,
    SingletonObject,
}

/// Which multibinding marker, if any, the generated member carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplicityDirective {
    None,
    IntoSet,
    IntoMap,
    ElementsIntoSet,
    /// Declares the collection itself; replaces the provides marker instead of joining it.
    MultibindingContainer,
}

impl From<Multiplicity> for MultiplicityDirective {
    fn from(multiplicity: Multiplicity) -> Self {
        match multiplicity {
            Multiplicity::Instance => MultiplicityDirective::None,
            Multiplicity::Set => MultiplicityDirective::IntoSet,
            Multiplicity::Map => MultiplicityDirective::IntoMap,
            Multiplicity::SetValues => MultiplicityDirective::ElementsIntoSet,
            Multiplicity::MultibindingContainer => MultiplicityDirective::MultibindingContainer,
        }
    }
}

/// How a generated provider reaches the annotated factory function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum CallForm {
    /// Member of a class, interface or enum: called through an owner parameter.
    Instance { owner: ClassName },
    /// Member of a singleton object: qualified by the object's name.
    Singleton { owner: ClassName },
    /// Top-level function.
    TopLevel,
}

/// What the generated member is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
    Bind {
        implementation: TypeName,
    },
    Factory {
        function: String,
        parameters: Vec<Parameter>,
        call: CallForm,
    },
}

/// The resolved form of one annotated declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema<'a> {
    /// Originating declaration, for diagnostics only.
    pub origin: &'a Declaration,
    pub marker: Marker,
    pub exposed_type: TypeName,
    pub scope: TypeName,
    pub container_kind: ContainerKind,
    pub container_name: ClassName,
    pub is_test_override: bool,
    pub replaces_container_name: Option<ClassName>,
    pub member_name: String,
    pub passthrough_annotations: Vec<Annotation>,
    pub multiplicity_directive: MultiplicityDirective,
    pub visibility: Visibility,
    pub file: SourceFile,
    pub source: BindingSource,
}
