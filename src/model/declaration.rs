use super::annotation::Annotation;
use super::name::{ClassName, TypeName};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
    Local,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Object,
    EnumClass,
    EnumEntry,
    AnnotationClass,
}

impl ClassKind {
    /// Kinds whose members are invoked through an instance.
    pub fn is_instance_owner(self) -> bool {
        matches!(
            self,
            ClassKind::Class | ClassKind::Interface | ClassKind::EnumClass | ClassKind::EnumEntry
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    #[serde(default)]
    pub package: String,
}

/// One declaration of the universe handed over by the host front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum Declaration {
    Type(TypeDeclaration),
    Function(FunctionDeclaration),
    /// Properties, type aliases and anything else a marker may be misplaced on.
    Other(OtherDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: ClassName,
    #[serde(default)]
    pub class_kind: ClassKind,
    #[serde(default)]
    pub is_abstract: bool,
    /// In the order written in source.
    #[serde(default)]
    pub supertypes: Vec<TypeName>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub file: Option<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<TypeName>,
    #[serde(default)]
    pub enclosing: Option<Enclosing>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub file: Option<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: TypeName,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// The declaration a function is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosing {
    pub name: ClassName,
    pub class_kind: ClassKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherDeclaration {
    pub name: String,
    pub element: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub file: Option<SourceFile>,
}

impl Declaration {
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Declaration::Type(decl) => &decl.annotations,
            Declaration::Function(decl) => &decl.annotations,
            Declaration::Other(decl) => &decl.annotations,
        }
    }

    pub fn file(&self) -> Option<&SourceFile> {
        match self {
            Declaration::Type(decl) => decl.file.as_ref(),
            Declaration::Function(decl) => decl.file.as_ref(),
            Declaration::Other(decl) => decl.file.as_ref(),
        }
    }

    /// Name used when reporting diagnostics against this declaration.
    pub fn display_name(&self) -> String {
        match self {
            Declaration::Type(decl) => decl.name.qualified(),
            Declaration::Function(decl) => decl.qualified_name(),
            Declaration::Other(decl) => match &decl.file {
                Some(file) if !file.package.is_empty() => format!("{}.{}", file.package, decl.name),
                _ => decl.name.clone(),
            },
        }
    }

    pub fn kind_name(&self) -> String {
        match self {
            Declaration::Type(decl) => decl.class_kind.to_string(),
            Declaration::Function(_) => "function".to_string(),
            Declaration::Other(decl) => decl.element.clone(),
        }
    }
}

impl TypeDeclaration {
    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract
            && !matches!(
                self.class_kind,
                ClassKind::Interface | ClassKind::AnnotationClass
            )
    }
}

impl FunctionDeclaration {
    pub fn qualified_name(&self) -> String {
        match (&self.enclosing, &self.file) {
            (Some(owner), _) => format!("{}.{}", owner.name.qualified(), self.name),
            (None, Some(file)) if !file.package.is_empty() => {
                format!("{}.{}", file.package, self.name)
            }
            _ => self.name.clone(),
        }
    }
}
