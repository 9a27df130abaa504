use super::name::{ClassName, TypeName};
use serde::{Deserialize, Serialize};

/// An annotation use site: the annotation class plus the arguments written at the site.
///
/// `defaults` carries the default values declared by the annotation class itself,
/// when the front-end knows them. A written argument equal to its default is
/// indistinguishable from an omitted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub type_name: ClassName,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaults: Vec<AnnotationArgument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArgument {
    pub name: String,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    /// A class literal such as `Foo::class`.
    Type(TypeName),
    Enum(EnumEntry),
    Annotation(Box<Annotation>),
    Array(Vec<AnnotationValue>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    #[serde(rename = "type")]
    pub type_name: ClassName,
    pub entry: String,
}

impl Annotation {
    pub fn new(type_name: ClassName) -> Self {
        Self {
            type_name,
            arguments: Vec::new(),
            defaults: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.arguments.push(AnnotationArgument {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.defaults.push(AnnotationArgument {
            name: name.into(),
            value,
        });
        self
    }

    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    pub fn default_argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.defaults
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Returns the written argument unless it equals the declared default.
    pub fn argument_if_not_default(&self, name: &str) -> Option<&AnnotationValue> {
        let value = self.argument(name)?;
        match self.default_argument(name) {
            Some(default) if default == value => None,
            _ => Some(value),
        }
    }

    pub fn is(&self, type_name: &ClassName) -> bool {
        &self.type_name == type_name
    }
}

impl AnnotationValue {
    pub fn as_type(&self) -> Option<&TypeName> {
        match self {
            AnnotationValue::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Enum entries may arrive either structured or as a bare/qualified name string.
    pub fn as_enum_entry(&self) -> Option<&str> {
        match self {
            AnnotationValue::Enum(entry) => Some(&entry.entry),
            AnnotationValue::String(s) => Some(s.rsplit('.').next().unwrap_or(s)),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationValue::String(_) => "string",
            AnnotationValue::Bool(_) => "bool",
            AnnotationValue::Int(_) => "int",
            AnnotationValue::Float(_) => "float",
            AnnotationValue::Char(_) => "char",
            AnnotationValue::Type(_) => "class literal",
            AnnotationValue::Enum(_) => "enum entry",
            AnnotationValue::Annotation(_) => "annotation",
            AnnotationValue::Array(_) => "array",
        }
    }
}
