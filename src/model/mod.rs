//! Declarations as delivered by the host compiler front-end.

mod annotation;
mod declaration;
mod name;
mod source;

pub use annotation::{Annotation, AnnotationArgument, AnnotationValue, EnumEntry};
pub use declaration::{
    ClassKind, Declaration, Enclosing, FunctionDeclaration, OtherDeclaration, Parameter,
    SourceFile, TypeDeclaration, Visibility,
};
pub use name::{ClassName, TypeName};
pub use source::{AnnotationClass, SourceSet};
