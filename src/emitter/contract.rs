use crate::model::{Annotation, ClassName, Parameter, TypeName, Visibility};
use crate::resolver::ContainerKind;
use serde::Serialize;

/// One generated container, ready for a host code writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerDecl {
    pub kind: ContainerKind,
    pub name: ClassName,
    pub visibility: Visibility,
    pub install: InstallDirective,
    /// Module marker first, then the install annotation.
    pub annotations: Vec<Annotation>,
    pub members: Vec<MemberDecl>,
    /// Distinct source files the members originate from, in member order.
    pub originating_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InstallDirective {
    Production { scope: TypeName },
    Test { scope: TypeName, replaces: ClassName },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDecl {
    pub name: String,
    pub is_abstract: bool,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeName,
    pub body: MemberBody,
    /// Framework annotation first, then the multibinding annotation, then passthrough annotations.
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum MemberBody {
    /// Abstract binding of the parameter to the return type.
    BindReference { implementation: TypeName },
    Call(CallExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    pub receiver: Receiver,
    pub function: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "receiver", rename_all = "snake_case")]
pub enum Receiver {
    /// Call through a member parameter, e.g. `factory.create()`.
    Parameter { name: String },
    /// Call qualified by a singleton's name, e.g. `Factories.create()`.
    Qualified { owner: ClassName },
    /// Plain top-level call.
    None,
}

impl ContainerDecl {
    pub fn is_test(&self) -> bool {
        matches!(self.install, InstallDirective::Test { .. })
    }

    pub fn member(&self, name: &str) -> Option<&MemberDecl> {
        self.members.iter().find(|member| member.name == name)
    }
}

impl MemberDecl {
    pub fn has_annotation(&self, type_name: &ClassName) -> bool {
        self.annotations.iter().any(|annotation| annotation.is(type_name))
    }
}
