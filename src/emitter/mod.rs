//! Container emission
//!
//! Turns a bucket of resolved schemas into a [`ContainerDecl`]: the structured
//! description a host code writer renders into source. Rendering itself is the
//! writer's business; [`ContainerWriter`] is the seam.

mod contract;

pub use contract::{
    CallExpression, ContainerDecl, InstallDirective, MemberBody, MemberDecl, Receiver,
};

use crate::config::GeneratorConfig;
use crate::error::{AutobindError, Result};
use crate::grouping::SchemaBucket;
use crate::model::{Annotation, AnnotationValue, ClassName, Parameter, TypeName, Visibility};
use crate::resolver::{BindingSource, CallForm, MultiplicityDirective, ResolvedSchema};
use std::io::Write;

/// Receives finished containers.
pub trait ContainerWriter {
    fn write(&mut self, container: &ContainerDecl) -> Result<()>;
}

impl ContainerWriter for Vec<ContainerDecl> {
    fn write(&mut self, container: &ContainerDecl) -> Result<()> {
        self.push(container.clone());
        Ok(())
    }
}

/// Writes each container as one line of JSON.
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ContainerWriter for JsonLinesWriter<W> {
    fn write(&mut self, container: &ContainerDecl) -> Result<()> {
        let line = serde_json::to_string(container).map_err(|e| {
            AutobindError::Config(format!("Unable to serialize {}: {}", container.name, e))
        })?;
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}

pub struct ContainerEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ContainerEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Builds the container for a bucket. Returns `None` for an empty bucket.
    pub fn emit(&self, bucket: &SchemaBucket<'_>) -> Option<ContainerDecl> {
        let first = bucket.schemas.first()?;

        let install = match &first.replaces_container_name {
            Some(replaces) if first.is_test_override => InstallDirective::Test {
                scope: first.scope.clone(),
                replaces: replaces.clone(),
            },
            _ => InstallDirective::Production {
                scope: first.scope.clone(),
            },
        };

        let visibility = if bucket
            .schemas
            .iter()
            .all(|schema| schema.visibility == Visibility::Internal)
        {
            Visibility::Internal
        } else {
            Visibility::Public
        };

        let mut originating_files: Vec<String> = Vec::new();
        for schema in &bucket.schemas {
            if !originating_files.contains(&schema.file.path) {
                originating_files.push(schema.file.path.clone());
            }
        }

        Some(ContainerDecl {
            kind: first.container_kind,
            name: bucket.container_name.clone(),
            visibility,
            annotations: vec![
                Annotation::new(self.config.output.module.clone()),
                self.install_annotation(&install),
            ],
            install,
            members: bucket.schemas.iter().map(|schema| self.member(schema)).collect(),
            originating_files,
        })
    }

    fn install_annotation(&self, install: &InstallDirective) -> Annotation {
        let output = &self.config.output;
        match install {
            InstallDirective::Production { scope } => Annotation::new(output.install_in.clone())
                .with_argument("value", class_array(vec![scope.clone()])),
            InstallDirective::Test { scope, replaces } => {
                Annotation::new(output.test_install_in.clone())
                    .with_argument("components", class_array(vec![scope.clone()]))
                    .with_argument("replaces", class_array(vec![TypeName::class(replaces.clone())]))
            }
        }
    }

    fn member(&self, schema: &ResolvedSchema<'_>) -> MemberDecl {
        let mut annotations = self.framework_annotations(schema);
        annotations.extend(schema.passthrough_annotations.iter().cloned());

        match &schema.source {
            BindingSource::Bind { implementation } => MemberDecl {
                name: schema.member_name.clone(),
                is_abstract: true,
                visibility: Visibility::Public,
                parameters: vec![Parameter {
                    name: self.config.naming.implementation_parameter.clone(),
                    type_name: implementation.clone(),
                    annotations: Vec::new(),
                }],
                return_type: schema.exposed_type.clone(),
                body: MemberBody::BindReference {
                    implementation: implementation.clone(),
                },
                annotations,
            },
            BindingSource::Factory {
                function,
                parameters,
                call,
            } => {
                let mut member_parameters = Vec::with_capacity(parameters.len() + 1);

                let receiver = match call {
                    CallForm::Instance { owner } => {
                        let owner_parameter =
                            unique_parameter_name(&self.config.naming.owner_parameter, parameters);
                        member_parameters.push(Parameter {
                            name: owner_parameter.clone(),
                            type_name: TypeName::class(owner.clone()),
                            annotations: Vec::new(),
                        });
                        Receiver::Parameter {
                            name: owner_parameter,
                        }
                    }
                    CallForm::Singleton { owner } => Receiver::Qualified {
                        owner: owner.clone(),
                    },
                    CallForm::TopLevel => Receiver::None,
                };
                member_parameters.extend(parameters.iter().cloned());

                MemberDecl {
                    name: schema.member_name.clone(),
                    is_abstract: false,
                    visibility: schema.visibility,
                    parameters: member_parameters,
                    return_type: schema.exposed_type.clone(),
                    body: MemberBody::Call(CallExpression {
                        receiver,
                        function: function.clone(),
                        arguments: parameters.iter().map(|p| p.name.clone()).collect(),
                    }),
                    annotations,
                }
            }
        }
    }

    /// The binds/provides marker followed by the multibinding marker. A
    /// multibinding container declaration carries only its own marker.
    fn framework_annotations(&self, schema: &ResolvedSchema<'_>) -> Vec<Annotation> {
        let output = &self.config.output;
        let primary = match &schema.source {
            BindingSource::Bind { .. } => &output.binds,
            BindingSource::Factory { .. } => &output.provides,
        };

        let directive: Option<&ClassName> = match schema.multiplicity_directive {
            MultiplicityDirective::None => None,
            MultiplicityDirective::IntoSet => Some(&output.into_set),
            MultiplicityDirective::IntoMap => Some(&output.into_map),
            MultiplicityDirective::ElementsIntoSet => Some(&output.elements_into_set),
            MultiplicityDirective::MultibindingContainer => {
                return vec![Annotation::new(output.multibinds.clone())];
            }
        };

        std::iter::once(primary)
            .chain(directive)
            .map(|name| Annotation::new(name.clone()))
            .collect()
    }
}

/// `base`, or `base` with the first numeric suffix no forwarded parameter uses.
fn unique_parameter_name(base: &str, parameters: &[Parameter]) -> String {
    let taken = |name: &str| parameters.iter().any(|p| p.name == name);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|name| !taken(name.as_str()))
        .unwrap_or_else(|| base.to_string())
}

fn class_array(types: Vec<TypeName>) -> AnnotationValue {
    AnnotationValue::Array(types.into_iter().map(AnnotationValue::Type).collect())
}
