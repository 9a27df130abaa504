use super::schema::{BindingSource, CallForm, ContainerKind, MultiplicityDirective, ResolvedSchema};
use super::SchemaResolver;
use crate::annotation::{BindingAnnotation, Multiplicity};
use crate::config::GeneratorConfig;
use crate::error::{AutobindError, Result};
use crate::model::{Declaration, Enclosing, FunctionDeclaration, Parameter, TypeName, Visibility};

pub(super) fn resolve<'a>(
    resolver: &SchemaResolver<'a>,
    origin: &'a Declaration,
    decl: &'a FunctionDeclaration,
    binding: &BindingAnnotation<'_>,
) -> Result<ResolvedSchema<'a>> {
    let config = resolver.config();
    let name = decl.qualified_name();

    let file = decl
        .file
        .clone()
        .ok_or_else(|| AutobindError::MissingContainingFile {
            declaration: name.clone(),
        })?;
    let exposed_type = decl
        .return_type
        .clone()
        .ok_or_else(|| AutobindError::MissingReturnType {
            declaration: name.clone(),
        })?;

    validate_shape(config, &name, binding.multiplicity, &exposed_type)?;

    let scope = binding.resolved_scope(config);
    let suffix = resolver.suffix(binding, &decl.annotations);
    let (container_name, replaces_container_name) = resolver.container_names(
        binding.marker,
        &file.package,
        &exposed_type,
        &scope,
        suffix.as_deref(),
    );

    Ok(ResolvedSchema {
        origin,
        marker: binding.marker,
        exposed_type,
        scope,
        container_kind: ContainerKind::SingletonObject,
        container_name,
        is_test_override: binding.marker.is_test(),
        replaces_container_name,
        member_name: format!("{}{}", config.naming.provide_prefix, capitalize(&decl.name)),
        passthrough_annotations: resolver.passthrough(&decl.annotations),
        multiplicity_directive: MultiplicityDirective::from(binding.multiplicity),
        visibility: member_visibility(decl.visibility),
        file,
        source: BindingSource::Factory {
            function: decl.name.clone(),
            parameters: forwarded_parameters(config, &decl.parameters),
            call: call_form(decl.enclosing.as_ref()),
        },
    })
}

fn validate_shape(
    config: &GeneratorConfig,
    declaration: &str,
    multiplicity: Multiplicity,
    exposed_type: &TypeName,
) -> Result<()> {
    let arity = exposed_type.arguments.len();
    let is_set = config.types.set_types.contains(&exposed_type.raw) && arity == 1;
    let is_map = config.types.map_types.contains(&exposed_type.raw) && arity == 2;

    let reason = match multiplicity {
        Multiplicity::SetValues if !is_set => "expected a Set<T> return type",
        Multiplicity::MultibindingContainer if !(is_set || is_map) => {
            "expected a Set<T> or Map<K, V> return type"
        }
        _ => return Ok(()),
    };
    Err(AutobindError::invalid_shape(
        declaration,
        multiplicity.to_string(),
        exposed_type.to_string(),
        reason,
    ))
}

fn call_form(enclosing: Option<&Enclosing>) -> CallForm {
    match enclosing {
        Some(owner) if owner.class_kind.is_instance_owner() => CallForm::Instance {
            owner: owner.name.clone(),
        },
        Some(owner) => CallForm::Singleton {
            owner: owner.name.clone(),
        },
        None => CallForm::TopLevel,
    }
}

/// Type arguments of forwarded parameters get the wildcard-suppression
/// annotation so the DI framework sees the declared variance.
fn forwarded_parameters(config: &GeneratorConfig, parameters: &[Parameter]) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|parameter| {
            let mut parameter = parameter.clone();
            if let Some(suppress) = &config.output.suppress_wildcards {
                parameter.type_name.arguments = std::mem::take(&mut parameter.type_name.arguments)
                    .into_iter()
                    .map(|argument| argument.with_annotation(suppress.clone()))
                    .collect();
            }
            parameter
        })
        .collect()
}

fn member_visibility(visibility: Visibility) -> Visibility {
    match visibility {
        Visibility::Internal => Visibility::Internal,
        _ => Visibility::Public,
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, ClassName};

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    #[test]
    fn test_call_form_dispatch() {
        let owner = |kind| Enclosing {
            name: class("com.example.Owner"),
            class_kind: kind,
        };
        assert!(matches!(call_form(Some(&owner(ClassKind::Class))), CallForm::Instance { .. }));
        assert!(matches!(call_form(Some(&owner(ClassKind::Interface))), CallForm::Instance { .. }));
        assert!(matches!(call_form(Some(&owner(ClassKind::EnumClass))), CallForm::Instance { .. }));
        assert!(matches!(call_form(Some(&owner(ClassKind::Object))), CallForm::Singleton { .. }));
        assert_eq!(call_form(None), CallForm::TopLevel);
    }

    #[test]
    fn test_shape_validation() {
        let config = GeneratorConfig::default();
        let set = TypeName::parse("kotlin.collections.Set<com.example.Something>").unwrap();
        let map = TypeName::parse("kotlin.collections.Map<kotlin.String, com.example.Something>")
            .unwrap();
        let plain = TypeName::parse("kotlin.String").unwrap();

        assert!(validate_shape(&config, "f", Multiplicity::SetValues, &set).is_ok());
        assert!(validate_shape(&config, "f", Multiplicity::SetValues, &map).is_err());
        assert!(validate_shape(&config, "f", Multiplicity::SetValues, &plain).is_err());
        assert!(validate_shape(&config, "f", Multiplicity::MultibindingContainer, &map).is_ok());
        assert!(validate_shape(&config, "f", Multiplicity::MultibindingContainer, &plain).is_err());
        assert!(validate_shape(&config, "f", Multiplicity::Set, &plain).is_ok());
    }

    #[test]
    fn test_forwarded_parameters_suppress_wildcards() {
        let config = GeneratorConfig::default();
        let parameters = vec![Parameter {
            name: "factories".to_string(),
            type_name: TypeName::parse("kotlin.collections.Set<com.example.Factory>").unwrap(),
            annotations: Vec::new(),
        }];
        let forwarded = forwarded_parameters(&config, &parameters);
        assert_eq!(
            forwarded[0].type_name.to_string(),
            "kotlin.collections.Set<@kotlin.jvm.JvmSuppressWildcards com.example.Factory>"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("somethingFactory"), "SomethingFactory");
        assert_eq!(capitalize(""), "");
    }
}
