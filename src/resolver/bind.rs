use super::schema::{BindingSource, ContainerKind, MultiplicityDirective, ResolvedSchema};
use super::SchemaResolver;
use crate::annotation::BindingAnnotation;
use crate::error::{AutobindError, Result};
use crate::model::{ClassName, Declaration, TypeDeclaration, TypeName};

pub(super) fn resolve<'a>(
    resolver: &SchemaResolver<'a>,
    origin: &'a Declaration,
    decl: &'a TypeDeclaration,
    binding: &BindingAnnotation<'_>,
) -> Result<ResolvedSchema<'a>> {
    let config = resolver.config();
    let name = decl.name.qualified();

    let file = decl
        .file
        .clone()
        .ok_or_else(|| AutobindError::MissingContainingFile {
            declaration: name.clone(),
        })?;

    if !decl.is_instantiable() {
        let kind = if decl.is_abstract {
            "abstract class".to_string()
        } else {
            decl.class_kind.to_string()
        };
        return Err(AutobindError::not_resolvable(name, kind, binding.marker.family.to_string()));
    }

    let exposed_type = exposed_type(decl, binding, &config.types.top_type);

    if binding.multiplicity.is_factory_only() {
        return Err(AutobindError::invalid_shape(
            name,
            binding.multiplicity.to_string(),
            exposed_type.to_string(),
            "only factory functions can provide collection elements or containers",
        ));
    }

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
        container_kind: ContainerKind::Interface,
        container_name,
        is_test_override: binding.marker.is_test(),
        replaces_container_name,
        member_name: format!("{}{}", config.naming.bind_prefix, decl.name.simple_name()),
        passthrough_annotations: resolver.passthrough(&decl.annotations),
        multiplicity_directive: MultiplicityDirective::from(binding.multiplicity),
        visibility: decl.visibility,
        file,
        source: BindingSource::Bind {
            implementation: TypeName::class(decl.name.clone()),
        },
    })
}

/// Explicit override, else the first declared supertype that is not the top
/// type, else the declaration itself.
fn exposed_type(
    decl: &TypeDeclaration,
    binding: &BindingAnnotation<'_>,
    top_type: &ClassName,
) -> TypeName {
    if let Some(target) = &binding.target_type {
        return target.clone();
    }
    decl.supertypes
        .iter()
        .find(|supertype| &supertype.raw != top_type)
        .cloned()
        .unwrap_or_else(|| TypeName::class(decl.name.clone()))
}
