use super::marker::{Marker, MarkerFamily, Multiplicity};
use crate::config::GeneratorConfig;
use crate::error::{AutobindError, Result};
use crate::model::{Annotation, AnnotationValue, TypeName};
use std::str::FromStr;

/// A recognized marker with its arguments decoded.
///
/// Arguments left at their documented default decode to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingAnnotation<'a> {
    pub marker: Marker,
    pub annotation: &'a Annotation,
    pub scope: Option<TypeName>,
    pub target_type: Option<TypeName>,
    pub multiplicity: Multiplicity,
    pub disambiguation_key: Option<String>,
}

impl<'a> BindingAnnotation<'a> {
    pub fn parse(
        marker: Marker,
        annotation: &'a Annotation,
        config: &GeneratorConfig,
        declaration: &str,
    ) -> Result<Self> {
        let names = &config.arguments;

        let scope = annotation
            .argument_if_not_default(&names.scope)
            .map(|value| expect_type(value, declaration, &names.scope))
            .transpose()?;

        // Only the type family has an override; a factory's return type is its target.
        let target_type = match marker.family {
            MarkerFamily::Bind => annotation
                .argument_if_not_default(&names.target_type)
                .map(|value| expect_type(value, declaration, &names.target_type))
                .transpose()?
                .filter(|ty| !(ty.raw == config.types.target_sentinel && !ty.is_parameterized())),
            MarkerFamily::Factory => None,
        };

        let multiplicity = match annotation.argument(&names.multiplicity) {
            Some(value) => parse_multiplicity(value, declaration, &names.multiplicity)?,
            None => Multiplicity::default(),
        };

        let disambiguation_key = match annotation.argument(&names.disambiguation_key) {
            Some(value) => value
                .as_str()
                .ok_or_else(|| {
                    AutobindError::invalid_argument(
                        declaration,
                        &names.disambiguation_key,
                        format!("expected a string, found {}", value.kind()),
                    )
                })?
                .to_string(),
            None => String::new(),
        };

        Ok(Self {
            marker,
            annotation,
            scope,
            target_type,
            multiplicity,
            disambiguation_key: Some(disambiguation_key).filter(|key| !key.is_empty()),
        })
    }

    pub fn resolved_scope(&self, config: &GeneratorConfig) -> TypeName {
        self.scope
            .clone()
            .unwrap_or_else(|| TypeName::class(config.types.default_scope.clone()))
    }
}

fn expect_type(value: &AnnotationValue, declaration: &str, argument: &str) -> Result<TypeName> {
    value.as_type().cloned().ok_or_else(|| {
        AutobindError::invalid_argument(
            declaration,
            argument,
            format!("expected a class literal, found {}", value.kind()),
        )
    })
}

fn parse_multiplicity(
    value: &AnnotationValue,
    declaration: &str,
    argument: &str,
) -> Result<Multiplicity> {
    let entry = value.as_enum_entry().ok_or_else(|| {
        AutobindError::invalid_argument(
            declaration,
            argument,
            format!("expected an enum entry, found {}", value.kind()),
        )
    })?;
    Multiplicity::from_str(entry).map_err(|_| {
        AutobindError::invalid_argument(
            declaration,
            argument,
            format!("unknown target '{}'", entry),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassName, EnumEntry};

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    fn class_literal(name: &str) -> AnnotationValue {
        AnnotationValue::Type(TypeName::class(class(name)))
    }

    fn auto_bind() -> Annotation {
        Annotation::new(class("com.herman.hiltautobind.AutoBind"))
    }

    #[test]
    fn test_bare_marker_has_no_overrides() {
        let config = GeneratorConfig::default();
        let annotation = auto_bind();
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();

        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.target_type, None);
        assert_eq!(parsed.multiplicity, Multiplicity::Instance);
        assert_eq!(parsed.disambiguation_key, None);
        assert_eq!(
            parsed.resolved_scope(&config).raw.simple_name(),
            "SingletonComponent"
        );
    }

    #[test]
    fn test_sentinel_target_is_treated_as_unset() {
        let config = GeneratorConfig::default();
        let annotation = auto_bind().with_argument("superType", class_literal("kotlin.Any"));
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();
        assert_eq!(parsed.target_type, None);
    }

    #[test]
    fn test_declared_default_is_treated_as_unset() {
        let config = GeneratorConfig::default();
        let annotation = auto_bind()
            .with_argument("component", class_literal("com.example.AppScope"))
            .with_default("component", class_literal("com.example.AppScope"));
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();
        assert_eq!(parsed.scope, None);
    }

    #[test]
    fn test_explicit_arguments_are_decoded() {
        let config = GeneratorConfig::default();
        let annotation = auto_bind()
            .with_argument(
                "component",
                class_literal("dagger.hilt.android.components.ActivityComponent"),
            )
            .with_argument("superType", class_literal("com.example.Something"))
            .with_argument(
                "target",
                AnnotationValue::Enum(EnumEntry {
                    type_name: class("com.herman.hiltautobind.annotations.autobind.AutoBindTarget"),
                    entry: "SET".to_string(),
                }),
            )
            .with_argument("uniqueKey", AnnotationValue::String("Cat".to_string()));
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();

        assert_eq!(parsed.scope.unwrap().raw.simple_name(), "ActivityComponent");
        assert_eq!(parsed.target_type.unwrap().raw.simple_name(), "Something");
        assert_eq!(parsed.multiplicity, Multiplicity::Set);
        assert_eq!(parsed.disambiguation_key.as_deref(), Some("Cat"));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let config = GeneratorConfig::default();
        let annotation =
            auto_bind().with_argument("target", AnnotationValue::String("LIST".to_string()));
        let err = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap_err();
        assert!(matches!(err, AutobindError::InvalidMarkerArgument { .. }));
    }

    #[test]
    fn test_factory_marker_ignores_target_type() {
        let config = GeneratorConfig::default();
        let annotation = Annotation::new(class("com.herman.hiltautobind.AutoFactory"))
            .with_argument("superType", class_literal("com.example.Something"));
        let parsed = BindingAnnotation::parse(Marker::FACTORY, &annotation, &config, "f").unwrap();
        assert_eq!(parsed.target_type, None);
    }

    #[test]
    fn test_disambiguation_key_is_kept_as_written() {
        let config = GeneratorConfig::default();
        let annotation =
            auto_bind().with_argument("uniqueKey", AnnotationValue::String("Big Cat".to_string()));
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();
        assert_eq!(parsed.disambiguation_key.as_deref(), Some("Big Cat"));

        let annotation =
            auto_bind().with_argument("uniqueKey", AnnotationValue::String(String::new()));
        let parsed = BindingAnnotation::parse(Marker::BIND, &annotation, &config, "Foo").unwrap();
        assert_eq!(parsed.disambiguation_key, None);
    }
}
