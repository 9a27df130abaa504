//! Schema resolution: one [`ResolvedSchema`] per matched declaration.

mod bind;
mod factory;
mod schema;

pub use schema::{BindingSource, CallForm, ContainerKind, MultiplicityDirective, ResolvedSchema};

use crate::annotation::{BindingAnnotation, Marker, MarkerFamily};
use crate::config::GeneratorConfig;
use crate::error::{AutobindError, Result};
use crate::grouping::{QualifierFinder, disambiguation_suffix};
use crate::model::{Annotation, ClassName, Declaration, SourceSet, TypeName};
use crate::scanner::MatchedDeclaration;

pub struct SchemaResolver<'a> {
    config: &'a GeneratorConfig,
    qualifiers: QualifierFinder<'a>,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(config: &'a GeneratorConfig, sources: &'a SourceSet) -> Self {
        Self {
            config,
            qualifiers: QualifierFinder::new(sources, &config.types.qualifier_markers),
        }
    }

    pub fn resolve(&self, matched: &MatchedDeclaration<'a>) -> Result<ResolvedSchema<'a>> {
        let declaration = matched.declaration;
        let display_name = declaration.display_name();

        // Repeats of one marker are allowed; the first occurrence is used.
        let (marker, annotation) = match matched.markers.as_slice() {
            [first, rest @ ..] if rest.iter().all(|(other, _)| *other == first.0) => *first,
            _ => {
                return Err(AutobindError::AmbiguousMarker {
                    declaration: display_name,
                    markers: matched
                        .markers
                        .iter()
                        .map(|(_, annotation)| annotation.type_name.qualified())
                        .collect(),
                });
            }
        };

        let binding = BindingAnnotation::parse(marker, annotation, self.config, &display_name)?;

        let schema = match (marker.family, declaration) {
            (MarkerFamily::Bind, Declaration::Type(decl)) => {
                bind::resolve(self, declaration, decl, &binding)?
            }
            (MarkerFamily::Factory, Declaration::Function(decl)) => {
                factory::resolve(self, declaration, decl, &binding)?
            }
            (family, _) => {
                return Err(AutobindError::not_resolvable(
                    display_name,
                    declaration.kind_name(),
                    family.to_string(),
                ));
            }
        };

        tracing::debug!(
            "Resolved {} -> {} in {}",
            display_name,
            schema.exposed_type,
            schema.container_name
        );
        Ok(schema)
    }

    fn config(&self) -> &GeneratorConfig {
        self.config
    }

    fn is_marker(&self, annotation: &Annotation) -> bool {
        self.config.markers.identify(&annotation.type_name).is_some()
    }

    /// Every annotation except recognized markers, in declaration order.
    fn passthrough(&self, annotations: &[Annotation]) -> Vec<Annotation> {
        annotations
            .iter()
            .filter(|annotation| !self.is_marker(annotation))
            .cloned()
            .collect()
    }

    fn suffix(
        &self,
        binding: &BindingAnnotation<'_>,
        annotations: &[Annotation],
    ) -> Option<String> {
        disambiguation_suffix(binding, annotations, &self.qualifiers, |annotation| {
            self.is_marker(annotation)
        })
    }

    /// Container identity for a schema and, for test markers, the production
    /// container it replaces.
    fn container_names(
        &self,
        marker: Marker,
        package: &str,
        exposed_type: &TypeName,
        scope: &TypeName,
        suffix: Option<&str>,
    ) -> (ClassName, Option<ClassName>) {
        let name = self.container_name(marker, package, exposed_type, scope, suffix);
        let replaces = marker.is_test().then(|| {
            self.container_name(marker.production(), package, exposed_type, scope, suffix)
        });
        (name, replaces)
    }

    /// `<ExposedStem><suffix>_<Scope>_<FamilySuffix>`
    fn container_name(
        &self,
        marker: Marker,
        package: &str,
        exposed_type: &TypeName,
        scope: &TypeName,
        suffix: Option<&str>,
    ) -> ClassName {
        let naming = &self.config.naming;
        let family_suffix = match (marker.family, marker.is_test()) {
            (MarkerFamily::Bind, false) => &naming.bind_suffix,
            (MarkerFamily::Bind, true) => &naming.test_bind_suffix,
            (MarkerFamily::Factory, false) => &naming.factory_suffix,
            (MarkerFamily::Factory, true) => &naming.test_factory_suffix,
        };

        let simple_name = format!(
            "{}{}{sep}{}{sep}{}",
            exposed_type.stem(),
            suffix.unwrap_or_default(),
            scope.raw.simple_name(),
            family_suffix,
            sep = naming.separator,
        );
        ClassName::new(package, vec![simple_name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AnnotationClass, AnnotationValue, FunctionDeclaration, SourceFile, TypeDeclaration,
    };
    use crate::scanner::DeclarationScanner;

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    fn ty(name: &str) -> TypeName {
        TypeName::parse(name).unwrap()
    }

    fn file(path: &str) -> Option<SourceFile> {
        Some(SourceFile {
            path: path.to_string(),
            package: "com.example".to_string(),
        })
    }

    fn marker(simple_name: &str) -> Annotation {
        Annotation::new(class(&format!("com.herman.hiltautobind.{}", simple_name)))
    }

    fn type_decl(name: &str, supertypes: &[&str], annotations: Vec<Annotation>) -> Declaration {
        Declaration::Type(TypeDeclaration {
            name: class(name),
            class_kind: Default::default(),
            is_abstract: false,
            supertypes: supertypes.iter().map(|s| ty(s)).collect(),
            annotations,
            visibility: Default::default(),
            file: file("Types.kt"),
        })
    }

    fn function_decl(
        name: &str,
        return_type: Option<&str>,
        annotations: Vec<Annotation>,
    ) -> Declaration {
        Declaration::Function(FunctionDeclaration {
            name: name.to_string(),
            parameters: Vec::new(),
            return_type: return_type.map(ty),
            enclosing: None,
            annotations,
            visibility: Default::default(),
            file: file("Functions.kt"),
        })
    }

    fn named(value: &str) -> Annotation {
        Annotation::new(class("javax.inject.Named"))
            .with_argument("value", AnnotationValue::String(value.to_string()))
    }

    fn key(value: &str) -> AnnotationValue {
        AnnotationValue::String(value.to_string())
    }

    /// Resolves the only marked declaration in `sources`.
    fn resolve_one(sources: &SourceSet, config: &GeneratorConfig) -> Result<ClassName> {
        let matched = DeclarationScanner::new(&config.markers).scan(sources);
        assert_eq!(matched.len(), 1);
        SchemaResolver::new(config, sources)
            .resolve(&matched[0])
            .map(|schema| schema.container_name)
    }

    fn resolve_error(declaration: Declaration) -> AutobindError {
        let config = GeneratorConfig::default();
        let sources = SourceSet::new(vec![declaration]);
        resolve_one(&sources, &config).unwrap_err()
    }

    #[test]
    fn test_distinct_markers_are_ambiguous() {
        let err = resolve_error(type_decl(
            "com.example.Both",
            &["com.example.Something"],
            vec![marker("AutoBind"), marker("TestAutoBind")],
        ));
        match err {
            AutobindError::AmbiguousMarker { declaration, markers } => {
                assert_eq!(declaration, "com.example.Both");
                assert_eq!(
                    markers,
                    ["com.herman.hiltautobind.AutoBind", "com.herman.hiltautobind.TestAutoBind"]
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_repeated_marker_uses_first_occurrence() {
        let config = GeneratorConfig::default();
        let sources = SourceSet::new(vec![type_decl(
            "com.example.Fake",
            &["com.example.Something"],
            vec![
                marker("TestAutoBind").with_argument("uniqueKey", key("First")),
                marker("TestAutoBind").with_argument("uniqueKey", key("Second")),
            ],
        )]);
        let name = resolve_one(&sources, &config).unwrap();
        assert_eq!(name.simple_name(), "SomethingFirst_SingletonComponent_TestModule");
    }

    #[test]
    fn test_missing_file_and_return_type() {
        let mut declaration = type_decl("com.example.Loose", &[], vec![marker("AutoBind")]);
        if let Declaration::Type(decl) = &mut declaration {
            decl.file = None;
        }
        assert_eq!(
            resolve_error(declaration),
            AutobindError::MissingContainingFile {
                declaration: "com.example.Loose".to_string()
            }
        );

        assert_eq!(
            resolve_error(function_decl("f", None, vec![marker("AutoFactory")])),
            AutobindError::MissingReturnType {
                declaration: "com.example.f".to_string()
            }
        );
    }

    #[test]
    fn test_factory_only_shapes_rejected_on_types() {
        for target in ["SET_VALUES", "MULTIBINDING_CONTAINER"] {
            let err = resolve_error(type_decl(
                "com.example.SV",
                &[],
                vec![marker("AutoBind").with_argument("target", key(target))],
            ));
            match err {
                AutobindError::InvalidMultibindingShape {
                    multiplicity,
                    exposed_type,
                    ..
                } => {
                    assert_eq!(multiplicity, target);
                    assert_eq!(exposed_type, "com.example.SV");
                }
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn test_markers_on_the_wrong_declaration_kind() {
        let err = resolve_error(function_decl(
            "g",
            Some("com.example.Something"),
            vec![marker("AutoBind")],
        ));
        assert_eq!(
            err,
            AutobindError::not_resolvable("com.example.g", "function", "type-binding")
        );

        let err = resolve_error(type_decl("com.example.Thing", &[], vec![marker("AutoFactory")]));
        assert!(matches!(err, AutobindError::NotAResolvableDeclarationKind { .. }));
    }

    #[test]
    fn test_explicit_target_wins_over_supertypes() {
        let config = GeneratorConfig::default();
        let sources = SourceSet::new(vec![type_decl(
            "com.example.Over",
            &["com.example.Other", "com.example.S"],
            vec![marker("AutoBind")
                .with_argument("superType", AnnotationValue::Type(ty("com.example.S")))],
        )]);
        let name = resolve_one(&sources, &config).unwrap();
        assert_eq!(name.simple_name(), "S_SingletonComponent_Module");
    }

    #[test]
    fn test_explicit_component_names_the_container() {
        let config = GeneratorConfig::default();
        let sources = SourceSet::new(vec![type_decl(
            "com.example.Screen",
            &["com.example.Presenter"],
            vec![marker("AutoBind").with_argument(
                "component",
                AnnotationValue::Type(ty("dagger.hilt.android.components.ActivityComponent")),
            )],
        )]);
        let name = resolve_one(&sources, &config).unwrap();
        assert_eq!(name.simple_name(), "Presenter_ActivityComponent_Module");
        assert_eq!(name.package(), "com.example");
    }

    #[test]
    fn test_qualified_test_override_replaces_qualified_container() {
        let config = GeneratorConfig::default();
        let sources = SourceSet::new(vec![type_decl(
            "com.example.FakeB",
            &["com.example.Something"],
            vec![marker("TestAutoBind"), named("x")],
        )])
        .with_annotation_class(AnnotationClass {
            name: class("javax.inject.Named"),
            annotations: vec![Annotation::new(class("javax.inject.Qualifier"))],
        });

        let matched = DeclarationScanner::new(&config.markers).scan(&sources);
        let schema = SchemaResolver::new(&config, &sources).resolve(&matched[0]).unwrap();
        assert_eq!(
            schema.container_name.simple_name(),
            "Somethingccfc0bb0_SingletonComponent_TestModule"
        );
        assert_eq!(
            schema.replaces_container_name.unwrap().simple_name(),
            "Somethingccfc0bb0_SingletonComponent_Module"
        );
        assert_eq!(schema.passthrough_annotations, vec![named("x")]);
    }
}
