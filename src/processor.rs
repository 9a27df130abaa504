//! The generation pass
//!
//! Scans a [`SourceSet`], resolves every marked declaration, groups the
//! resolved schemas into containers and hands each container to a writer.
//! A declaration that fails to resolve becomes a [`Diagnostic`]; the rest of
//! the pass carries on without it.

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::emitter::{ContainerDecl, ContainerEmitter, ContainerWriter};
use crate::error::Result;
use crate::grouping;
use crate::model::SourceSet;
use crate::resolver::{ResolvedSchema, SchemaResolver};
use crate::scanner::DeclarationScanner;

/// Everything one pass produced.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub containers: Vec<ContainerDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn container(&self, simple_name: &str) -> Option<&ContainerDecl> {
        self.containers
            .iter()
            .find(|container| container.name.simple_name() == simple_name)
    }
}

pub struct AutobindProcessor {
    config: GeneratorConfig,
}

impl AutobindProcessor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolves every marked declaration, collecting failures instead of
    /// stopping at the first one.
    pub fn resolve<'a>(
        &'a self,
        sources: &'a SourceSet,
    ) -> (Vec<ResolvedSchema<'a>>, Vec<Diagnostic>) {
        let matched = DeclarationScanner::new(&self.config.markers).scan(sources);
        let resolver = SchemaResolver::new(&self.config, sources);

        let mut schemas = Vec::with_capacity(matched.len());
        let mut diagnostics = Vec::new();
        for candidate in &matched {
            match resolver.resolve(candidate) {
                Ok(schema) => schemas.push(schema),
                Err(e) => {
                    let diagnostic = Diagnostic::new(candidate.declaration, e);
                    tracing::error!("Unable to resolve {}: {}", diagnostic.declaration, diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        tracing::info!(
            "Resolved {} binding(s) ({} failed)",
            schemas.len(),
            diagnostics.len()
        );
        (schemas, diagnostics)
    }

    /// Runs the whole pass and collects the containers in memory.
    pub fn process(&self, sources: &SourceSet) -> ProcessOutput {
        let (containers, diagnostics) = self.plan(sources);
        ProcessOutput {
            containers,
            diagnostics,
        }
    }

    /// Runs the whole pass, handing each container to `writer` in
    /// first-encountered order. Writer failures stop the pass; resolution
    /// failures come back as diagnostics.
    pub fn process_into<W: ContainerWriter>(
        &self,
        sources: &SourceSet,
        writer: &mut W,
    ) -> Result<Vec<Diagnostic>> {
        let (containers, diagnostics) = self.plan(sources);
        for container in &containers {
            tracing::debug!(
                "Writing {} ({} member(s))",
                container.name,
                container.members.len()
            );
            writer.write(container)?;
        }
        tracing::info!("Wrote {} container(s)", containers.len());
        Ok(diagnostics)
    }

    /// Scan, resolve, group and emit, without writing anything.
    fn plan(&self, sources: &SourceSet) -> (Vec<ContainerDecl>, Vec<Diagnostic>) {
        tracing::info!("Starting generation pass...");

        let (schemas, diagnostics) = self.resolve(sources);
        let emitter = ContainerEmitter::new(&self.config);
        let containers: Vec<ContainerDecl> = grouping::group(schemas)
            .iter()
            .filter_map(|bucket| emitter.emit(bucket))
            .collect();

        tracing::info!(
            "Generation pass complete ({} container(s), {} diagnostic(s))",
            containers.len(),
            diagnostics.len()
        );
        (containers, diagnostics)
    }
}

impl Default for AutobindProcessor {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::JsonLinesWriter;
    use crate::model::{Annotation, ClassName, Declaration, SourceFile, TypeDeclaration};

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    fn bound_class(name: &str) -> Declaration {
        Declaration::Type(TypeDeclaration {
            name: class(name),
            class_kind: Default::default(),
            is_abstract: false,
            supertypes: vec![crate::model::TypeName::parse("com.example.Something").unwrap()],
            annotations: vec![Annotation::new(class("com.herman.hiltautobind.AutoBind"))],
            visibility: Default::default(),
            file: Some(SourceFile {
                path: "Something.kt".to_string(),
                package: "com.example".to_string(),
            }),
        })
    }

    #[test]
    fn test_process_groups_into_one_container() {
        let sources =
            SourceSet::new(vec![bound_class("com.example.A"), bound_class("com.example.B")]);
        let output = AutobindProcessor::default().process(&sources);

        assert!(!output.has_errors());
        assert_eq!(output.containers.len(), 1);
        let container = output
            .container("Something_SingletonComponent_Module")
            .unwrap();
        assert_eq!(container.members.len(), 2);
        assert_eq!(container.originating_files, ["Something.kt"]);
    }

    #[test]
    fn test_process_into_json_lines() {
        let sources = SourceSet::new(vec![bound_class("com.example.A")]);
        let mut writer = JsonLinesWriter::new(Vec::new());
        let diagnostics = AutobindProcessor::default()
            .process_into(&sources, &mut writer)
            .unwrap();
        assert!(diagnostics.is_empty());

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
        let json: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(json["kind"], "interface");
    }

    #[test]
    fn test_process_keeps_diagnostics_next_to_containers() {
        let mut abstract_class = bound_class("com.example.Base");
        if let Declaration::Type(decl) = &mut abstract_class {
            decl.is_abstract = true;
        }
        let sources = SourceSet::new(vec![abstract_class, bound_class("com.example.A")]);
        let output = AutobindProcessor::default().process(&sources);

        assert!(output.has_errors());
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].declaration, "com.example.Base");
        assert_eq!(output.containers.len(), 1);

        let mut containers: Vec<ContainerDecl> = Vec::new();
        let diagnostics = AutobindProcessor::default()
            .process_into(&sources, &mut containers)
            .unwrap();
        assert_eq!(diagnostics, output.diagnostics);
        assert_eq!(containers, output.containers);
    }
}
