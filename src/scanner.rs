//! Declaration scanning
//!
//! Finds every declaration carrying a recognized marker. Each marker is looked
//! up separately, so a declaration carrying several markers is reachable more
//! than once; the result holds it exactly once, in traversal order.

use crate::annotation::Marker;
use crate::config::MarkerRegistry;
use crate::model::{Annotation, Declaration, SourceSet};
use std::collections::BTreeMap;

/// A declaration together with every recognized marker found on it.
#[derive(Debug, Clone)]
pub struct MatchedDeclaration<'a> {
    pub declaration: &'a Declaration,
    pub markers: Vec<(Marker, &'a Annotation)>,
}

pub struct DeclarationScanner<'a> {
    registry: &'a MarkerRegistry,
}

impl<'a> DeclarationScanner<'a> {
    pub fn new(registry: &'a MarkerRegistry) -> Self {
        Self { registry }
    }

    pub fn scan(&self, sources: &'a SourceSet) -> Vec<MatchedDeclaration<'a>> {
        let ordered = sources.ordered();

        // Traversal position -> markers found, keyed so iteration follows traversal order.
        let mut matches: BTreeMap<usize, Vec<(Marker, &'a Annotation)>> = BTreeMap::new();
        for (marker, marker_name) in self.registry.all() {
            for (position, &declaration) in ordered.iter().enumerate() {
                for annotation in declaration.annotations() {
                    if &annotation.type_name == marker_name {
                        matches.entry(position).or_default().push((marker, annotation));
                    }
                }
            }
        }

        let matched: Vec<MatchedDeclaration<'a>> = matches
            .into_iter()
            .map(|(position, markers)| MatchedDeclaration {
                declaration: ordered[position],
                markers,
            })
            .collect();

        tracing::info!(
            "Scanned {} declaration(s), {} carry a binding marker",
            ordered.len(),
            matched.len()
        );
        matched
    }
}
