//! Disambiguation suffixes and container buckets.

mod hash;
mod qualifier;

pub use hash::{HASH_TOKEN_WIDTH, qualifier_hash, stable_identifier};
pub use qualifier::QualifierFinder;

use crate::annotation::BindingAnnotation;
use crate::model::{Annotation, ClassName};
use crate::resolver::ResolvedSchema;
use indexmap::IndexMap;

/// Suffix appended to a container's base name.
///
/// An explicit disambiguation key wins over a discovered qualifier; without
/// either there is no suffix.
pub fn disambiguation_suffix(
    binding: &BindingAnnotation<'_>,
    annotations: &[Annotation],
    qualifiers: &QualifierFinder<'_>,
    is_marker: impl Fn(&Annotation) -> bool,
) -> Option<String> {
    if let Some(key) = &binding.disambiguation_key {
        return Some(key.clone());
    }
    qualifiers.find(annotations, is_marker).map(qualifier_hash)
}

/// All schemas sharing one container name, in first-encountered order.
#[derive(Debug, Clone)]
pub struct SchemaBucket<'a> {
    pub container_name: ClassName,
    pub schemas: Vec<ResolvedSchema<'a>>,
}

/// Buckets schemas by container name.
///
/// Buckets appear in the order their first schema was encountered and keep
/// their schemas in input order.
pub fn group(schemas: Vec<ResolvedSchema<'_>>) -> Vec<SchemaBucket<'_>> {
    let mut buckets: IndexMap<ClassName, Vec<ResolvedSchema<'_>>> = IndexMap::new();
    for schema in schemas {
        buckets
            .entry(schema.container_name.clone())
            .or_default()
            .push(schema);
    }

    buckets
        .into_iter()
        .map(|(container_name, schemas)| {
            tracing::debug!("Grouped {} member(s) into {}", schemas.len(), container_name);
            SchemaBucket {
                container_name,
                schemas,
            }
        })
        .collect()
}
