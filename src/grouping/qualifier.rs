use crate::model::{Annotation, ClassName, SourceSet};
use std::collections::{HashMap, HashSet};

/// Finds qualifier annotations by walking the meta-annotation graph.
///
/// An annotation is a qualifier when its class is annotated with one of the
/// configured qualifier markers, directly or through any chain of
/// meta-annotations. The graph may be cyclic.
pub struct QualifierFinder<'a> {
    meta: HashMap<&'a ClassName, &'a [Annotation]>,
    markers: &'a [ClassName],
}

impl<'a> QualifierFinder<'a> {
    pub fn new(sources: &'a SourceSet, markers: &'a [ClassName]) -> Self {
        Self {
            meta: sources.meta_annotations(),
            markers,
        }
    }

    /// First annotation in `annotations` that is a qualifier, skipping any for which `skip` holds.
    pub fn find<'b>(
        &self,
        annotations: &'b [Annotation],
        skip: impl Fn(&Annotation) -> bool,
    ) -> Option<&'b Annotation> {
        let mut visited: HashSet<&ClassName> = HashSet::new();
        for annotation in annotations {
            if skip(annotation) {
                continue;
            }
            if self.is_qualifier(&annotation.type_name, &mut visited) {
                return Some(annotation);
            }
        }
        None
    }

    fn is_qualifier<'v>(
        &self,
        annotation_type: &'v ClassName,
        visited: &mut HashSet<&'v ClassName>,
    ) -> bool
    where
        'a: 'v,
    {
        let mut worklist = vec![annotation_type];

        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(&meta) = self.meta.get(current) else {
                continue;
            };
            for annotation in meta {
                if self.markers.contains(&annotation.type_name) {
                    return true;
                }
                worklist.push(&annotation.type_name);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationClass;

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    fn annotation_class(name: &str, meta: &[&str]) -> AnnotationClass {
        AnnotationClass {
            name: class(name),
            annotations: meta.iter().map(|m| Annotation::new(class(m))).collect(),
        }
    }

    fn named_qualifier() -> AnnotationClass {
        annotation_class("javax.inject.Named", &["javax.inject.Qualifier"])
    }

    fn markers() -> Vec<ClassName> {
        vec![class("javax.inject.Qualifier")]
    }

    #[test]
    fn test_direct_qualifier_is_found() {
        let sources = SourceSet::default()
            .with_annotation_class(named_qualifier());
        let markers = markers();
        let finder = QualifierFinder::new(&sources, &markers);

        let annotations = vec![
            Annotation::new(class("javax.inject.Singleton")),
            Annotation::new(class("javax.inject.Named")),
        ];
        let found = finder.find(&annotations, |_| false).unwrap();
        assert_eq!(found.type_name.simple_name(), "Named");
    }

    #[test]
    fn test_nested_qualifier_is_found() {
        let sources = SourceSet::default()
            .with_annotation_class(annotation_class("com.example.Special", &["com.example.Tagged"]))
            .with_annotation_class(annotation_class(
                "com.example.Tagged",
                &["javax.inject.Qualifier"],
            ));
        let markers = markers();
        let finder = QualifierFinder::new(&sources, &markers);

        let annotations = vec![Annotation::new(class("com.example.Special"))];
        assert!(finder.find(&annotations, |_| false).is_some());
    }

    #[test]
    fn test_cyclic_meta_annotations_terminate() {
        let sources = SourceSet::default()
            .with_annotation_class(annotation_class("com.example.A", &["com.example.B"]))
            .with_annotation_class(annotation_class("com.example.B", &["com.example.A"]));
        let markers = markers();
        let finder = QualifierFinder::new(&sources, &markers);

        let annotations = vec![
            Annotation::new(class("com.example.A")),
            Annotation::new(class("com.example.B")),
        ];
        assert!(finder.find(&annotations, |_| false).is_none());
    }

    #[test]
    fn test_skipped_annotations_are_ignored() {
        let sources = SourceSet::default()
            .with_annotation_class(named_qualifier());
        let markers = markers();
        let finder = QualifierFinder::new(&sources, &markers);

        let annotations = vec![Annotation::new(class("javax.inject.Named"))];
        assert!(finder.find(&annotations, |a| a.type_name.simple_name() == "Named").is_none());
    }
}
