use crate::model::{Annotation, AnnotationValue};
use sha1::{Digest, Sha1};

/// Width of the hash token appended to container names, in hex digits.
pub const HASH_TOKEN_WIDTH: usize = 8;

/// Canonical text form of an annotation: `fqn(name:value;name:value)`.
///
/// Arguments are sorted by name and declared defaults fill in omitted
/// arguments, so the same qualifier always renders the same way.
pub fn stable_identifier(annotation: &Annotation) -> String {
    let mut arguments: Vec<(&str, &AnnotationValue)> = annotation
        .arguments
        .iter()
        .map(|arg| (arg.name.as_str(), &arg.value))
        .collect();
    for default in &annotation.defaults {
        if annotation.argument(&default.name).is_none() {
            arguments.push((default.name.as_str(), &default.value));
        }
    }
    arguments.sort_by(|a, b| a.0.cmp(b.0));

    let rendered: Vec<String> = arguments
        .iter()
        .map(|(name, value)| format!("{}:{}", name, stable_value(value)))
        .collect();

    format!("{}({})", annotation.type_name.qualified(), rendered.join(";"))
}

fn stable_value(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::String(s) => s.clone(),
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Int(i) => i.to_string(),
        AnnotationValue::Float(f) => f.to_string(),
        AnnotationValue::Char(c) => c.to_string(),
        AnnotationValue::Type(ty) => ty.raw.qualified(),
        AnnotationValue::Enum(entry) => format!("{}.{}", entry.type_name.qualified(), entry.entry),
        AnnotationValue::Annotation(nested) => stable_identifier(nested),
        AnnotationValue::Array(values) => {
            values.iter().map(stable_value).collect::<Vec<_>>().join(",")
        }
    }
}

/// Fixed-width, identifier-safe content hash of a qualifier annotation.
pub fn qualifier_hash(annotation: &Annotation) -> String {
    let mut hasher = Sha1::new();
    hasher.update(stable_identifier(annotation).as_bytes());
    let digest = hasher.finalize();

    digest[..HASH_TOKEN_WIDTH / 2]
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
