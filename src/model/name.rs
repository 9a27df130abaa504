use crate::error::AutobindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully-qualified class reference split into its package and nested simple names.
///
/// In the wire format a class name is a single dotted string. The split between
/// package and class is guessed: the first segment starting with an upper-case
/// letter begins the class part (`com.example.Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_names: Vec<String>) -> Self {
        Self {
            package: package.into(),
            simple_names,
        }
    }

    pub fn best_guess(qualified: &str) -> Result<Self, AutobindError> {
        let segments: Vec<&str> = qualified.split('.').collect();
        if qualified.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(AutobindError::Config(format!(
                "'{}' is not a valid class name",
                qualified
            )));
        }

        let class_start = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len() - 1);

        Ok(Self {
            package: segments[..class_start].join("."),
            simple_names: segments[class_start..].iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join(".")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("."))
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

impl TryFrom<String> for ClassName {
    type Error = AutobindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClassName::best_guess(value.trim())
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.qualified()
    }
}

/// A possibly parameterized, possibly nullable type reference.
///
/// Written as `@a.B pkg.Raw<pkg.Arg1, pkg.Arg2>?` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName {
    pub raw: ClassName,
    pub arguments: Vec<TypeName>,
    pub nullable: bool,
    pub annotations: Vec<ClassName>,
}

impl TypeName {
    pub fn class(raw: ClassName) -> Self {
        Self {
            raw,
            arguments: Vec::new(),
            nullable: false,
            annotations: Vec::new(),
        }
    }

    pub fn parameterized(raw: ClassName, arguments: Vec<TypeName>) -> Self {
        Self {
            arguments,
            ..Self::class(raw)
        }
    }

    pub fn parse(input: &str) -> Result<Self, AutobindError> {
        let mut parser = TypeParser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    pub fn is_parameterized(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Identifier-safe stem used when deriving container names.
    ///
    /// `Map<String, Fruit>` becomes `MapStringFruit`.
    pub fn stem(&self) -> String {
        let mut stem = self.raw.simple_name().to_string();
        for argument in &self.arguments {
            stem.push_str(&argument.stem());
        }
        stem
    }

    pub fn with_annotation(mut self, annotation: ClassName) -> Self {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
        self
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "@{} ", annotation)?;
        }
        write!(f, "{}", self.raw)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl From<ClassName> for TypeName {
    fn from(raw: ClassName) -> Self {
        TypeName::class(raw)
    }
}

impl TryFrom<String> for TypeName {
    type Error = AutobindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeName::parse(&value)
    }
}

impl From<TypeName> for String {
    fn from(ty: TypeName) -> Self {
        ty.to_string()
    }
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn parse_type(&mut self) -> Result<TypeName, AutobindError> {
        let mut annotations = Vec::new();
        self.skip_whitespace();
        while self.eat('@') {
            annotations.push(ClassName::best_guess(self.qualified_name())?);
            self.skip_whitespace();
        }

        let name = self.qualified_name();
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        let raw = ClassName::best_guess(name)?;

        let mut arguments = Vec::new();
        self.skip_whitespace();
        if self.eat('<') {
            loop {
                arguments.push(self.parse_type()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        self.skip_whitespace();
        let nullable = self.eat('?');

        Ok(TypeName {
            raw,
            arguments,
            nullable,
            annotations,
        })
    }

    fn qualified_name(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' || c == '$' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        &input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn error(&self, message: &str) -> AutobindError {
        AutobindError::Config(format!(
            "invalid type '{}' at offset {}: {}",
            self.input, self.pos, message
        ))
    }
}
