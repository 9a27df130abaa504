//! Generator configuration
//!
//! Every framework identity the generator recognizes or emits lives here instead
//! of in process-wide constants. The default configuration targets Hilt/Dagger:
//!
//! ```json
//! {
//!   "types": { "default_scope": "dagger.hilt.components.SingletonComponent" },
//!   "naming": { "provide_prefix": "provide" }
//! }
//! ```
//!
//! Sections missing from a JSON document keep their defaults. Environment
//! variables prefixed with `AUTOBIND_` are applied last.

use crate::error::{AutobindError, Result};
use crate::model::ClassName;
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub markers: MarkerRegistry,
    pub arguments: ArgumentNames,
    pub types: TypeConfig,
    pub output: OutputAnnotations,
    pub naming: NamingConfig,
}

/// Recognized marker pairs, one per family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerRegistry {
    pub bind: MarkerPair,
    pub factory: MarkerPair,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkerPair {
    pub production: ClassName,
    pub test: ClassName,
}

/// Argument names read from a marker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArgumentNames {
    pub scope: String,
    pub target_type: String,
    pub multiplicity: String,
    pub disambiguation_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    /// Implicit supertype of every class; never chosen as a bound type.
    pub top_type: ClassName,
    /// Value of the target-type argument meaning "use default resolution".
    pub target_sentinel: ClassName,
    pub default_scope: ClassName,
    pub qualifier_markers: Vec<ClassName>,
    pub set_types: Vec<ClassName>,
    pub map_types: Vec<ClassName>,
}

/// Framework annotations attached to generated containers and members.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputAnnotations {
    pub module: ClassName,
    pub install_in: ClassName,
    pub test_install_in: ClassName,
    pub binds: ClassName,
    pub provides: ClassName,
    pub into_set: ClassName,
    pub into_map: ClassName,
    pub elements_into_set: ClassName,
    pub multibinds: ClassName,
    pub suppress_wildcards: Option<ClassName>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub separator: String,
    pub bind_prefix: String,
    pub provide_prefix: String,
    pub bind_suffix: String,
    pub test_bind_suffix: String,
    pub factory_suffix: String,
    pub test_factory_suffix: String,
    pub owner_parameter: String,
    pub implementation_parameter: String,
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Applies `AUTOBIND_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(env::vars())
    }

    pub fn with_overrides<I>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "AUTOBIND_DEFAULT_SCOPE" => {
                    self.types.default_scope = ClassName::best_guess(&value)?;
                }
                "AUTOBIND_NAME_SEPARATOR" => self.naming.separator = value,
                "AUTOBIND_BIND_PREFIX" => self.naming.bind_prefix = value,
                "AUTOBIND_PROVIDE_PREFIX" => self.naming.provide_prefix = value,
                _ => {}
            }
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let markers = [
            &self.markers.bind.production,
            &self.markers.bind.test,
            &self.markers.factory.production,
            &self.markers.factory.test,
        ];
        for (i, marker) in markers.iter().enumerate() {
            if markers[i + 1..].contains(marker) {
                return Err(AutobindError::Config(format!(
                    "marker {} is registered more than once",
                    marker
                )));
            }
        }
        if self.naming.separator.is_empty() {
            return Err(AutobindError::Config(
                "container name separator must not be empty".to_string(),
            ));
        }

        // Each family and variant needs its own suffix or their containers collide.
        let naming = &self.naming;
        let suffixes = [
            ("bind_suffix", &naming.bind_suffix),
            ("test_bind_suffix", &naming.test_bind_suffix),
            ("factory_suffix", &naming.factory_suffix),
            ("test_factory_suffix", &naming.test_factory_suffix),
        ];
        for (i, (field, suffix)) in suffixes.iter().enumerate() {
            if suffix.is_empty() {
                return Err(AutobindError::Config(format!("{} must not be empty", field)));
            }
            if let Some((other, _)) = suffixes[i + 1..].iter().find(|(_, s)| s == suffix) {
                return Err(AutobindError::Config(format!(
                    "{} and {} share the container suffix '{}'",
                    field, other, suffix
                )));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            markers: MarkerRegistry::default(),
            arguments: ArgumentNames::default(),
            types: TypeConfig::default(),
            output: OutputAnnotations::default(),
            naming: NamingConfig::default(),
        }
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self {
            bind: MarkerPair {
                production: known("com.herman.hiltautobind", "AutoBind"),
                test: known("com.herman.hiltautobind", "TestAutoBind"),
            },
            factory: MarkerPair {
                production: known("com.herman.hiltautobind", "AutoFactory"),
                test: known("com.herman.hiltautobind", "TestAutoFactory"),
            },
        }
    }
}

impl Default for ArgumentNames {
    fn default() -> Self {
        Self {
            scope: "component".to_string(),
            target_type: "superType".to_string(),
            multiplicity: "target".to_string(),
            disambiguation_key: "uniqueKey".to_string(),
        }
    }
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            top_type: known("kotlin", "Any"),
            target_sentinel: known("kotlin", "Any"),
            default_scope: known("dagger.hilt.components", "SingletonComponent"),
            qualifier_markers: vec![
                known("javax.inject", "Qualifier"),
                known("jakarta.inject", "Qualifier"),
            ],
            set_types: vec![
                known("kotlin.collections", "Set"),
                known("kotlin.collections", "MutableSet"),
                known("java.util", "Set"),
            ],
            map_types: vec![
                known("kotlin.collections", "Map"),
                known("kotlin.collections", "MutableMap"),
                known("java.util", "Map"),
            ],
        }
    }
}

impl Default for OutputAnnotations {
    fn default() -> Self {
        Self {
            module: known("dagger", "Module"),
            install_in: known("dagger.hilt", "InstallIn"),
            test_install_in: known("dagger.hilt.testing", "TestInstallIn"),
            binds: known("dagger", "Binds"),
            provides: known("dagger", "Provides"),
            into_set: known("dagger.multibindings", "IntoSet"),
            into_map: known("dagger.multibindings", "IntoMap"),
            elements_into_set: known("dagger.multibindings", "ElementsIntoSet"),
            multibinds: known("dagger.multibindings", "Multibinds"),
            suppress_wildcards: Some(known("kotlin.jvm", "JvmSuppressWildcards")),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            bind_prefix: "bind".to_string(),
            provide_prefix: "provide".to_string(),
            bind_suffix: "Module".to_string(),
            test_bind_suffix: "TestModule".to_string(),
            factory_suffix: "AutoFactoryModule".to_string(),
            test_factory_suffix: "TestAutoFactoryModule".to_string(),
            owner_parameter: "factory".to_string(),
            implementation_parameter: "implementation".to_string(),
        }
    }
}

fn known(package: &str, simple_name: &str) -> ClassName {
    ClassName::new(package, vec![simple_name.to_string()])
}
