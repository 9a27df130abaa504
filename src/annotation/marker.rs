use crate::config::MarkerRegistry;
use crate::model::ClassName;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// The two marker families: one for type declarations, one for factory functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum MarkerFamily {
    #[strum(serialize = "type-binding")]
    Bind,
    #[strum(serialize = "factory-binding")]
    Factory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerVariant {
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Marker {
    pub family: MarkerFamily,
    pub variant: MarkerVariant,
}

impl Marker {
    pub const BIND: Marker = Marker::new(MarkerFamily::Bind, MarkerVariant::Production);
    pub const TEST_BIND: Marker = Marker::new(MarkerFamily::Bind, MarkerVariant::Test);
    pub const FACTORY: Marker = Marker::new(MarkerFamily::Factory, MarkerVariant::Production);
    pub const TEST_FACTORY: Marker = Marker::new(MarkerFamily::Factory, MarkerVariant::Test);

    pub const fn new(family: MarkerFamily, variant: MarkerVariant) -> Self {
        Self { family, variant }
    }

    pub fn is_test(self) -> bool {
        self.variant == MarkerVariant::Test
    }

    /// The production marker of the same family.
    pub fn production(self) -> Self {
        Self::new(self.family, MarkerVariant::Production)
    }
}

/// Multibinding target carried by a marker.
///
/// `SetValues` and `MultibindingContainer` are only meaningful for factory functions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Multiplicity {
    #[default]
    Instance,
    Set,
    Map,
    SetValues,
    MultibindingContainer,
}

impl Multiplicity {
    pub fn is_factory_only(self) -> bool {
        matches!(self, Multiplicity::SetValues | Multiplicity::MultibindingContainer)
    }
}

impl MarkerRegistry {
    pub fn all(&self) -> [(Marker, &ClassName); 4] {
        [
            (Marker::BIND, &self.bind.production),
            (Marker::TEST_BIND, &self.bind.test),
            (Marker::FACTORY, &self.factory.production),
            (Marker::TEST_FACTORY, &self.factory.test),
        ]
    }

    pub fn identify(&self, annotation_type: &ClassName) -> Option<Marker> {
        self.all()
            .into_iter()
            .find(|(_, name)| *name == annotation_type)
            .map(|(marker, _)| marker)
    }

    pub fn name_of(&self, marker: Marker) -> &ClassName {
        let pair = match marker.family {
            MarkerFamily::Bind => &self.bind,
            MarkerFamily::Factory => &self.factory,
        };
        match marker.variant {
            MarkerVariant::Production => &pair.production,
            MarkerVariant::Test => &pair.test,
        }
    }
}
