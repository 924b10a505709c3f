use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    animation::controller::METADATA_MARKER,
    foundation::error::{FxError, FxResult},
};

/// Background layer a battle sprite set draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackLayer {
    Back1,
    Back2,
}

impl BackLayer {
    pub const ALL: [Self; 2] = [Self::Back1, Self::Back2];

    /// Channel namespace used when merging this layer's effect into a sprite controller.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Back1 => "back1",
            Self::Back2 => "back2",
        }
    }
}

/// Lookup from battleback image name to effect name, one table per layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectIndex {
    /// Layer-1 background image name to effect name.
    #[serde(rename = "back1Mapping", default)]
    pub back1_mapping: BTreeMap<String, String>,
    /// Layer-2 background image name to effect name.
    #[serde(rename = "back2Mapping", default)]
    pub back2_mapping: BTreeMap<String, String>,
}

impl EffectIndex {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn mapping(&self, layer: BackLayer) -> &BTreeMap<String, String> {
        match layer {
            BackLayer::Back1 => &self.back1_mapping,
            BackLayer::Back2 => &self.back2_mapping,
        }
    }

    /// Effect name for a background image on `layer`, if one is mapped.
    pub fn effect_for(&self, layer: BackLayer, image: &str) -> Option<&str> {
        self.mapping(layer).get(image).map(String::as_str)
    }

    /// Every distinct effect name referenced by either layer.
    pub fn effect_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .back1_mapping
            .values()
            .chain(self.back2_mapping.values())
            .map(String::as_str)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Declarative effect: ordered filter specs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectDescription {
    pub filters: Vec<FilterSpec>,
}

impl EffectDescription {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_slice(bytes: &[u8]) -> FxResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// One filter stage: kind, default animation and named animation data.
///
/// Every key not starting with `#` is an animation: an object mapping channel
/// names to keyframe tracks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "#type")]
    pub kind: String,
    #[serde(rename = "#default_animation")]
    pub default_animation: String,
    #[serde(flatten)]
    pub entries: BTreeMap<String, serde_json::Value>,
}

impl FilterSpec {
    /// Named animations, metadata keys excluded.
    pub fn animations(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.starts_with(METADATA_MARKER))
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn animation(&self, name: &str) -> Option<&serde_json::Value> {
        if name.starts_with(METADATA_MARKER) {
            return None;
        }
        self.entries.get(name)
    }

    /// Fail fast when the default animation is not among the named animations.
    pub fn validate(&self) -> FxResult<()> {
        if self.kind.trim().is_empty() {
            return Err(FxError::validation("filter spec '#type' must be non-empty"));
        }
        if self.animation(&self.default_animation).is_none() {
            return Err(FxError::UnknownAnimationName {
                animation: self.default_animation.clone(),
                available: self.animations().map(|(k, _)| k.to_string()).collect(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/description.rs"]
mod tests;
