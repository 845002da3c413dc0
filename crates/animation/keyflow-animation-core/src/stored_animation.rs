use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::asset::AnimationAsset;
use crate::config::{DEFAULT_FPS, DEFAULT_SPS};
use crate::error::AnimationError;
use crate::keyframe::Keyframe;
use crate::sequence::Sequence;
use crate::structure::AnimationStructure;

/// Marker that distinguishes a leaf sequence from an interior node.
pub const SEQUENCE_MARKER: &str = "animationSequence";

/// Public API: parse stored-animation JSON into an [`AnimationAsset`].
///
/// Shape:
/// ```json
/// {
///   "idResource": "Animation|...", "name": "bounce", "fps": 60, "sps": 10,
///   "labels": { "apex": 500 }, "events": { "land": 1000 },
///   "animationStructure": {
///     "components": { "Transform": { "y": {
///       "animationSequence": true,
///       "keys": [ { "time": 0, "value": 0, "slopeIn": 0, "slopeOut": 0, "constant": false } ]
///     } } }
///   }
/// }
/// ```
/// Notes:
/// - `fps`, `sps`, `labels`, `events` and per-key slopes/`constant` are optional.
/// - An object without `"animationSequence": true` is read as an interior node,
///   so a leaf that lost its marker becomes a node (possibly empty) rather than
///   an error. Non-object children become empty nodes.
pub fn parse_animation_json(s: &str) -> Result<AnimationAsset, AnimationError> {
    let stored: StoredAnimation = serde_json::from_str(s)?;
    stored.into_asset()
}

pub fn animation_to_value(asset: &AnimationAsset) -> Value {
    let stored = StoredAnimation {
        id_resource: Some(asset.id_resource().to_string()),
        name: asset.name().to_string(),
        fps: asset.fps(),
        sps: asset.sps(),
        labels: asset.labels().clone(),
        events: asset.events().clone(),
        animation_structure: Some(structure_to_value(asset.structure())),
    };
    serde_json::to_value(stored).unwrap_or(Value::Null)
}

pub fn animation_to_json(asset: &AnimationAsset) -> Result<String, AnimationError> {
    Ok(serde_json::to_string(&animation_to_value(asset))?)
}

impl AnimationAsset {
    pub fn from_json(s: &str) -> Result<Self, AnimationError> {
        parse_animation_json(s)
    }

    pub fn to_json(&self) -> Result<String, AnimationError> {
        animation_to_json(self)
    }
}

pub fn structure_to_value(structure: &AnimationStructure) -> Value {
    match structure {
        AnimationStructure::Sequence(seq) => serde_json::json!({
            SEQUENCE_MARKER: true,
            "keys": seq.keys(),
        }),
        AnimationStructure::Node(children) => Value::Object(
            children
                .iter()
                .map(|(name, child)| (name.clone(), structure_to_value(child)))
                .collect(),
        ),
    }
}

pub fn structure_from_value(value: &Value) -> Result<AnimationStructure, AnimationError> {
    structure_at(value, "animationStructure")
}

fn structure_at(value: &Value, path: &str) -> Result<AnimationStructure, AnimationError> {
    let Some(object) = value.as_object() else {
        log::warn!("'{path}': expected an object, found {value}; using an empty node");
        return Ok(AnimationStructure::node());
    };
    if is_sequence(object) {
        return sequence_from_object(object, path).map(AnimationStructure::Sequence);
    }
    if object.is_empty() {
        log::warn!("'{path}': empty node (missing '{SEQUENCE_MARKER}' marker?)");
    }
    let mut children = BTreeMap::new();
    for (name, child) in object {
        children.insert(name.clone(), structure_at(child, &format!("{path}.{name}"))?);
    }
    Ok(AnimationStructure::Node(children))
}

fn is_sequence(object: &Map<String, Value>) -> bool {
    matches!(object.get(SEQUENCE_MARKER), Some(Value::Bool(true)))
}

fn sequence_from_object(object: &Map<String, Value>, path: &str) -> Result<Sequence, AnimationError> {
    let keys = match object.get("keys") {
        None | Some(Value::Null) => Vec::new(),
        Some(keys) => Vec::<Keyframe>::deserialize(keys)
            .map_err(|e| AnimationError::invalid(format!("{path}.keys"), e.to_string()))?,
    };
    Ok(Sequence::from_keys(keys))
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_sps() -> f64 {
    DEFAULT_SPS
}

// ----- JSON schema (serde) -----

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnimation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_resource: Option<String>,
    name: String,
    #[serde(default = "default_fps")]
    fps: f64,
    #[serde(default = "default_sps")]
    sps: f64,
    #[serde(default)]
    labels: BTreeMap<String, f64>,
    #[serde(default)]
    events: BTreeMap<String, f64>,
    #[serde(default)]
    animation_structure: Option<Value>,
}

impl StoredAnimation {
    fn into_asset(self) -> Result<AnimationAsset, AnimationError> {
        let raw = self
            .animation_structure
            .ok_or_else(|| AnimationError::MissingField {
                field: "animationStructure".into(),
            })?;
        let structure = structure_from_value(&raw)?;

        let mut asset = AnimationAsset::new(self.name, structure);
        if let Some(id) = self.id_resource {
            asset.set_id_resource(id);
        }
        asset.set_frames_per_second(self.fps)?;
        asset.set_sps(self.sps);
        for (name, time) in self.labels {
            asset.set_label(name, time);
        }
        for (name, time) in self.events {
            asset.add_event(name, time);
        }
        Ok(asset)
    }
}
