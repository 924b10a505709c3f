use super::*;
use serde_json::json;

#[test]
fn index_parses_both_layers() {
    let index = EffectIndex::from_json_str(
        r#"{"back1Mapping": {"Grassland": "heat", "Lava": "heat"}, "back2Mapping": {"Castle": "glow"}}"#,
    )
    .unwrap();
    assert_eq!(index.effect_for(BackLayer::Back1, "Lava"), Some("heat"));
    assert_eq!(index.effect_for(BackLayer::Back2, "Castle"), Some("glow"));
    assert_eq!(index.effect_for(BackLayer::Back2, "Lava"), None);
    assert_eq!(index.effect_names(), vec!["glow", "heat"]);
}

#[test]
fn index_mappings_default_to_empty() {
    let index = EffectIndex::from_json_str("{}").unwrap();
    assert!(index.back1_mapping.is_empty());
    assert!(index.back2_mapping.is_empty());
}

#[test]
fn filter_spec_separates_metadata_from_animations() {
    let spec: FilterSpec = serde_json::from_value(json!({
        "#type": "SinWaveFilter",
        "#default_animation": "idle",
        "#note": "metadata",
        "idle": {"shift": [{"frame": 0, "value": 0.0}]},
        "hurt": {}
    }))
    .unwrap();
    let names: Vec<&str> = spec.animations().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["hurt", "idle"]);
    assert!(spec.animation("#note").is_none());
    spec.validate().unwrap();
}

#[test]
fn missing_default_animation_fails_fast() {
    let spec: FilterSpec = serde_json::from_value(json!({
        "#type": "SinWaveFilter",
        "#default_animation": "idle",
        "boss": {}
    }))
    .unwrap();
    let err = spec.validate().unwrap_err();
    assert!(matches!(err, FxError::UnknownAnimationName { ref animation, .. } if animation == "idle"));
}

#[test]
fn default_animation_cannot_name_metadata() {
    let spec: FilterSpec = serde_json::from_value(json!({
        "#type": "SinWaveFilter",
        "#default_animation": "#type"
    }))
    .unwrap();
    assert!(spec.validate().is_err());
}

#[test]
fn description_requires_filters_array() {
    assert!(EffectDescription::from_json_str("{}").is_err());
    let desc = EffectDescription::from_json_str(r#"{"filters": []}"#).unwrap();
    assert!(desc.filters.is_empty());
}
