use super::*;
use crate::{
    filters::{
        params::ParamValue,
        wave::{WaveDisplacementFilter, WaveParam},
    },
    foundation::error::FxError,
};
use serde_json::json;

fn two_stage() -> EffectDescription {
    serde_json::from_value(json!({
        "filters": [
            {
                "#type": "SinWaveFilter",
                "#default_animation": "idle",
                "idle": {
                    "shift": [{"frame": 0, "value": 0.5}, {"frame": 60, "value": 6.5}],
                    "periodicity": [{"frame": 0, "value": 24.0}]
                },
                "hurt": {
                    "displacementX": [{"frame": 0, "value": 12.0}]
                }
            },
            {
                "#type": "PaletteShiftFilter",
                "#default_animation": "idle",
                "idle": {
                    "colorA": [{"frame": 0, "value": "#000000"}],
                    "colorB": [{"frame": 0, "value": "#ff0000"}],
                    "shift": [{"frame": 0, "value": 0.25}, {"frame": 30, "value": 0.75}]
                }
            }
        ]
    }))
    .unwrap()
}

#[test]
fn chain_has_one_filter_per_spec_in_order() {
    let chain = build_effect_chain(&two_stage()).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.filters()[0].kind(), FilterKind::WaveDisplacement);
    assert_eq!(chain.filters()[1].kind(), FilterKind::PaletteRemap);
}

#[test]
fn aggregate_contains_exactly_the_namespaced_union() {
    let chain = build_effect_chain(&two_stage()).unwrap();
    let mut expected: Vec<String> = Vec::new();
    for (i, filter) in chain.filters().iter().enumerate() {
        for name in filter.kind().channel_names() {
            expected.push(format!("stage_{i}.{name}"));
        }
    }
    let actual: Vec<String> = chain
        .controller()
        .channel_names()
        .map(str::to_string)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn identically_named_channels_stay_independent() {
    let chain = build_effect_chain(&two_stage()).unwrap();
    let wave_shift = chain.controller().channel("stage_0.shift").unwrap();
    let palette_shift = chain.controller().channel("stage_1.shift").unwrap();
    assert!(!std::rc::Rc::ptr_eq(wave_shift, palette_shift));

    chain.filters()[0]
        .set_param("shift", ParamValue::Scalar(2.0))
        .unwrap();
    assert_eq!(wave_shift.borrow().value(), ParamValue::Scalar(2.0));
    assert_eq!(palette_shift.borrow().value(), ParamValue::Scalar(0.25));
}

#[test]
fn stages_start_at_first_keyframe_of_default() {
    let chain = build_effect_chain(&two_stage()).unwrap();
    let wave = &chain.filters()[0];
    assert_eq!(wave.param("shift").unwrap(), ParamValue::Scalar(0.5));
    assert_eq!(wave.param("periodicity").unwrap(), ParamValue::Scalar(24.0));
    assert!(wave.controller().is_playing());
    assert_eq!(wave.controller().current_animation(), Some("idle"));

    let palette = &chain.filters()[1];
    assert_eq!(
        palette.param("colorB").unwrap(),
        ParamValue::Color([1.0, 0.0, 0.0, 1.0])
    );
}

#[test]
fn aggregate_is_not_started() {
    let mut chain = build_effect_chain(&two_stage()).unwrap();
    assert!(!chain.controller().is_playing());
    chain.controller_mut().update(30.0);
    assert_eq!(
        chain.filters()[0].param("shift").unwrap(),
        ParamValue::Scalar(0.5)
    );

    chain.controller_mut().play();
    chain.controller_mut().update(30.0);
    assert_eq!(
        chain.filters()[0].param("shift").unwrap(),
        ParamValue::Scalar(3.5)
    );
    assert_eq!(
        chain.filters()[1].param("shift").unwrap(),
        ParamValue::Scalar(0.25)
    );
}

#[test]
fn named_animations_are_reachable_through_aggregate() {
    let mut chain = build_effect_chain(&two_stage()).unwrap();
    chain.controller_mut().transition("hurt").unwrap();
    assert_eq!(
        chain.filters()[0].param("displacementX").unwrap(),
        ParamValue::Scalar(12.0)
    );
}

#[test]
fn unknown_filter_kind_aborts() {
    let desc: EffectDescription = serde_json::from_value(json!({
        "filters": [{"#type": "BloomFilter", "#default_animation": "idle", "idle": {}}]
    }))
    .unwrap();
    let err = build_effect_chain(&desc).unwrap_err();
    assert!(matches!(err, FxError::UnknownFilterKind(_)));
}

#[test]
fn unknown_default_animation_aborts() {
    let desc: EffectDescription = serde_json::from_value(json!({
        "filters": [{"#type": "SinWaveFilter", "#default_animation": "idle", "boss": {}}]
    }))
    .unwrap();
    let err = build_effect_chain(&desc).unwrap_err();
    assert!(matches!(err, FxError::UnknownAnimationName { .. }));
}

#[test]
fn bad_keyframes_abort() {
    let desc: EffectDescription = serde_json::from_value(json!({
        "filters": [{
            "#type": "SinWaveFilter",
            "#default_animation": "idle",
            "idle": {"shift": [{"frame": 10, "value": 0.0}, {"frame": 0, "value": 1.0}]}
        }]
    }))
    .unwrap();
    assert!(build_effect_chain(&desc).is_err());
}

#[test]
fn empty_description_builds_empty_chain() {
    let chain = EffectChain::from_json_str(r#"{"filters": []}"#).unwrap();
    assert!(chain.is_empty());
    assert!(chain.controller().is_empty());
}

#[test]
fn round_trip_idle_matches_direct_filter_import() {
    let mut direct = WaveDisplacementFilter::new();
    direct
        .controller_mut()
        .import_animation("idle", &json!({"shift": [{"frame": 0, "value": 1.25}]}))
        .unwrap();
    direct.controller_mut().transition("idle").unwrap();
    assert_eq!(direct.get(WaveParam::Shift), 1.25);
    assert_eq!(stage_namespace(3), "stage_3");
}
