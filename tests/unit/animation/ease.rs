use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InOutSine,
    ] {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn step_holds_and_input_is_clamped() {
    assert_eq!(Ease::Step.apply(0.99), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
}

#[test]
fn parses_snake_case_names() {
    let e: Ease = serde_json::from_str("\"in_out_sine\"").unwrap();
    assert_eq!(e, Ease::InOutSine);
}
