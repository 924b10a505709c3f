use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));

    let c: Rgba = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-6);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-6);
}

#[test]
fn parses_object_and_arrays() {
    let c: Rgba = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Rgba::new(0.25, 0.5, 0.75, 1.0));

    let c: Rgba = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.5])).unwrap();
    assert_eq!(c.to_array(), [0.25, 0.5, 0.75, 0.5]);

    assert!(serde_json::from_value::<Rgba>(json!([0.25, 0.5])).is_err());
    assert!(serde_json::from_value::<Rgba>(json!("#12345")).is_err());
}

#[test]
fn rgba8_quantization_round_trips_extremes() {
    let c = Rgba::from_rgba8([0, 128, 255, 255]);
    assert_eq!(c.to_rgba8(), [0, 128, 255, 255]);
}

#[test]
fn vec4_helpers() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [1.0, 1.0, 1.0, 1.0];
    assert_eq!(vec4_sub(a, b), [0.0, 1.0, 2.0, 3.0]);
    assert_eq!(vec4_add(a, b), [2.0, 3.0, 4.0, 5.0]);
    assert_eq!(vec4_scale(b, 2.0), [2.0, 2.0, 2.0, 2.0]);
    assert_eq!(vec4_dot(a, b), 10.0);
    assert_eq!(vec4_len([3.0, 4.0, 0.0, 0.0]), 5.0);
}
