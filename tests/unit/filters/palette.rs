use super::*;

#[test]
fn defaults() {
    let f = PaletteRemapFilter::new();
    assert_eq!(f.tolerance(), DEFAULT_TOLERANCE);
    assert!((f.tolerance() - 0.00196).abs() < 1e-5);
    assert_eq!(f.shift(), 0.0);
    assert_eq!(f.color(PaletteColor::A), Rgba::transparent());
}

#[test]
fn color_setters_round_trip_and_mark_dirty() {
    let f = PaletteRemapFilter::new();
    f.params().borrow_mut().take_dirty();
    let c = Rgba::new(0.1, 0.2, 0.3, 1.0);
    f.set_color(PaletteColor::C, c);
    assert!(f.params().borrow().is_dirty());
    assert_eq!(f.color(PaletteColor::C), c);
    assert_eq!(
        f.params().borrow().uniforms().vec4("colorC"),
        Some([0.1, 0.2, 0.3, 1.0])
    );
}

#[test]
fn scalar_setters() {
    let f = PaletteRemapFilter::new();
    f.set_tolerance(0.1);
    f.set_shift(0.25);
    assert_eq!(f.tolerance(), 0.1);
    assert_eq!(f.shift(), 0.25);
}

#[test]
fn four_color_channels_and_two_scalar_channels() {
    use crate::filters::params::ParamKind;

    let f = PaletteRemapFilter::new();
    let kinds: Vec<ParamKind> = f
        .controller()
        .channel_names()
        .map(|n| f.controller().channel(n).unwrap().borrow().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ParamKind::Color,
            ParamKind::Color,
            ParamKind::Color,
            ParamKind::Color,
            ParamKind::Scalar,
            ParamKind::Scalar
        ]
    );
}

#[test]
fn typed_names_resolve_to_their_declarations() {
    let colors: Vec<&str> = PaletteColor::ALL.iter().map(|c| c.decl().name).collect();
    assert_eq!(colors, vec!["colorA", "colorB", "colorC", "colorD"]);
    assert_eq!(PaletteScalar::Tolerance.decl().name, "tolerance");
    assert_eq!(PaletteScalar::Shift.decl().name, "shift");

    let f = PaletteRemapFilter::new();
    f.set_scalar(PaletteScalar::Shift, 0.75);
    assert_eq!(f.shift(), 0.75);
    assert_eq!(f.params().borrow().uniforms().float("shift"), Some(0.75));
    assert_eq!(f.scalar(PaletteScalar::Tolerance), DEFAULT_TOLERANCE);
}
