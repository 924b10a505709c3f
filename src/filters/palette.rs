use crate::{
    animation::controller::AnimationController,
    filters::params::{ParamDecl, ParamHandle, ParamSet, ParamValue, UniformSet, UniformValue},
    foundation::core::Rgba,
};

/// Default match distance, half of one 8-bit step.
pub const DEFAULT_TOLERANCE: f32 = 0.5 / 255.0;

/// Animatable parameters of [`PaletteRemapFilter`].
pub const PARAMS: &[ParamDecl] = &[
    ParamDecl::color("colorA"),
    ParamDecl::color("colorB"),
    ParamDecl::color("colorC"),
    ParamDecl::color("colorD"),
    ParamDecl::scalar("tolerance"),
    ParamDecl::scalar("shift"),
];

/// Endpoints of the source (`A..B`) and target (`C..D`) color lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    A,
    B,
    C,
    D,
}

impl PaletteColor {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn decl(self) -> &'static ParamDecl {
        &PARAMS[self as usize]
    }
}

/// Scalar parameters of [`PaletteRemapFilter`], numbered by their slot in [`PARAMS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteScalar {
    /// Max distance from the `A..B` line that still matches.
    Tolerance = 4,
    /// Cyclic offset along `C..D`.
    Shift = 5,
}

impl PaletteScalar {
    pub const ALL: [Self; 2] = [Self::Tolerance, Self::Shift];

    pub fn decl(self) -> &'static ParamDecl {
        &PARAMS[self as usize]
    }
}

/// Remaps colors near line `A..B` in RGBA space onto line `C..D`.
///
/// Colors are straight RGBA in `[0, 1]`. Colors farther than `tolerance` from the
/// source line pass through unchanged.
#[derive(Debug)]
pub struct PaletteRemapFilter {
    params: ParamHandle,
    controller: AnimationController,
}

impl PaletteRemapFilter {
    pub const TYPE_NAME: &'static str = "PaletteRemapFilter";

    pub fn new() -> Self {
        let uniforms = UniformSet::new(vec![
            ("colorA", UniformValue::Vec4([0.0; 4])),
            ("colorB", UniformValue::Vec4([0.0; 4])),
            ("colorC", UniformValue::Vec4([0.0; 4])),
            ("colorD", UniformValue::Vec4([0.0; 4])),
            ("tolerance", UniformValue::Float(DEFAULT_TOLERANCE)),
            ("shift", UniformValue::Float(0.0)),
        ]);
        let params = ParamSet::new(Self::TYPE_NAME, PARAMS, uniforms).into_handle();
        let controller = AnimationController::for_params(&params);
        Self { params, controller }
    }

    pub fn color(&self, which: PaletteColor) -> Rgba {
        match self.params.borrow().read(which.decl()) {
            ParamValue::Color(c) => Rgba::from_array(c),
            ParamValue::Scalar(v) => Rgba::new(v, v, v, v),
        }
    }

    pub fn set_color(&self, which: PaletteColor, color: Rgba) {
        self.params
            .borrow_mut()
            .write(which.decl(), ParamValue::Color(color.to_array()));
    }

    pub fn tolerance(&self) -> f32 {
        self.scalar(PaletteScalar::Tolerance)
    }

    pub fn set_tolerance(&self, value: f32) {
        self.set_scalar(PaletteScalar::Tolerance, value);
    }

    pub fn shift(&self) -> f32 {
        self.scalar(PaletteScalar::Shift)
    }

    /// Cyclic offset along `C..D`, applied modulo 1.
    pub fn set_shift(&self, value: f32) {
        self.set_scalar(PaletteScalar::Shift, value);
    }

    pub fn scalar(&self, which: PaletteScalar) -> f32 {
        match self.params.borrow().read(which.decl()) {
            ParamValue::Scalar(v) => v,
            ParamValue::Color(c) => c[0],
        }
    }

    pub fn set_scalar(&self, which: PaletteScalar, value: f32) {
        self.params
            .borrow_mut()
            .write(which.decl(), ParamValue::Scalar(value));
    }

    pub fn params(&self) -> &ParamHandle {
        &self.params
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }
}

impl Default for PaletteRemapFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/palette.rs"]
mod tests;
