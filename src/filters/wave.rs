use crate::{
    animation::controller::AnimationController,
    filters::params::{ParamDecl, ParamHandle, ParamSet, ParamValue, UniformSet, UniformValue},
};

/// Animatable parameters of [`WaveDisplacementFilter`].
///
/// The four direction/displacement lanes share the `strength` uniform as `xyzw`.
pub const PARAMS: &[ParamDecl] = &[
    ParamDecl::scalar("shift"),
    ParamDecl::scalar("periodicity"),
    ParamDecl::lane("directionX", "strength", 0),
    ParamDecl::lane("directionY", "strength", 1),
    ParamDecl::lane("displacementX", "strength", 2),
    ParamDecl::lane("displacementY", "strength", 3),
];

/// Typed parameter names of [`WaveDisplacementFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveParam {
    /// Phase in radians.
    Shift,
    /// Wavelength in pixels.
    Periodicity,
    DirectionX,
    DirectionY,
    /// Max horizontal offset in pixels.
    DisplacementX,
    /// Max vertical offset in pixels.
    DisplacementY,
}

impl WaveParam {
    pub const ALL: [Self; 6] = [
        Self::Shift,
        Self::Periodicity,
        Self::DirectionX,
        Self::DirectionY,
        Self::DisplacementX,
        Self::DisplacementY,
    ];

    pub fn decl(self) -> &'static ParamDecl {
        &PARAMS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.decl().name
    }
}

/// Per-pixel sinusoidal coordinate displacement (scanline-style waving).
#[derive(Debug)]
pub struct WaveDisplacementFilter {
    params: ParamHandle,
    controller: AnimationController,
}

impl WaveDisplacementFilter {
    pub const TYPE_NAME: &'static str = "WaveDisplacementFilter";

    pub fn new() -> Self {
        let uniforms = UniformSet::new(vec![
            ("dimensions", UniformValue::Vec4([0.0; 4])),
            ("shift", UniformValue::Float(0.0)),
            ("periodicity", UniformValue::Float(10.0)),
            ("strength", UniformValue::Vec4([1.0; 4])),
        ]);
        let params = ParamSet::new(Self::TYPE_NAME, PARAMS, uniforms).into_handle();
        let controller = AnimationController::for_params(&params);
        Self { params, controller }
    }

    pub fn get(&self, param: WaveParam) -> f32 {
        match self.params.borrow().read(param.decl()) {
            ParamValue::Scalar(v) => v,
            ParamValue::Color(c) => c[0],
        }
    }

    /// Write a parameter and mark the filter dirty.
    pub fn set(&self, param: WaveParam, value: f32) {
        self.params
            .borrow_mut()
            .write(param.decl(), ParamValue::Scalar(value));
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

impl Default for WaveDisplacementFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/wave.rs"]
mod tests;
