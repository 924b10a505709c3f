use std::{collections::HashMap, rc::Rc};

use image::{Rgba as Pixel, RgbaImage};

use crate::{
    filters::{
        filter::{Filter, FilterKind},
        params::{UniformSet, UniformValue},
        palette::DEFAULT_TOLERANCE,
    },
    foundation::{
        core::{Rgba, Vec2, Vec4, vec4_add, vec4_dot, vec4_len, vec4_scale, vec4_sub},
        error::{FxError, FxResult},
    },
    render::backend::ShaderBackend,
};

/// Below this squared length the `A..B` palette line is treated as degenerate.
const DEGENERATE_LINE_EPS: f32 = 1e-12;

/// Uniforms of the wave displacement program in host-side form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveUniforms {
    pub shift: f64,
    pub periodicity: f64,
    pub direction: Vec2,
    pub displacement: Vec2,
}

impl WaveUniforms {
    pub fn from_uniforms(u: &UniformSet) -> Self {
        let strength = u.vec4("strength").unwrap_or([1.0; 4]);
        Self {
            shift: f64::from(u.float("shift").unwrap_or(0.0)),
            periodicity: f64::from(u.float("periodicity").unwrap_or(10.0)),
            direction: Vec2::new(f64::from(strength[0]), f64::from(strength[1])),
            displacement: Vec2::new(f64::from(strength[2]), f64::from(strength[3])),
        }
    }
}

/// Offset applied to the sample position of pixel `(x, y)`.
///
/// `periodicity == 0` yields non-finite offsets; callers sampling textures treat
/// those as zero.
pub fn wave_displacement(u: &WaveUniforms, x: f64, y: f64) -> Vec2 {
    let phase = Vec2::new(x, y).dot(u.direction) / u.periodicity;
    u.displacement * (phase + u.shift).sin()
}

/// Uniforms of the palette remap program in host-side form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteUniforms {
    pub color_a: Vec4,
    pub color_b: Vec4,
    pub color_c: Vec4,
    pub color_d: Vec4,
    pub tolerance: f32,
    pub shift: f32,
}

impl PaletteUniforms {
    pub fn from_uniforms(u: &UniformSet) -> Self {
        Self {
            color_a: u.vec4("colorA").unwrap_or([0.0; 4]),
            color_b: u.vec4("colorB").unwrap_or([0.0; 4]),
            color_c: u.vec4("colorC").unwrap_or([0.0; 4]),
            color_d: u.vec4("colorD").unwrap_or([0.0; 4]),
            tolerance: u.float("tolerance").unwrap_or(DEFAULT_TOLERANCE),
            shift: u.float("shift").unwrap_or(0.0),
        }
    }
}

/// Remap one straight RGBA color.
///
/// A degenerate source line (`colorA == colorB`) never matches.
pub fn palette_remap(u: &PaletteUniforms, color: Vec4) -> Vec4 {
    let v = vec4_sub(color, u.color_a);
    let d = vec4_sub(u.color_b, u.color_a);
    let dd = vec4_dot(d, d);
    if dd < DEGENERATE_LINE_EPS {
        return color;
    }

    let proj = vec4_scale(d, vec4_dot(v, d) / dd);
    let dist = vec4_len(vec4_sub(v, proj));
    if dist >= u.tolerance {
        return color;
    }

    let t = vec4_len(proj) / dd.sqrt();
    let along = (t + u.shift).rem_euclid(1.0);
    vec4_add(u.color_c, vec4_scale(vec4_sub(u.color_d, u.color_c), along))
}

/// Reference CPU executor for both fragment programs.
///
/// Sampling is nearest-neighbor with clamp-to-edge addressing.
#[derive(Debug, Default)]
pub struct CpuBackend {
    uploaded: HashMap<usize, UniformSet>,
    uploads: u64,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times any filter's uniforms were (re-)read.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    fn uniforms_for(&mut self, filter: &Filter, width: u32, height: u32) -> UniformSet {
        let handle = filter.param_handle();
        handle.borrow_mut().uniforms_mut().set(
            "dimensions",
            UniformValue::Vec4([width as f32, height as f32, 0.0, 0.0]),
        );

        let key = Rc::as_ptr(handle) as usize;
        let dirty = filter.take_dirty();
        if dirty || !self.uploaded.contains_key(&key) {
            let snapshot = handle.borrow().uniforms().clone();
            self.uploaded.insert(key, snapshot);
            self.uploads += 1;
            tracing::trace!(program = filter.program().name, "uniform upload");
        }
        self.uploaded
            .get(&key)
            .cloned()
            .unwrap_or_else(|| handle.borrow().uniforms().clone())
    }
}

impl ShaderBackend for CpuBackend {
    fn apply(&mut self, filter: &Filter, source: &RgbaImage) -> FxResult<RgbaImage> {
        let (width, height) = source.dimensions();
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FxError::validation("source texture size overflow"))?;
        if source.as_raw().len() != expected {
            return Err(FxError::validation(
                "source texture buffer does not match its dimensions",
            ));
        }

        let uniforms = self.uniforms_for(filter, width, height);
        let out = match filter.kind() {
            FilterKind::WaveDisplacement => {
                run_wave(&WaveUniforms::from_uniforms(&uniforms), source)
            }
            FilterKind::PaletteRemap => {
                run_palette(&PaletteUniforms::from_uniforms(&uniforms), source)
            }
        };
        Ok(out)
    }
}

fn run_wave(u: &WaveUniforms, source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut out = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let offset = wave_displacement(u, f64::from(x), f64::from(y));
        let dx = if offset.x.is_finite() { offset.x } else { 0.0 };
        let dy = if offset.y.is_finite() { offset.y } else { 0.0 };
        let sx = (f64::from(x) + dx).round().clamp(0.0, max_x) as u32;
        let sy = (f64::from(y) + dy).round().clamp(0.0, max_y) as u32;
        *px = *source.get_pixel(sx, sy);
    }
    out
}

fn run_palette(u: &PaletteUniforms, source: &RgbaImage) -> RgbaImage {
    let mut out = source.clone();
    for px in out.pixels_mut() {
        let color = Rgba::from_rgba8(px.0).to_array();
        let mapped = palette_remap(u, color);
        *px = Pixel(Rgba::from_array(mapped).to_rgba8());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
