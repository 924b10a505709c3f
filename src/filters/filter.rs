use std::cell::Ref;

use crate::{
    animation::controller::AnimationController,
    filters::{
        palette::{self, PaletteRemapFilter},
        params::{ParamDecl, ParamHandle, ParamSet, ParamValue},
        program::{self, ShaderProgram},
        wave::{self, WaveDisplacementFilter},
    },
    foundation::error::{FxError, FxResult},
};

/// Registered filter kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    WaveDisplacement,
    PaletteRemap,
}

impl FilterKind {
    pub const ALL: [Self; 2] = [Self::WaveDisplacement, Self::PaletteRemap];

    /// Resolve a `#type` name. Matching ignores case, `_` and `-`, and accepts the
    /// legacy `SinWaveFilter` / `PaletteShiftFilter` names found in older data files.
    pub fn parse(name: &str) -> FxResult<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wavedisplacementfilter" | "wavedisplacement" | "sinwavefilter" | "sinwave" => {
                Ok(Self::WaveDisplacement)
            }
            "paletteremapfilter" | "paletteremap" | "paletteshiftfilter" | "paletteshift" => {
                Ok(Self::PaletteRemap)
            }
            _ => Err(FxError::UnknownFilterKind(name.to_string())),
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Self::WaveDisplacement => WaveDisplacementFilter::TYPE_NAME,
            Self::PaletteRemap => PaletteRemapFilter::TYPE_NAME,
        }
    }

    pub fn program(self) -> &'static ShaderProgram {
        match self {
            Self::WaveDisplacement => &program::WAVE_DISPLACEMENT,
            Self::PaletteRemap => &program::PALETTE_REMAP,
        }
    }

    /// Declared animatable parameters; each has exactly one channel per filter.
    pub fn params(self) -> &'static [ParamDecl] {
        match self {
            Self::WaveDisplacement => wave::PARAMS,
            Self::PaletteRemap => palette::PARAMS,
        }
    }

    pub fn channel_names(self) -> impl Iterator<Item = &'static str> {
        self.params().iter().map(|d| d.name)
    }
}

/// One live filter stage: fixed program, uniform block and bound channels.
#[derive(Debug)]
pub enum Filter {
    WaveDisplacement(WaveDisplacementFilter),
    PaletteRemap(PaletteRemapFilter),
}

impl Filter {
    pub fn new(kind: FilterKind) -> Self {
        match kind {
            FilterKind::WaveDisplacement => Self::WaveDisplacement(WaveDisplacementFilter::new()),
            FilterKind::PaletteRemap => Self::PaletteRemap(PaletteRemapFilter::new()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::WaveDisplacement(_) => FilterKind::WaveDisplacement,
            Self::PaletteRemap(_) => FilterKind::PaletteRemap,
        }
    }

    pub fn program(&self) -> &'static ShaderProgram {
        self.kind().program()
    }

    pub fn param_handle(&self) -> &ParamHandle {
        match self {
            Self::WaveDisplacement(f) => f.params(),
            Self::PaletteRemap(f) => f.params(),
        }
    }

    pub fn params(&self) -> Ref<'_, ParamSet> {
        self.param_handle().borrow()
    }

    pub fn param(&self, name: &str) -> FxResult<ParamValue> {
        self.params().get(name)
    }

    /// Set a parameter by name, validated against the kind's declarations.
    pub fn set_param(&self, name: &str, value: ParamValue) -> FxResult<()> {
        self.param_handle().borrow_mut().set(name, value)
    }

    pub fn is_dirty(&self) -> bool {
        self.params().is_dirty()
    }

    pub fn take_dirty(&self) -> bool {
        self.param_handle().borrow_mut().take_dirty()
    }

    pub fn controller(&self) -> &AnimationController {
        match self {
            Self::WaveDisplacement(f) => f.controller(),
            Self::PaletteRemap(f) => f.controller(),
        }
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        match self {
            Self::WaveDisplacement(f) => f.controller_mut(),
            Self::PaletteRemap(f) => f.controller_mut(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/filter.rs"]
mod tests;
