//! VideoDrug renders animated, data-driven distortion effects over battle backgrounds.
//!
//! Effects are JSON documents describing an ordered chain of filters (wave displacement,
//! palette remapping). Each filter parameter is driven by a keyframe channel, and all
//! channels of a chain are stepped together through one aggregate controller:
//!
//! - Build a chain with [`build_effect_chain`] or [`EffectChain::from_json_str`]
//! - Load effects by name through the [`EffectDataManager`] cache
//! - Wire the host lifecycle with [`VideoDrug::install`]
//! - Execute filters on images with the [`CpuBackend`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod data;
pub mod effects;
pub mod filters;
mod foundation;
pub mod host;
pub mod render;

pub use crate::foundation::core::{Rgba, Vec2, Vec4};
pub use crate::foundation::error::{FxError, FxResult};

pub use crate::animation::{
    channel::{AnimationChannel, ChannelHandle},
    controller::AnimationController,
    ease::Ease,
    keyframes::{Keyframe, LoopMode, Track},
};
pub use crate::data::{
    config::DataManagerConfig,
    manager::{DataManagerHandle, EffectDataManager, LoadState},
    source::{Completion, DocumentSource, FsSource, MemorySource, Response, Ticket},
};
pub use crate::effects::{
    chain::{EffectChain, build_effect_chain},
    description::{BackLayer, EffectDescription, EffectIndex, FilterSpec},
};
pub use crate::filters::{
    filter::{Filter, FilterKind},
    palette::{PaletteColor, PaletteRemapFilter, PaletteScalar},
    params::{ParamKind, ParamValue},
    wave::{WaveDisplacementFilter, WaveParam},
};
pub use crate::host::{
    hooks::LifecycleHooks,
    integration::{IntegrationConfig, VideoDrug},
    spriteset::{BattleSpriteset, SpritesetFx},
};
pub use crate::render::{backend::ShaderBackend, cpu::CpuBackend};
