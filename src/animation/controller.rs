use std::{collections::BTreeSet, rc::Rc};

use crate::{
    animation::channel::{AnimationChannel, ChannelHandle},
    filters::params::ParamHandle,
    foundation::error::{FxError, FxResult},
};

/// Keys starting with this marker are metadata, never channel or animation names.
pub const METADATA_MARKER: char = '#';

/// Named set of channels stepped together.
///
/// Channels are shared: [`AnimationController::import_channels`] re-exports another
/// controller's channels under `prefix.<name>`, so a stage controller and every
/// aggregate built on top of it drive the same parameters.
#[derive(Clone, Debug, Default)]
pub struct AnimationController {
    channels: Vec<(String, ChannelHandle)>,
    animations: BTreeSet<String>,
    current: Option<String>,
    playing: bool,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller owning one channel per declared parameter of `params`.
    pub fn for_params(params: &ParamHandle) -> Self {
        let decls = params.borrow().decls();
        let mut out = Self::new();
        for decl in decls {
            out.add_channel(AnimationChannel::new(Rc::clone(params), decl));
        }
        out
    }

    /// Take ownership of `channel` under its own parameter name.
    pub fn add_channel(&mut self, channel: AnimationChannel) -> ChannelHandle {
        let name = channel.name().to_string();
        let handle = channel.into_handle();
        self.insert(name, Rc::clone(&handle));
        handle
    }

    fn insert(&mut self, name: String, handle: ChannelHandle) {
        match self.channels.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = handle,
            None => self.channels.push((name, handle)),
        }
    }

    /// Re-export every channel of `source` as `prefix.<name>`.
    pub fn import_channels(&mut self, source: &AnimationController, prefix: &str) {
        for (name, handle) in &source.channels {
            let full = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            self.insert(full, Rc::clone(handle));
        }
        self.animations.extend(source.animations.iter().cloned());
    }

    /// Import one named animation: `data` maps channel names to keyframe tracks.
    ///
    /// Keys starting with `#` are skipped. A key naming no channel is an error.
    pub fn import_animation(&mut self, name: &str, data: &serde_json::Value) -> FxResult<()> {
        let Some(obj) = data.as_object() else {
            return Err(FxError::animation(format!(
                "animation '{name}' must be an object of channel tracks"
            )));
        };
        for (channel_name, track) in obj {
            if channel_name.starts_with(METADATA_MARKER) {
                continue;
            }
            let handle = self.channel(channel_name).ok_or_else(|| {
                FxError::validation(format!(
                    "animation '{name}' references unknown channel '{channel_name}'"
                ))
            })?;
            handle
                .borrow_mut()
                .import_animation(name, track)
                .map_err(|e| {
                    FxError::animation(format!("animation '{name}', channel '{channel_name}': {e}"))
                })?;
        }
        self.animations.insert(name.to_string());
        Ok(())
    }

    /// Every animation name this controller can transition to.
    pub fn animation_names(&self) -> BTreeSet<String> {
        let mut out = self.animations.clone();
        for (_, handle) in &self.channels {
            out.extend(
                handle
                    .borrow()
                    .animation_names()
                    .into_iter()
                    .map(str::to_string),
            );
        }
        out
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains(name)
            || self
                .channels
                .iter()
                .any(|(_, h)| h.borrow().has_animation(name))
    }

    /// Rewind every channel that knows `name` to its first keyframe.
    ///
    /// Channels without a track for `name` keep their current state.
    pub fn transition(&mut self, name: &str) -> FxResult<()> {
        if !self.has_animation(name) {
            return Err(FxError::UnknownAnimationName {
                animation: name.to_string(),
                available: self.animation_names().into_iter().collect(),
            });
        }
        for handle in self.distinct_channels() {
            handle.borrow_mut().transition(name);
        }
        tracing::debug!(animation = name, channels = self.channels.len(), "transition");
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Advance all channels by `delta` frames and return the consumed delta.
    ///
    /// A channel reachable under several names advances once.
    pub fn update(&mut self, delta: f64) -> f64 {
        if !self.playing {
            return delta;
        }
        for handle in self.distinct_channels() {
            handle.borrow_mut().advance(delta);
        }
        delta
    }

    fn distinct_channels(&self) -> Vec<ChannelHandle> {
        let mut out: Vec<ChannelHandle> = Vec::with_capacity(self.channels.len());
        for (_, handle) in &self.channels {
            if !out.iter().any(|h| Rc::ptr_eq(h, handle)) {
                out.push(Rc::clone(handle));
            }
        }
        out
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelHandle> {
        self.channels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/controller.rs"]
mod tests;
