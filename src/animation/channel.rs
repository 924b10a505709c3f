use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    animation::keyframes::Track,
    filters::params::{ParamDecl, ParamHandle, ParamKind, ParamValue},
    foundation::{core::Rgba, error::FxResult},
};

#[derive(Clone, Debug)]
enum Tracks {
    Scalar(BTreeMap<String, Track<f32>>),
    Color(BTreeMap<String, Track<Rgba>>),
}

impl Tracks {
    fn contains(&self, name: &str) -> bool {
        match self {
            Self::Scalar(m) => m.contains_key(name),
            Self::Color(m) => m.contains_key(name),
        }
    }

    fn names(&self) -> Vec<&str> {
        match self {
            Self::Scalar(m) => m.keys().map(String::as_str).collect(),
            Self::Color(m) => m.keys().map(String::as_str).collect(),
        }
    }

    fn sample(&self, name: &str, time: f64) -> Option<ParamValue> {
        match self {
            Self::Scalar(m) => m.get(name)?.sample(time).map(ParamValue::Scalar),
            Self::Color(m) => m
                .get(name)?
                .sample(time)
                .map(|c| ParamValue::Color(c.to_array())),
        }
    }
}

/// Drives one filter parameter from named keyframe tracks.
///
/// Scalar parameters take numeric keyframes; color parameters take RGBA keyframes.
#[derive(Clone, Debug)]
pub struct AnimationChannel {
    target: ParamHandle,
    decl: &'static ParamDecl,
    tracks: Tracks,
    current: Option<String>,
    time: f64,
}

/// Shared channel handle; a channel can be reachable from several controllers.
pub type ChannelHandle = Rc<RefCell<AnimationChannel>>;

impl AnimationChannel {
    pub fn new(target: ParamHandle, decl: &'static ParamDecl) -> Self {
        let tracks = match decl.kind {
            ParamKind::Scalar => Tracks::Scalar(BTreeMap::new()),
            ParamKind::Color => Tracks::Color(BTreeMap::new()),
        };
        Self {
            target,
            decl,
            tracks,
            current: None,
            time: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.decl.name
    }

    pub fn kind(&self) -> ParamKind {
        self.decl.kind
    }

    /// Parse `data` as this channel's track for animation `name`, replacing any previous one.
    pub fn import_animation(&mut self, name: &str, data: &serde_json::Value) -> FxResult<()> {
        match &mut self.tracks {
            Tracks::Scalar(m) => {
                m.insert(name.to_string(), Track::from_json(data)?);
            }
            Tracks::Color(m) => {
                m.insert(name.to_string(), Track::from_json(data)?);
            }
        }
        Ok(())
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.tracks.contains(name)
    }

    pub fn animation_names(&self) -> Vec<&str> {
        self.tracks.names()
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Local time in frames since the last transition.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Switch to `name`, rewind, and apply the first keyframe immediately.
    ///
    /// Returns `false` and leaves the channel untouched when it has no track for `name`.
    pub fn transition(&mut self, name: &str) -> bool {
        if !self.tracks.contains(name) {
            return false;
        }
        self.current = Some(name.to_string());
        self.time = 0.0;
        self.apply();
        true
    }

    /// Advance local time and write the sampled value to the bound parameter.
    pub fn advance(&mut self, delta: f64) {
        if self.current.is_none() {
            return;
        }
        self.time += delta;
        self.apply();
    }

    /// Current value of the bound parameter.
    pub fn value(&self) -> ParamValue {
        self.target.borrow().read(self.decl)
    }

    fn apply(&self) {
        let Some(name) = self.current.as_deref() else {
            return;
        };
        if let Some(value) = self.tracks.sample(name, self.time) {
            self.target.borrow_mut().write(self.decl, value);
        }
    }

    pub(crate) fn into_handle(self) -> ChannelHandle {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/channel.rs"]
mod tests;
