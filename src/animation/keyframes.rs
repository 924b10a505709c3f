use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::Rgba,
    foundation::error::{FxError, FxResult},
};

/// Interpolation contract for channel value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (f64::from(*a) + (f64::from(*b) - f64::from(*a)) * t) as f32
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::new(
            f32::lerp(&a.r, &b.r, t),
            f32::lerp(&a.g, &b.g, t),
            f32::lerp(&a.b, &b.b, t),
            f32::lerp(&a.a, &b.a, t),
        )
    }
}

/// What happens once playback passes the last keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Hold the last keyframe.
    Once,
    /// Wrap back to the first keyframe.
    #[default]
    Repeat,
    /// Play forward then backward.
    PingPong,
}

/// One keyframe of a track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Track-local time in frames.
    pub frame: f64,
    /// Value at `frame`.
    pub value: T,
    /// Easing applied toward the next keyframe.
    #[serde(default)]
    pub ease: Ease,
}

/// Keyframed values for one channel within one named animation.
///
/// JSON form is either a bare array of keyframes or
/// `{ "keys": [...], "loop": "once" | "repeat" | "ping_pong" }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track<T> {
    /// Keyframes sorted by `frame`.
    pub keys: Vec<Keyframe<T>>,
    /// Behavior past the last keyframe.
    #[serde(rename = "loop")]
    pub repeat: LoopMode,
}

impl<'de, T> Deserialize<'de> for Track<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Bare(Vec<Keyframe<T>>),
            Full {
                keys: Vec<Keyframe<T>>,
                #[serde(default, rename = "loop")]
                repeat: LoopMode,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bare(keys) => Self {
                keys,
                repeat: LoopMode::default(),
            },
            Repr::Full { keys, repeat } => Self { keys, repeat },
        })
    }
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    /// Parse and validate a track from raw keyframe data.
    pub fn from_json(data: &serde_json::Value) -> FxResult<Self>
    where
        T: serde::de::DeserializeOwned,
    {
        let track: Self = serde_json::from_value(data.clone())?;
        track.validate()?;
        Ok(track)
    }

    /// Validate ordering and non-emptiness.
    pub fn validate(&self) -> FxResult<()> {
        if self.keys.is_empty() {
            return Err(FxError::animation("track must have at least one keyframe"));
        }
        if self.keys.iter().any(|k| !k.frame.is_finite() || k.frame < 0.0) {
            return Err(FxError::animation(
                "keyframe frames must be finite and >= 0",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame <= w[1].frame) {
            return Err(FxError::animation("keyframes must be sorted by frame"));
        }
        Ok(())
    }

    /// Frame of the last keyframe.
    pub fn duration(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.frame)
    }

    /// Value of the first keyframe.
    pub fn first_value(&self) -> Option<&T> {
        self.keys.first().map(|k| &k.value)
    }

    /// Sample the track at track-local time `time` (frames).
    pub fn sample(&self, time: f64) -> Option<T> {
        let first = self.keys.first()?;
        let t = self.wrap_time(time);

        let idx = self.keys.partition_point(|k| k.frame <= t);
        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.frame - a.frame;
        if span <= 0.0 {
            return Some(b.value.clone());
        }
        let te = a.ease.apply((t - a.frame) / span);
        Some(T::lerp(&a.value, &b.value, te))
    }

    fn wrap_time(&self, time: f64) -> f64 {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        let dur = self.duration();
        if dur <= 0.0 {
            return 0.0;
        }
        match self.repeat {
            LoopMode::Once => time.min(dur),
            LoopMode::Repeat => time.rem_euclid(dur),
            LoopMode::PingPong => {
                let pos = time.rem_euclid(2.0 * dur);
                if pos <= dur { pos } else { 2.0 * dur - pos }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
