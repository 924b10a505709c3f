use std::rc::Rc;

use crate::{
    animation::controller::AnimationController,
    data::manager::{DataManagerHandle, LoadState},
    effects::description::BackLayer,
    foundation::error::FxResult,
    host::{hooks::LifecycleHooks, spriteset::BattleSpriteset},
};

pub const DEFAULT_IDLE_ANIMATION: &str = "idle";

/// Host-facing knobs of the integration layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Animation started on the merged controller once filters are installed.
    pub idle_animation: String,
    /// Frame delta used when the host passes none.
    pub default_frame_delta: f64,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            idle_animation: DEFAULT_IDLE_ANIMATION.to_string(),
            default_frame_delta: 1.0,
        }
    }
}

impl IntegrationConfig {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Binds the effect data manager to the host lifecycle.
#[derive(Debug)]
pub struct VideoDrug {
    data: DataManagerHandle,
    config: IntegrationConfig,
}

impl VideoDrug {
    pub fn new(data: DataManagerHandle, config: IntegrationConfig) -> Self {
        Self { data, config }
    }

    pub fn data(&self) -> &DataManagerHandle {
        &self.data
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    pub fn boot_create(&self) {
        self.data.borrow_mut().load_effect_index();
    }

    /// Delivers pending loads, then reports whether the index load has finished.
    pub fn boot_ready(&self) -> bool {
        let mut data = self.data.borrow_mut();
        data.pump();
        data.is_index_settled()
    }

    pub fn battle_create<S: BattleSpriteset>(&self, spriteset: &mut S) {
        self.resolve_effects(spriteset);
    }

    pub fn battleback_create<S: BattleSpriteset>(&self, spriteset: &mut S) {
        self.resolve_effects(spriteset);
    }

    /// Look up both layers' effects and request the ones not already loaded or loading.
    ///
    /// The manager is never borrowed while the host sprite set is called.
    #[tracing::instrument(skip_all)]
    fn resolve_effects<S: BattleSpriteset>(&self, spriteset: &mut S) {
        for layer in BackLayer::ALL {
            let image = spriteset.battleback_name(layer).map(str::to_string);
            let name = {
                let mut data = self.data.borrow_mut();
                let name = match (data.index(), image.as_deref()) {
                    (Some(index), Some(image)) => index.effect_for(layer, image).map(str::to_string),
                    _ => None,
                };
                if let Some(name) = &name
                    && !matches!(
                        data.effect_state(name),
                        LoadState::Loading | LoadState::Loaded
                    )
                {
                    data.load_effect(name);
                }
                name
            };
            tracing::debug!(layer = layer.namespace(), effect = ?name, "resolved effect");
            spriteset.fx_mut().set_effect(layer, name);
        }
    }

    pub fn battle_ready(&self) -> bool {
        let mut data = self.data.borrow_mut();
        data.pump();
        data.is_index_settled()
    }

    /// Ready once every resolved effect has settled. The first time it is ready it
    /// installs the filters and starts the merged controller; later calls are no-ops.
    ///
    /// Without an idle animation the merged controller still plays, so each stage keeps
    /// running its default animation.
    pub fn spriteset_ready<S: BattleSpriteset>(&self, spriteset: &mut S) -> bool {
        if spriteset.fx().is_installed() {
            return true;
        }

        let names: Vec<(BackLayer, String)> = BackLayer::ALL
            .into_iter()
            .filter_map(|layer| spriteset.fx().effect(layer).map(|n| (layer, n.to_string())))
            .collect();
        let resolved = {
            let mut data = self.data.borrow_mut();
            data.pump();
            if names.iter().any(|(_, name)| !data.is_effect_settled(name)) {
                return false;
            }
            names
                .into_iter()
                .map(|(layer, name)| {
                    let chain = data.effect(&name);
                    (layer, name, chain)
                })
                .collect::<Vec<_>>()
        };

        let mut controller = AnimationController::new();
        for (layer, name, chain) in resolved {
            let Some(chain) = chain else {
                tracing::warn!(
                    effect = %name,
                    layer = layer.namespace(),
                    "effect unavailable, layer left unfiltered"
                );
                continue;
            };
            spriteset.set_battleback_filters(layer, chain.filters().to_vec());
            controller.import_channels(chain.controller(), layer.namespace());
        }

        if !controller.is_empty() {
            if let Err(e) = controller.transition(&self.config.idle_animation) {
                tracing::warn!(error = %e, "no idle animation, stages keep their defaults");
            }
            controller.play();
        }
        tracing::debug!(channels = controller.len(), "installed battleback effects");
        spriteset.fx_mut().install(controller);
        true
    }

    /// Advance the merged controller and return the consumed frame delta.
    pub fn spriteset_update<S: BattleSpriteset>(
        &self,
        spriteset: &mut S,
        delta: Option<f64>,
    ) -> f64 {
        let delta = delta.unwrap_or(self.config.default_frame_delta);
        match spriteset.fx_mut().controller_mut() {
            Some(controller) => controller.update(delta),
            None => delta,
        }
    }

    /// Register every lifecycle callback on `hooks`.
    pub fn install<S: BattleSpriteset + 'static>(self: &Rc<Self>, hooks: &mut LifecycleHooks<S>) {
        let this = Rc::clone(self);
        hooks.register_boot_create(move || this.boot_create());
        let this = Rc::clone(self);
        hooks.register_boot_ready(move || this.boot_ready());
        let this = Rc::clone(self);
        hooks.register_battle_create(move |s| this.battle_create(s));
        let this = Rc::clone(self);
        hooks.register_battle_ready(move |_| this.battle_ready());
        let this = Rc::clone(self);
        hooks.register_battleback_create(move |s| this.battleback_create(s));
        let this = Rc::clone(self);
        hooks.register_spriteset_ready(move |s| this.spriteset_ready(s));
        let this = Rc::clone(self);
        hooks.register_spriteset_update(move |s, d| this.spriteset_update(s, Some(d)));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/integration.rs"]
mod tests;
