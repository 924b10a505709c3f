use std::rc::Rc;

use crate::{
    animation::controller::AnimationController, effects::description::BackLayer,
    filters::filter::Filter,
};

/// Effect state the integration keeps on each battle sprite set.
#[derive(Clone, Debug, Default)]
pub struct SpritesetFx {
    back1_effect: Option<String>,
    back2_effect: Option<String>,
    controller: Option<AnimationController>,
    installed: bool,
}

impl SpritesetFx {
    pub fn effect(&self, layer: BackLayer) -> Option<&str> {
        match layer {
            BackLayer::Back1 => self.back1_effect.as_deref(),
            BackLayer::Back2 => self.back2_effect.as_deref(),
        }
    }

    pub fn set_effect(&mut self, layer: BackLayer, name: Option<String>) {
        match layer {
            BackLayer::Back1 => self.back1_effect = name,
            BackLayer::Back2 => self.back2_effect = name,
        }
    }

    /// Merged controller, present once filters are installed.
    pub fn controller(&self) -> Option<&AnimationController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut AnimationController> {
        self.controller.as_mut()
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub(crate) fn install(&mut self, controller: AnimationController) {
        self.controller = Some(controller);
        self.installed = true;
    }
}

/// The host's battle sprite set, as far as effects are concerned.
pub trait BattleSpriteset {
    fn battleback1_name(&self) -> Option<&str>;

    fn battleback2_name(&self) -> Option<&str>;

    /// Replace the filter list of one background sprite.
    fn set_battleback_filters(&mut self, layer: BackLayer, filters: Vec<Rc<Filter>>);

    fn fx(&self) -> &SpritesetFx;

    fn fx_mut(&mut self) -> &mut SpritesetFx;

    fn battleback_name(&self, layer: BackLayer) -> Option<&str> {
        match layer {
            BackLayer::Back1 => self.battleback1_name(),
            BackLayer::Back2 => self.battleback2_name(),
        }
    }
}
