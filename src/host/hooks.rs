use std::fmt;

pub type SceneAction = Box<dyn FnMut()>;
pub type ScenePredicate = Box<dyn FnMut() -> bool>;
pub type SpritesetAction<S> = Box<dyn FnMut(&mut S)>;
pub type SpritesetPredicate<S> = Box<dyn FnMut(&mut S) -> bool>;
pub type SpritesetUpdate<S> = Box<dyn FnMut(&mut S, f64) -> f64>;

/// Ordered extension points of the host's scene and sprite set lifecycle.
///
/// The host calls `run_*` at each point; extensions `register_*` callbacks that run
/// in registration order. Readiness predicates are AND-combined and stop at the
/// first `false`.
pub struct LifecycleHooks<S> {
    boot_create: Vec<SceneAction>,
    boot_ready: Vec<ScenePredicate>,
    battle_create: Vec<SpritesetAction<S>>,
    battle_ready: Vec<SpritesetPredicate<S>>,
    battleback_create: Vec<SpritesetAction<S>>,
    spriteset_ready: Vec<SpritesetPredicate<S>>,
    spriteset_update: Vec<SpritesetUpdate<S>>,
}

impl<S> Default for LifecycleHooks<S> {
    fn default() -> Self {
        Self {
            boot_create: Vec::new(),
            boot_ready: Vec::new(),
            battle_create: Vec::new(),
            battle_ready: Vec::new(),
            battleback_create: Vec::new(),
            spriteset_ready: Vec::new(),
            spriteset_update: Vec::new(),
        }
    }
}

impl<S> fmt::Debug for LifecycleHooks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("boot_create", &self.boot_create.len())
            .field("boot_ready", &self.boot_ready.len())
            .field("battle_create", &self.battle_create.len())
            .field("battle_ready", &self.battle_ready.len())
            .field("battleback_create", &self.battleback_create.len())
            .field("spriteset_ready", &self.spriteset_ready.len())
            .field("spriteset_update", &self.spriteset_update.len())
            .finish()
    }
}

impl<S> LifecycleHooks<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_boot_create(&mut self, f: impl FnMut() + 'static) {
        self.boot_create.push(Box::new(f));
    }

    pub fn register_boot_ready(&mut self, f: impl FnMut() -> bool + 'static) {
        self.boot_ready.push(Box::new(f));
    }

    pub fn register_battle_create(&mut self, f: impl FnMut(&mut S) + 'static) {
        self.battle_create.push(Box::new(f));
    }

    pub fn register_battle_ready(&mut self, f: impl FnMut(&mut S) -> bool + 'static) {
        self.battle_ready.push(Box::new(f));
    }

    pub fn register_battleback_create(&mut self, f: impl FnMut(&mut S) + 'static) {
        self.battleback_create.push(Box::new(f));
    }

    pub fn register_spriteset_ready(&mut self, f: impl FnMut(&mut S) -> bool + 'static) {
        self.spriteset_ready.push(Box::new(f));
    }

    pub fn register_spriteset_update(&mut self, f: impl FnMut(&mut S, f64) -> f64 + 'static) {
        self.spriteset_update.push(Box::new(f));
    }

    pub fn run_boot_create(&mut self) {
        for f in &mut self.boot_create {
            f();
        }
    }

    pub fn run_boot_ready(&mut self) -> bool {
        self.boot_ready.iter_mut().all(|f| f())
    }

    pub fn run_battle_create(&mut self, spriteset: &mut S) {
        for f in &mut self.battle_create {
            f(spriteset);
        }
    }

    /// Scene readiness includes the sprite set's own readiness chain.
    pub fn run_battle_ready(&mut self, spriteset: &mut S) -> bool {
        self.battle_ready.iter_mut().all(|f| f(spriteset)) && self.run_spriteset_ready(spriteset)
    }

    pub fn run_battleback_create(&mut self, spriteset: &mut S) {
        for f in &mut self.battleback_create {
            f(spriteset);
        }
    }

    pub fn run_spriteset_ready(&mut self, spriteset: &mut S) -> bool {
        self.spriteset_ready.iter_mut().all(|f| f(spriteset))
    }

    /// Each callback receives the delta returned by the previous one.
    pub fn run_spriteset_update(&mut self, spriteset: &mut S, delta: f64) -> f64 {
        self.spriteset_update
            .iter_mut()
            .fold(delta, |d, f| f(spriteset, d))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/hooks.rs"]
mod tests;
