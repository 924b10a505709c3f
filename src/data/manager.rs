use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    data::{
        config::DataManagerConfig,
        source::{DocumentSource, Response, Ticket},
    },
    effects::{
        chain::{EffectChain, build_effect_chain},
        description::{EffectDescription, EffectIndex},
    },
    foundation::error::{FxError, FxResult},
};

/// Progress of one document load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    /// Loaded or failed: nothing more will happen without a new request.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

#[derive(Clone, Debug)]
enum Target {
    Index,
    Effect(String),
}

#[derive(Clone, Debug)]
struct InFlight {
    target: Target,
    path: String,
}

/// Process-wide cache of the effect index and built effect chains.
///
/// Loads are best-effort: failures are logged and recorded as [`LoadState::Failed`],
/// never returned to the caller. A failure leaves the state at `Loading` while another
/// request for the same document is still in flight. Built chains are never evicted.
pub struct EffectDataManager {
    config: DataManagerConfig,
    source: Box<dyn DocumentSource>,
    next_ticket: u64,
    in_flight: HashMap<Ticket, InFlight>,
    index: Option<EffectIndex>,
    index_state: LoadState,
    effects: HashMap<String, Rc<EffectChain>>,
    effect_states: HashMap<String, LoadState>,
}

pub type DataManagerHandle = Rc<RefCell<EffectDataManager>>;

impl fmt::Debug for EffectDataManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectDataManager")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight.len())
            .field("index_state", &self.index_state)
            .field("effects", &self.effects.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl EffectDataManager {
    pub fn new(config: DataManagerConfig, source: impl DocumentSource + 'static) -> Self {
        Self {
            config,
            source: Box::new(source),
            next_ticket: 0,
            in_flight: HashMap::new(),
            index: None,
            index_state: LoadState::NotRequested,
            effects: HashMap::new(),
            effect_states: HashMap::new(),
        }
    }

    pub fn into_handle(self) -> DataManagerHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn config(&self) -> &DataManagerConfig {
        &self.config
    }

    fn issue(&mut self, target: Target, path: String) {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.source.request(ticket, &path);
        self.in_flight.insert(ticket, InFlight { target, path });
    }

    /// Request the effect index. A later completion replaces an earlier index.
    #[tracing::instrument(skip(self))]
    pub fn load_effect_index(&mut self) {
        let path = self.config.index_path();
        tracing::debug!(%path, "requesting effect index");
        if self.index_state != LoadState::Loaded {
            self.index_state = LoadState::Loading;
        }
        self.issue(Target::Index, path);
    }

    /// Request one effect description and build its chain on completion.
    ///
    /// Duplicate requests are not coalesced; the last completion wins the cache slot.
    #[tracing::instrument(skip(self))]
    pub fn load_effect(&mut self, name: &str) {
        let path = self.config.effect_path(name);
        tracing::debug!(%path, "requesting effect");
        if !self.effects.contains_key(name) {
            self.effect_states
                .insert(name.to_string(), LoadState::Loading);
        }
        self.issue(Target::Effect(name.to_string()), path);
    }

    /// Deliver every completion the source has ready. Returns how many were handled.
    #[tracing::instrument(skip(self))]
    pub fn pump(&mut self) -> usize {
        let completions = self.source.drain();
        let mut handled = 0;
        for completion in completions {
            let Some(flight) = self.in_flight.remove(&completion.ticket) else {
                tracing::warn!(ticket = completion.ticket.0, "completion for unknown ticket");
                continue;
            };
            let body = response_body(completion.result, &flight.path);
            match flight.target {
                Target::Index => self.finish_index(body, &flight.path),
                Target::Effect(name) => self.finish_effect(&name, body, &flight.path),
            }
            handled += 1;
        }
        handled
    }

    fn finish_index(&mut self, body: FxResult<Vec<u8>>, path: &str) {
        let parsed = body.and_then(|b| Ok(serde_json::from_slice::<EffectIndex>(&b)?));
        match parsed {
            Ok(index) => {
                tracing::debug!(
                    back1 = index.back1_mapping.len(),
                    back2 = index.back2_mapping.len(),
                    "effect index loaded"
                );
                self.index = Some(index);
                self.index_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "effect index load failed");
                let retrying = self.in_flight.values().any(|f| matches!(f.target, Target::Index));
                if self.index.is_none() && !retrying {
                    self.index_state = LoadState::Failed;
                }
            }
        }
    }

    fn finish_effect(&mut self, name: &str, body: FxResult<Vec<u8>>, path: &str) {
        let built = body
            .and_then(|b| EffectDescription::from_slice(&b))
            .and_then(|desc| build_effect_chain(&desc));
        match built {
            Ok(chain) => {
                tracing::debug!(effect = name, stages = chain.len(), "effect loaded");
                self.effects.insert(name.to_string(), Rc::new(chain));
                self.effect_states
                    .insert(name.to_string(), LoadState::Loaded);
            }
            Err(e) => {
                tracing::warn!(effect = name, %path, error = %e, "effect load failed");
                if !self.effects.contains_key(name) && !self.is_effect_in_flight(name) {
                    self.effect_states
                        .insert(name.to_string(), LoadState::Failed);
                }
            }
        }
    }

    fn is_effect_in_flight(&self, name: &str) -> bool {
        self.in_flight
            .values()
            .any(|f| matches!(&f.target, Target::Effect(n) if n == name))
    }

    /// The index has loaded successfully.
    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// The index load finished, successfully or not.
    pub fn is_index_settled(&self) -> bool {
        self.index_state.is_settled()
    }

    pub fn index_state(&self) -> LoadState {
        self.index_state
    }

    pub fn index(&self) -> Option<&EffectIndex> {
        self.index.as_ref()
    }

    pub fn is_effect_loaded(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// The effect is cached or its load failed.
    pub fn is_effect_settled(&self, name: &str) -> bool {
        self.effect_state(name).is_settled()
    }

    pub fn effect_state(&self, name: &str) -> LoadState {
        if self.effects.contains_key(name) {
            return LoadState::Loaded;
        }
        self.effect_states.get(name).copied().unwrap_or_default()
    }

    pub fn effect(&self, name: &str) -> Option<Rc<EffectChain>> {
        self.effects.get(name).cloned()
    }

    /// Requests issued but not yet delivered by [`EffectDataManager::pump`].
    pub fn active_requests(&self) -> usize {
        self.in_flight.len()
    }
}

fn response_body(result: anyhow::Result<Response>, path: &str) -> FxResult<Vec<u8>> {
    let response = result.map_err(|e| FxError::load(format!("'{path}': {e:#}")))?;
    if !response.is_success() {
        return Err(FxError::load(format!(
            "'{path}': status {}",
            response.status
        )));
    }
    Ok(response.body)
}

#[cfg(test)]
#[path = "../../tests/unit/data/manager.rs"]
mod tests;
