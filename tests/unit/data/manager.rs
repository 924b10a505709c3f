use super::*;
use crate::data::source::{Completion, MemorySource};
use serde_json::json;

const INDEX: &str = "data/SixLoves_VideoDrug/EffectList.json";

fn effect_path(name: &str) -> String {
    format!("data/SixLoves_VideoDrug/{name}.json")
}

fn wave_effect(shift: f64) -> serde_json::Value {
    json!({
        "filters": [{
            "#type": "WaveDisplacementFilter",
            "#default_animation": "idle",
            "idle": { "shift": [{"frame": 0, "value": shift}] }
        }]
    })
}

fn manager() -> (EffectDataManager, MemorySource) {
    let source = MemorySource::new();
    let manager = EffectDataManager::new(DataManagerConfig::default(), source.clone());
    (manager, source)
}

#[test]
fn index_ready_only_after_completion_runs() {
    let (mut m, src) = manager();
    src.insert_json(
        INDEX,
        &json!({"back1Mapping": {"Grassland": "Heat"}, "back2Mapping": {}}),
    );

    assert!(!m.is_ready());
    assert_eq!(m.index_state(), LoadState::NotRequested);
    m.load_effect_index();
    assert!(!m.is_ready());
    assert_eq!(m.index_state(), LoadState::Loading);
    assert_eq!(m.active_requests(), 1);

    assert_eq!(m.pump(), 1);
    assert!(m.is_ready());
    assert!(m.is_index_settled());
    assert_eq!(m.active_requests(), 0);
    assert_eq!(
        m.index().unwrap().back1_mapping.get("Grassland").map(String::as_str),
        Some("Heat")
    );
    assert_eq!(src.requested(), vec![INDEX]);
}

#[test]
fn failed_index_settles_but_is_never_ready() {
    let (mut m, _src) = manager();
    m.load_effect_index();
    m.pump();
    assert!(!m.is_ready());
    assert!(m.is_index_settled());
    assert_eq!(m.index_state(), LoadState::Failed);
}

#[test]
fn malformed_index_is_a_failure() {
    let (mut m, src) = manager();
    src.insert(INDEX, "not json");
    m.load_effect_index();
    m.pump();
    assert_eq!(m.index_state(), LoadState::Failed);
}

#[test]
fn effect_loaded_only_after_successful_completion() {
    let (mut m, src) = manager();
    src.insert_json(effect_path("Heat"), &wave_effect(0.5));

    assert!(!m.is_effect_loaded("Heat"));
    m.load_effect("Heat");
    assert!(!m.is_effect_loaded("Heat"));
    assert_eq!(m.effect_state("Heat"), LoadState::Loading);
    assert!(!m.is_effect_settled("Heat"));

    m.pump();
    assert!(m.is_effect_loaded("Heat"));
    let chain = m.effect("Heat").unwrap();
    assert_eq!(chain.len(), 1);
}

#[test]
fn missing_or_invalid_effect_fails_quietly() {
    let (mut m, src) = manager();
    src.insert_json(
        effect_path("Broken"),
        &json!({"filters": [{"#type": "Bloom", "#default_animation": "idle"}]}),
    );
    m.load_effect("Missing");
    m.load_effect("Broken");
    assert_eq!(m.pump(), 2);

    for name in ["Missing", "Broken"] {
        assert!(!m.is_effect_loaded(name));
        assert!(m.is_effect_settled(name));
        assert_eq!(m.effect_state(name), LoadState::Failed);
        assert!(m.effect(name).is_none());
    }
}

#[test]
fn duplicate_loads_keep_one_entry_last_write_wins() {
    let (mut m, src) = manager();
    src.set_held(true);
    src.insert_json(effect_path("Heat"), &wave_effect(1.0));
    m.load_effect("Heat");
    src.insert_json(effect_path("Heat"), &wave_effect(2.0));
    m.load_effect("Heat");
    assert_eq!(m.active_requests(), 2);

    // Both completions read the current document; the second one delivered wins.
    src.set_held(false);
    m.pump();
    assert_eq!(m.active_requests(), 0);
    assert!(m.is_effect_loaded("Heat"));
    let first = m.effect("Heat").unwrap();
    let again = m.effect("Heat").unwrap();
    assert!(Rc::ptr_eq(&first, &again));
    let shift = first.filters()[0].param("shift").unwrap();
    assert_eq!(shift, crate::filters::params::ParamValue::Scalar(2.0));
}

#[test]
fn later_failure_does_not_evict_cached_chain() {
    let (mut m, src) = manager();
    src.insert_json(effect_path("Heat"), &wave_effect(1.0));
    m.load_effect("Heat");
    m.pump();

    src.remove(&effect_path("Heat"));
    m.load_effect("Heat");
    assert_eq!(m.effect_state("Heat"), LoadState::Loaded);
    m.pump();
    assert!(m.is_effect_loaded("Heat"));
    assert_eq!(m.effect_state("Heat"), LoadState::Loaded);
}

#[test]
fn custom_config_changes_paths() {
    let src = MemorySource::new();
    let config = DataManagerConfig {
        data_root: "assets/".into(),
        prefix: "fx/".into(),
        index_name: "index.json".into(),
    };
    let mut m = EffectDataManager::new(config, src.clone());
    m.load_effect_index();
    m.load_effect("Heat");
    assert_eq!(src.requested(), vec!["assets/fx/index.json", "assets/fx/Heat.json"]);
}

/// Answers requests in order with scripted responses, one completion per drain.
#[derive(Default)]
struct ScriptedSource {
    responses: std::collections::VecDeque<Response>,
    pending: std::collections::VecDeque<Ticket>,
}

impl ScriptedSource {
    fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl DocumentSource for ScriptedSource {
    fn request(&mut self, ticket: Ticket, _path: &str) {
        self.pending.push_back(ticket);
    }

    fn drain(&mut self) -> Vec<Completion> {
        let Some(ticket) = self.pending.pop_front() else {
            return Vec::new();
        };
        let response = self.responses.pop_front().unwrap_or_else(Response::not_found);
        vec![Completion {
            ticket,
            result: Ok(response),
        }]
    }
}

#[test]
fn effect_failure_stays_loading_while_a_retry_is_in_flight() {
    let body = serde_json::to_vec(&wave_effect(2.0)).unwrap();
    let src = ScriptedSource::new([Response::not_found(), Response::ok(body)]);
    let mut m = EffectDataManager::new(DataManagerConfig::default(), src);
    m.load_effect("Heat");
    m.load_effect("Heat");

    assert_eq!(m.pump(), 1);
    assert_eq!(m.effect_state("Heat"), LoadState::Loading);
    assert!(!m.is_effect_settled("Heat"));
    assert_eq!(m.active_requests(), 1);

    assert_eq!(m.pump(), 1);
    assert_eq!(m.effect_state("Heat"), LoadState::Loaded);
    assert!(m.is_effect_loaded("Heat"));
}

#[test]
fn failure_of_the_last_request_settles_as_failed() {
    let src = ScriptedSource::new([Response::not_found(), Response::not_found()]);
    let mut m = EffectDataManager::new(DataManagerConfig::default(), src);
    m.load_effect("Heat");
    m.load_effect("Heat");
    m.load_effect("Other");

    m.pump();
    assert_eq!(m.effect_state("Heat"), LoadState::Loading);
    m.pump();
    assert_eq!(m.effect_state("Heat"), LoadState::Failed);
    assert_eq!(m.effect_state("Other"), LoadState::Loading);
}

#[test]
fn index_failure_stays_loading_while_a_retry_is_in_flight() {
    let body = serde_json::to_vec(&json!({"back1Mapping": {}, "back2Mapping": {}})).unwrap();
    let src = ScriptedSource::new([Response::not_found(), Response::ok(body)]);
    let mut m = EffectDataManager::new(DataManagerConfig::default(), src);
    m.load_effect_index();
    m.load_effect_index();

    m.pump();
    assert_eq!(m.index_state(), LoadState::Loading);
    assert!(!m.is_index_settled());

    m.pump();
    assert_eq!(m.index_state(), LoadState::Loaded);
    assert!(m.is_ready());
}
