use super::*;
use std::{cell::RefCell, rc::Rc};

#[test]
fn actions_run_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut hooks: LifecycleHooks<Vec<&'static str>> = LifecycleHooks::new();
    for tag in ["a", "b"] {
        let log = Rc::clone(&log);
        hooks.register_boot_create(move || log.borrow_mut().push(tag));
    }
    hooks.register_battle_create(|s| s.push("first"));
    hooks.register_battle_create(|s| s.push("second"));

    hooks.run_boot_create();
    assert_eq!(*log.borrow(), vec!["a", "b"]);

    let mut s = Vec::new();
    hooks.run_battle_create(&mut s);
    assert_eq!(s, vec!["first", "second"]);
}

#[test]
fn ready_predicates_short_circuit() {
    let calls = Rc::new(RefCell::new(0));
    let mut hooks: LifecycleHooks<()> = LifecycleHooks::new();
    hooks.register_boot_ready(|| false);
    {
        let calls = Rc::clone(&calls);
        hooks.register_boot_ready(move || {
            *calls.borrow_mut() += 1;
            true
        });
    }
    assert!(!hooks.run_boot_ready());
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn empty_chains_are_ready() {
    let mut hooks: LifecycleHooks<()> = LifecycleHooks::new();
    assert!(hooks.run_boot_ready());
    assert!(hooks.run_battle_ready(&mut ()));
}

#[test]
fn battle_ready_includes_spriteset_ready() {
    let mut hooks: LifecycleHooks<bool> = LifecycleHooks::new();
    hooks.register_battle_ready(|_| true);
    hooks.register_spriteset_ready(|ready| *ready);
    assert!(!hooks.run_battle_ready(&mut false));
    assert!(hooks.run_battle_ready(&mut true));
}

#[test]
fn update_threads_delta_through_callbacks() {
    let mut hooks: LifecycleHooks<Vec<f64>> = LifecycleHooks::new();
    hooks.register_spriteset_update(|seen, d| {
        seen.push(d);
        d * 2.0
    });
    hooks.register_spriteset_update(|seen, d| {
        seen.push(d);
        d + 1.0
    });
    let mut seen = Vec::new();
    assert_eq!(hooks.run_spriteset_update(&mut seen, 1.5), 4.0);
    assert_eq!(seen, vec![1.5, 3.0]);
    assert_eq!(LifecycleHooks::<()>::new().run_spriteset_update(&mut (), 2.0), 2.0);
}
