use results_core::{update, Signal, ViewerState};

#[test]
fn connect_is_noop() {
    let state = ViewerState::new();
    let (next, effects) = update(state.clone(), Signal::Connect);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn clearing_an_empty_store_is_noop() {
    let state = ViewerState::new();
    let (mut next, effects) = update(state.clone(), Signal::ClearClientResults);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
