use super::*;

fn ids(names: &[&str]) -> Vec<EntityId> {
    names.iter().map(|n| EntityId::from(*n)).collect()
}

#[test]
fn unknown_ids_default_to_hidden_and_collapsed() {
    let state = InteractionState::new();
    let id = EntityId::from("v1");
    assert!(!state.is_visible(&id));
    assert!(!state.is_expanded(&id));
    assert_eq!(state.visible_count(), 0);
}

#[test]
fn toggle_visibility_flips_and_returns_new_value() {
    let mut state = InteractionState::new();
    let id = EntityId::from("v1");
    assert!(state.toggle_visibility(&id));
    assert!(state.is_visible(&id));
    assert!(!state.toggle_visibility(&id));
    assert!(!state.is_visible(&id));
}

#[test]
fn toggle_expanded_is_independent_of_visibility() {
    let mut state = InteractionState::new();
    let id = EntityId::from("v1");
    assert!(state.toggle_expanded(&id));
    assert!(state.is_expanded(&id));
    assert!(!state.is_visible(&id));
}

#[test]
fn toggles_leave_other_ids_alone() {
    let mut state = InteractionState::new();
    let a = EntityId::from("a");
    let b = EntityId::from("b");
    state.toggle_visibility(&a);
    state.toggle_expanded(&a);
    assert!(!state.is_visible(&b));
    assert!(!state.is_expanded(&b));
}

#[test]
fn show_all_marks_every_id_visible() {
    let mut state = InteractionState::new();
    let all = ids(&["a", "b", "c"]);
    state.show_all(&all);
    assert!(all.iter().all(|id| state.is_visible(id)));
    assert_eq!(state.visible_count(), 3);
}

#[test]
fn hide_all_marks_every_id_hidden() {
    let mut state = InteractionState::new();
    let all = ids(&["a", "b"]);
    state.show_all(&all);
    state.hide_all(&all);
    assert!(all.iter().all(|id| !state.is_visible(id)));
    assert_eq!(state.visible_count(), 0);
}

#[test]
fn show_then_hide_all_preserves_expanded() {
    let mut state = InteractionState::new();
    let all = ids(&["a", "b", "c"]);
    state.toggle_expanded(&all[0]);
    state.toggle_expanded(&all[2]);
    state.toggle_expanded(&all[2]);
    state.toggle_expanded(&all[1]);
    let before: Vec<bool> = all.iter().map(|id| state.is_expanded(id)).collect();

    state.show_all(&all);
    state.hide_all(&all);

    let after: Vec<bool> = all.iter().map(|id| state.is_expanded(id)).collect();
    assert_eq!(before, after);
}

#[test]
fn expanded_survives_hide_and_reshow() {
    let mut state = InteractionState::new();
    let id = EntityId::from("v1");
    state.toggle_visibility(&id);
    state.toggle_expanded(&id);
    state.toggle_visibility(&id);
    state.toggle_visibility(&id);
    assert!(state.is_visible(&id));
    assert!(state.is_expanded(&id));
}

#[test]
fn show_all_only_touches_listed_ids() {
    let mut state = InteractionState::new();
    let other = EntityId::from("other");
    state.show_all(&ids(&["a"]));
    assert!(!state.is_visible(&other));
}

#[test]
fn reset_clears_everything() {
    let mut state = InteractionState::new();
    let id = EntityId::from("v1");
    state.toggle_visibility(&id);
    state.toggle_expanded(&id);
    state.reset();
    assert_eq!(state, InteractionState::new());
}
