use super::*;
use crate::layout::layout;
use crate::mapper::Size;
use crate::payload::{EntityAnnotation, Rect, Rgb, SupplementalData};

// =============================================================
// Helpers
// =============================================================

fn identity_mapper() -> CoordinateMapper {
    CoordinateMapper::new(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0)).unwrap()
}

fn entity(id: &str, region: Rect, supplemental: bool) -> EntityAnnotation {
    EntityAnnotation {
        id: EntityId::from(id),
        primary_region: region,
        has_supplemental_data: supplemental,
        supplemental_data: supplemental.then(SupplementalData::default),
        panel_anchor: None,
        display_color: Rgb::MATCHED,
    }
}

fn frame(entities: Vec<EntityAnnotation>) -> FrameRecord {
    FrameRecord { entities, ..FrameRecord::default() }
}

fn resolve_with(click: Point, f: &FrameRecord, state: &InteractionState, mapper: &CoordinateMapper) -> Hit {
    let config = LayoutConfig::default();
    let result = layout(f, state, mapper, &config);
    resolve(click, f, &result, state, mapper, &config)
}

fn toggle_center(f: &FrameRecord, state: &InteractionState, mapper: &CoordinateMapper, id: &str) -> Point {
    let config = LayoutConfig::default();
    let result = layout(f, state, mapper, &config);
    toggle_control_rect(result.get(&EntityId::from(id)).unwrap(), &config).center()
}

// =============================================================
// Detection boxes
// =============================================================

#[test]
fn click_inside_box_toggles_visibility() {
    let f = frame(vec![entity("a", Rect::new(100.0, 100.0, 200.0, 200.0), false)]);
    let hit = resolve_with(Point::new(150.0, 150.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("a")));
}

#[test]
fn click_on_box_edge_counts() {
    let f = frame(vec![entity("a", Rect::new(100.0, 100.0, 200.0, 200.0), false)]);
    let hit = resolve_with(Point::new(200.0, 100.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("a")));
}

#[test]
fn click_outside_everything_is_none() {
    let f = frame(vec![entity("a", Rect::new(100.0, 100.0, 200.0, 200.0), false)]);
    let hit = resolve_with(Point::new(500.0, 500.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::None);
}

#[test]
fn empty_frame_is_none() {
    let hit = resolve_with(Point::new(1.0, 1.0), &frame(vec![]), &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::None);
}

#[test]
fn smallest_containing_box_wins() {
    // A: 10x10 = 100, B: 10x5 = 50.
    let f = frame(vec![
        entity("A", Rect::new(0.0, 0.0, 10.0, 10.0), false),
        entity("B", Rect::new(0.0, 2.0, 10.0, 7.0), false),
    ]);
    let hit = resolve_with(Point::new(5.0, 5.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("B")));
}

#[test]
fn smallest_box_wins_regardless_of_order() {
    let f = frame(vec![
        entity("small", Rect::new(40.0, 40.0, 60.0, 60.0), false),
        entity("large", Rect::new(0.0, 0.0, 100.0, 100.0), false),
    ]);
    let hit = resolve_with(Point::new(50.0, 50.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("small")));
}

#[test]
fn equal_area_tie_goes_to_earlier_entity() {
    let f = frame(vec![
        entity("first", Rect::new(0.0, 0.0, 10.0, 10.0), false),
        entity("second", Rect::new(5.0, 5.0, 15.0, 15.0), false),
    ]);
    let hit = resolve_with(Point::new(7.0, 7.0), &f, &InteractionState::new(), &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("first")));
}

#[test]
fn box_hit_ignores_visibility() {
    let f = frame(vec![entity("a", Rect::new(100.0, 100.0, 200.0, 200.0), true)]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let hit = resolve_with(Point::new(150.0, 150.0), &f, &state, &identity_mapper());
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("a")));
}

#[test]
fn click_is_converted_to_source_space() {
    let mapper = CoordinateMapper::new(Size::new(1920.0, 1080.0), Size::new(480.0, 270.0)).unwrap();
    let f = frame(vec![entity("a", Rect::new(400.0, 400.0, 800.0, 800.0), false)]);
    // (150, 150) display is (600, 600) source.
    let hit = resolve_with(Point::new(150.0, 150.0), &f, &InteractionState::new(), &mapper);
    assert_eq!(hit, Hit::ToggleVisibility(EntityId::from("a")));
    // (600, 600) source coordinates, taken as display, are off the box.
    let hit = resolve_with(Point::new(600.0, 600.0), &f, &InteractionState::new(), &mapper);
    assert_eq!(hit, Hit::None);
}

// =============================================================
// Toggle controls
// =============================================================

#[test]
fn click_on_toggle_control_expands() {
    let f = frame(vec![entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), true)]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let mapper = identity_mapper();

    let click = toggle_center(&f, &state, &mapper, "a");
    assert_eq!(resolve_with(click, &f, &state, &mapper), Hit::ToggleExpand(EntityId::from("a")));
}

#[test]
fn toggle_control_takes_precedence_over_box() {
    // "b"'s box covers "a"'s panel entirely.
    let f = frame(vec![
        entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), true),
        entity("b", Rect::new(0.0, 0.0, 1000.0, 1000.0), false),
    ]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let mapper = identity_mapper();

    let click = toggle_center(&f, &state, &mapper, "a");
    assert_eq!(resolve_with(click, &f, &state, &mapper), Hit::ToggleExpand(EntityId::from("a")));
}

#[test]
fn hidden_entity_toggle_control_is_not_clickable() {
    let f = frame(vec![entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), true)]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let mapper = identity_mapper();
    let click = toggle_center(&f, &state, &mapper, "a");

    state.toggle_visibility(&EntityId::from("a"));
    assert_eq!(resolve_with(click, &f, &state, &mapper), Hit::None);
}

#[test]
fn placeholder_panel_has_no_toggle_control() {
    let f = frame(vec![entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), false)]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let mapper = identity_mapper();
    let config = LayoutConfig::default();
    let result = layout(&f, &state, &mapper, &config);
    let click = toggle_control_rect(result.get(&EntityId::from("a")).unwrap(), &config).center();

    assert_eq!(resolve(click, &f, &result, &state, &mapper, &config), Hit::None);
}

#[test]
fn missing_layout_entry_is_skipped() {
    let f = frame(vec![entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), true)]);
    let mut state = InteractionState::new();
    state.toggle_visibility(&EntityId::from("a"));
    let mapper = identity_mapper();
    let config = LayoutConfig::default();
    let click = toggle_center(&f, &state, &mapper, "a");

    let hit = resolve(click, &f, &LayoutResult::default(), &state, &mapper, &config);
    assert_eq!(hit, Hit::None);
}

#[test]
fn toggle_follows_packed_position() {
    // Two panels anchored at the same place; the second is pushed right and
    // its toggle must be found at the pushed position.
    let f = frame(vec![
        entity("a", Rect::new(400.0, 400.0, 500.0, 500.0), true),
        entity("b", Rect::new(400.0, 420.0, 500.0, 520.0), true),
    ]);
    let mut state = InteractionState::new();
    state.show_all(&[EntityId::from("a"), EntityId::from("b")]);
    let mapper = identity_mapper();

    let a_click = toggle_center(&f, &state, &mapper, "a");
    let b_click = toggle_center(&f, &state, &mapper, "b");
    assert!(b_click.x > a_click.x);
    assert_eq!(resolve_with(b_click, &f, &state, &mapper), Hit::ToggleExpand(EntityId::from("b")));
    assert_eq!(resolve_with(a_click, &f, &state, &mapper), Hit::ToggleExpand(EntityId::from("a")));
}
