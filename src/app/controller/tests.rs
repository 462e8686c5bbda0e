use super::*;
use crate::core::{PieceMetrics, PieceSlot};
use crate::scene::HeadlessScene;

fn bridge() -> PlaceableDefinition {
    PlaceableDefinition {
        name: "Holzbrücke".into(),
        primary: PieceSlot::new("bridge/ramp_start", PieceMetrics::new(1.0)),
        secondary: PieceSlot::new("bridge/ramp_end", PieceMetrics::new(1.0)),
        tertiary: PieceSlot::new("bridge/span", PieceMetrics::new(2.0)),
        filler: PieceSlot::new("bridge/plank", PieceMetrics::new(0.5)),
    }
}

fn controller(options: PlacementOptions) -> PlacementController<HeadlessScene> {
    PlacementController::new(HeadlessScene::new(), bridge(), options)
        .expect("Controller erwartet")
}

fn at(x: f32) -> Vec3 {
    Vec3::new(x, 0.0, 0.0)
}

fn place(ctrl: &mut PlacementController<HeadlessScene>, to: f32) {
    ctrl.on_hover(at(0.0));
    ctrl.on_down(at(0.0));
    ctrl.on_drag(at(to * 0.5));
    ctrl.on_up(at(to));
}

#[test]
fn test_new_prewarms_pool_and_spawns_primary() {
    let ctrl = controller(PlacementOptions::default());
    let scene = ctrl.host();

    assert_eq!(ctrl.state(), SessionState::Idle);
    // 1 Secondary + 8 Tertiary + 8 Filler vorgewärmt, dazu das Primary
    assert_eq!(scene.live_count(), 18);
    assert_eq!(scene.active_count(), 1);
    assert_eq!(ctrl.pool().free_count(&bridge().tertiary.prototype), 8);
}

#[test]
fn test_new_rejects_invalid_options() {
    let options = PlacementOptions {
        min_drag_distance: 0.0,
        ..PlacementOptions::default()
    };
    let result = PlacementController::new(HeadlessScene::new(), bridge(), options);
    assert!(matches!(
        result.err(),
        Some(ConfigurationError::InvalidOption {
            option: "min_drag_distance",
            ..
        })
    ));
}

#[test]
fn test_new_rejects_invalid_definition() {
    let mut definition = bridge();
    definition.tertiary.metrics.x_size = 0.0;
    let result =
        PlacementController::new(HeadlessScene::new(), definition, PlacementOptions::default());
    assert!(matches!(
        result.err(),
        Some(ConfigurationError::InvalidPieceMetadata { .. })
    ));
}

#[test]
fn test_listener_flow_places_chain_from_prewarmed_pool() {
    let mut ctrl = controller(PlacementOptions::default());
    place(&mut ctrl, 10.0);

    assert_eq!(ctrl.state(), SessionState::Placed);
    assert_eq!(ctrl.session().tertiary().len(), 4);
    assert_eq!(ctrl.session().filler().len(), 4);
    // Alles aus dem Vorrat, nichts nachinstanziiert
    assert_eq!(ctrl.host().instantiated_count(), 18);
    assert_eq!(ctrl.event_log().len(), 4);
}

#[test]
fn test_ignored_events_are_still_logged() {
    let mut ctrl = controller(PlacementOptions::default());
    ctrl.on_up(at(1.0));
    ctrl.on_drag_move(PieceId(99), at(1.0));

    assert_eq!(ctrl.state(), SessionState::Idle);
    assert_eq!(ctrl.event_log().len(), 2);
    assert_eq!(ctrl.event_log().ignored_count(), 2);
    let last = ctrl.event_log().last().expect("Log-Eintrag erwartet");
    assert!(!last.applied);
    assert!(matches!(
        last.event,
        PlacementEvent::Handle {
            kind: PointerEventKind::Drag,
            piece: PieceId(99),
            ..
        }
    ));
}

#[test]
fn test_event_log_records_transition_result() {
    let mut ctrl = controller(PlacementOptions::default());
    place(&mut ctrl, 10.0);
    ctrl.on_drag(at(12.0));

    let applied: Vec<bool> = ctrl.event_log().iter().map(|e| e.applied).collect();
    assert_eq!(applied, vec![true, true, true, true, false]);
    assert_eq!(ctrl.event_log().ignored_count(), 1);
}

#[test]
fn test_hover_while_dragging_retiles_chain() {
    let mut ctrl = controller(PlacementOptions::default());
    ctrl.on_down(at(0.0));
    ctrl.on_hover(at(10.0));

    assert_eq!(ctrl.state(), SessionState::Dragging);
    assert_eq!(ctrl.session().mobile_position(), at(10.0));
    assert_eq!(ctrl.session().tertiary().len(), 4);
    assert_eq!(ctrl.session().filler().len(), 4);
    assert!(ctrl.event_log().iter().all(|e| e.applied));
}

#[test]
fn test_cancel_disabled_by_default() {
    let mut ctrl = controller(PlacementOptions::default());
    ctrl.on_down(at(0.0));
    ctrl.on_drag(at(5.0));

    assert!(!ctrl.cancel_drag());
    assert_eq!(ctrl.state(), SessionState::Dragging);
    assert_eq!(ctrl.event_log().ignored_count(), 1);
    ctrl.on_up(at(5.0));
    assert_eq!(ctrl.state(), SessionState::Placed);
}

#[test]
fn test_cancel_revert_returns_to_idle() {
    let options = PlacementOptions {
        drag_cancel_policy: DragCancelPolicy::Revert,
        ..PlacementOptions::default()
    };
    let mut ctrl = controller(options);
    ctrl.on_down(at(0.0));
    ctrl.on_drag(at(5.0));

    assert!(ctrl.cancel_drag());
    assert_eq!(ctrl.state(), SessionState::Idle);
    assert_eq!(ctrl.host().active_count(), 1);
    let last = ctrl.event_log().last().expect("Log-Eintrag erwartet");
    assert_eq!(last.event, PlacementEvent::CancelRequested);
    assert!(last.applied);
}

#[test]
fn test_reedit_through_handle_listener() {
    let mut ctrl = controller(PlacementOptions::default());
    place(&mut ctrl, 10.0);
    let secondary = ctrl
        .session()
        .piece(PieceRole::Secondary)
        .map(|p| p.id())
        .expect("Secondary erwartet");

    ctrl.on_drag_start(secondary, at(10.0));
    assert_eq!(ctrl.state(), SessionState::Dragging);
    ctrl.on_drag_move(secondary, at(4.0));
    ctrl.on_drag_end(secondary, at(4.0));

    assert_eq!(ctrl.state(), SessionState::Placed);
    assert_eq!(ctrl.session().mobile_position(), at(4.0));
    assert_eq!(ctrl.session().anchor_position(), at(0.0));
}

#[test]
fn test_finish_chain_hands_off_and_starts_new_session() {
    let mut ctrl = controller(PlacementOptions::default());
    assert!(ctrl.finish_chain().is_none());

    place(&mut ctrl, 10.0);
    let chain = ctrl.finish_chain().expect("Kette erwartet");

    assert_eq!(chain.pieces.len(), 10);
    assert_eq!(ctrl.state(), SessionState::Idle);
    let primary = ctrl
        .session()
        .piece(PieceRole::Primary)
        .expect("Primary erwartet");
    assert_eq!(primary.position(), at(10.0));
    assert!(chain.pieces.iter().all(|p| p.id() != primary.id()));
}

#[test]
fn test_finish_chain_after_primary_reedit_starts_at_secondary_end() {
    let mut ctrl = controller(PlacementOptions::default());
    place(&mut ctrl, 10.0);
    let primary = ctrl
        .session()
        .piece(PieceRole::Primary)
        .map(|p| p.id())
        .expect("Primary erwartet");

    ctrl.on_drag_start(primary, at(0.0));
    ctrl.on_drag_move(primary, at(-2.0));
    ctrl.on_drag_end(primary, at(-2.0));
    assert_eq!(ctrl.session().mobile_side(), EndpointSide::Primary);
    assert_eq!(ctrl.session().mobile_position(), at(-2.0));

    ctrl.finish_chain().expect("Kette erwartet");
    let next = ctrl
        .session()
        .piece(PieceRole::Primary)
        .expect("Primary erwartet");
    assert_eq!(next.position(), at(10.0));
    assert_eq!(ctrl.session().anchor_position(), at(10.0));
}

#[test]
fn test_teardown_destroys_every_instance() {
    let mut ctrl = controller(PlacementOptions::default());
    place(&mut ctrl, 10.0);

    let scene = ctrl.teardown();
    assert_eq!(scene.live_count(), 0);
    assert_eq!(scene.destroyed_count(), scene.instantiated_count());
}
