use super::*;
use crate::core::PieceMetrics;
use crate::scene::HeadlessScene;

const HOLDING: SceneNodeId = SceneNodeId(0);
const CHAIN: SceneNodeId = SceneNodeId(1);

fn span_slot() -> PieceSlot {
    PieceSlot::new("bridge/span", PieceMetrics::new(2.0))
}

fn plank_slot() -> PieceSlot {
    PieceSlot::new("bridge/plank", PieceMetrics::new(0.5))
}

#[test]
fn test_prewarm_creates_inactive_instances() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    pool.prewarm(&mut scene, &span_slot().prototype, 3);

    assert_eq!(pool.free_count(&span_slot().prototype), 3);
    assert_eq!(scene.live_count(), 3);
    assert_eq!(scene.active_count(), 0);
    assert!(scene.objects().all(|(_, o)| o.parent == Some(HOLDING)));
}

#[test]
fn test_acquire_reuses_prewarmed_instance() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    pool.prewarm(&mut scene, &span_slot().prototype, 1);

    let piece = pool.acquire(&mut scene, &span_slot(), PieceRole::Tertiary(0), CHAIN);
    assert_eq!(scene.instantiated_count(), 1);
    assert_eq!(pool.free_count(&span_slot().prototype), 0);

    let obj = scene.object(piece.id()).expect("Instanz erwartet");
    assert!(obj.active);
    assert_eq!(obj.parent, Some(CHAIN));
    assert_eq!(piece.role(), PieceRole::Tertiary(0));
}

#[test]
fn test_release_count_matches_free_stack() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = span_slot();

    let mut pieces: Vec<_> = (0..6)
        .map(|i| pool.acquire(&mut scene, &slot, PieceRole::Tertiary(i), CHAIN))
        .collect();

    // Keine zwei lebenden Handles auf dieselbe Instanz
    let mut ids: Vec<_> = pieces.iter().map(|p| p.id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);

    for released in 1..=4 {
        let piece = pieces.pop().expect("Instanz erwartet");
        assert_eq!(pool.release(&mut scene, piece), ReleaseOutcome::Pooled);
        assert_eq!(pool.free_count(&slot.prototype), released);
    }
    assert_eq!(scene.active_count(), 2);
}

#[test]
fn test_release_of_unknown_instance_destroys_it() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = span_slot();
    pool.prewarm(&mut scene, &slot.prototype, 2);

    let foreign_id = scene.instantiate(&slot.prototype);
    let foreign = PlaceablePiece::external(&pool, foreign_id, &slot, PieceRole::Tertiary(0))
        .expect("Fremde Instanz erwartet");

    assert_eq!(pool.release(&mut scene, foreign), ReleaseOutcome::Destroyed);
    assert_eq!(pool.free_count(&slot.prototype), 2);
    assert!(scene.object(foreign_id).is_none());
    assert_eq!(scene.destroyed_count(), 1);
}

#[test]
fn test_stacks_are_separated_by_prototype() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    pool.prewarm(&mut scene, &plank_slot().prototype, 2);

    // Kein freier Span vorhanden → neue Instanz, Planken bleiben unberührt
    let span = pool.acquire(&mut scene, &span_slot(), PieceRole::Tertiary(0), CHAIN);
    assert_eq!(pool.free_count(&plank_slot().prototype), 2);
    assert_eq!(
        scene.object(span.id()).map(|o| o.prototype.clone()),
        Some(span_slot().prototype)
    );

    pool.release(&mut scene, span);
    assert_eq!(pool.free_count(&span_slot().prototype), 1);
    assert_eq!(pool.free_count(&plank_slot().prototype), 2);
}

#[test]
fn test_resize_role_list_diffs_instead_of_rebuilding() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = plank_slot();
    let mut list = Vec::new();

    pool.resize_role_list(&mut scene, &mut list, 4, &slot, PieceRole::Filler, CHAIN);
    assert_eq!(list.len(), 4);
    let kept: Vec<_> = list.iter().take(2).map(|p| p.id()).collect();

    pool.resize_role_list(&mut scene, &mut list, 2, &slot, PieceRole::Filler, CHAIN);
    assert_eq!(list.len(), 2);
    assert_eq!(list.iter().map(|p| p.id()).collect::<Vec<_>>(), kept);
    assert_eq!(pool.free_count(&slot.prototype), 2);

    pool.resize_role_list(&mut scene, &mut list, 6, &slot, PieceRole::Filler, CHAIN);
    assert_eq!(list.len(), 6);
    assert_eq!(&list.iter().take(2).map(|p| p.id()).collect::<Vec<_>>(), &kept);
    // Zwei wiederverwendet, zwei neu erzeugt
    assert_eq!(pool.free_count(&slot.prototype), 0);
    assert_eq!(scene.instantiated_count(), 6);
    for (index, piece) in list.iter().enumerate() {
        assert_eq!(piece.role(), PieceRole::Filler(index));
    }
}

#[test]
fn test_reacquired_instance_starts_as_preview() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = span_slot();

    let mut piece = pool.acquire(&mut scene, &slot, PieceRole::Tertiary(0), CHAIN);
    piece.set_placed(&mut scene, true);
    let id = piece.id();
    pool.release(&mut scene, piece);

    let again = pool.acquire(&mut scene, &slot, PieceRole::Tertiary(0), CHAIN);
    assert_eq!(again.id(), id);
    assert!(!again.is_placed());
    assert_eq!(scene.object(id).map(|o| o.placed), Some(false));
}

#[test]
fn test_teardown_destroys_free_instances_only() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = span_slot();
    pool.prewarm(&mut scene, &slot.prototype, 3);
    let active = pool.acquire(&mut scene, &slot, PieceRole::Tertiary(0), CHAIN);

    pool.teardown(&mut scene);
    assert_eq!(scene.live_count(), 1);
    assert!(pool.is_known(active.id()));
    assert_eq!(pool.free_count(&slot.prototype), 0);

    assert_eq!(pool.release(&mut scene, active), ReleaseOutcome::Pooled);
}

#[test]
fn test_pool_instances_cannot_be_adopted_as_external() {
    let mut scene = HeadlessScene::new();
    let mut pool = PiecePool::new(HOLDING);
    let slot = span_slot();
    pool.prewarm(&mut scene, &slot.prototype, 2);

    let active = pool.acquire(&mut scene, &slot, PieceRole::Tertiary(0), CHAIN);
    let parked = scene
        .objects()
        .find(|(_, o)| !o.active)
        .map(|(id, _)| id)
        .expect("Geparkte Instanz erwartet");

    let role = PieceRole::Tertiary(1);
    assert!(PlaceablePiece::external(&pool, active.id(), &slot, role).is_none());
    assert!(PlaceablePiece::external(&pool, parked, &slot, role).is_none());

    // Die aktive Instanz wird kein zweites Mal ausgegeben
    let next = pool.acquire(&mut scene, &slot, role, CHAIN);
    assert_ne!(next.id(), active.id());
    assert_eq!(next.id(), parked);
}
