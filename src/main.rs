//! Bridge Line Placer.
//!
//! Headless-Replay eines Platzierungs-Drags: lädt Optionen, baut Controller
//! und Router und spielt Hover, Down, Drag und Up bis zur gewünschten
//! Kettenlänge ab. Aufruf: `Bridge-Line-Placer [länge]`.

use anyhow::Context;
use bridge_line_placer::{
    HeadlessScene, HorizontalSurface, PieceRole, PlaceableCatalog, PlacementController,
    PlacementOptions, PointerEventKind, PointerInputRouter, PointerInputRouterBuilder, PointerRay,
    PointerSample,
};
use glam::Vec3;

/// Eingebauter Demo-Katalog.
const DEMO_CATALOG: &str = r#"
[[placeable]]
name = "Holzbrücke"
primary = { prototype = "bridge/ramp_start", x_size = 1.0, bottom_y_offset = 0.1 }
tertiary = { prototype = "bridge/span", x_size = 2.0 }
filler = { prototype = "bridge/plank", x_size = 0.5 }

[placeable.secondary]
prototype = "bridge/ramp_end"
x_size = 1.0
bottom_y_offset = 0.1
yaw_offset_deg = 180.0
"#;

const DEMO_DEFINITION: &str = "Holzbrücke";
const DEFAULT_LENGTH: f32 = 10.0;
const DRAG_STEPS: usize = 10;

type DemoRouter = PointerInputRouter<PlacementController<HeadlessScene>>;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Bridge Line Placer v{} startet...", env!("CARGO_PKG_VERSION"));

    let length = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f32>()
            .with_context(|| format!("Ungültige Länge: {arg}"))?,
        None => DEFAULT_LENGTH,
    };

    let options = PlacementOptions::load_from_file(&PlacementOptions::config_path());
    let catalog = PlaceableCatalog::from_toml_str(DEMO_CATALOG)?;
    let definition = catalog.get(DEMO_DEFINITION)?.clone();

    let surface = HorizontalSurface::new(options.surface_height);
    let controller = PlacementController::new(HeadlessScene::new(), definition, options)?;
    let mut router: DemoRouter = PointerInputRouterBuilder::new(surface)
        .listener(controller)
        .build()?;

    replay_drag(&mut router, length);
    report(&router);

    let mut controller = router.into_listener();
    if let Some(chain) = controller.finish_chain() {
        log::info!(
            "Kette '{}' abgeschlossen: {} Bauteile",
            chain.definition,
            chain.pieces.len()
        );
    }
    let scene = controller.teardown();
    log::info!(
        "Szene abgebaut: {} erzeugt, {} zerstört, {} übergeben",
        scene.instantiated_count(),
        scene.destroyed_count(),
        scene.live_count()
    );
    Ok(())
}

/// Spielt einen Drag vom Ursprung bis `length` entlang +X ab.
fn replay_drag(router: &mut DemoRouter, length: f32) {
    let sample = |kind, x: f32| {
        PointerSample::new(kind, PointerRay::straight_down(Vec3::new(x, 0.0, 0.0)))
    };

    router.dispatch(sample(PointerEventKind::Hover, 0.0));
    router.dispatch(sample(PointerEventKind::Down, 0.0));
    for step in 1..=DRAG_STEPS {
        let x = length * step as f32 / DRAG_STEPS as f32;
        router.dispatch(sample(PointerEventKind::Drag, x));
    }
    router.dispatch(sample(PointerEventKind::Up, length));
}

fn report(router: &DemoRouter) {
    let controller = router.listener();
    let session = controller.session();
    log::info!(
        "Phase {:?}: {} Tertiary, {} Filler, {} Events ({} ohne Wirkung), Abbruch: {:?}",
        session.state(),
        session.tertiary().len(),
        session.filler().len(),
        controller.event_log().len(),
        controller.event_log().ignored_count(),
        controller.options().drag_cancel_policy
    );
    for piece in session.pieces() {
        let p = piece.position();
        let level = match piece.role() {
            PieceRole::Primary | PieceRole::Secondary => log::Level::Info,
            PieceRole::Tertiary(_) | PieceRole::Filler(_) => log::Level::Debug,
        };
        log::log!(
            level,
            "  {:?} {} '{}' bei ({:.3}, {:.3}, {:.3})",
            piece.role(),
            piece.id(),
            piece.prototype(),
            p.x,
            p.y,
            p.z
        );
    }
}
