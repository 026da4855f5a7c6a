//! End-to-end session scenarios driven on a synthetic clock.

use std::time::Duration;

use flatwalk_core::{HealthModel, Interactable, RoomId};
use flatwalk_scene::{
    build_room, ClickOutcome, LightParams, Node, NodeKey, Ray, RoomParams, SceneCatalog, Session,
    WallSide, WindowParams,
};
use flatwalk_testkit::RecordingMeter;
use glam::{Vec2, Vec3};

/// Screen anchor used for every scripted click.
const CLICK_AT: Vec2 = Vec2::new(640.0, 360.0);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn room_params(id: RoomId, size: f32) -> RoomParams {
    RoomParams {
        id,
        size,
        floor_color: [0.55, 0.45, 0.35],
        wall_color: [0.9, 0.88, 0.82],
        background: [0.08, 0.09, 0.12],
        light: LightParams::default(),
        windows: vec![WindowParams {
            side: WallSide::North,
            offset: 0.0,
            width: 2.0,
            height: 1.5,
            sill: 1.0,
        }],
    }
}

/// Three rooms with one decoration each: bed +20/5000ms, fridge +10/3000ms,
/// chair +5/2000ms. Each decoration sits at a known spot so tests can aim a
/// ray straight down onto it.
fn apartment() -> SceneCatalog {
    let params = vec![
        room_params(RoomId::Bedroom, 10.0),
        room_params(RoomId::Kitchen, 12.0),
        room_params(RoomId::LivingRoom, 15.0),
    ];
    let mut catalog = SceneCatalog::build(&params).expect("non-empty rooms");

    let decor = [
        (RoomId::Bedroom, "bed", 20, 5000_u64),
        (RoomId::Kitchen, "fridge", 10, 3000),
        (RoomId::LivingRoom, "chair", 5, 2000),
    ];
    for (room, name, effect, cooldown_ms) in decor {
        let mut group = Node::group(name, Vec3::new(2.0, 0.0, 2.0));
        group.interactable = Some(Interactable::new(effect, cooldown_ms));
        catalog.queue_decor(
            room,
            group,
            vec![Node::boxed(
                "body",
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::splat(0.5),
                [0.5, 0.35, 0.2],
            )],
        );
    }
    catalog.process_pending();
    catalog
}

/// Ray pointing straight down at the decoration in every room.
fn decor_ray() -> Ray {
    Ray::new(Vec3::new(2.0, 3.0, 2.0), Vec3::new(0.0, -1.0, 0.0))
}

/// Ray into the middle of the floor, away from any decoration.
fn floor_ray() -> Ray {
    Ray::new(Vec3::new(-2.0, 3.0, -2.0), Vec3::new(0.0, -1.0, 0.0))
}

fn session_with_meter() -> (Session, RecordingMeter) {
    let meter = RecordingMeter::new();
    let health = HealthModel::new(Box::new(meter.clone()));
    (Session::new(apartment(), health), meter)
}

#[test]
fn health_decays_one_point_per_second() {
    let (mut session, meter) = session_with_meter();
    assert_eq!(session.health().current(), 100);

    session.advance(ms(999));
    assert_eq!(session.health().current(), 100);

    session.advance(ms(1000));
    assert_eq!(session.health().current(), 99);
    assert_eq!(meter.last(), Some(99.0));

    session.advance(ms(4500));
    assert_eq!(session.health().current(), 96);
}

#[test]
fn click_applies_effect_clamped_to_max() {
    let (mut session, meter) = session_with_meter();

    // Burn down to 90, then click the bed (+20).
    for second in 1..=10 {
        session.advance(ms(second * 1000));
    }
    assert_eq!(session.health().current(), 90);

    let outcome = session.click(&decor_ray(), CLICK_AT, ms(10_000));
    match outcome {
        ClickOutcome::Applied { effect, health, .. } => {
            assert_eq!(effect, 20);
            assert_eq!(health, 100);
        }
        other => panic!("expected applied click, got {other:?}"),
    }
    assert_eq!(meter.last(), Some(100.0));
}

#[test]
fn cooldown_gates_reclick_until_it_elapses() {
    let (mut session, _meter) = session_with_meter();

    let target = match session.click(&decor_ray(), CLICK_AT, ms(0)) {
        ClickOutcome::Applied { target, .. } => target,
        other => panic!("expected applied click, got {other:?}"),
    };
    assert!(session.is_cooling(target));

    // Reclick while cooling: gated, no health change, no new popup.
    session.advance(ms(100));
    let popups_before = session.popups().len();
    let health_before = session.health().current();
    assert_eq!(
        session.click(&decor_ray(), CLICK_AT, ms(100)),
        ClickOutcome::OnCooldown { target }
    );
    assert_eq!(session.health().current(), health_before);
    assert_eq!(session.popups().len(), popups_before);

    // One tick after the 5000ms deadline the bed is clickable again.
    session.advance(ms(5000));
    assert!(!session.is_cooling(target));
    assert!(matches!(
        session.click(&decor_ray(), CLICK_AT, ms(5000)),
        ClickOutcome::Applied { .. }
    ));
}

#[test]
fn room_switch_mutates_no_gameplay_state() {
    let (mut session, _meter) = session_with_meter();

    let target = match session.click(&decor_ray(), CLICK_AT, ms(0)) {
        ClickOutcome::Applied { target, .. } => target,
        other => panic!("expected applied click, got {other:?}"),
    };
    session.advance(ms(500));
    let health = session.health().current();
    let popups = session.popups().len();

    assert!(session.switch_room(RoomId::Kitchen));
    assert_eq!(session.catalog().active_id(), RoomId::Kitchen);
    assert_eq!(session.health().current(), health);
    assert_eq!(session.popups().len(), popups);
    // The bedroom cooldown survives the switch and still re-arms on schedule.
    assert!(session.is_cooling(target));
    session.advance(ms(5500));
    assert!(!session.is_cooling(target));
}

#[test]
fn rooms_have_independent_cooldowns() {
    let (mut session, _) = session_with_meter();

    assert!(matches!(
        session.click(&decor_ray(), CLICK_AT, ms(0)),
        ClickOutcome::Applied { .. }
    ));
    session.switch_room(RoomId::LivingRoom);
    // Same ray, different room: the chair is fresh.
    assert!(matches!(
        session.click(&decor_ray(), CLICK_AT, ms(10)),
        ClickOutcome::Applied { effect: 5, .. }
    ));
}

#[test]
fn clicking_inert_geometry_is_a_noop() {
    let (mut session, _) = session_with_meter();
    let health = session.health().current();

    assert_eq!(session.click(&floor_ray(), CLICK_AT, ms(0)), ClickOutcome::Miss);
    assert_eq!(session.health().current(), health);
    assert!(session.popups().is_empty());
}

#[test]
fn popup_spawns_and_retires_after_its_lifetime() {
    let (mut session, _) = session_with_meter();

    session.click(&decor_ray(), CLICK_AT, ms(0));
    assert_eq!(session.popups().len(), 1);
    assert_eq!(session.popups()[0].text, "+20 HP");
    assert_eq!(session.popups()[0].at, CLICK_AT);

    session.advance(ms(999));
    assert_eq!(session.popups().len(), 1);
    assert!(session.popups()[0].fade(ms(999)) > 0.0);

    session.advance(ms(1000));
    assert!(session.popups().is_empty());
}

#[test]
fn pulse_swells_the_decor_and_settles_back() {
    let (mut session, _) = session_with_meter();

    let target = match session.click(&decor_ray(), CLICK_AT, ms(0)) {
        ClickOutcome::Applied { target, .. } => target,
        other => panic!("expected applied click, got {other:?}"),
    };
    let scale_at = |session: &Session, key: NodeKey| {
        session
            .catalog()
            .room(key.room)
            .unwrap()
            .graph
            .node(key.node)
            .unwrap()
            .scale
    };

    session.advance(ms(50));
    let mid = scale_at(&session, target);
    assert!(mid.x > 1.0 && mid.x < 1.2 + 1e-4);

    session.advance(ms(200));
    assert_eq!(scale_at(&session, target), Vec3::ONE);
}

#[test]
fn partially_populated_room_tolerates_clicks() {
    // Decor queued but not yet attached: the room shell is live and
    // clickable, the bed just is not there yet.
    let mut catalog = SceneCatalog::build(&[room_params(RoomId::Bedroom, 10.0)]).unwrap();
    let mut group = Node::group("bed", Vec3::new(2.0, 0.0, 2.0));
    group.interactable = Some(Interactable::new(20, 5000));
    catalog.queue_decor(
        RoomId::Bedroom,
        group,
        vec![Node::boxed(
            "body",
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::splat(0.5),
            [0.5, 0.35, 0.2],
        )],
    );

    let meter = RecordingMeter::new();
    let mut session = Session::new(catalog, HealthModel::new(Box::new(meter.clone())));

    assert_eq!(session.click(&decor_ray(), CLICK_AT, ms(0)), ClickOutcome::Miss);
    assert_eq!(session.health().current(), 100);

    // Once the pending decor lands, the same ray finds the bed.
    let attached = session.catalog_mut().process_pending();
    assert_eq!(attached.len(), 1);
    assert!(matches!(
        session.click(&decor_ray(), CLICK_AT, ms(10)),
        ClickOutcome::Applied { effect: 20, .. }
    ));
}

#[test]
fn cancel_room_effects_rearms_and_restores_scale() {
    let (mut session, _) = session_with_meter();

    let target = match session.click(&decor_ray(), CLICK_AT, ms(0)) {
        ClickOutcome::Applied { target, .. } => target,
        other => panic!("expected applied click, got {other:?}"),
    };
    session.advance(ms(50));

    session.cancel_room_effects(RoomId::Bedroom);
    assert!(!session.is_cooling(target));
    let node = session
        .catalog()
        .room(RoomId::Bedroom)
        .unwrap()
        .graph
        .node(target.node)
        .unwrap();
    assert_eq!(node.scale, Vec3::ONE);
    assert!(matches!(
        session.click(&decor_ray(), CLICK_AT, ms(60)),
        ClickOutcome::Applied { .. }
    ));
}
