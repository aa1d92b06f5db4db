//! Entity Tests - Prey Capture, Pickups, Respawn
//!
//! Runs full simulation frames and places the character on top of entities
//! to check rewards, deactivation and respawn timing end to end.

use dolphin_dash_engine::game::systems::{PickupConfig, PickupKind, PreyConfig};
use dolphin_dash_engine::game::{SimConfig, Simulation};
use dolphin_dash_engine::input::{InputAction, ScriptedInput};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

/// Pickups parked far outside the play area so prey tests see only prey.
fn prey_only_config(prey_count: usize) -> SimConfig {
    SimConfig {
        prey: PreyConfig {
            count: prey_count,
            ..PreyConfig::default()
        },
        pickups: PickupConfig {
            count: 1,
            spawn_inner_radius: 5_000.0,
            spawn_outer_radius: 5_001.0,
            ..PickupConfig::default()
        },
        ..SimConfig::default()
    }
}

/// A single prey that can never be caught, plus a pickup pool.
fn pickup_only_config(pickup_count: usize) -> SimConfig {
    SimConfig {
        prey: PreyConfig {
            count: 1,
            capture_radius: 1e-3,
            ..PreyConfig::default()
        },
        pickups: PickupConfig {
            count: pickup_count,
            ..PickupConfig::default()
        },
        ..SimConfig::default()
    }
}

fn new_sim(config: SimConfig) -> Simulation<ScriptedInput> {
    Simulation::new(config, ScriptedInput::new(), 1234).unwrap()
}

// ============================================================================
// Prey
// ============================================================================

#[test]
fn test_prey_capture_rewards_and_deactivates() {
    let mut sim = new_sim(prey_only_config(1));
    sim.step(DT).unwrap();

    let target = sim.prey().prey()[0].position;
    sim.teleport_character(target).unwrap();
    let before = sim.character().score();

    let report = sim.step(DT).unwrap();
    assert_eq!(report.captures, 1);
    assert_eq!(sim.character().score(), before + 500);
    assert_eq!(report.score_gained, 500);
    assert!(!sim.prey().prey()[0].active);
    assert!(report.snapshot.active_prey_positions.is_empty());
    assert_eq!(report.snapshot.stats.captures, 1);
}

#[test]
fn test_capture_triggers_surge_and_shake() {
    let mut sim = new_sim(prey_only_config(1));
    let target = sim.prey().prey()[0].position;
    sim.teleport_character(target).unwrap();

    sim.step(DT).unwrap();
    assert!((sim.character().surge_time_remaining() - 2.5).abs() < 1e-6);
    assert!(sim.camera().shake().is_active());
}

#[test]
fn test_prey_reappears_after_ten_seconds() {
    let mut sim = new_sim(prey_only_config(1));
    let target = sim.prey().prey()[0].position;
    sim.teleport_character(target).unwrap();
    assert_eq!(sim.step(DT).unwrap().captures, 1);

    for frame in 1..600 {
        let report = sim.step(DT).unwrap();
        assert_eq!(report.captures, 0);
        assert!(!sim.prey().prey()[0].active, "back early at frame {frame}");
    }
    sim.step(DT).unwrap();
    assert!(sim.prey().prey()[0].active);
    assert_eq!(sim.character().score(), 500);
}

#[test]
fn test_inactive_prey_never_rescored() {
    let mut sim = new_sim(prey_only_config(1));
    let target = sim.prey().prey()[0].position;
    sim.teleport_character(target).unwrap();
    sim.step(DT).unwrap();

    // Keep the character parked on the capture spot.
    for _ in 0..120 {
        sim.teleport_character(target).unwrap();
        assert_eq!(sim.step(DT).unwrap().captures, 0);
    }
    assert_eq!(sim.character().score(), 500);
}

#[test]
fn test_prey_flee_from_character() {
    let mut sim = new_sim(prey_only_config(1));
    let fish = sim.prey().prey()[0].position;
    let chaser = fish + Vec3::new(0.0, 0.0, 6.0);
    sim.teleport_character(chaser).unwrap();

    let start = fish.distance(chaser);
    for _ in 0..30 {
        sim.step(DT).unwrap();
    }
    let now = sim.prey().prey()[0].position.distance(sim.character().position());
    assert!(now > start, "prey did not flee: {start} -> {now}");
}

#[test]
fn test_prey_avoid_island_column() {
    let sim = new_sim(prey_only_config(300));
    let island = sim.config().world.island;
    for fish in sim.prey().prey() {
        let dx = fish.position.x - island.center.x;
        let dz = fish.position.z - island.center.z;
        assert!((dx * dx + dz * dz).sqrt() >= island.radius);
    }
}

// ============================================================================
// Pickups
// ============================================================================

/// Far outside the pickup ring, inside the world boundary.
const PARK: Vec3 = Vec3::new(0.0, -5.0, 150.0);

/// An active pickup of `kind` with no other pickup within reach of it.
fn find_pickup(sim: &Simulation<ScriptedInput>, kind: PickupKind) -> Vec3 {
    let pool = sim.pickups().pickups();
    pool.iter()
        .filter(|p| p.active && p.kind == kind)
        .map(|p| p.position)
        .find(|anchor| {
            pool.iter()
                .filter(|other| other.position != *anchor)
                .all(|other| other.position.distance(*anchor) > 5.0)
        })
        .expect("pool contains an isolated pickup of the requested kind")
}

#[test]
fn test_rare_pickup_reward() {
    let mut sim = new_sim(pickup_only_config(60));
    let anchor = find_pickup(&sim, PickupKind::Rare);
    let stamina = sim.character().stamina();

    sim.teleport_character(anchor + Vec3::new(1.5, 0.0, 0.0)).unwrap();
    let report = sim.step(DT).unwrap();

    assert_eq!(report.pickups.rare, 1);
    assert_eq!(report.score_gained, 600);
    assert_eq!(sim.character().stamina(), stamina);
    assert_eq!(sim.pickups().active_count(), 59);
}

#[test]
fn test_common_pickup_reward_and_clamp() {
    let mut sim = new_sim(pickup_only_config(60));

    // Burn some stamina first, held well away from the pool.
    sim.input_mut().press(InputAction::Forward);
    sim.input_mut().press(InputAction::Boost);
    for _ in 0..120 {
        sim.teleport_character(PARK).unwrap();
        sim.step(DT).unwrap();
    }
    sim.input_mut().release_all();
    let before = sim.character().stamina();
    assert!(before < 30.0, "stamina {before}");

    let anchor = find_pickup(&sim, PickupKind::Common);
    sim.teleport_character(anchor).unwrap();
    let report = sim.step(DT).unwrap();
    assert_eq!(report.pickups.common, 1);
    assert_eq!(report.score_gained, 300);
    // Idle regeneration this frame plus the pickup.
    let expected = (before + 20.0 * DT + 60.0).min(100.0);
    assert!((sim.character().stamina() - expected).abs() < 1e-3);

    // A second common pickup at high stamina clamps to the maximum.
    let next = find_pickup(&sim, PickupKind::Common);
    sim.teleport_character(next).unwrap();
    sim.step(DT).unwrap();
    assert_eq!(sim.character().stamina(), 100.0);
}

#[test]
fn test_pickup_respawns_after_fifteen_seconds() {
    let mut sim = new_sim(pickup_only_config(1));
    let anchor = sim.pickups().pickups()[0].position;
    sim.teleport_character(anchor).unwrap();
    assert_eq!(sim.step(DT).unwrap().pickups.collected(), 1);

    for frame in 1..900 {
        sim.teleport_character(PARK).unwrap();
        let report = sim.step(DT).unwrap();
        assert!(report.pickups.is_empty());
        assert!(!sim.pickups().pickups()[0].active, "back early at frame {frame}");
    }
    sim.teleport_character(PARK).unwrap();
    sim.step(DT).unwrap();
    assert!(sim.pickups().pickups()[0].active);
}

#[test]
fn test_inactive_pickup_never_rescored() {
    let mut sim = new_sim(pickup_only_config(1));
    let anchor = sim.pickups().pickups()[0].position;
    sim.teleport_character(anchor).unwrap();
    let first = sim.step(DT).unwrap();
    let gained = first.score_gained;
    assert!(gained == 300 || gained == 600);

    for _ in 0..300 {
        sim.teleport_character(anchor).unwrap();
        assert_eq!(sim.step(DT).unwrap().score_gained, 0);
    }
    assert_eq!(sim.character().score(), gained);
}
