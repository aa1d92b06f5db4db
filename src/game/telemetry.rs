//! Telemetry
//!
//! Once per frame the simulation hands a [`SimulationSnapshot`] to a
//! [`TelemetrySink`]. Sinks get a shared reference only; the simulation
//! keeps nothing of the snapshot after emission.
//!
//! [`MarkerInstance`] is the minimap instance layout hosts upload as-is.

use std::io::Write;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Serialize;

use crate::game::systems::{Pickup, PickupKind};
use crate::player::OrientationState;

/// Running totals for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub captures: u64,
    pub common_pickups: u64,
    pub rare_pickups: u64,
    pub jumps: u32,
    pub peak_speed: f32,
}

/// One frame of HUD-facing state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub frame: u64,
    /// Simulated seconds since the session began
    pub elapsed: f64,
    pub state: OrientationState,
    pub stamina: f32,
    pub score: u64,
    pub speed: f32,
    pub position: Vec3,
    pub boosting: bool,
    pub surge_remaining: f32,
    pub active_prey_positions: Vec<Vec3>,
    pub active_pickups: usize,
    pub stats: SessionStats,
}

/// Receives one snapshot per frame.
pub trait TelemetrySink {
    fn emit(&mut self, snapshot: &SimulationSnapshot);
}

impl<F> TelemetrySink for F
where
    F: FnMut(&SimulationSnapshot),
{
    fn emit(&mut self, snapshot: &SimulationSnapshot) {
        self(snapshot)
    }
}

/// Writes each snapshot as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
    failures: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            failures: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn emit(&mut self, snapshot: &SimulationSnapshot) {
        let result = serde_json::to_writer(&mut self.writer, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"));
        match result {
            Ok(()) => self.written += 1,
            Err(err) => {
                // Telemetry is best effort; the frame loop carries on.
                self.failures += 1;
                if self.failures == 1 {
                    log::warn!("[Telemetry] write failed: {err}");
                }
            }
        }
    }
}

pub const MARKER_CHARACTER: u32 = 0;
pub const MARKER_PREY: u32 = 1;
pub const MARKER_PICKUP_COMMON: u32 = 2;
pub const MARKER_PICKUP_RARE: u32 = 3;

/// Minimap marker, one per visible entity.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    /// World-space XZ position
    pub position: [f32; 2],
    pub kind: u32,
    pub _padding: u32,
}

static_assertions::assert_eq_size!(MarkerInstance, [u8; 16]);

impl MarkerInstance {
    pub fn new(position: Vec3, kind: u32) -> Self {
        Self {
            position: [position.x, position.z],
            kind,
            _padding: 0,
        }
    }
}

/// Character first, then active prey, then active pickups.
pub fn minimap_markers(character: Vec3, prey: &[Vec3], pickups: &[Pickup]) -> Vec<MarkerInstance> {
    let mut markers = Vec::with_capacity(1 + prey.len() + pickups.len());
    markers.push(MarkerInstance::new(character, MARKER_CHARACTER));
    markers.extend(prey.iter().map(|&p| MarkerInstance::new(p, MARKER_PREY)));
    markers.extend(pickups.iter().filter(|p| p.active).map(|p| {
        let kind = match p.kind {
            PickupKind::Common => MARKER_PICKUP_COMMON,
            PickupKind::Rare => MARKER_PICKUP_RARE,
        };
        MarkerInstance::new(p.position, kind)
    }));
    markers
}
