//! Commentary
//!
//! Best-effort generated play-by-play. The host builds a
//! [`CommentaryRequest`] from a telemetry snapshot and submits it to a
//! [`CommentaryWorker`]; results come back on a channel the host polls.
//! Nothing here can reach physics, the pools or the score.

pub mod backend;
pub mod client;
pub mod worker;

use serde::Serialize;

use crate::game::telemetry::SimulationSnapshot;
use crate::player::OrientationState;

pub use backend::{ContentBackend, ContentError, TemplateBackend};
pub use client::{Commentary, CommentaryClient, CommentaryConfig};
pub use worker::{CommentaryCommand, CommentaryWorker, ContentEvent};

/// Owned summary of a moment in the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentaryRequest {
    pub frame: u64,
    pub state: OrientationState,
    pub score: u64,
    pub stamina: f32,
    pub speed: f32,
    pub boosting: bool,
    pub captures: u64,
    pub pickups: u64,
}

impl CommentaryRequest {
    pub fn from_snapshot(snapshot: &SimulationSnapshot) -> Self {
        Self {
            frame: snapshot.frame,
            state: snapshot.state,
            score: snapshot.score,
            stamina: snapshot.stamina,
            speed: snapshot.speed,
            boosting: snapshot.boosting,
            captures: snapshot.stats.captures,
            pickups: snapshot.stats.common_pickups + snapshot.stats.rare_pickups,
        }
    }

    /// Plain-text prompt for remote backends.
    pub fn prompt(&self) -> String {
        format!(
            "You are an excitable sports commentator. The dolphin is {} moving at {:.1} m/s{}, \
             has {} points, {:.0} stamina, {} catches and {} pickups. One sentence.",
            self.state.label().to_lowercase().replace('_', " "),
            self.speed,
            if self.boosting { " on a boost" } else { "" },
            self.score,
            self.stamina,
            self.captures,
            self.pickups,
        )
    }
}
