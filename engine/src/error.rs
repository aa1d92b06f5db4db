//! Simulation errors
//!
//! Every variant is a precondition violation that ends the session: the
//! orchestrator stops stepping rather than carry corrupt state forward.

use thiserror::Error;

use crate::physics::BodyHandle;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// The character's rigid body is no longer in the physics world.
    #[error("character body {0} is missing from the physics world")]
    MissingBody(BodyHandle),

    /// A transform or velocity went NaN/infinite.
    #[error("non-finite state in {what}")]
    NonFiniteState { what: &'static str },

    /// The simulation was halted by an earlier error or shut down.
    #[error("simulation is halted")]
    Halted,
}

pub type SimResult<T> = Result<T, SimError>;
