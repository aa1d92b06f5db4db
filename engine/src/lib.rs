//! Dolphin Dash Engine Library
//!
//! Real-time simulation core for an amphibious arcade game: a physics-driven
//! character with a land/surface/underwater state machine, pools of fleeing
//! prey and respawning pickups, and a speed-reactive chase camera. Rendering,
//! the island mesh and the HUD belong to the host; this crate only produces
//! poses and telemetry.
//!
//! # Modules
//!
//! - [`physics`] - Fixed-timestep rigid-body world with collision layers
//! - [`input`] - Input port trait, key bindings, scripted input
//! - [`player`] - Character controller and orientation state machine
//! - [`camera`] - Chase camera rig and shake
//! - [`world`] - Terrain provider and water surface
//! - [`game`] - Entity systems, the simulation orchestrator, telemetry,
//!   configuration and the commentary client
//!
//! # Example
//!
//! ```ignore
//! use dolphin_dash_engine::game::{SimConfig, Simulation};
//! use dolphin_dash_engine::input::{InputAction, ScriptedInput};
//!
//! let input = ScriptedInput::holding(&[InputAction::Forward]);
//! let mut sim = Simulation::new(SimConfig::default(), input, 42)?;
//!
//! for _ in 0..600 {
//!     let report = sim.step(1.0 / 60.0)?;
//!     println!("{} score={}", report.snapshot.state, report.snapshot.score);
//! }
//! sim.shutdown();
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use error::{SimError, SimResult};
pub use input::{InputAction, InputPort, KeyBindings, KeyCode, KeyboardInput, ScriptedInput};
pub use player::{CharacterConfig, CharacterController, OrientationState};
