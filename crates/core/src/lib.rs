//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the whole rules engine of the hexagon triple-rotate
//! puzzle: match detection, speculative rotation, gravity and refill,
//! scoring and bomb hazards. It has **zero dependencies** on rendering,
//! input or I/O, making it:
//!
//! - **Deterministic**: the same seed produces identical sessions
//! - **Testable**: every rule is checked in isolation
//! - **Portable**: any presentation layer can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: hexagon board storage with bounds-checked access
//! - [`rules`]: triangle match patterns, per color and parity
//! - [`moves`]: gravity offsets used by the fill cascade
//! - [`selection`]: clicked cell to canonical selection triangle, rotation
//! - [`rng`]: seeded LCG and per-column cell generators
//! - [`scoring`]: score accrual, bomb budget and bomb timers
//! - [`config`]: engine configuration and validation
//! - [`engine`]: the [`MatchEngine`] orchestrator
//!
//! # Game Rules
//!
//! - **Selection**: clicking a cell selects a triangle of three adjacent cells
//! - **Rotation**: a rotation is accepted only if turning the triangle by one
//!   or two steps produces at least one match; one step is preferred
//! - **Matches**: three mutually adjacent cells of one color explode
//! - **Fill**: cells fall into vacancies, new cells drop in from above each
//!   column, and any resulting matches chain until the board settles
//! - **Bombs**: every 1000 points one new cell arrives carrying a bomb with
//!   a 10 move countdown; it ticks on every accepted player rotation
//! - **Game over**: a bomb reaching zero, or no productive rotation left
//!
//! # Example
//!
//! ```
//! use hex_triad_core::{EngineConfig, MatchEngine};
//!
//! let mut engine = MatchEngine::new(EngineConfig::default().with_seed(7)).unwrap();
//! let selection = engine.first_available_move().unwrap();
//!
//! let outcome = engine.attempt_rotation(Some(&selection), true);
//! assert!(outcome.valid);
//! assert!(engine.score() > 0);
//!
//! let fill = engine.resolve_fill();
//! assert_eq!(fill.spawned_cells().count(), outcome.exploded_cells());
//! assert_eq!(engine.grid().filled_count(), 8 * 9);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod moves;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod selection;

pub use hex_triad_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::{MatchEngine, MAX_REFRESH_ATTEMPTS};
pub use error::{ConfigError, EngineError};
pub use grid::Grid;
pub use moves::{Move, MoveSet};
pub use rng::{Generator, SimpleRng};
pub use rules::{Rule, RuleSet};
pub use scoring::{calculate_explosion_score, calculate_ready_bombs, ScoreTracker};
pub use selection::{rotate_cells, rotation_path, Selection, SelectionResolver};
