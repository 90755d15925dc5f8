//! Session driver - turns engine outcomes into presentation events
//!
//! A [`Session`] owns one [`MatchEngine`] and runs the standard turn loop
//! on top of it:
//!
//! ```text
//! Idle -> EvaluatingRotation -> Rejected -> Idle
//!                            \-> Resolving -> Filling -> Resolving -> ... -> Idle
//!                                                    \-> GameOver
//! ```
//!
//! Every call runs to completion and returns the ordered list of
//! [`Event`]s a presentation layer needs to animate the turn. The session
//! never calls back into its caller.
//!
//! # Example
//!
//! ```
//! use hex_triad_core::EngineConfig;
//! use hex_triad_session::{Event, Session};
//!
//! let mut session = Session::new(EngineConfig::default().with_seed(3)).unwrap();
//! session.start();
//!
//! if let Some(selection) = session.first_available_move() {
//!     let events = session.rotate(&selection, true);
//!     assert!(matches!(events[0], Event::Rotated { .. }));
//! }
//! ```

use log::{debug, info, warn};
use serde::Serialize;

use hex_triad_core::{rotation_path, EngineConfig, EngineError, Grid, MatchEngine, Selection};
use hex_triad_types::{BombElement, Coord, ExplodeElement, ExplodeOutcome, MoveRecord};

/// Where the session is in its turn loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the player
    Idle,
    EvaluatingRotation,
    Rejected,
    /// Explosions are being applied
    Resolving,
    /// Vacancies are being refilled
    Filling,
    /// Terminal; every further call is ignored
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    BombExpired,
    NoMovesLeft,
}

/// Something the presentation layer should show, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The selection produced no match and was left in place
    Rejected { selection: Vec<Coord> },
    /// An accepted player rotation; `path[i][k]` is where the content of
    /// `selection[k]` sits after `i + 1` turns
    Rotated {
        clockwise: bool,
        path: Vec<[Coord; 3]>,
    },
    Exploded {
        pass_index: u8,
        elements: Vec<ExplodeElement>,
    },
    ScoreChanged { score: u32 },
    BombsUpdated { bombs: Vec<BombElement> },
    Filled { passes: Vec<Vec<MoveRecord>> },
    GameOver { reason: GameOverReason },
}

/// One game from first board to game over
#[derive(Debug, Clone)]
pub struct Session {
    engine: MatchEngine,
    phase: Phase,
    started: bool,
    game_over_reason: Option<GameOverReason>,
}

impl Session {
    /// Create a session on a freshly painted board
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_engine(MatchEngine::new(config)?))
    }

    /// Create a session on a prepared board
    pub fn with_grid(config: EngineConfig, grid: Grid) -> Result<Self, EngineError> {
        Ok(Self::with_engine(MatchEngine::with_grid(config, grid)?))
    }

    pub fn with_engine(engine: MatchEngine) -> Self {
        Self {
            engine,
            phase: Phase::Idle,
            started: false,
            game_over_reason: None,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn select(&self, clicked: Coord) -> Selection {
        self.engine.select(clicked)
    }

    pub fn first_available_move(&self) -> Option<Selection> {
        self.engine.first_available_move()
    }

    fn transition(&mut self, next: Phase) {
        debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn finish(&mut self, reason: GameOverReason, events: &mut Vec<Event>) {
        info!("game over ({:?}) with score {}", reason, self.engine.score());
        self.transition(Phase::GameOver);
        self.game_over_reason = Some(reason);
        events.push(Event::GameOver { reason });
    }

    fn ignored(&self, call: &str) -> bool {
        if self.is_over() {
            warn!("{} called after game over, ignoring", call);
            return true;
        }
        false
    }

    /// Resolve matches already present on a fresh board. Runs once.
    pub fn start(&mut self) -> Vec<Event> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        self.trigger_auto_resolve()
    }

    /// Resolve matches on the current board without a rotation, then settle.
    pub fn trigger_auto_resolve(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.ignored("trigger_auto_resolve") {
            return events;
        }

        self.transition(Phase::Resolving);
        let outcome = self.engine.auto_resolve();
        if !outcome.valid {
            self.transition(Phase::Idle);
            return events;
        }
        Self::push_explosion(&self.engine, outcome, &mut events);
        self.settle(&mut events);
        events
    }

    /// Play one player rotation and everything it sets off.
    pub fn rotate(&mut self, selection: &Selection, clockwise: bool) -> Vec<Event> {
        let mut events = Vec::new();
        if self.ignored("rotate") {
            return events;
        }

        self.transition(Phase::EvaluatingRotation);
        // The engine reads an empty selection as a board probe; a player
        // turn needs the whole triangle.
        let outcome = selection
            .is_complete()
            .then(|| self.engine.attempt_rotation(Some(selection), clockwise))
            .filter(|outcome| outcome.valid);
        let Some(outcome) = outcome else {
            self.transition(Phase::Rejected);
            events.push(Event::Rejected {
                selection: selection.coords().to_vec(),
            });
            self.transition(Phase::Idle);
            return events;
        };

        self.transition(Phase::Resolving);
        if let Some(triple) = selection.triple() {
            events.push(Event::Rotated {
                clockwise,
                path: rotation_path(triple, outcome.pass_index, clockwise),
            });
        }
        let bomb_outcome = outcome.bomb_outcome.clone();
        Self::push_explosion(&self.engine, outcome, &mut events);
        events.push(Event::BombsUpdated {
            bombs: bomb_outcome.bombs,
        });

        if bomb_outcome.exploded {
            self.finish(GameOverReason::BombExpired, &mut events);
            return events;
        }
        self.settle(&mut events);
        events
    }

    fn push_explosion(engine: &MatchEngine, outcome: ExplodeOutcome, events: &mut Vec<Event>) {
        events.push(Event::Exploded {
            pass_index: outcome.pass_index,
            elements: outcome.explode_elements,
        });
        events.push(Event::ScoreChanged {
            score: engine.score(),
        });
    }

    /// Fill and chain until the board is quiet or no move is left
    fn settle(&mut self, events: &mut Vec<Event>) {
        loop {
            self.transition(Phase::Filling);
            let fill = self.engine.resolve_fill();
            events.push(Event::Filled {
                passes: fill.cascade_passes,
            });
            if !fill.moves_left {
                self.finish(GameOverReason::NoMovesLeft, events);
                return;
            }

            self.transition(Phase::Resolving);
            let outcome = self.engine.auto_resolve();
            if !outcome.valid {
                self.transition(Phase::Idle);
                return;
            }
            Self::push_explosion(&self.engine, outcome, events);
        }
    }
}
