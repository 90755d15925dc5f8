//! Engine module - the match engine orchestrator
//!
//! Owns the live grid together with the rule set, move set, column
//! generators and score tracker, and exposes the two primary operations:
//!
//! - [`MatchEngine::attempt_rotation`]: speculatively turn a selection by one
//!   and two steps on private copies of the grid, keep the first copy that
//!   matched, score it and tick bombs for player moves.
//! - [`MatchEngine::resolve_fill`]: slide cells into vacancies and spawn new
//!   ones from the column generators until nothing moves, then report
//!   whether the player still has a productive rotation.
//!
//! The engine is synchronous and single-owner. Callers sequence the calls;
//! see the session crate for the standard turn loop.

use log::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::moves::MoveSet;
use crate::rng::{Generator, SimpleRng};
use crate::rules::RuleSet;
use crate::scoring::ScoreTracker;
use crate::selection::{rotate_cells, Selection, SelectionResolver};
use crate::types::{
    BombElement, Color, Coord, ExplodeOutcome, FillOutcome, MoveRecord, ROTATION_STEPS,
};

/// Upper bound on board regenerations before giving up on a configuration
pub const MAX_REFRESH_ATTEMPTS: u32 = 1000;

/// The rules engine of one session
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: EngineConfig,
    grid: Grid,
    rules: RuleSet,
    moves: MoveSet,
    resolver: SelectionResolver,
    /// One per column, dropping into the top row
    generators: Vec<Generator>,
    /// Paints whole boards on refresh
    initializer: Generator,
    scoring: ScoreTracker,
}

impl MatchEngine {
    /// Build an engine and paint a board that has at least one move
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut engine = Self::build(config, None);
        engine.initialize_or_refresh()?;
        Ok(engine)
    }

    /// Build an engine around an existing grid, skipping the initial paint.
    ///
    /// The grid is taken as-is: it may already contain matches or have no
    /// move left.
    pub fn with_grid(config: EngineConfig, grid: Grid) -> Result<Self, EngineError> {
        config.validate()?;
        let expected = (config.width, config.height);
        let actual = (grid.width(), grid.height());
        if expected != actual {
            return Err(EngineError::GridSizeMismatch { expected, actual });
        }
        Ok(Self::build(config, Some(grid)))
    }

    fn build(config: EngineConfig, grid: Option<Grid>) -> Self {
        let mut master = SimpleRng::new(config.seed);
        let height = config.height as i32;
        let generators = (0..config.width as i32)
            .map(|x| {
                Generator::new(
                    Coord::new(x, height),
                    config.colors,
                    config.bomb_timer,
                    master.next_u32(),
                )
            })
            .collect();
        let initializer = Generator::new(
            Coord::new(config.width as i32, height),
            config.colors,
            config.bomb_timer,
            master.next_u32(),
        );

        Self {
            grid: grid.unwrap_or_else(|| Grid::new(config.width, config.height)),
            rules: RuleSet::triples(config.colors),
            moves: MoveSet::gravity(),
            resolver: SelectionResolver::new(config.width, config.height),
            generators,
            initializer,
            scoring: ScoreTracker::new(config.bomb_cost, config.cell_value),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Color at `(x, y)`; `None` off-board or for an empty cell
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.grid.color(Coord::new(x, y))
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    /// Bombs paid for so far
    pub fn dropped_bombs(&self) -> u32 {
        self.scoring.dropped_bombs()
    }

    /// Live bomb cells with their remaining countdown
    pub fn bombs(&self) -> Vec<BombElement> {
        self.grid.bombs()
    }

    /// Canonical selection triangle for a clicked cell
    pub fn select(&self, clicked: Coord) -> Selection {
        self.resolver.resolve(clicked)
    }

    /// Repaint the whole board until it has at least one available move.
    pub fn initialize_or_refresh(&mut self) -> Result<(), EngineError> {
        for attempt in 1..=MAX_REFRESH_ATTEMPTS {
            let initializer = &mut self.initializer;
            self.grid = Grid::from_fn(self.config.width, self.config.height, |_| {
                initializer.draw()
            });
            if self.has_available_move() {
                debug!("board ready after {} attempt(s)", attempt);
                return Ok(());
            }
            debug!("board {} has no available move, regenerating", attempt);
        }
        Err(EngineError::DeadBoard {
            attempts: MAX_REFRESH_ATTEMPTS,
        })
    }

    /// Try the one-step then the two-step rotation on private copies.
    ///
    /// Returns the first copy that matched, already cleared, with its
    /// outcome. Without a selection the unrotated board is probed once.
    fn evaluate(
        &self,
        selection: Option<&Selection>,
        clockwise: bool,
    ) -> Option<(Grid, ExplodeOutcome)> {
        let triple = match selection {
            Some(selection) if !selection.is_empty() => Some(selection.triple()?),
            _ => None,
        };
        let steps = if triple.is_some() { ROTATION_STEPS } else { 1 };

        for pass in 1..=steps {
            let mut mock = self.grid.clone();
            if let Some(triple) = &triple {
                for _ in 0..pass {
                    rotate_cells(&mut mock, triple, clockwise);
                }
            }

            let explode_elements = self.rules.resolve(&mut mock);
            if !explode_elements.is_empty() {
                let outcome = ExplodeOutcome {
                    valid: true,
                    pass_index: pass,
                    explode_elements,
                    ..ExplodeOutcome::default()
                };
                return Some((mock, outcome));
            }
        }
        None
    }

    /// Evaluate a rotation without touching the board, score or bombs
    pub fn preview_rotation(
        &self,
        selection: Option<&Selection>,
        clockwise: bool,
    ) -> ExplodeOutcome {
        self.evaluate(selection, clockwise)
            .map(|(_, outcome)| outcome)
            .unwrap_or_else(ExplodeOutcome::invalid)
    }

    /// Attempt a rotation and commit it when it produces a match.
    ///
    /// A non-empty selection makes this a player move: rejected moves leave
    /// everything untouched, accepted ones also tick every bomb once. An
    /// incomplete selection is always rejected. Without a selection the
    /// current board is resolved as-is and bombs are left alone.
    pub fn attempt_rotation(
        &mut self,
        selection: Option<&Selection>,
        clockwise: bool,
    ) -> ExplodeOutcome {
        let player = selection.is_some_and(|s| !s.is_empty());

        let Some((mock, mut outcome)) = self.evaluate(selection, clockwise) else {
            if player {
                debug!("rotation rejected: {:?}", selection.map(Selection::coords));
            }
            return ExplodeOutcome::invalid();
        };

        self.grid = mock;
        self.scoring.record(&outcome);
        if player {
            outcome.bomb_outcome = self.scoring.tick_bombs(&mut self.grid);
            info!(
                "rotation accepted after {} step(s): {} cell(s), score {}",
                outcome.pass_index,
                outcome.exploded_cells(),
                self.scoring.score()
            );
        } else {
            debug!(
                "chain reaction cleared {} cell(s), score {}",
                outcome.exploded_cells(),
                self.scoring.score()
            );
        }
        outcome
    }

    /// Resolve matches already present on the board, without a rotation
    pub fn auto_resolve(&mut self) -> ExplodeOutcome {
        self.attempt_rotation(None, false)
    }

    /// Fill every vacancy, pass by pass, until nothing moves.
    pub fn resolve_fill(&mut self) -> FillOutcome {
        let mut cascade_passes = Vec::new();
        loop {
            let mut records = Vec::new();
            self.slide_cells(&mut records);

            let mut bomb_budget = self.scoring.take_ready_bombs();
            self.spawn_cells(&mut records, &mut bomb_budget);
            self.scoring.return_bombs(bomb_budget);

            if records.is_empty() {
                break;
            }
            cascade_passes.push(records);
        }

        let moves_left = self.has_available_move();
        debug!(
            "fill settled after {} pass(es), moves left: {}",
            cascade_passes.len(),
            moves_left
        );
        FillOutcome {
            moves_left,
            cascade_passes,
        }
    }

    /// Apply gravity once to every cell in scan order
    fn slide_cells(&mut self, records: &mut Vec<MoveRecord>) {
        let coords: Vec<Coord> = self.grid.coords().collect();
        for from in coords {
            for mv in self.moves.iter() {
                let Some(cell) = self.grid.get(from) else {
                    continue;
                };
                if let Some(to) = mv.apply(&mut self.grid, from, None) {
                    records.push(MoveRecord { cell, from, to });
                }
            }
        }
    }

    /// Drop each generator's pending cell if its column has room
    fn spawn_cells(&mut self, records: &mut Vec<MoveRecord>, bomb_budget: &mut u32) {
        for generator in &mut self.generators {
            let from = generator.source();
            for mv in self.moves.iter() {
                let cell = generator.pending();
                let Some(to) = mv.apply(&mut self.grid, from, Some(cell)) else {
                    continue;
                };
                records.push(MoveRecord { cell, from, to: from });
                records.push(MoveRecord { cell, from, to });

                if *bomb_budget > 0 {
                    generator.generate(true);
                    *bomb_budget -= 1;
                    info!("bomb queued in column {}", from.x);
                } else {
                    generator.generate(false);
                }
            }
        }
    }

    /// First selection, in scan order of the clicked cell, that would match
    pub fn first_available_move(&self) -> Option<Selection> {
        self.grid.coords().find_map(|clicked| {
            let selection = self.resolver.resolve(clicked);
            if !selection.is_complete() {
                return None;
            }
            self.preview_rotation(Some(&selection), true)
                .valid
                .then_some(selection)
        })
    }

    pub fn has_available_move(&self) -> bool {
        self.first_available_move().is_some()
    }
}
