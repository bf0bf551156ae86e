use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::body::{Cell, GridBody};
use crate::collision::DeathReason;
use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::input::{Command, Direction};
use crate::scheduler::Scheduler;
use crate::step::{self, DirectionBuffer, StepOutcome, StepRules, World};

/// Current high-level lifecycle state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Idle,
    Running,
    Paused,
    Over,
}

/// Read-only view handed to the rendering side after each step and on
/// every state change.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    /// Head first.
    pub body: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub speed_ms: u64,
    pub state: GameState,
    pub length: usize,
    pub tick: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_reason: Option<DeathReason>,
}

/// One game session plus the scheduler that drives it.
///
/// All body, food and score mutation happens inside [`Game::tick`]. Commands
/// only change the lifecycle state, the scheduler, or the pending direction.
#[derive(Debug)]
pub struct Game<S: Scheduler> {
    config: GameConfig,
    rules: StepRules,
    world: World,
    state: GameState,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: StdRng,
    scheduler: S,
}

impl<S: Scheduler> Game<S> {
    /// Creates an idle game seeded from system entropy.
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, scheduler, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    pub fn with_seed(config: GameConfig, scheduler: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        mut scheduler: S,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rules = StepRules::from(&config);
        let world = fresh_world(&config, &rules, &mut rng);
        scheduler.cancel();

        Ok(Self {
            config,
            rules,
            world,
            state: GameState::Idle,
            tick_count: 0,
            death_reason: None,
            rng,
            scheduler,
        })
    }

    /// Idle -> Running. Arms the scheduler at the current speed.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::Idle {
            return false;
        }

        self.state = GameState::Running;
        self.scheduler.arm(self.interval());
        info!("game started at {}ms per tick", self.world.speed_ms);
        true
    }

    /// Running -> Paused, or Paused -> Running.
    pub fn pause(&mut self) -> bool {
        match self.state {
            GameState::Running => {
                self.scheduler.cancel();
                self.state = GameState::Paused;
                info!("game paused at score {}", self.world.score);
                true
            }
            GameState::Paused => self.resume(),
            GameState::Idle | GameState::Over => false,
        }
    }

    /// Paused -> Running. Re-arms at the current speed.
    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }

        self.state = GameState::Running;
        self.scheduler.arm(self.interval());
        info!("game resumed");
        true
    }

    /// Any state -> Idle with a fresh body, food, score, speed and heading.
    pub fn restart(&mut self) -> bool {
        self.scheduler.cancel();
        self.world = fresh_world(&self.config, &self.rules, &mut self.rng);
        self.state = GameState::Idle;
        self.tick_count = 0;
        self.death_reason = None;
        info!("game restarted");
        true
    }

    /// Requests a heading from a raw `(dx, dy)` vector.
    ///
    /// Non-unit vectors are ignored.
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    /// Requests a heading for the next step.
    ///
    /// While idle this also starts the game. Reversals of the committed
    /// heading are dropped; input while paused or over is ignored.
    pub fn steer(&mut self, direction: Direction) -> bool {
        match self.state {
            GameState::Idle => {
                self.world.directions.request(direction);
                self.start()
            }
            GameState::Running => self.world.directions.request(direction),
            GameState::Paused | GameState::Over => false,
        }
    }

    /// Dispatches one inbound command. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
            Command::Direction(direction) => self.steer(direction),
        }
    }

    /// Runs one simulation step if the game is running.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.state != GameState::Running {
            return None;
        }
        debug_assert!(self.scheduler.is_armed());

        let outcome = step::advance(&mut self.world, &self.rules, &mut self.rng);
        self.tick_count += 1;

        match outcome {
            StepOutcome::Collided(reason) => {
                self.scheduler.cancel();
                self.state = GameState::Over;
                self.death_reason = Some(reason);
                info!(
                    "game over ({reason:?}) after {} ticks with score {}",
                    self.tick_count, self.world.score
                );
            }
            StepOutcome::Ate { speed_changed: true } => {
                self.scheduler.arm(self.interval());
                debug!(
                    "score {} re-armed scheduler at {}ms",
                    self.world.score, self.world.speed_ms
                );
            }
            StepOutcome::Ate { speed_changed: false } | StepOutcome::Moved => {}
        }

        Some(outcome)
    }

    /// Captures the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.world.body.to_ordered_snapshot(),
            food: self.world.food.cell,
            score: self.world.score,
            speed_ms: self.world.speed_ms,
            state: self.state,
            length: self.world.body.len(),
            tick: self.tick_count,
            death_reason: self.death_reason,
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.world.score
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.world.speed_ms
    }

    #[must_use]
    pub fn body(&self) -> &GridBody {
        &self.world.body
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.world.food
    }

    #[must_use]
    pub fn directions(&self) -> DirectionBuffer {
        self.world.directions
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid_count(&self) -> i32 {
        self.rules.grid_count
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access for drivers that poll the scheduler for due ticks.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Replaces the body. Intended for scripted scenarios; only honoured
    /// before the first step of a session.
    pub fn place_body(&mut self, body: GridBody) -> bool {
        if self.tick_count != 0 || self.state == GameState::Over {
            return false;
        }

        self.world.body = body;
        true
    }

    /// Moves the food. Only honoured before the first step of a session.
    pub fn place_food(&mut self, cell: Cell) -> bool {
        if self.tick_count != 0 || self.state == GameState::Over {
            return false;
        }

        self.world.food = Food::new(cell);
        true
    }

    /// Overrides both directions. Only honoured before the first step.
    pub fn face(&mut self, direction: Direction) -> bool {
        if self.tick_count != 0 || self.state == GameState::Over {
            return false;
        }

        self.world.directions = DirectionBuffer::new(direction);
        true
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.world.speed_ms)
    }
}

fn fresh_world(config: &GameConfig, rules: &StepRules, rng: &mut StdRng) -> World {
    let body = GridBody::new(config.start_cell);
    let food = Food::spawn(rng, &body, rules.grid_count, rules.max_food_attempts);

    World {
        body,
        food,
        score: 0,
        speed_ms: config.initial_speed_ms,
        directions: DirectionBuffer::new(config.initial_direction),
    }
}
