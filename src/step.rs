use rand::Rng;

use crate::body::GridBody;
use crate::collision::{self, DeathReason};
use crate::config::GameConfig;
use crate::food::Food;
use crate::input::{direction_change_is_valid, Direction};
use crate::speed::SpeedCurve;

/// Requested vs. applied heading.
///
/// Input only ever writes `pending`; a step copies it into `committed`. Any
/// number of requests between two steps therefore yields one turn at most.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionBuffer {
    pending: Direction,
    committed: Direction,
}

impl DirectionBuffer {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            pending: initial,
            committed: initial,
        }
    }

    /// Buffers `direction` for the next step. Reversals of the committed
    /// heading are dropped and `false` is returned.
    pub fn request(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.committed, direction) {
            return false;
        }

        self.pending = direction;
        true
    }

    /// Applies the pending heading unless it would reverse the committed one.
    pub fn commit(&mut self) -> Direction {
        if direction_change_is_valid(self.committed, self.pending) {
            self.committed = self.pending;
        }
        self.committed
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }

    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }
}

/// Fixed rules a step is evaluated under.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepRules {
    pub grid_count: i32,
    pub points_per_food: u32,
    pub max_food_attempts: u32,
    pub curve: SpeedCurve,
}

impl From<&GameConfig> for StepRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            grid_count: config.grid_count(),
            points_per_food: config.points_per_food,
            max_food_attempts: config.max_food_attempts,
            curve: SpeedCurve::from(config),
        }
    }
}

/// Everything a step reads or mutates.
#[derive(Debug, Clone)]
pub struct World {
    pub body: GridBody,
    pub food: Food,
    pub score: u32,
    pub speed_ms: u64,
    pub directions: DirectionBuffer,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Ordinary translation; length unchanged.
    Moved,
    /// Food eaten and the body grew by one cell.
    Ate { speed_changed: bool },
    /// The candidate head hit a wall or the body. Nothing was mutated
    /// except the committed direction.
    Collided(DeathReason),
}

/// Advances `world` by one tick.
pub fn advance<R: Rng + ?Sized>(world: &mut World, rules: &StepRules, rng: &mut R) -> StepOutcome {
    let heading = world.directions.commit();
    let candidate = world.body.head().step(heading);

    if let Some(reason) = collision::check(&world.body, candidate, rules.grid_count) {
        return StepOutcome::Collided(reason);
    }

    world.body.push_head(candidate);

    if candidate != world.food.cell {
        world.body.pop_tail();
        return StepOutcome::Moved;
    }

    world.score = world.score.saturating_add(rules.points_per_food);
    let next_speed = rules.curve.next_speed(world.speed_ms, world.score);
    let speed_changed = next_speed != world.speed_ms;
    world.speed_ms = next_speed;
    world.food = Food::spawn(rng, &world.body, rules.grid_count, rules.max_food_attempts);

    StepOutcome::Ate { speed_changed }
}
