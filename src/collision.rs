use serde::Serialize;

use crate::body::{Cell, GridBody};

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Returns true if either coordinate falls outside `[0, grid_count)`.
#[must_use]
pub fn is_out_of_bounds(cell: Cell, grid_count: i32) -> bool {
    cell.col < 0 || cell.row < 0 || cell.col >= grid_count || cell.row >= grid_count
}

/// Returns true if `candidate_head` lands on a non-head segment of `body`.
///
/// Must be called against the body as it was before the head is pushed.
#[must_use]
pub fn is_self_collision(body: &GridBody, candidate_head: Cell) -> bool {
    body.contains_excluding_head(candidate_head)
}

/// Classifies a candidate head, wall checks first.
#[must_use]
pub fn check(body: &GridBody, candidate_head: Cell, grid_count: i32) -> Option<DeathReason> {
    if is_out_of_bounds(candidate_head, grid_count) {
        Some(DeathReason::Wall)
    } else if is_self_collision(body, candidate_head) {
        Some(DeathReason::SelfCollision)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::body::{Cell, GridBody};

    use super::{check, is_out_of_bounds, is_self_collision, DeathReason};

    #[test]
    fn bounds_are_half_open() {
        assert!(!is_out_of_bounds(Cell::new(0, 0), 10));
        assert!(!is_out_of_bounds(Cell::new(9, 9), 10));
        assert!(is_out_of_bounds(Cell::new(10, 0), 10));
        assert!(is_out_of_bounds(Cell::new(0, 10), 10));
        assert!(is_out_of_bounds(Cell::new(-1, 4), 10));
        assert!(is_out_of_bounds(Cell::new(4, -1), 10));
    }

    #[test]
    fn head_cell_is_not_a_self_collision() {
        let body = GridBody::from_cells(vec![Cell::new(2, 2), Cell::new(1, 2)])
            .expect("test body should be non-empty");

        assert!(!is_self_collision(&body, Cell::new(2, 2)));
        assert!(is_self_collision(&body, Cell::new(1, 2)));
    }

    #[test]
    fn tail_cell_still_counts_before_it_moves() {
        let body = GridBody::from_cells(vec![
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(2, 2),
            Cell::new(1, 2),
        ])
        .expect("test body should be non-empty");

        assert!(is_self_collision(&body, Cell::new(1, 2)));
    }

    #[test]
    fn wall_takes_precedence() {
        let body = GridBody::new(Cell::new(0, 0));

        assert_eq!(check(&body, Cell::new(-1, 0), 5), Some(DeathReason::Wall));
        assert_eq!(check(&body, Cell::new(1, 0), 5), None);
    }
}
