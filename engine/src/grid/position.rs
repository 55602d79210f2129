use std::fmt;

/// Integer grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const UP: Position = Position::new(0, 1);
    pub const DOWN: Position = Position::new(0, -1);
    pub const LEFT: Position = Position::new(-1, 0);
    pub const RIGHT: Position = Position::new(1, 0);

    /// 4-neighborhood offsets in frontier push order. The stack pops the last
    /// pushed first, so exploration runs right, left, down, up.
    pub const NEIGHBOR_OFFSETS: [Position; 4] =
        [Position::UP, Position::DOWN, Position::LEFT, Position::RIGHT];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` when either coordinate leaves `i32`.
    pub fn checked_add(self, offset: Position) -> Option<Position> {
        Some(Position::new(
            self.x.checked_add(offset.x)?,
            self.y.checked_add(offset.y)?,
        ))
    }

    /// The edge-adjacent positions, in push order. Offsets that would overflow
    /// a coordinate are skipped; grid bounds are the caller's concern.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Self::NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.checked_add(offset))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_push_order() {
        let center = Position::new(5, 5);
        assert_eq!(
            center.neighbors().collect::<Vec<_>>(),
            vec![
                Position::new(5, 6),
                Position::new(5, 4),
                Position::new(4, 5),
                Position::new(6, 5),
            ]
        );
    }

    #[test]
    fn neighbors_may_leave_the_grid() {
        let origin = Position::new(0, 0);
        let neighbors: Vec<_> = origin.neighbors().collect();
        assert!(neighbors.contains(&Position::new(-1, 0)));
        assert!(neighbors.contains(&Position::new(0, -1)));
    }

    #[test]
    fn neighbors_do_not_wrap_around_i32() {
        let right_edge: Vec<_> = Position::new(i32::MAX, 0).neighbors().collect();
        assert_eq!(right_edge.len(), 3);
        assert!(!right_edge.contains(&Position::new(i32::MIN, 0)));

        let corner: Vec<_> = Position::new(i32::MIN, i32::MIN).neighbors().collect();
        assert_eq!(
            corner,
            vec![Position::new(i32::MIN, i32::MIN + 1), Position::new(i32::MIN + 1, i32::MIN)]
        );
    }

    #[test]
    fn ordering_is_row_major_by_y_then_x() {
        let mut positions = vec![
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(2, 0),
        ];
        positions.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            positions,
            vec![Position::new(2, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }
}
