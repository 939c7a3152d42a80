use super::{types::Position, GRID_SIZE};

/// Maps `coordinate` into `[0, size)`. Negative inputs wrap around from the
/// far edge, unlike the truncating `%` operator.
#[must_use]
pub const fn wrap(coordinate: i64, size: i64) -> i64 {
    coordinate.rem_euclid(size)
}

/// Manhattan distance on the torus: each axis may take the short way round.
#[must_use]
pub const fn toroidal_distance(a: Position, b: Position) -> i64 {
    axis_distance(a.x, b.x) + axis_distance(a.y, b.y)
}

const fn axis_distance(a: i64, b: i64) -> i64 {
    let direct = wrap(a - b, GRID_SIZE);
    let around = GRID_SIZE - direct;
    if direct < around {
        direct
    } else {
        around
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(0, 20), 0);
        assert_eq!(wrap(19, 20), 19);
        assert_eq!(wrap(20, 20), 0);
        assert_eq!(wrap(-1, 20), 19);
        assert_eq!(wrap(-21, 20), 19);
        assert_eq!(wrap(45, 20), 5);
    }

    #[test]
    fn test_toroidal_distance() {
        let a = Position::new(0, 0);
        assert_eq!(toroidal_distance(a, a), 0);
        assert_eq!(toroidal_distance(a, Position::new(3, 4)), 7);
        assert_eq!(toroidal_distance(a, Position::new(19, 0)), 1);
        assert_eq!(toroidal_distance(a, Position::new(19, 18)), 3);
        assert_eq!(toroidal_distance(a, Position::new(10, 10)), 20);
    }
}
