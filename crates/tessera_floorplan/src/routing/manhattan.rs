//! Orthogonal L-shaped paths between block centers.

use tessera_common::Point;

/// Returns the 4-point horizontal-then-vertical path from `start` to `end`.
///
/// The first segment runs horizontally to the target column, the second
/// vertically to the target row. The third point always equals `end`, so
/// every path has exactly four points.
pub fn l_path(start: Point, end: Point) -> Vec<Point> {
    vec![
        start,
        Point::new(end.x, start.y),
        Point::new(end.x, end.y),
        end,
    ]
}

/// Returns `true` when every consecutive pair of points shares an axis.
pub fn is_orthogonal(path: &[Point]) -> bool {
    path.windows(2).all(|w| w[0].is_orthogonal_to(&w[1]))
}
