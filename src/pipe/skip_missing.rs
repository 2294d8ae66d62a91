use crate::pipe::filter::filter;
use crate::point::Point;

/// Drops points whose value is already the missing marker, so they cannot
/// claim a slot ahead of a real measurement.
pub fn skip_missing() -> impl FnMut(Point) -> Option<Point> {
    filter(|p: &Point| !p.is_missing())
}
