use std::fmt;

use serde::{Deserialize, Serialize};

/// An icon position in desktop list-view client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_coordinate_pair() {
        assert_eq!(Point::new(10, -4).to_string(), "(10, -4)");
    }

    #[test]
    fn converts_from_tuple() {
        assert_eq!(Point::from((3, 7)), Point::new(3, 7));
    }
}
