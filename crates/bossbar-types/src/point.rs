use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A position in 3D Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Translate by a sweep vector.
    pub fn translated(&self, by: [f64; 3]) -> Self {
        Self::new(self.x + by[0], self.y + by[1], self.z + by[2])
    }
}

impl Sub for Point3d {
    type Output = [f64; 3];
    fn sub(self, rhs: Self) -> Self::Output {
        [self.x - rhs.x, self.y - rhs.y, self.z - rhs.z]
    }
}

/// A geometry vertex: a position plus the local element-size hint forwarded
/// to the mesher's sizing field. The hint is never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: Point3d,
    pub size_hint: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, size_hint: f64) -> Self {
        Self {
            position: Point3d::new(x, y, z),
            size_hint,
        }
    }

    /// Same vertex moved by `by`, keeping the size hint.
    pub fn translated(&self, by: [f64; 3]) -> Self {
        Self {
            position: self.position.translated(by),
            size_hint: self.size_hint,
        }
    }

    /// Exact coordinate equality. Loop closure is defined this way.
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point3d::new(1.0, 0.0, 0.0);
        let b = Point3d::new(4.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate_keeps_size_hint() {
        let p = Point::new(1.0, 2.0, -5.0, 4.0);
        let q = p.translated([0.0, 0.0, 10.0]);
        assert_eq!(q.position, Point3d::new(1.0, 2.0, 5.0));
        assert_eq!(q.size_hint, 4.0);
    }

    #[test]
    fn test_coincidence_ignores_size_hint() {
        let a = Point::new(1.0, 1.0, 0.0, 1.0);
        let b = Point::new(1.0, 1.0, 0.0, 2.0);
        assert!(a.coincides_with(&b));
    }
}
