//! Basic 2D primitives shared by the interpolation and zone builders.

/// Representation of a 2D point in map (pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point multiplied by a display zoom factor.
    pub fn scaled(self, zoom: f64) -> Self {
        Self::new(self.x * zoom, self.y * zoom)
    }

    /// Moves the point `amount` units along the direction `dir`.
    pub fn offset(self, dir: Vector, amount: f64) -> Self {
        Self::new(self.x + dir.x * amount, self.y + dir.y * amount)
    }

    /// Vector pointing from `self` to `other`.
    pub fn to(self, other: Point) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Free direction vector. Not necessarily normalised.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` when the vector has no
    /// usable length.
    pub fn normalized(&self) -> Option<Vector> {
        let len = self.length();
        if len < f64::EPSILON || !len.is_finite() {
            None
        } else {
            Some(Vector::new(self.x / len, self.y / len))
        }
    }

    /// Left-hand perpendicular `(-y, x)`.
    pub fn perpendicular(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }
}

/// Calculates the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Returns the point halfway between `a` and `b`.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Calculates the area of a simple polygon using the shoelace formula.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        sum += vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }
    sum.abs() * 0.5
}
