//! Screen coordinates and the bounce arithmetic.

use serde::{Deserialize, Serialize};

/// Integer screen coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point, in pixels
    pub fn distance(&self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Per-step delta applied to the animated position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Same magnitude on both axes, moving right and down
    pub const fn diagonal(speed: i32) -> Self {
        Self { dx: speed, dy: speed }
    }
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Screen {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    /// Whether `point` lies in `[0, width] x [0, height]` (edges included)
    pub fn contains(&self, point: Point) -> bool {
        (0..=self.width).contains(&point.x) && (0..=self.height).contains(&point.y)
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0, self.width), point.y.clamp(0, self.height))
    }
}

/// Which axes reflected during an [`advance`] step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Moves `position` by `velocity` and reflects off the screen edges.
///
/// Each axis is handled on its own: touching or crossing `0` or the screen
/// dimension negates that axis' velocity and clamps the coordinate back on
/// screen. Hitting a corner flips both components.
pub fn advance(position: &mut Point, velocity: &mut Velocity, screen: Screen) -> Bounce {
    position.x = position.x.saturating_add(velocity.dx);
    position.y = position.y.saturating_add(velocity.dy);

    let mut bounce = Bounce::default();

    if position.x <= 0 || position.x >= screen.width {
        velocity.dx = -velocity.dx;
        position.x = position.x.clamp(0, screen.width);
        bounce.x = true;
    }
    if position.y <= 0 || position.y >= screen.height {
        velocity.dy = -velocity.dy;
        position.y = position.y.clamp(0, screen.height);
        bounce.y = true;
    }

    bounce
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_HD: Screen = Screen::new(1920, 1080);

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
        assert_eq!(Point::new(-2, 7).distance(Point::new(-2, 7)), 0.0);
    }

    #[test]
    fn right_edge_reached_after_192_steps() {
        let mut position = Point::new(0, 0);
        let mut velocity = Velocity::diagonal(10);

        for _ in 0..191 {
            let bounce = advance(&mut position, &mut velocity, FULL_HD);
            assert!(!bounce.x);
        }
        assert_eq!(position.x, 1910);

        let bounce = advance(&mut position, &mut velocity, FULL_HD);
        assert!(bounce.x);
        assert_eq!(position.x, 1920);
        assert_eq!(velocity.dx, -10);

        advance(&mut position, &mut velocity, FULL_HD);
        assert_eq!(position.x, 1910);
    }

    #[test]
    fn corner_flips_both_axes() {
        let screen = Screen::new(100, 100);
        let mut position = Point::new(95, 95);
        let mut velocity = Velocity::diagonal(10);

        let bounce = advance(&mut position, &mut velocity, screen);

        assert_eq!(bounce, Bounce { x: true, y: true });
        assert_eq!(position, Point::new(100, 100));
        assert_eq!(velocity, Velocity::new(-10, -10));
    }

    #[test]
    fn overshoot_is_clamped() {
        let screen = Screen::new(50, 50);
        let mut position = Point::new(45, 10);
        let mut velocity = Velocity::new(30, -30);

        advance(&mut position, &mut velocity, screen);

        assert_eq!(position, Point::new(50, 0));
        assert_eq!(velocity, Velocity::new(-30, 30));
    }

    #[test]
    fn center_of_screen() {
        assert_eq!(FULL_HD.center(), Point::new(960, 540));
        assert!(FULL_HD.contains(Point::new(1920, 0)));
        assert!(!FULL_HD.contains(Point::new(1921, 0)));
    }

    proptest! {
        #[test]
        fn position_stays_on_screen(
            width in 1i32..4000,
            height in 1i32..4000,
            start_x in 0i32..4000,
            start_y in 0i32..4000,
            speed in 1i32..200,
            steps in 1usize..500,
        ) {
            let screen = Screen::new(width, height);
            let mut position = screen.clamp(Point::new(start_x, start_y));
            let mut velocity = Velocity::diagonal(speed);

            for _ in 0..steps {
                advance(&mut position, &mut velocity, screen);
                prop_assert!(screen.contains(position));
            }
        }

        #[test]
        fn interior_steps_never_flip(
            x in 100i32..900,
            y in 100i32..900,
            dx in -5i32..=5,
            dy in -5i32..=5,
        ) {
            let screen = Screen::new(1000, 1000);
            let mut position = Point::new(x, y);
            let mut velocity = Velocity::new(dx, dy);

            for _ in 0..10 {
                let bounce = advance(&mut position, &mut velocity, screen);
                prop_assert!(!bounce.any());
            }
            prop_assert_eq!(velocity, Velocity::new(dx, dy));
        }
    }
}
