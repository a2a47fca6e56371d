use glam::Vec2;
use strum_macros::AsRefStr;

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// The four cardinal directions, in input priority order.
    ///
    /// When several direction keys are held at once, the last one in this list wins.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Up, Direction::Down];

    /// Returns the unit vector for this direction, in screen space (Y grows downwards).
    pub fn as_vec2(self) -> Vec2 {
        self.into()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    /// This matches the order of the direction's frame window in the sprite sheets.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

impl From<Direction> for Vec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -Vec2::Y,
            Direction::Down => Vec2::Y,
            Direction::Left => -Vec2::X,
            Direction::Right => Vec2::X,
        }
    }
}
