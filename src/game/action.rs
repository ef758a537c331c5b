/// Which grid axis a direction travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction the snake can travel on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in their discrete-index order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The axis this direction travels along
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// True when both directions travel the same axis, i.e. the other
    /// is either straight ahead or a 180-degree reversal
    pub fn same_axis(&self, other: Direction) -> bool {
        self.axis() == other.axis()
    }

    /// Unit step vector (dx, dy); y grows downward
    pub fn step_vector(&self) -> (i32, i32) {
        let sign = match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        };
        match self.axis() {
            Axis::Horizontal => (sign, 0),
            Axis::Vertical => (0, sign),
        }
    }
}

/// Action accepted by the simulation each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Steer toward a specific direction
    Move(Direction),
    /// Keep the current direction
    Continue,
}

impl Action {
    /// Size of the discrete action space: the directions in
    /// [`Direction::ALL`] order, then Continue
    pub const COUNT: usize = Direction::ALL.len() + 1;

    /// Map a discrete action index onto the action space
    ///
    /// Indices past the directions, out-of-range ones included, mean
    /// Continue: a misbehaving policy can never panic the simulation.
    pub fn from_index(idx: usize) -> Action {
        Direction::ALL
            .get(idx)
            .copied()
            .map_or(Action::Continue, Action::Move)
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
