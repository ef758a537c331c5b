use std::collections::VecDeque;

use super::action::Direction;

/// A tile coordinate on the grid
///
/// Coordinates are signed so that the head can temporarily hold an
/// off-grid value between moving and the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Translate by one tile in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.step_vector();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance (|dx| + |dy|) to another tile
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Display color tag for a block
///
/// Purely a rendering attribute carried for external drawing surfaces;
/// simulation logic only ever compares positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockColor {
    Head,
    Body,
    Food,
}

/// One drawable grid cell: a tile coordinate plus its color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub position: Position,
    pub color: BlockColor,
}

impl Block {
    pub fn new(position: Position, color: BlockColor) -> Self {
        Self { position, color }
    }

    /// Relocate the block to another tile, keeping its color
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}

/// The snake: a head block plus trailing body segments
///
/// Segments are stored tail-to-head (front of the deque is the oldest
/// block), so a non-growing move is a pop from the front and a push to
/// the back with no reallocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Block,
    body: VecDeque<Block>,
}

impl Snake {
    /// Spawn a snake with `length` body segments extending away from the
    /// facing direction behind the head.
    pub fn spawn(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.step_vector();
        let mut body = VecDeque::with_capacity(length + 1);
        for k in (1..=length as i32).rev() {
            let segment = Position::new(head.x - dx * k, head.y - dy * k);
            body.push_back(Block::new(segment, BlockColor::Body));
        }
        Self {
            head: Block::new(head, BlockColor::Head),
            body,
        }
    }

    /// Current head tile
    pub fn head(&self) -> Position {
        self.head.position
    }

    /// The head as a drawable block
    pub fn head_block(&self) -> &Block {
        &self.head
    }

    /// Trailing body segments, tail first
    pub fn segments(&self) -> impl Iterator<Item = &Block> {
        self.body.iter()
    }

    /// Number of body segments, excluding the head
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Total number of occupied tiles, including the head
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Whether any body segment occupies the tile (the head is excluded)
    pub fn body_hits(&self, pos: Position) -> bool {
        self.body.iter().any(|block| block.position == pos)
    }

    /// Whether the head or any body segment occupies the tile
    pub fn occupies(&self, pos: Position) -> bool {
        self.head.position == pos || self.body_hits(pos)
    }

    /// Translate the head one tile; the body is left untouched until the
    /// caller either grows or relocates the tail.
    pub fn advance(&mut self, direction: Direction) {
        let next = self.head.position.moved_in_direction(direction);
        self.head.move_to(next);
    }

    /// Retire the oldest segment and re-enqueue it at the vacated head
    /// tile. O(1), no allocation.
    pub fn relocate_tail(&mut self, to: Position) {
        if let Some(mut tail) = self.body.pop_front() {
            tail.move_to(to);
            self.body.push_back(tail);
        }
    }

    /// Append a new segment at the vacated head tile (consumption growth)
    pub fn grow(&mut self, at: Position) {
        self.body.push_back(Block::new(at, BlockColor::Body));
    }
}

/// Classification of one grid tile
///
/// The single scheme shared by the board-state map and the window scan
/// around the head. `code` gives the stable integer encoding used in
/// observation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Body,
    Food,
}

impl Tile {
    /// Stable integer code: wall -1, empty 0, body 1, food 2
    pub fn code(self) -> i32 {
        match self {
            Tile::Wall => -1,
            Tile::Empty => 0,
            Tile::Body => 1,
            Tile::Food => 2,
        }
    }
}

/// Type of collision that ended an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}
