use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::{
    action::{Action, Axis, Direction},
    config::SimConfig,
    state::{Block, BlockColor, CollisionType, Position, Snake, Tile},
};
use crate::metrics::EpisodeStats;

/// Side-channel information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

/// Result of one simulation tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Observation of the post-step state
    pub observation: Vec<f32>,
    /// Shaped reward for this step
    pub reward: f32,
    /// True once the snake has died; absorbing until `init`
    pub terminated: bool,
    /// True on exactly the tick the step budget runs out
    pub truncated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Side length of the square scan around the head used for the
/// enclosed-gap penalty.
const GAP_SCAN_WINDOW: usize = 5;

/// The deterministic grid-snake simulation
///
/// Owns the grid dimensions, snake, food, direction and episode
/// counters, and advances one discrete tick per `step` call. Food
/// placement draws from an engine-local generator, so two simulations
/// built with [`GridSimulation::with_seed`] and the same seed replay
/// identical food sequences for identical actions.
pub struct GridSimulation {
    config: SimConfig,
    rng: StdRng,
    snake: Snake,
    food: Block,
    direction: Direction,
    /// Spawn length after clamping, the denominator of death scaling
    init_length: usize,
    episode: u32,
    steps: u32,
    score: u32,
    alive: bool,
    stats: EpisodeStats,
}

impl GridSimulation {
    /// Create a simulation seeded from entropy
    ///
    /// The first episode is already initialized; call [`init`] to begin
    /// subsequent episodes.
    ///
    /// [`init`]: GridSimulation::init
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a simulation with a deterministic food sequence
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut config: SimConfig, rng: StdRng) -> Self {
        config.grid_width = config.grid_width.max(1);
        config.grid_height = config.grid_height.max(1);

        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        let mut sim = Self {
            snake: Snake::spawn(center, Direction::Right, 0),
            food: Block::new(Position::new(0, 0), BlockColor::Food),
            direction: Direction::Right,
            init_length: 0,
            episode: 0,
            steps: 0,
            score: 0,
            alive: false,
            stats: EpisodeStats::new(),
            config,
            rng,
        };
        sim.init();
        sim
    }

    /// Reset all per-episode state and begin a fresh episode
    ///
    /// The episode counter keeps counting across resets for diagnostics.
    pub fn init(&mut self) {
        self.episode += 1;
        self.score = 0;
        self.steps = 0;
        self.direction = Direction::Right;
        self.alive = true;
        self.init_length = self
            .config
            .initial_length
            .min(self.config.grid_width / 2);

        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        self.snake = Snake::spawn(center, self.direction, self.init_length);
        self.place_food();

        debug!(episode = self.episode, "episode start");
    }

    /// Advance the simulation one tick
    ///
    /// Once the snake is dead this is a deterministic no-op: it returns
    /// the unchanged observation with zero reward and `terminated` set,
    /// and mutates nothing, until `init` starts the next episode.
    pub fn step(&mut self, action: Action) -> StepResult {
        if !self.alive {
            return StepResult {
                observation: self.observe(),
                reward: 0.0,
                terminated: true,
                truncated: false,
                info: StepInfo {
                    ate_food: false,
                    collision: None,
                },
            };
        }

        self.steps += 1;
        self.stats.on_step();
        let truncated = self.steps == self.config.max_steps;

        // Only perpendicular turns change direction while the snake
        // spans more than one tile: a request along the current travel
        // axis is either straight ahead (nothing to change) or a
        // 180-degree reversal, which is ignored.
        if let Action::Move(requested) = action {
            if !(requested.same_axis(self.direction) && self.snake.len() > 1) {
                self.direction = requested;
            }
        }

        let old_head = self.snake.head();
        let prev_distance = old_head.manhattan_distance(self.food.position);

        self.snake.advance(self.direction);

        let head = self.snake.head();
        let curr_distance = head.manhattan_distance(self.food.position);

        // Dense shaping: reward approaching the food, scaled up close to
        // it, with the same magnitude as penalty when the distance does
        // not shrink.
        let mut reward = self.config.living_bonus;
        let shaping = self.config.food_reward / (curr_distance + 1) as f32;
        if curr_distance < prev_distance {
            reward += shaping;
        } else {
            reward -= shaping;
        }

        let mut info = StepInfo {
            ate_food: false,
            collision: None,
        };

        if head == self.food.position {
            // Consumption: the tail is not retired this tick, so the
            // snake grows by the vacated head tile.
            self.score += 1;
            info.ate_food = true;
            self.snake.grow(old_head);
            self.place_food();
            reward += self.config.food_reward;
            trace!(episode = self.episode, score = self.score, "food eaten");
        } else {
            self.snake.relocate_tail(old_head);

            let growth = self.snake.body_len() as f32 / self.init_length.max(1) as f32;
            if self.snake.body_hits(head) {
                self.alive = false;
                info.collision = Some(CollisionType::SelfCollision);
                reward += self.config.death_penalty * growth * 2.0;
            } else if !self.in_bounds(head) {
                self.alive = false;
                info.collision = Some(CollisionType::Wall);
                reward += self.config.death_penalty * growth;
            }

            if self.alive {
                reward -= self.config.gap_penalty * self.enclosed_gaps() as f32;
            } else {
                self.stats.on_episode_end(self.score);
                debug!(
                    episode = self.episode,
                    score = self.score,
                    steps = self.steps,
                    collision = ?info.collision,
                    "snake died"
                );
            }
        }

        StepResult {
            observation: self.observe(),
            reward,
            terminated: !self.alive,
            truncated,
            info,
        }
    }

    /// Fixed-size observation of the current state
    ///
    /// Pure: identical states always produce identical vectors. Layout,
    /// with length exactly `width * height + 3`:
    /// - the board map in row-major order (index `y * width + x`), using
    ///   the tile codes 0 empty, 1 body, 2 food; only trailing body
    ///   segments are marked, the head tile is left empty
    /// - the Manhattan distance from head to food, normalized by
    ///   `width + height`
    /// - the two components of the current direction's unit vector
    pub fn observe(&self) -> Vec<f32> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let mut obs = Vec::with_capacity(width * height + 3);
        obs.extend(self.board_state().into_iter().map(|t| t.code() as f32));

        let distance = self.snake.head().manhattan_distance(self.food.position);
        obs.push(distance as f32 / (width + height) as f32);

        let (dx, dy) = self.direction.step_vector();
        obs.push(dx as f32);
        obs.push(dy as f32);
        obs
    }

    /// The board map in row-major order (index `y * width + x`)
    pub fn board_state(&self) -> Vec<Tile> {
        let width = self.config.grid_width;
        let mut board = vec![Tile::Empty; width * self.config.grid_height];

        let food = self.food.position;
        board[food.y as usize * width + food.x as usize] = Tile::Food;

        // Body segments only; they are always in bounds even when the
        // head has crossed the wall.
        for block in self.snake.segments() {
            let pos = block.position;
            board[pos.y as usize * width + pos.x as usize] = Tile::Body;
        }
        board
    }

    /// Classify a square window of tiles centered on the head
    ///
    /// `tiles[r][c]` classifies the tile at
    /// `(head.x + c - half, head.y + r - half)`; cells beyond the grid
    /// edge classify as `Wall` and the head's own tile as `Empty`. An
    /// even `window_size` is rounded down to the next odd value
    /// (minimum 1) rather than rejected.
    pub fn surrounding_tiles(&self, window_size: usize) -> Vec<Vec<Tile>> {
        let ws = window_size.max(1);
        let ws = if ws % 2 == 0 { ws - 1 } else { ws };
        let half = (ws / 2) as i32;

        let head = self.snake.head();
        let mut tiles = Vec::with_capacity(ws);
        for r in 0..ws {
            let mut row = Vec::with_capacity(ws);
            for c in 0..ws {
                let pos = Position::new(head.x + c as i32 - half, head.y + r as i32 - half);
                row.push(self.classify(pos));
            }
            tiles.push(row);
        }
        tiles
    }

    /// Free-run distances from the head in each direction
    ///
    /// For up, down, left and right in that order: the number of
    /// consecutive tiles from the head that are neither body nor wall
    /// (food counts as free), normalized by the grid height for the
    /// vertical axes and the width for the horizontal ones. All zeros
    /// once the snake is dead.
    pub fn free_path_distances(&self) -> [f32; 4] {
        if !self.alive {
            return [0.0; 4];
        }

        let mut distances = [0.0; 4];
        for (slot, direction) in Direction::ALL.iter().enumerate() {
            let (dx, dy) = direction.step_vector();
            let mut pos = self.snake.head().moved_by(dx, dy);
            let mut run = 0u32;
            while self.in_bounds(pos) && !self.snake.body_hits(pos) {
                run += 1;
                pos = pos.moved_by(dx, dy);
            }
            let span = match direction.axis() {
                Axis::Vertical => self.config.grid_height,
                Axis::Horizontal => self.config.grid_width,
            };
            distances[slot] = run as f32 / span as f32;
        }
        distances
    }

    /// Radial alternative to the Manhattan shaping term
    ///
    /// `(scale - euclidean_distance) / scale` with the configured
    /// distance reward scale; zero when the scale is zero.
    pub fn radial_food_reward(&self) -> f32 {
        let scale = self.config.dist_reward_scale;
        if scale == 0.0 {
            return 0.0;
        }
        let head = self.snake.head();
        let dx = (head.x - self.food.position.x) as f32;
        let dy = (head.y - self.food.position.y) as f32;
        (scale - (dx * dx + dy * dy).sqrt()) / scale
    }

    /// Head, body and food as drawable blocks, for external renderers
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        std::iter::once(&self.food)
            .chain(std::iter::once(self.snake.head_block()))
            .chain(self.snake.segments())
    }

    /// Food items eaten this episode
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks taken this episode
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Episodes started since construction
    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn food_position(&self) -> Position {
        self.food.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body segments excluding the head; equals the clamped spawn length
    /// plus the score at every tick.
    pub fn body_len(&self) -> usize {
        self.snake.body_len()
    }

    /// Length of the vector `observe` returns
    pub fn observation_len(&self) -> usize {
        self.config.grid_width * self.config.grid_height + 3
    }

    /// Cross-episode diagnostics
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Resample food uniformly among tiles the snake does not occupy
    fn place_food(&mut self) {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !self.snake.occupies(pos) {
                self.food = Block::new(pos, BlockColor::Food);
                return;
            }
        }
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.config.grid_width as i32
            && pos.y >= 0
            && pos.y < self.config.grid_height as i32
    }

    fn classify(&self, pos: Position) -> Tile {
        if !self.in_bounds(pos) {
            Tile::Wall
        } else if self.snake.body_hits(pos) {
            Tile::Body
        } else if pos == self.food.position {
            Tile::Food
        } else {
            Tile::Empty
        }
    }

    /// Count empty tiles near the head whose four direct neighbors are
    /// all body segments. Interior cells of the scan window only, so
    /// every neighbor is classified.
    fn enclosed_gaps(&self) -> u32 {
        let tiles = self.surrounding_tiles(GAP_SCAN_WINDOW);
        let n = tiles.len();
        let mut gaps = 0;
        for r in 1..n - 1 {
            for c in 1..n - 1 {
                if tiles[r][c] == Tile::Empty
                    && tiles[r - 1][c] == Tile::Body
                    && tiles[r + 1][c] == Tile::Body
                    && tiles[r][c - 1] == Tile::Body
                    && tiles[r][c + 1] == Tile::Body
                {
                    gaps += 1;
                }
            }
        }
        gaps
    }

    #[cfg(test)]
    pub(crate) fn place_food_at(&mut self, pos: Position) {
        self.food = Block::new(pos, BlockColor::Food);
    }
}
