//! The simulation: bird physics, obstacle lifecycle, scoring, collision.
//!
//! All mutable state lives in one [`Game`] value. The host calls
//! [`Game::update`] with wall-clock elapsed seconds, then [`Game::draw`]
//! into a [`ScreenBuf`]. Randomness is injected so tests can drive the
//! simulation with a seeded RNG.

use crate::screen::ScreenBuf;
use crossterm::style::Color;
use rand::Rng;

// ── Glyphs ──────────────────────────────────────────────────────────────────

/// Wing animation sequence; advances every fifth tick.
pub const BIRD_FRAMES: [char; 3] = ['>', '^', '>'];

const WALL: char = '║';
const CAP_TOP: char = '╦';
const CAP_BOTTOM: char = '╩';
const SKY_DOT: char = '·';

const GAME_OVER_TEXT: &str = "GAME OVER - Press 'r' to restart or 'q' to quit";

// ── Field constants ─────────────────────────────────────────────────────────

/// Bird rests on this row when it hits the ceiling.
const TOP_BOUND: f64 = 1.0;
/// Rows kept clear between a gap and either field edge.
const SPAWN_MARGIN: u16 = 3;
/// A new obstacle spawns once the rearmost is this far from the right edge.
const SPAWN_SPACING: f64 = 20.0;
/// Scales gravity to a per-second rate for the ~10 ms tick.
const GRAVITY_SCALE: f64 = 10.0;
const ANIM_PERIOD: u64 = 5;

// ── Tuning ──────────────────────────────────────────────────────────────────

/// The knobs worth varying between builds, gathered in one place.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    /// Downward acceleration applied each tick (scaled by `dt * 10`).
    pub gravity: f64,
    /// Upward impulse set on the bird's velocity by a flap. Negative.
    pub flap_power: f64,
    /// Obstacle scroll speed in columns per second.
    pub scroll_speed: f64,
    /// Vertical gap height in rows, constant across all obstacles.
    pub gap_size: u16,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            flap_power: -0.3,
            scroll_speed: 15.0,
            gap_size: 6,
        }
    }
}

// ── World state ─────────────────────────────────────────────────────────────

/// One pipe pair: a single-column wall with a gap at `[gap_start, gap_end)`.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f64,
    pub gap_start: u16,
    pub gap_end: u16,
    /// Set the first tick the obstacle crosses left of the bird's column.
    pub passed: bool,
}

pub struct Game {
    pub width: u16,
    pub height: u16,
    /// Fixed for the bird's lifetime, one quarter of the field width.
    pub bird_x: u16,
    pub bird_y: f64,
    pub bird_vel: f64,
    pub bird_frame: usize,
    /// Spawn order, oldest (leftmost) first.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// One-way latch; only reset clears it.
    pub game_over: bool,
    pub ticks: u64,
    pub tuning: Tuning,
}

impl Game {
    pub fn new(width: u16, height: u16, tuning: Tuning, rng: &mut impl Rng) -> Self {
        let mut game = Game {
            width,
            height,
            bird_x: width / 4,
            bird_y: 0.0,
            bird_vel: 0.0,
            bird_frame: 0,
            obstacles: Vec::new(),
            score: 0,
            game_over: false,
            ticks: 0,
            tuning,
        };
        game.reset(rng);
        game
    }

    /// Start a fresh round on the same field.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.bird_y = f64::from(self.height) / 2.0;
        self.bird_vel = 0.0;
        self.bird_frame = 0;
        self.obstacles.clear();
        self.score = 0;
        self.game_over = false;
        self.ticks = 0;
        self.spawn_obstacle(rng);
    }

    /// Flap key: upward impulse. Ignored once the game is over.
    pub fn flap(&mut self) {
        if !self.game_over {
            self.bird_vel = self.tuning.flap_power;
        }
    }

    /// Restart key: only acts on a finished game.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        if self.game_over {
            self.reset(rng);
        }
    }

    /// Advance the world by `dt` seconds of wall-clock time.
    ///
    /// A finished game freezes: nothing moves until reset.
    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        if self.game_over {
            return;
        }

        self.bird_vel += self.tuning.gravity * dt * GRAVITY_SCALE;
        self.bird_y += self.bird_vel;

        if self.ticks % ANIM_PERIOD == 0 {
            self.bird_frame = (self.bird_frame + 1) % BIRD_FRAMES.len();
        }
        self.ticks = self.ticks.wrapping_add(1);

        let floor = f64::from(self.height) - 1.0;
        if self.bird_y < TOP_BOUND {
            // Rest on the ceiling, no bounce.
            self.bird_y = TOP_BOUND;
            self.bird_vel = 0.0;
        } else if self.bird_y >= floor {
            self.bird_y = floor;
            self.game_over = true;
        }

        let step = self.tuning.scroll_speed * dt;
        for ob in &mut self.obstacles {
            ob.x -= step;
            if !ob.passed && ob.x < f64::from(self.bird_x) {
                ob.passed = true;
                self.score += 1;
            }
        }

        if self.hits_obstacle() {
            self.game_over = true;
        }

        self.obstacles.retain(|ob| ob.x > 0.0);

        let need_spawn = match self.obstacles.last() {
            None => true,
            Some(ob) => ob.x < f64::from(self.width) - SPAWN_SPACING,
        };
        if need_spawn {
            self.spawn_obstacle(rng);
        }
    }

    fn spawn_obstacle(&mut self, rng: &mut impl Rng) {
        let lo = SPAWN_MARGIN;
        // max(lo + 1) keeps the range non-empty on degenerate field heights.
        let hi = self
            .height
            .saturating_sub(self.tuning.gap_size + SPAWN_MARGIN)
            .max(lo + 1);
        let gap_start = rng.gen_range(lo..hi);

        self.obstacles.push(Obstacle {
            x: f64::from(self.width) - 1.0,
            gap_start,
            gap_end: gap_start + self.tuning.gap_size,
            passed: false,
        });
    }

    /// True when the bird's column overlaps any obstacle's one-column
    /// footprint while its row lies outside the gap.
    fn hits_obstacle(&self) -> bool {
        let bird_col = i32::from(self.bird_x);
        let bird_row = self.bird_y.floor() as i32;

        for ob in &self.obstacles {
            let col = ob.x.floor() as i32;
            if bird_col >= col
                && bird_col <= col + 1
                && (bird_row < i32::from(ob.gap_start) || bird_row >= i32::from(ob.gap_end))
            {
                return true;
            }
        }
        false
    }

    // ── Drawing ─────────────────────────────────────────────────────────────

    /// Paint the current state into `buf`. Pure read, no mutation.
    pub fn draw(&self, buf: &mut ScreenBuf) {
        buf.clear();
        self.draw_background(buf);
        self.draw_bird(buf);
        self.draw_obstacles(buf);
        self.draw_score(buf);
        if self.game_over {
            self.draw_game_over(buf);
        }
    }

    fn draw_background(&self, buf: &mut ScreenBuf) {
        for y in 0..i32::from(self.height) {
            for x in (0..i32::from(self.width)).step_by(4) {
                buf.set(x, y, SKY_DOT, Color::Cyan);
            }
        }
    }

    fn draw_bird(&self, buf: &mut ScreenBuf) {
        buf.set(
            i32::from(self.bird_x),
            self.bird_y.floor() as i32,
            BIRD_FRAMES[self.bird_frame],
            Color::Yellow,
        );
    }

    fn draw_obstacles(&self, buf: &mut ScreenBuf) {
        for ob in &self.obstacles {
            let col = ob.x.floor() as i32;

            for y in 0..i32::from(ob.gap_start) {
                let ch = if y == i32::from(ob.gap_start) - 1 {
                    CAP_TOP
                } else {
                    WALL
                };
                buf.set(col, y, ch, Color::Green);
            }
            for y in i32::from(ob.gap_end)..i32::from(self.height) {
                let ch = if y == i32::from(ob.gap_end) {
                    CAP_BOTTOM
                } else {
                    WALL
                };
                buf.set(col, y, ch, Color::Green);
            }
        }
    }

    fn draw_score(&self, buf: &mut ScreenBuf) {
        buf.print(0, 0, &format!("Score: {}", self.score), Color::White);
    }

    fn draw_game_over(&self, buf: &mut ScreenBuf) {
        let x = self.width.saturating_sub(GAME_OVER_TEXT.len() as u16) / 2;
        buf.print(
            i32::from(x),
            i32::from(self.height / 2),
            GAME_OVER_TEXT,
            Color::Red,
        );
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
