use crate::{Buttons, Params, Rgb565};

/// The two seats. Player 1 always exists; player 2 only flies in two-player rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Fixed horizontal position of this player's bird.
    pub fn x(self) -> i32 {
        match self {
            Player::One => Params::P1_X,
            Player::Two => Params::P2_X,
        }
    }

    pub fn jump_button(self) -> u32 {
        match self {
            Player::One => Buttons::P1_JUMP,
            Player::Two => Buttons::P2_JUMP,
        }
    }

    pub fn color(self) -> Rgb565 {
        match self {
            Player::One => Rgb565::P1_YELLOW,
            Player::Two => Rgb565::P2_RED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub y: f64,
    pub velocity_y: f64,
    pub alive: bool,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            y: Params::VISIBLE_HEIGHT as f64 / 2.0,
            velocity_y: 0.0,
            alive: true,
        }
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub gap_top: i32,
    pub scored: bool,
}

impl Obstacle {
    pub fn parked() -> Self {
        Self {
            x: Params::PARK_X,
            gap_top: Params::GAP_MARGIN,
            scored: false,
        }
    }

    /// Right edge, exclusive.
    pub fn trailing_edge(&self) -> i32 {
        self.x + Params::OBSTACLE_WIDTH
    }
}

/// Fixed-capacity obstacle lane. Only the first `n` slots are in play for a
/// given tick; `n` comes from the current difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacles {
    slots: [Obstacle; Params::MAX_OBSTACLES],
}

impl Obstacles {
    pub fn new() -> Self {
        Self {
            slots: [Obstacle::parked(); Params::MAX_OBSTACLES],
        }
    }

    pub fn active(&self, n: usize) -> &[Obstacle] {
        &self.slots[..n.min(Params::MAX_OBSTACLES)]
    }

    /// Park every slot from `n` upward, so it recycles behind the lane the
    /// moment it becomes active again.
    pub fn park_from(&mut self, n: usize) {
        for o in self.slots.iter_mut().skip(n) {
            *o = Obstacle::parked();
        }
    }

    pub fn all(&self) -> &[Obstacle] {
        &self.slots
    }

    pub fn all_mut(&mut self) -> &mut [Obstacle] {
        &mut self.slots
    }

    /// Right-most position among the first `n` slots, floored at 0.
    pub fn max_x(&self, n: usize) -> i32 {
        self.active(n).iter().map(|o| o.x).fold(0, i32::max)
    }
}

impl Default for Obstacles {
    fn default() -> Self {
        Self::new()
    }
}

/// Bird vs screen bounds and vs one obstacle's two pipes.
///
/// The bird is tested as the bounding box of its circle, so a bird grazing a
/// pipe corner diagonally counts as a hit.
pub fn check_collision(
    bird: &Bird,
    bird_x: i32,
    obstacle: &Obstacle,
    radius: i32,
    gap_height: i32,
) -> bool {
    let r = radius as f64;
    let top = bird.y - r;
    let bottom = bird.y + r;

    if top < 0.0 || bottom > Params::VISIBLE_HEIGHT as f64 {
        return true;
    }

    let overlaps_x = bird_x + radius > obstacle.x && bird_x - radius < obstacle.trailing_edge();
    if overlaps_x {
        return top < obstacle.gap_top as f64 || bottom > (obstacle.gap_top + gap_height) as f64;
    }
    false
}
