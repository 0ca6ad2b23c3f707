/// Snapshot of the push-button bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(pub u32);

impl Buttons {
    pub const QUIT: u32 = 1 << 0;
    pub const P1_JUMP: u32 = 1 << 1;
    pub const P2_JUMP: u32 = 1 << 2;

    pub fn is_down(self, mask: u32) -> bool {
        self.0 & mask != 0
    }
}

/// Current and previous button snapshots, for rising-edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub prev: Buttons,
    pub cur: Buttons,
}

impl Edges {
    pub fn new(prev: Buttons, cur: Buttons) -> Self {
        Self { prev, cur }
    }

    /// Pressed now, released on the previous tick.
    pub fn rising(&self, mask: u32) -> bool {
        self.cur.is_down(mask) && !self.prev.is_down(mask)
    }
}

/// Snapshot of the slide-switch bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Switches(pub u32);

impl Switches {
    pub const SPEED: u32 = 0b11;
    pub const GAP: u32 = 0b11 << 2;
    pub const DENSE_PIPES: u32 = 1 << 4;
    pub const HEAVY_GRAVITY: u32 = 1 << 5;
    pub const STRONG_JUMP: u32 = 1 << 6;
    pub const BIG_BIRD: u32 = 1 << 7;
    pub const TWO_PLAYER: u32 = 1 << 8;
    pub const PAUSE: u32 = 1 << 9;

    pub const COUNT: u32 = 10;

    pub fn is_on(self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    pub fn speed_level(self) -> usize {
        (self.0 & Self::SPEED) as usize
    }

    pub fn gap_level(self) -> usize {
        ((self.0 & Self::GAP) >> 2) as usize
    }

    pub fn two_player(self) -> bool {
        self.is_on(Self::TWO_PLAYER)
    }

    pub fn paused(self) -> bool {
        self.is_on(Self::PAUSE)
    }

    pub fn toggled(self, index: u32) -> Switches {
        Switches(self.0 ^ (1 << index))
    }
}
