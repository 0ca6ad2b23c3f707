/// Fixed geometry and tuning shared by the simulation and the renderer
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Framebuffer
    pub const VISIBLE_WIDTH: i32 = 320;
    pub const VISIBLE_HEIGHT: i32 = 240;
    pub const STRIDE: usize = 512; // physical line width, padding past 320 is never shown

    // Birds
    pub const P1_X: i32 = 60;
    pub const P2_X: i32 = 90;

    // Obstacles
    pub const OBSTACLE_WIDTH: i32 = 50;
    pub const MAX_OBSTACLES: usize = 3;
    pub const GAP_MARGIN: i32 = 30; // min distance between gap and screen edge
    pub const SPAWN_OFFSET: i32 = 150; // first obstacle distance past the right edge
    pub const PARK_X: i32 = -Self::OBSTACLE_WIDTH - 10;

    // Font
    pub const FONT_WIDTH: i32 = 3;
    pub const FONT_HEIGHT: i32 = 5;
    pub const FONT_SCALE: i32 = 2;
    pub const FONT_CHAR_SPACING: i32 = 2;

    // HUD
    pub const SCORE_RIGHT_X: i32 = Self::VISIBLE_WIDTH - 10;
    pub const SCORE_Y: i32 = 10;

    // Loop
    pub const DEFAULT_FPS: u32 = 60;
}
