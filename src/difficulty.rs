use crate::Switches;

const SPEEDS: [i32; 4] = [2, 3, 4, 5];
const GAPS: [i32; 4] = [100, 90, 80, 70];

const PIPES_EASY: (usize, i32) = (2, 220); // (count, spacing)
const PIPES_HARD: (usize, i32) = (3, 130);

const GRAVITY_EASY: f64 = 0.5;
const GRAVITY_HARD: f64 = 0.35;

pub const JUMP_EASY: f64 = -5.5;
pub const JUMP_HARD: f64 = -7.0;

const RADIUS_EASY: i32 = 10;
const RADIUS_HARD: i32 = 13;

/// Physics and layout parameters selected by the switch bank for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub scroll_speed: i32,
    pub gap_height: i32,
    pub obstacle_count: usize,
    pub obstacle_spacing: i32,
    pub gravity: f64,
    pub jump_velocity: f64,
    pub bird_radius: i32,
}

/// Map the switch bank to a profile. Depends on nothing but the bits.
pub fn resolve(sw: Switches) -> DifficultyProfile {
    let (obstacle_count, obstacle_spacing) = if sw.is_on(Switches::DENSE_PIPES) {
        PIPES_HARD
    } else {
        PIPES_EASY
    };
    DifficultyProfile {
        scroll_speed: SPEEDS[sw.speed_level()],
        gap_height: GAPS[sw.gap_level()],
        obstacle_count,
        obstacle_spacing,
        gravity: if sw.is_on(Switches::HEAVY_GRAVITY) {
            GRAVITY_HARD
        } else {
            GRAVITY_EASY
        },
        jump_velocity: if sw.is_on(Switches::STRONG_JUMP) {
            JUMP_HARD
        } else {
            JUMP_EASY
        },
        bird_radius: if sw.is_on(Switches::BIG_BIRD) {
            RADIUS_HARD
        } else {
            RADIUS_EASY
        },
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        resolve(Switches::default())
    }
}
