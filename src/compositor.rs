use crate::render::{draw_number, fill_circle, fill_rect};
use crate::{DifficultyProfile, FrameBuffer, Params, Player, Rgb565, Surface, Target, World};

/// Compose the whole frame off-screen, then publish it in one copy.
pub fn compose(surface: &mut Surface, world: &World, profile: &DifficultyProfile, paused: bool) {
    let buf = surface.target_mut(Target::Back);
    draw_scene(buf, world, profile, paused);
    surface.present();
}

pub fn draw_scene(buf: &mut FrameBuffer, world: &World, profile: &DifficultyProfile, paused: bool) {
    buf.fill(Rgb565::SKY_BLUE);
    draw_obstacles(buf, world, profile);
    for player in Player::ALL {
        let bird = world.bird(player);
        if bird.alive {
            draw_bird(buf, player.x(), bird.y as i32, player.color(), profile.bird_radius);
        }
    }
    if paused {
        draw_pause(buf);
    }
    draw_number(
        buf,
        world.round.combined_score(),
        Params::SCORE_RIGHT_X,
        Params::SCORE_Y,
        Rgb565::WHITE,
    );
}

fn draw_obstacles(buf: &mut FrameBuffer, world: &World, profile: &DifficultyProfile) {
    for o in world.obstacles.active(profile.obstacle_count) {
        let x1 = o.trailing_edge();
        fill_rect(buf, o.x, 0, x1, o.gap_top, Rgb565::GREEN);
        fill_rect(
            buf,
            o.x,
            o.gap_top + profile.gap_height,
            x1,
            Params::VISIBLE_HEIGHT,
            Rgb565::GREEN,
        );
    }
}

/// Body, eye, pupil, beak and tail, all sized off the radius.
pub fn draw_bird(buf: &mut FrameBuffer, x: i32, y: i32, body: Rgb565, r: i32) {
    fill_circle(buf, x, y, r, body);

    // Eye
    let ex = x + r / 2;
    let ey = y - r / 3;
    fill_circle(buf, ex, ey, r / 4, Rgb565::WHITE);
    buf.set(ex, ey, Rgb565::BLACK);

    // Beak
    fill_rect(buf, x + r, y - 2, x + r + 5, y + 2, Rgb565::BEAK);

    // Tail
    fill_rect(buf, x - r / 2, y, x, y + 5, Rgb565::WHITE);
}

fn draw_pause(buf: &mut FrameBuffer) {
    fill_rect(buf, 145, 100, 155, 140, Rgb565::WHITE);
    fill_rect(buf, 165, 100, 175, 140, Rgb565::WHITE);
}
