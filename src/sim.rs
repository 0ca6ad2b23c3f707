use crate::{Bird, DifficultyProfile, Edges, Obstacle, Obstacles, Params, Player, check_collision};
use rand::Rng;

/// Seeded RNG for gap placement, so rounds can be replayed.
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    /// Uniform gap top keeping the gap `GAP_MARGIN` clear of both screen edges.
    pub fn gap_top(&mut self, gap_height: i32) -> i32 {
        let lo = Params::GAP_MARGIN;
        let hi = (Params::VISIBLE_HEIGHT - gap_height - Params::GAP_MARGIN).max(lo);
        self.0.gen_range(lo..=hi)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub phase: Phase,
    pub scores: [u32; 2],
    pub high_scores: [u32; 2],
    pub two_player: bool,
}

impl RoundState {
    pub fn new(two_player: bool) -> Self {
        Self {
            phase: Phase::Running,
            scores: [0; 2],
            high_scores: [0; 2],
            two_player,
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn high_score(&self, player: Player) -> u32 {
        self.high_scores[player.index()]
    }

    pub fn combined_score(&self) -> u32 {
        self.scores[0] + self.scores[1]
    }
}

/// What happened during one step, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepEvents {
    pub jumped: [bool; 2],
    pub scored: [bool; 2],
    pub recycled: usize,
    pub died: [bool; 2],
    pub round_over: bool,
}

/// Everything the simulation mutates: both birds, the obstacle lane and the
/// round bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub birds: [Bird; 2],
    pub obstacles: Obstacles,
    pub round: RoundState,
}

impl World {
    pub fn new(two_player: bool) -> Self {
        Self {
            birds: [Bird::new(); 2],
            obstacles: Obstacles::new(),
            round: RoundState::new(two_player),
        }
    }

    pub fn bird(&self, player: Player) -> &Bird {
        &self.birds[player.index()]
    }

    pub fn bird_mut(&mut self, player: Player) -> &mut Bird {
        &mut self.birds[player.index()]
    }

    /// Start a fresh round. High scores survive.
    pub fn reset(
        &mut self,
        num_obstacles: usize,
        two_player: bool,
        spacing: i32,
        gap_height: i32,
        rng: &mut GameRng,
    ) {
        self.round.scores = [0; 2];
        self.round.phase = Phase::Running;
        self.round.two_player = two_player;

        self.birds = [Bird::new(); 2];
        if !two_player {
            self.bird_mut(Player::Two).alive = false;
        }

        let n = num_obstacles.min(Params::MAX_OBSTACLES);
        for (i, o) in self.obstacles.all_mut().iter_mut().take(n).enumerate() {
            *o = Obstacle {
                x: Params::VISIBLE_WIDTH + Params::SPAWN_OFFSET + i as i32 * spacing,
                gap_top: rng.gap_top(gap_height),
                scored: false,
            };
        }
        self.obstacles.park_from(n);
    }
}

// ── Step phases ────────────────────────────────────────────────────────────

/// Set jump velocity for each alive bird whose button just went down.
pub fn apply_jumps(
    world: &mut World,
    profile: &DifficultyProfile,
    edges: &Edges,
    events: &mut StepEvents,
) {
    for player in Player::ALL {
        let bird = world.bird_mut(player);
        if bird.alive && edges.rising(player.jump_button()) {
            bird.velocity_y = profile.jump_velocity;
            events.jumped[player.index()] = true;
        }
    }
}

/// Semi-implicit Euler: velocity first, then position.
pub fn integrate(world: &mut World, profile: &DifficultyProfile) {
    for bird in world.birds.iter_mut().filter(|b| b.alive) {
        bird.velocity_y += profile.gravity;
        bird.y += bird.velocity_y;
    }
}

/// Scroll, score and recycle the active obstacles in index order.
pub fn advance_obstacles(
    world: &mut World,
    profile: &DifficultyProfile,
    rng: &mut GameRng,
    events: &mut StepEvents,
) {
    let n = profile.obstacle_count.min(Params::MAX_OBSTACLES);
    for i in 0..n {
        let o = &mut world.obstacles.all_mut()[i];
        o.x -= profile.scroll_speed;

        if !o.scored && o.trailing_edge() < Params::P1_X {
            o.scored = true;
            for player in Player::ALL {
                if world.birds[player.index()].alive {
                    world.round.scores[player.index()] += 1;
                    events.scored[player.index()] = true;
                }
            }
        }

        if world.obstacles.all()[i].trailing_edge() < 0 {
            let x = world.obstacles.max_x(n) + profile.obstacle_spacing;
            world.obstacles.all_mut()[i] = Obstacle {
                x,
                gap_top: rng.gap_top(profile.gap_height),
                scored: false,
            };
            events.recycled += 1;
        }
    }
}

/// Kill every alive bird touching a pipe or a screen edge.
pub fn detect_collisions(world: &mut World, profile: &DifficultyProfile, events: &mut StepEvents) {
    let World { birds, obstacles, .. } = world;
    for o in obstacles.active(profile.obstacle_count) {
        for player in Player::ALL {
            let bird = &mut birds[player.index()];
            if bird.alive
                && check_collision(bird, player.x(), o, profile.bird_radius, profile.gap_height)
            {
                bird.alive = false;
                events.died[player.index()] = true;
            }
        }
    }
}

/// Flip to `Over` once every participating bird is down, banking high scores.
pub fn check_round_over(world: &mut World, events: &mut StepEvents) {
    let p1_down = !world.bird(Player::One).alive;
    let p2_down = !world.bird(Player::Two).alive;
    let over = if world.round.two_player {
        p1_down && p2_down
    } else {
        p1_down
    };
    if over && world.round.phase == Phase::Running {
        let round = &mut world.round;
        round.phase = Phase::Over;
        for i in 0..2 {
            round.high_scores[i] = round.high_scores[i].max(round.scores[i]);
        }
        events.round_over = true;
    }
}

/// One running, unpaused tick of the simulation.
pub fn step(
    world: &mut World,
    profile: &DifficultyProfile,
    edges: &Edges,
    rng: &mut GameRng,
) -> StepEvents {
    let mut events = StepEvents::default();

    // 1. Jump on rising edges
    apply_jumps(world, profile, edges, &mut events);

    // 2. Gravity
    integrate(world, profile);

    // 3. Scroll, score, recycle
    advance_obstacles(world, profile, rng, &mut events);

    // 4. Collisions
    detect_collisions(world, profile, &mut events);

    // 5. Game over
    check_round_over(world, &mut events);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buttons, Switches, resolve};

    fn setup_world(two_player: bool) -> (World, DifficultyProfile, GameRng) {
        let profile = resolve(Switches(0));
        let mut rng = GameRng::new(12345); // Fixed seed for deterministic tests
        let mut world = World::new(two_player);
        world.reset(
            profile.obstacle_count,
            two_player,
            profile.obstacle_spacing,
            profile.gap_height,
            &mut rng,
        );
        (world, profile, rng)
    }

    fn no_input() -> Edges {
        Edges::default()
    }

    fn held(mask: u32) -> Edges {
        Edges::new(Buttons(mask), Buttons(mask))
    }

    fn pressed(mask: u32) -> Edges {
        Edges::new(Buttons(0), Buttons(mask))
    }

    #[test]
    fn test_reset_layout() {
        let (world, profile, _) = setup_world(false);
        let obs = world.obstacles.all();
        assert_eq!(obs[0].x, 470);
        assert_eq!(obs[1].x, 470 + profile.obstacle_spacing);
        assert_eq!(obs[2].x, Params::PARK_X);
        for o in world.obstacles.active(profile.obstacle_count) {
            assert!(o.gap_top >= 30 && o.gap_top <= 240 - profile.gap_height - 30);
            assert!(!o.scored);
        }
        assert!(world.bird(Player::One).alive);
        assert!(!world.bird(Player::Two).alive);
        assert_eq!(world.bird(Player::One).y, 120.0);
        assert_eq!(world.round.scores, [0, 0]);
    }

    #[test]
    fn test_reset_keeps_high_scores() {
        let (mut world, profile, mut rng) = setup_world(true);
        world.round.high_scores = [7, 3];
        world.round.scores = [2, 9];
        world.round.phase = Phase::Over;
        world.reset(3, true, profile.obstacle_spacing, profile.gap_height, &mut rng);
        assert_eq!(world.round.high_scores, [7, 3]);
        assert_eq!(world.round.scores, [0, 0]);
        assert_eq!(world.round.phase, Phase::Running);
        assert!(world.bird(Player::Two).alive);
    }

    #[test]
    fn test_reset_with_no_obstacles_parks_everything() {
        let (mut world, profile, mut rng) = setup_world(false);
        world.reset(0, false, profile.obstacle_spacing, profile.gap_height, &mut rng);
        assert!(world.obstacles.all().iter().all(|o| o.x == Params::PARK_X));
    }

    #[test]
    fn test_held_jump_applies_once() {
        let (mut world, profile, mut rng) = setup_world(false);
        let mut events = StepEvents::default();
        apply_jumps(&mut world, &profile, &pressed(Buttons::P1_JUMP), &mut events);
        assert_eq!(world.bird(Player::One).velocity_y, profile.jump_velocity);
        integrate(&mut world, &profile);
        let after_first = world.bird(Player::One).velocity_y;

        let events = step(&mut world, &profile, &held(Buttons::P1_JUMP), &mut rng);
        assert!(!events.jumped[0]);
        assert_eq!(world.bird(Player::One).velocity_y, after_first + profile.gravity);
    }

    #[test]
    fn test_dead_bird_ignores_jump() {
        let (mut world, profile, mut rng) = setup_world(false);
        let events = step(&mut world, &profile, &pressed(Buttons::P2_JUMP), &mut rng);
        assert!(!events.jumped[1]);
        assert_eq!(world.bird(Player::Two).velocity_y, 0.0);
    }

    #[test]
    fn test_integration_order() {
        let (mut world, profile, _) = setup_world(false);
        integrate(&mut world, &profile);
        let bird = world.bird(Player::One);
        assert_eq!(bird.velocity_y, 0.5);
        assert_eq!(bird.y, 120.5);
    }

    #[test]
    fn test_scoring_once_per_pass() {
        let (mut world, profile, mut rng) = setup_world(false);
        // trailing edge lands at 59 after the scroll of 2
        world.obstacles.all_mut()[0].x = 11;
        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        assert!(world.obstacles.all()[0].scored);
        assert_eq!(world.round.scores[0], 1);

        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        assert_eq!(world.round.scores[0], 1);
        assert!(!events.scored[0]);
    }

    #[test]
    fn test_recycled_obstacle_can_score_again() {
        let (mut world, profile, mut rng) = setup_world(false);
        world.obstacles.all_mut()[0] = Obstacle {
            x: -49,
            gap_top: 50,
            scored: true,
        };
        world.obstacles.all_mut()[1].x = 200;
        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        let o = world.obstacles.all()[0];
        assert!(!o.scored);
        // slot 1 has not scrolled yet when slot 0 recycles
        assert_eq!(o.x, 200 + profile.obstacle_spacing);

        // walk it back past the scoring line
        world.obstacles.all_mut()[0].x = 11;
        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        assert_eq!(world.round.scores[0], 1);
    }

    #[test]
    fn test_both_players_score_same_obstacle() {
        let (mut world, profile, mut rng) = setup_world(true);
        world.obstacles.all_mut()[0].x = 11;
        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        assert_eq!(world.round.scores, [1, 1]);
        assert_eq!(events.scored, [true, true]);
    }

    #[test]
    fn test_dead_player_does_not_score() {
        let (mut world, profile, mut rng) = setup_world(true);
        world.bird_mut(Player::One).alive = false;
        world.obstacles.all_mut()[0].x = 11;
        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        assert_eq!(world.round.scores, [0, 1]);
    }

    #[test]
    fn test_recycle_goes_behind_rightmost() {
        let profile = resolve(Switches(Switches::GAP | Switches::DENSE_PIPES));
        let mut rng = GameRng::new(1);
        let mut world = World::new(false);
        world.reset(3, false, profile.obstacle_spacing, profile.gap_height, &mut rng);
        world.obstacles.all_mut()[0].x = -49;
        world.obstacles.all_mut()[1].x = 120;
        world.obstacles.all_mut()[2].x = 250;

        let mut events = StepEvents::default();
        advance_obstacles(&mut world, &profile, &mut rng, &mut events);
        // slot 0 is recycled before the others scroll this tick
        assert_eq!(world.obstacles.all()[0].x, 250 + profile.obstacle_spacing);
        assert_eq!(events.recycled, 1);
        let gap_top = world.obstacles.all()[0].gap_top;
        assert!((30..=240 - 70 - 30).contains(&gap_top));
        assert!(world.obstacles.all().iter().all(|o| o.x >= -Params::OBSTACLE_WIDTH));
    }

    #[test]
    fn test_recycled_gap_stays_inside_margins_at_tightest_gap() {
        let profile = resolve(Switches(Switches::GAP | Switches::DENSE_PIPES));
        assert_eq!(profile.gap_height, 70);
        let mut rng = GameRng::new(9);
        let mut world = World::new(false);
        world.reset(3, false, profile.obstacle_spacing, profile.gap_height, &mut rng);

        let (lo, hi) = (Params::GAP_MARGIN, 240 - profile.gap_height - Params::GAP_MARGIN);
        let mut recycled = 0;
        for _ in 0..200 {
            world.obstacles.all_mut()[0].x = -49;
            let mut events = StepEvents::default();
            advance_obstacles(&mut world, &profile, &mut rng, &mut events);
            recycled += events.recycled;
            let gap_top = world.obstacles.all()[0].gap_top;
            assert!(gap_top >= lo && gap_top <= hi, "gap_top {gap_top}");
        }
        assert!(recycled >= 200);
    }

    #[test]
    fn test_collision_never_revives() {
        let (mut world, profile, _) = setup_world(false);
        // first obstacle blocks the bird, second is far away
        world.obstacles.all_mut()[0] = Obstacle {
            x: 40,
            gap_top: 180,
            scored: false,
        };
        world.obstacles.all_mut()[1].x = 300;
        let mut events = StepEvents::default();
        detect_collisions(&mut world, &profile, &mut events);
        assert!(!world.bird(Player::One).alive);
        assert!(events.died[0]);
    }

    #[test]
    fn test_single_player_round_over_banks_high_score() {
        let (mut world, profile, mut rng) = setup_world(false);
        world.round.high_scores = [5, 0];
        world.round.scores = [8, 0];
        world.bird_mut(Player::One).y = 300.0;
        let events = step(&mut world, &profile, &no_input(), &mut rng);
        assert!(events.round_over);
        assert_eq!(world.round.phase, Phase::Over);
        assert_eq!(world.round.high_scores, [8, 0]);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let (mut world, profile, mut rng) = setup_world(false);
        world.round.high_scores = [12, 0];
        world.round.scores = [3, 0];
        world.bird_mut(Player::One).y = 300.0;
        step(&mut world, &profile, &no_input(), &mut rng);
        assert_eq!(world.round.high_scores, [12, 0]);
    }

    #[test]
    fn test_two_player_round_waits_for_both() {
        let (mut world, profile, mut rng) = setup_world(true);
        world.bird_mut(Player::One).y = 300.0;
        let events = step(&mut world, &profile, &no_input(), &mut rng);
        assert!(events.died[0]);
        assert!(!events.round_over);
        assert_eq!(world.round.phase, Phase::Running);

        world.bird_mut(Player::Two).y = -50.0;
        let events = step(&mut world, &profile, &no_input(), &mut rng);
        assert!(events.round_over);
    }

    #[test]
    fn test_zero_active_obstacles_is_noop() {
        let (mut world, mut profile, mut rng) = setup_world(false);
        profile.obstacle_count = 0;
        let before = world.obstacles.clone();
        let events = step(&mut world, &profile, &no_input(), &mut rng);
        assert_eq!(world.obstacles, before);
        assert_eq!(events.recycled, 0);
    }
}
