use crate::seven_seg::HighScoreDisplay;
use crate::{
    Buttons, Device, DeviceError, DifficultyProfile, Edges, GameRng, Phase, Player, StepEvents,
    Surface, Switches, World, compositor, resolve, sim,
};
use log::{debug, info, trace};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the whole game: entities, round state, the display surface and the
/// previous input snapshot. One call to [`Game::tick`] is one frame.
pub struct Game {
    world: World,
    surface: Surface,
    rng: GameRng,
    prev_buttons: Buttons,
    prev_switches: Switches,
    profile: DifficultyProfile,
}

impl Game {
    pub fn new(switches: Switches, mut rng: GameRng) -> Self {
        let profile = resolve(switches);
        let two_player = switches.two_player();
        let mut world = World::new(two_player);
        world.reset(
            profile.obstacle_count,
            two_player,
            profile.obstacle_spacing,
            profile.gap_height,
            &mut rng,
        );
        log_round_start(&world, &profile);
        Self {
            world,
            surface: Surface::new(),
            rng,
            prev_buttons: Buttons::default(),
            prev_switches: switches,
            profile,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scripted setups.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Profile used for the most recent tick.
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn high_score_display(&self) -> HighScoreDisplay {
        HighScoreDisplay::from_round(&self.world.round)
    }

    /// Advance one frame from the current button and switch banks.
    ///
    /// Quit is honoured before anything is touched, so no partial frame is
    /// ever presented on the way out.
    pub fn tick(&mut self, buttons: Buttons, switches: Switches) -> TickOutcome {
        let edges = Edges::new(self.prev_buttons, buttons);
        if edges.rising(Buttons::QUIT) {
            info!("quit requested");
            return TickOutcome::Quit;
        }

        let profile = resolve(switches);
        if profile.obstacle_count < self.profile.obstacle_count {
            // Dropped slots restart from the park position when re-enabled.
            self.world.obstacles.park_from(profile.obstacle_count);
        }
        self.note_switches(switches);
        let paused = switches.paused();
        self.world.round.two_player = switches.two_player();

        match self.world.round.phase {
            Phase::Running => {
                if !paused {
                    let events = sim::step(&mut self.world, &profile, &edges, &mut self.rng);
                    self.log_step(&events);
                }
            }
            Phase::Over => {
                if edges.rising(Buttons::P1_JUMP) || edges.rising(Buttons::P2_JUMP) {
                    self.world.reset(
                        profile.obstacle_count,
                        switches.two_player(),
                        profile.obstacle_spacing,
                        profile.gap_height,
                        &mut self.rng,
                    );
                    log_round_start(&self.world, &profile);
                }
            }
        }

        compositor::compose(&mut self.surface, &self.world, &profile, paused);

        self.prev_buttons = buttons;
        self.profile = profile;
        TickOutcome::Continue
    }

    fn note_switches(&mut self, switches: Switches) {
        let prev = self.prev_switches;
        if prev == switches {
            return;
        }
        debug!("switches {:#05x} -> {:#05x}", prev.0, switches.0);
        if prev.paused() != switches.paused() {
            info!("{}", if switches.paused() { "paused" } else { "resumed" });
        }
        self.prev_switches = switches;
    }

    fn log_step(&self, events: &StepEvents) {
        for player in Player::ALL {
            if events.died[player.index()] {
                debug!(
                    "player {} down with {} points",
                    player.index() + 1,
                    self.world.round.score(player)
                );
            }
        }
        if events.round_over {
            let round = &self.world.round;
            info!(
                "round over: P1 {} (best {}), P2 {} (best {})",
                round.scores[0], round.high_scores[0], round.scores[1], round.high_scores[1]
            );
        }
    }
}

fn log_round_start(world: &World, profile: &DifficultyProfile) {
    if world.round.two_player {
        info!(
            "round start, 2 players, {} obstacles: P1 (yellow) jumps with button 1, P2 (red) with button 2",
            profile.obstacle_count
        );
    } else {
        info!(
            "round start, 1 player, {} obstacles: P1 (yellow) jumps with button 1",
            profile.obstacle_count
        );
    }
}

// ── Frame pacing ────────────────────────────────────────────────────────────

/// Fixed tick budget: measure the work, sleep whatever is left.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns how far the tick overran its budget, if it did. Overruns are
    /// not made up for.
    pub fn finish_tick(&self, started: Instant) -> Option<Duration> {
        let elapsed = started.elapsed();
        if elapsed < self.budget {
            std::thread::sleep(self.budget - elapsed);
            None
        } else {
            Some(elapsed - self.budget)
        }
    }
}

/// Drive `game` from `device` until quit. Returns the number of frames shown.
pub fn run<D: Device>(
    game: &mut Game,
    device: &mut D,
    pacer: &FramePacer,
) -> Result<u64, DeviceError> {
    let mut frames = 0u64;
    loop {
        let started = Instant::now();

        let (buttons, switches) = device.poll()?;
        if game.tick(buttons, switches) == TickOutcome::Quit {
            return Ok(frames);
        }

        device.present(game.surface().live())?;
        device.show_high_scores(game.high_score_display())?;
        frames += 1;

        if let Some(over) = pacer.finish_tick(started) {
            trace!("frame {frames} overran by {over:?}");
        }
    }
}
