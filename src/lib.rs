//! Two-player Flappy Bird on a 320x240 RGB565 framebuffer.
//!
//! The game is driven by two register-style banks read once per tick: a
//! button bank (quit, player 1 jump, player 2 jump) and a switch bank that
//! selects difficulty, two-player mode and pause. Every tick composes a full
//! frame off-screen and presents it with a single bulk copy.

pub mod color;
pub mod compositor;
pub mod device;
pub mod difficulty;
pub mod entity;
pub mod game;
pub mod input;
pub mod params;
pub mod render;
pub mod seven_seg;
pub mod sim;
pub mod surface;
pub mod terminal;

pub use color::Rgb565;
pub use device::{Device, DeviceError};
pub use difficulty::{DifficultyProfile, resolve};
pub use entity::{Bird, Obstacle, Obstacles, Player, check_collision};
pub use game::{FramePacer, Game, TickOutcome, run};
pub use input::{Buttons, Edges, Switches};
pub use params::Params;
pub use sim::{GameRng, Phase, RoundState, StepEvents, World};
pub use surface::{FrameBuffer, Surface, Target};
