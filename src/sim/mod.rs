//! Simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - One call to `tick` per displayed frame
//! - Seeded RNG only
//! - Time comes in through `TickInput::now_ms`, never from a clock
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod field;
pub mod platform;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;
pub mod width;

pub use autopilot::Autopilot;
pub use collision::{Aabb, landing_contact};
pub use enemy::{Enemy, EnemyKind, PlatformSpan};
pub use field::{IndexSequence, PlatformField};
pub use platform::{FallState, Modifier, Platform};
pub use player::{JumpKind, Player};
pub use score::Score;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState, Viewport};
pub use tick::{TickInput, tick};
pub use width::{FALLBACK_WIDTH_FACTOR, WIDTH_BUCKETS, choose_platform_width, width_factor_for};
