#![warn(missing_docs)]
//! Game session: movement, strike resolution and the frame loop.
//!
//! [`TickDriver`] ties the input tracker, the world and a [`SceneBackend`]
//! together. The host feeds it platform events and calls
//! [`TickDriver::frame`] once per display refresh.
//!
//! [`SceneBackend`]: timberfall_render::SceneBackend

mod driver;
mod interaction;
mod movement;
mod session;
mod settings;

pub use driver::{FrameControl, TickDriver};
pub use interaction::{InteractionResolver, StrikeTarget};
pub use movement::{displacement, MovementIntegrator};
pub use session::{Session, SessionEvent, SessionStats, StrikeOutcome, TimedEvent};
pub use settings::{
    SessionSettings, SettingsError, DEFAULT_EYE_HEIGHT, DEFAULT_MOVE_SPEED,
    DEFAULT_STRIKE_COOLDOWN_MS, DEFAULT_STRIKE_RANGE,
};
