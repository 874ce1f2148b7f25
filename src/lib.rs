//! Descent Shooter: a small arcade game where enemies fall from the top of
//! the field and the player shoots them down before they land.
//!
//! - `collision`: circle / rectangle overlap tests
//! - `entities`: player, bullets, enemies and the session state
//! - `config`: build-time variant tables and validation
//! - `compute`: session lifecycle and the per-frame step
//! - `audio`: events emitted by the step and the sinks that play them
//!
//! The simulation never touches the terminal; the binary renders and feeds
//! input.

pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;

pub use compute::{handle_click, initialize, restart, restart_available, step};
pub use config::{ConfigError, GameConfig, HitboxModel, Variant};
pub use entities::{GameSession, GameStatus, InputIntent};
