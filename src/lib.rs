//! Discrete-time grid simulation core for a growing-snake game.
//!
//! A [`game::Game`] owns the body, food, score, speed and lifecycle state and
//! is stepped by a [`scheduler::Scheduler`]. Rendering and input devices live
//! outside this crate: they feed [`input::Command`]s in and read
//! [`game::Snapshot`]s out.

pub mod body;
pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod speed;
pub mod step;
