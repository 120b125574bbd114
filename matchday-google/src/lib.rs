//! Google Calendar backend for matchday.
//!
//! Credentials and sessions live under the platform config directory:
//!   ~/.config/matchday/google/app_config.toml
//!   ~/.config/matchday/google/session/{account}.toml

pub mod app_config;
pub mod authenticate;
pub mod calendar;
mod convert;
pub mod session;

pub use calendar::GoogleCalendar;
pub use session::Session;
