//! ECS resources made available to systems.
//!
//! Overview
//! - `animationclock` – timer queue shared by every animator
//! - `framebridge` – channel from scheduler listeners to frame events
//! - `segmentstore` – the animation segment table, looked up by name
//! - `settings` – INI-backed scheduler and demo settings
//! - `worldtime` – simulation time and delta
pub mod animationclock;
pub mod framebridge;
pub mod segmentstore;
pub mod settings;
pub mod worldtime;
