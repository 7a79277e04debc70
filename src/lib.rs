//! Club booking service for the GUDLFT competitions
//!
//! Club secretaries log in with their email, see upcoming competitions and spend their
//! club's points to reserve places, at 3 points per place and at most 12 places per booking.
//! A public leaderboard ranks clubs by remaining points.
//!
//! The crate follows a ports and adapters layout:
//! - [`domain`] holds the entities and the booking constants,
//! - [`ports`] declares what the commands need from the outside world,
//! - [`adapters`] implements those ports (in-memory store seeded from JSON, system clock),
//! - [`commands`] implements each use case as a [`tower::Service`],
//! - [`http`] exposes the commands as HTML pages.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod http;
pub mod ports;
