use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    domain::MAX_PLACES_PER_BOOKING,
    ports::{clock::ClockPort, database},
};

pub mod booking_form;
pub mod leaderboard;
pub mod purchase_places;
pub mod show_summary;

/// Message shown once a booking is committed
pub const BOOKING_COMPLETE: &str = "Great-booking complete!";

pub struct DomainLogic<D, C> {
    database: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> DomainLogic<D, C> {
    pub fn new(database: Arc<D>, clock: Arc<C>) -> Self {
        Self { database, clock }
    }
}

impl<D, C: ClockPort> DomainLogic<D, C> {
    /// Instant the booking rules are evaluated against
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

// Derive would require `D: Clone` and `C: Clone`
impl<D, C> Clone for DomainLogic<D, C> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// Errors returned by the commands
///
/// The `Display` output of every variant but [`Error::Database`] is meant to be shown to the
/// club secretary as is.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("database port error: {0:?}")]
    Database(database::Error),

    #[error("Sorry, that email was not found.")]
    EmailNotFound,
    #[error("Something went wrong-please try again")]
    ClubNotFound(String),
    #[error("Something went wrong-please try again")]
    CompetitionNotFound(String),

    /// The number of places is not a positive integer
    #[error("Please enter a valid positive number of places.")]
    MalformedPlaces(String),

    #[error("Cannot book places for past competitions.")]
    PastCompetition,
    #[error("You cannot book more than {} places per competition.", MAX_PLACES_PER_BOOKING)]
    ExceedsPlaceCap { requested: u32 },
    #[error("Not enough points. You need {cost} points but only have {balance}.")]
    InsufficientPoints { cost: u32, balance: u32 },
}

impl Error {
    /// Whether the request was well-formed but broke a booking rule
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Error::PastCompetition | Error::ExceedsPlaceCap { .. } | Error::InsufficientPoints { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::EmailNotFound | Error::ClubNotFound(_) | Error::CompetitionNotFound(_)
        )
    }
}

impl From<database::Error> for Error {
    fn from(err: database::Error) -> Self {
        match err {
            // The balance changed between validation and commit
            database::Error::NegativePointsTotal {
                current_points,
                cost,
            } => Error::InsufficientPoints {
                cost,
                balance: current_points,
            },
            database::Error::ClubDoesNotExist(name) => Error::ClubNotFound(name),
            database::Error::CompetitionDoesNotExist(name) => Error::CompetitionNotFound(name),
            err => Error::Database(err),
        }
    }
}
