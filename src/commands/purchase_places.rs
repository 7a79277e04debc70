use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use crate::{
    domain::{Booking, Club, Competition, MAX_PLACES_PER_BOOKING},
    ports::{clock::ClockPort, database::DatabasePort},
};
use chrono::NaiveDateTime;
use tower::Service;
use tracing::{info, warn};

use super::{DomainLogic, Error};

/// Raw booking request, as submitted by the booking form
#[derive(Clone, Debug)]
pub struct PurchasePlacesRequest {
    pub club: String,
    pub competition: String,
    /// Number of places to book
    ///
    /// This is validated by the command, and must be a positive integer.
    pub places: String,
}

impl<D, C> Service<PurchasePlacesRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = Booking;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PurchasePlacesRequest) -> Self::Future {
        let database = self.database.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            let res = purchase(database, clock, &req).await;
            match &res {
                Ok(booking) => info!(
                    booking_id = %booking.booking_id,
                    club = %booking.club.name,
                    competition = %booking.competition.name,
                    places = booking.places,
                    cost = booking.cost,
                    "booking complete"
                ),
                Err(Error::Database(err)) => warn!(
                    club = %req.club,
                    competition = %req.competition,
                    "booking failed: {err}"
                ),
                Err(err) => warn!(
                    club = %req.club,
                    competition = %req.competition,
                    places = %req.places,
                    "booking rejected: {err}"
                ),
            }
            res
        })
    }
}

async fn purchase<D, C>(
    database: Arc<D>,
    clock: Arc<C>,
    req: &PurchasePlacesRequest,
) -> Result<Booking, Error>
where
    D: DatabasePort,
    C: ClockPort,
{
    // Fetch necessary data
    let competition = database
        .find_competition_by_name(&req.competition)
        .await?
        .ok_or_else(|| Error::CompetitionNotFound(req.competition.clone()))?;
    let club = database
        .find_club_by_name(&req.club)
        .await?
        .ok_or_else(|| Error::ClubNotFound(req.club.clone()))?;
    let places = parse_places(&req.places)?;

    let cost = validate(&club, &competition, places, clock.now())?;

    // The store checks the balance again while applying both changes
    let booking = database
        .book_places(&club.name, &competition.name, places, cost)
        .await?;

    Ok(booking)
}

/// Parse the number of places, which must be a positive integer
///
/// Integers too large for a `u32` saturate to `u32::MAX`, so they still fail the
/// per-booking cap instead of being reported as malformed.
fn parse_places(raw: &str) -> Result<u32, Error> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedPlaces(raw.to_string()));
    }

    // Only digits are left, so parsing can only fail on overflow
    let places = digits.parse::<u32>().unwrap_or(u32::MAX);
    if places == 0 {
        return Err(Error::MalformedPlaces(raw.to_string()));
    }

    Ok(places)
}

/// Check the booking rules, in order, and return the cost in points
///
/// The first rule that fails decides the error.
fn validate(
    club: &Club,
    competition: &Competition,
    places: u32,
    now: NaiveDateTime,
) -> Result<u32, Error> {
    if !competition.is_upcoming(now) {
        return Err(Error::PastCompetition);
    }

    if places > MAX_PLACES_PER_BOOKING {
        return Err(Error::ExceedsPlaceCap { requested: places });
    }

    let cost = Club::cost_of(places);
    if !club.can_afford(places) {
        return Err(Error::InsufficientPoints {
            cost,
            balance: club.points,
        });
    }

    Ok(cost)
}
