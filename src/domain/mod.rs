use chrono::NaiveDateTime;
use uuid::Uuid;

/// Points debited for every reserved place
pub const POINTS_PER_PLACE: u32 = 3;

/// Maximum number of places a club can reserve in a single booking
pub const MAX_PLACES_PER_BOOKING: u32 = 12;

/// Format used for competition dates in the datasets
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Club {
    /// Unique name of the club
    pub name: String,
    /// Email of the club secretary
    ///
    /// This is also the login key and is unique across clubs.
    pub email: String,
    /// Current balance of points available to book places
    pub points: u32,
}

impl Club {
    pub fn new(name: impl Into<String>, email: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            points,
        }
    }

    /// Points this club would spend to reserve `places`
    pub fn cost_of(places: u32) -> u32 {
        places.saturating_mul(POINTS_PER_PLACE)
    }

    pub fn can_afford(&self, places: u32) -> bool {
        Self::cost_of(places) <= self.points
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competition {
    /// Unique name of the competition
    pub name: String,
    /// When the competition takes place, in local time
    pub date: NaiveDateTime,
    /// Remaining places
    ///
    /// Bookings are not checked against this value, so it can drop below zero when a
    /// competition is overbooked.
    pub number_of_places: i64,
}

impl Competition {
    pub fn new(name: impl Into<String>, date: NaiveDateTime, number_of_places: i64) -> Self {
        Self {
            name: name.into(),
            date,
            number_of_places,
        }
    }

    /// Whether the competition is strictly after `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.date > now
    }

    pub fn is_overbooked(&self) -> bool {
        self.number_of_places < 0
    }
}

/// A committed booking
///
/// Bookings are not stored anywhere: this only carries the state of both entities right after
/// the points were debited and the places removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: Uuid,
    pub club: Club,
    pub competition: Competition,
    /// Number of places reserved
    pub places: u32,
    /// Points debited from the club
    pub cost: u32,
}

/// Clubs ranked by points, highest first
///
/// Clubs with the same number of points keep their relative order.
pub fn leaderboard(clubs: &[Club]) -> Vec<Club> {
    let mut ranked = clubs.to_vec();
    // `sort_by` is stable
    ranked.sort_by(|a, b| b.points.cmp(&a.points));
    ranked
}
