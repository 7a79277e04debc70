use crate::{
    domain::{Booking, Club, Competition},
    ports::database::{DatabasePort, Error},
};
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::warn;
use uuid::Uuid;

use super::dataset::{self, ClubsFile, CompetitionsFile};

#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    store: Arc<Mutex<Store>>,
}

/// Both collections live behind the same lock so a booking updates them in one step.
#[derive(Debug)]
struct Store {
    clubs: Vec<Club>,
    competitions: Vec<Competition>,
}

impl MemoryDatabase {
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                clubs,
                competitions,
            })),
        }
    }

    /// Seed the store from the clubs and competitions datasets
    pub fn load(
        clubs_path: impl AsRef<Path>,
        competitions_path: impl AsRef<Path>,
    ) -> Result<Self, dataset::Error> {
        let clubs = dataset::load_clubs(clubs_path)?;
        let competitions = dataset::load_competitions(competitions_path)?;
        Ok(Self::new(clubs, competitions))
    }

    /// Current state in the dataset format
    pub fn snapshot(&self) -> Result<(ClubsFile, CompetitionsFile), Error> {
        let store = self.lock()?;
        Ok((
            ClubsFile::from_clubs(&store.clubs),
            CompetitionsFile::from_competitions(&store.competitions),
        ))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, Error> {
        Ok(self.store.lock()?)
    }
}

#[async_trait::async_trait]
impl DatabasePort for MemoryDatabase {
    async fn list_clubs(&self) -> Result<Vec<Club>, Error> {
        Ok(self.lock()?.clubs.clone())
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, Error> {
        Ok(self.lock()?.competitions.clone())
    }

    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error> {
        Ok(self
            .lock()?
            .clubs
            .iter()
            .find(|club| club.email == email)
            .cloned())
    }

    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error> {
        Ok(self
            .lock()?
            .clubs
            .iter()
            .find(|club| club.name == name)
            .cloned())
    }

    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error> {
        Ok(self
            .lock()?
            .competitions
            .iter()
            .find(|competition| competition.name == name)
            .cloned())
    }

    async fn book_places(
        &self,
        club_name: &str,
        competition_name: &str,
        places: u32,
        cost: u32,
    ) -> Result<Booking, Error> {
        let mut store = self.lock()?;
        let Store {
            clubs,
            competitions,
        } = &mut *store;

        let club = clubs
            .iter_mut()
            .find(|club| club.name == club_name)
            .ok_or_else(|| Error::ClubDoesNotExist(club_name.to_string()))?;
        let competition = competitions
            .iter_mut()
            .find(|competition| competition.name == competition_name)
            .ok_or_else(|| Error::CompetitionDoesNotExist(competition_name.to_string()))?;

        // Return an error if this would make the number of points negative
        let new_points = club
            .points
            .checked_sub(cost)
            .ok_or(Error::NegativePointsTotal {
                current_points: club.points,
                cost,
            })?;

        // Nothing has been modified before this point
        club.points = new_points;
        competition.number_of_places -= i64::from(places);
        if competition.is_overbooked() {
            warn!(
                competition = %competition.name,
                remaining = competition.number_of_places,
                "competition is overbooked"
            );
        }

        Ok(Booking {
            booking_id: Uuid::new_v4(),
            club: club.clone(),
            competition: competition.clone(),
            places,
            cost,
        })
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
