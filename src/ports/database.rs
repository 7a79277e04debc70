use crate::domain::{Booking, Club, Competition};

#[mockall::automock]
#[async_trait::async_trait]
pub trait DatabasePort: Send + Sync {
    /// All clubs, in dataset order
    async fn list_clubs(&self) -> Result<Vec<Club>, Error>;
    /// All competitions, in dataset order
    async fn list_competitions(&self) -> Result<Vec<Competition>, Error>;

    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error>;
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error>;
    async fn find_competition_by_name(&self, name: &str) -> Result<Option<Competition>, Error>;

    /// Debit `cost` points from the club and remove `places` from the competition
    ///
    /// Both changes are applied together or not at all.
    async fn book_places(
        &self,
        club_name: &str,
        competition_name: &str,
        places: u32,
        cost: u32,
    ) -> Result<Booking, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Trying to debit more points than the club holds
    ///
    /// This would result in a negative points balance, which is not supported.
    #[error("trying to subtract too many points: {cost} from {current_points}")]
    NegativePointsTotal { current_points: u32, cost: u32 },

    /// Domain-level error when a club does not exist
    #[error("club {0} does not exist")]
    ClubDoesNotExist(String),

    /// Domain-level error when a competition does not exist
    #[error("competition {0} does not exist")]
    CompetitionDoesNotExist(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as a poisoned lock.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
