use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Club, Competition},
    ports::{clock::ClockPort, database::DatabasePort},
};
use tower::Service;
use tracing::{debug, info};

use super::{DomainLogic, Error};

/// Login by email
///
/// There is no credential check: knowing a secretary's email is enough to act for the club.
#[derive(Clone, Debug)]
pub struct ShowSummaryRequest {
    pub email: String,
}

/// Dashboard of a club that is already logged in
#[derive(Clone, Debug)]
pub struct ClubSummaryRequest {
    pub club: String,
}

/// Everything the club dashboard shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub club: Club,
    pub competitions: Vec<Competition>,
}

impl<D, C> Service<ShowSummaryRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = Summary;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShowSummaryRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let Some(club) = database.find_club_by_email(&req.email).await? else {
                debug!(email = %req.email, "unknown email");
                return Err(Error::EmailNotFound);
            };
            let competitions = database.list_competitions().await?;
            info!(club = %club.name, "club logged in");

            Ok(Summary { club, competitions })
        })
    }
}

impl<D, C> Service<ClubSummaryRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = Summary;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ClubSummaryRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let club = database
                .find_club_by_name(&req.club)
                .await?
                .ok_or(Error::ClubNotFound(req.club))?;
            let competitions = database.list_competitions().await?;

            Ok(Summary { club, competitions })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::database::memory::MemoryDatabase, ports::clock::MockClockPort};
    use chrono::NaiveDate;
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[fixture]
    fn domain() -> DomainLogic<MemoryDatabase, MockClockPort> {
        let date = NaiveDate::from_ymd_opt(2030, 3, 27)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        let database = MemoryDatabase::new(
            vec![
                Club::new("Simply Lift", "john@simplylift.co", 13),
                Club::new("Iron Temple", "admin@irontemple.com", 4),
            ],
            vec![
                Competition::new("Spring Festival", date, 25),
                Competition::new("Fall Classic", date, 13),
            ],
        );
        DomainLogic::new(Arc::new(database), Arc::new(MockClockPort::new()))
    }

    #[rstest]
    #[tokio::test]
    async fn test_call(domain: DomainLogic<MemoryDatabase, MockClockPort>) {
        // WHEN logging in with a known email
        let res = domain
            .oneshot(ShowSummaryRequest {
                email: "admin@irontemple.com".to_string(),
            })
            .await;

        // THEN the club and every competition are returned
        assert_that!(res).is_ok().matches(|summary| {
            summary.club.name == "Iron Temple"
                && summary.club.points == 4
                && summary.competitions.len() == 2
        });
    }

    #[rstest]
    #[case("nonexistent@email.com")]
    #[case("")]
    #[case("john@simplylift.co ")]
    #[tokio::test]
    async fn test_call_unknown_email(
        domain: DomainLogic<MemoryDatabase, MockClockPort>,
        #[case] email: &str,
    ) {
        let res = domain
            .oneshot(ShowSummaryRequest {
                email: email.to_string(),
            })
            .await;

        assert_that!(res).is_err().matches(|err| {
            matches!(err, Error::EmailNotFound)
                && err.to_string() == "Sorry, that email was not found."
        });
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_club_summary(domain: DomainLogic<MemoryDatabase, MockClockPort>) {
        let res = domain
            .clone()
            .oneshot(ClubSummaryRequest {
                club: "Simply Lift".to_string(),
            })
            .await;
        assert_that!(res)
            .is_ok()
            .matches(|summary| summary.club.email == "john@simplylift.co");

        let res = domain
            .oneshot(ClubSummaryRequest {
                club: "john@simplylift.co".to_string(),
            })
            .await;
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::ClubNotFound(_)));
    }
}
