use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{self, Club},
    ports::{clock::ClockPort, database::DatabasePort},
};
use tower::Service;

use super::{DomainLogic, Error};

/// Public ranking of clubs by points
#[derive(Clone, Copy, Debug, Default)]
pub struct LeaderboardRequest;

impl<D, C> Service<LeaderboardRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = Vec<Club>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: LeaderboardRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let clubs = database.list_clubs().await?;
            Ok(domain::leaderboard(&clubs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::database::memory::MemoryDatabase,
        commands::purchase_places::PurchasePlacesRequest,
        domain::Competition,
        ports::{clock::MockClockPort, database::MockDatabasePort},
    };
    use chrono::{Duration, NaiveDate};
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_call() {
        let mut database = MockDatabasePort::new();
        database.expect_list_clubs().times(1).returning(|| {
            Ok(vec![
                Club::new("Simply Lift", "john@simplylift.co", 13),
                Club::new("Iron Temple", "admin@irontemple.com", 4),
                Club::new("She Lifts", "kate@shelifts.co.uk", 12),
            ])
        });
        let domain = DomainLogic::new(Arc::new(database), Arc::new(MockClockPort::new()));

        let res = domain.oneshot(LeaderboardRequest).await;

        assert_that!(res).is_ok().matches(|clubs| {
            clubs.iter().map(|c| c.points).collect::<Vec<_>>() == vec![13, 12, 4]
        });
    }

    #[tokio::test]
    async fn test_call_after_booking() {
        // GIVEN Simply Lift ahead of She Lifts
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let database = MemoryDatabase::new(
            vec![
                Club::new("Simply Lift", "john@simplylift.co", 13),
                Club::new("She Lifts", "kate@shelifts.co.uk", 12),
            ],
            vec![Competition::new(
                "Spring Festival",
                now + Duration::days(30),
                25,
            )],
        );
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now);
        let domain = DomainLogic::new(Arc::new(database), Arc::new(clock));

        // WHEN Simply Lift spends 3 points
        domain
            .clone()
            .oneshot(PurchasePlacesRequest {
                club: "Simply Lift".to_string(),
                competition: "Spring Festival".to_string(),
                places: "1".to_string(),
            })
            .await
            .unwrap();
        let res = domain.oneshot(LeaderboardRequest).await;

        // THEN the ranking reflects the new balance
        assert_that!(res).is_ok().matches(|clubs| {
            clubs[0].name == "She Lifts" && clubs[1].name == "Simply Lift" && clubs[1].points == 10
        });
    }
}
