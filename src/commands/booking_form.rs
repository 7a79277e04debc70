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

use super::{DomainLogic, Error};

#[derive(Clone, Debug)]
pub struct BookingFormRequest {
    pub club: String,
    pub competition: String,
}

/// Club and competition a booking form is shown for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingForm {
    pub club: Club,
    pub competition: Competition,
}

impl<D, C> Service<BookingFormRequest> for DomainLogic<D, C>
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    type Response = BookingForm;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: BookingFormRequest) -> Self::Future {
        let database = self.database.clone();
        Box::pin(async move {
            let club = database
                .find_club_by_name(&req.club)
                .await?
                .ok_or(Error::ClubNotFound(req.club))?;
            let competition = database
                .find_competition_by_name(&req.competition)
                .await?
                .ok_or(Error::CompetitionNotFound(req.competition))?;

            Ok(BookingForm { club, competition })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{clock::MockClockPort, database::MockDatabasePort};
    use chrono::NaiveDate;
    use mockall::predicate::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn request(club: &str, competition: &str) -> BookingFormRequest {
        BookingFormRequest {
            club: club.to_string(),
            competition: competition.to_string(),
        }
    }

    #[tokio::test]
    async fn test_call() {
        // GIVEN a database port that knows both names
        let date = NaiveDate::from_ymd_opt(2030, 10, 22)
            .and_then(|d| d.and_hms_opt(13, 30, 0))
            .unwrap();
        let mut database = MockDatabasePort::new();
        database
            .expect_find_club_by_name()
            .times(1)
            .with(eq("She Lifts"))
            .returning(|_| Ok(Some(Club::new("She Lifts", "kate@shelifts.co.uk", 12))));
        database
            .expect_find_competition_by_name()
            .times(1)
            .with(eq("Fall Classic"))
            .returning(move |_| Ok(Some(Competition::new("Fall Classic", date, 13))));
        let domain = DomainLogic::new(Arc::new(database), Arc::new(MockClockPort::new()));

        // WHEN requesting the form
        let res = domain.oneshot(request("She Lifts", "Fall Classic")).await;

        // THEN both entities are returned
        assert_that!(res).is_ok().matches(|form| {
            form.club.name == "She Lifts" && form.competition.number_of_places == 13
        });
    }

    #[tokio::test]
    async fn test_call_unknown_club() {
        let mut database = MockDatabasePort::new();
        database
            .expect_find_club_by_name()
            .times(1)
            .returning(|_| Ok(None));
        database.expect_find_competition_by_name().never();
        let domain = DomainLogic::new(Arc::new(database), Arc::new(MockClockPort::new()));

        let res = domain.oneshot(request("Nobody", "Fall Classic")).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::ClubNotFound(name) if name == "Nobody"));
    }

    #[tokio::test]
    async fn test_call_unknown_competition() {
        let mut database = MockDatabasePort::new();
        database
            .expect_find_club_by_name()
            .returning(|_| Ok(Some(Club::new("She Lifts", "kate@shelifts.co.uk", 12))));
        database
            .expect_find_competition_by_name()
            .returning(|_| Ok(None));
        let domain = DomainLogic::new(Arc::new(database), Arc::new(MockClockPort::new()));

        let res = domain.oneshot(request("She Lifts", "Nothing")).await;

        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::CompetitionNotFound(_)));
    }
}
