use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::{
    commands::{
        booking_form::BookingFormRequest,
        leaderboard::LeaderboardRequest,
        purchase_places::PurchasePlacesRequest,
        show_summary::{ClubSummaryRequest, ShowSummaryRequest},
        DomainLogic, Error, BOOKING_COMPLETE,
    },
    ports::{clock::ClockPort, database::DatabasePort},
};

pub mod views;

/// Value of the `notice` query parameter after a failed login
const EMAIL_NOT_FOUND_NOTICE: &str = "email_not_found";

pub fn router<D, C>(domain: DomainLogic<D, C>) -> Router
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/showSummary", post(show_summary::<D, C>))
        .route("/book/:competition/:club", get(book::<D, C>))
        .route("/purchasePlaces", post(purchase_places::<D, C>))
        .route("/leaderboard", get(leaderboard::<D, C>))
        .route("/logout", get(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(domain)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Database(err) => {
                error!("database error: {err}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error_page("Something went wrong-please try again"),
                )
                    .into_response();
            }
            err if err.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        (status, views::error_page(&self.to_string())).into_response()
    }
}

#[derive(Deserialize)]
struct IndexQuery {
    notice: Option<String>,
}

#[derive(Deserialize)]
struct EmailForm {
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
struct PurchaseForm {
    #[serde(default)]
    club: String,
    #[serde(default)]
    competition: String,
    #[serde(default)]
    places: String,
}

async fn index(Query(query): Query<IndexQuery>) -> Response {
    let notice = match query.notice.as_deref() {
        Some(EMAIL_NOT_FOUND_NOTICE) => Some(Error::EmailNotFound.to_string()),
        _ => None,
    };
    views::index(notice.as_deref()).into_response()
}

async fn show_summary<D, C>(
    State(domain): State<DomainLogic<D, C>>,
    Form(form): Form<EmailForm>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    let now = domain.now();
    match domain.oneshot(ShowSummaryRequest { email: form.email }).await {
        Ok(summary) => views::welcome(&summary, now, None).into_response(),
        Err(Error::EmailNotFound) => {
            Redirect::to(&format!("/?notice={EMAIL_NOT_FOUND_NOTICE}")).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn book<D, C>(
    State(domain): State<DomainLogic<D, C>>,
    Path((competition, club)): Path<(String, String)>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    match domain.oneshot(BookingFormRequest { club, competition }).await {
        Ok(form) => views::booking(&form).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn purchase_places<D, C>(
    State(domain): State<DomainLogic<D, C>>,
    Form(form): Form<PurchaseForm>,
) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    let club = form.club.clone();
    let notice = match domain
        .clone()
        .oneshot(PurchasePlacesRequest {
            club: form.club,
            competition: form.competition,
            places: form.places,
        })
        .await
    {
        Ok(_) => BOOKING_COMPLETE.to_string(),
        // Rejected bookings go back to the dashboard with the reason
        Err(err) if err.is_business_rule() || matches!(err, Error::MalformedPlaces(_)) => {
            err.to_string()
        }
        Err(err) => return err.into_response(),
    };

    let now = domain.now();
    match domain.oneshot(ClubSummaryRequest { club }).await {
        Ok(summary) => views::welcome(&summary, now, Some(&notice)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn leaderboard<D, C>(State(domain): State<DomainLogic<D, C>>) -> Response
where
    D: DatabasePort + 'static,
    C: ClockPort + 'static,
{
    match domain.oneshot(LeaderboardRequest).await {
        Ok(clubs) => views::leaderboard(&clubs).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn logout() -> Redirect {
    Redirect::to("/")
}
