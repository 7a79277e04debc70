//! HTML pages

use axum::response::Html;
use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::{
    commands::{booking_form::BookingForm, show_summary::Summary},
    domain::{Club, DATE_FORMAT, MAX_PLACES_PER_BOOKING},
};

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | GUDLFT</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    ))
}

fn notices(notice: Option<&str>) -> String {
    notice
        .map(|message| format!("<ul class=\"notices\"><li>{}</li></ul>\n", escape(message)))
        .unwrap_or_default()
}

pub fn index(notice: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Welcome to the GUDLFT Registration Portal!</h1>\n\
         <p>Please enter your secretary email to continue:</p>\n\
         {}\
         <form action=\"/showSummary\" method=\"post\">\n\
         <label for=\"email\">Email:</label>\n\
         <input type=\"email\" name=\"email\" id=\"email\">\n\
         <button type=\"submit\">Enter</button>\n\
         </form>\n\
         <p><a href=\"/leaderboard\">View the points board</a></p>\n",
        notices(notice)
    );
    page("Registration", &body)
}

/// Club dashboard
///
/// Competitions that already took place at `now` are listed without a booking link.
pub fn welcome(summary: &Summary, now: NaiveDateTime, notice: Option<&str>) -> Html<String> {
    let club = &summary.club;
    let mut body = format!(
        "<h2>Welcome, {}</h2>\n<a href=\"/logout\">Logout</a>\n{}\
         <p>Points available: {}</p>\n<h3>Competitions:</h3>\n<ul>\n",
        escape(&club.email),
        notices(notice),
        club.points
    );
    for competition in &summary.competitions {
        body.push_str(&format!(
            "<li>{}<br>Date: {}<br>Number of Places: {}",
            escape(&competition.name),
            competition.date.format(DATE_FORMAT),
            competition.number_of_places
        ));
        if competition.is_upcoming(now) {
            body.push_str(&format!(
                "<br><a href=\"/book/{}/{}\">Book Places</a>",
                path_segment(&competition.name),
                path_segment(&club.name)
            ));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");
    page("Summary", &body)
}

pub fn booking(form: &BookingForm) -> Html<String> {
    let body = format!(
        "<h2>{competition}</h2>\n\
         <p>Places available: {places}</p>\n\
         <form action=\"/purchasePlaces\" method=\"post\">\n\
         <input type=\"hidden\" name=\"club\" value=\"{club}\">\n\
         <input type=\"hidden\" name=\"competition\" value=\"{competition}\">\n\
         <label for=\"places\">How many places?</label>\n\
         <input type=\"number\" name=\"places\" id=\"places\" min=\"1\" max=\"{max}\">\n\
         <button type=\"submit\">Book</button>\n\
         </form>\n",
        competition = escape(&form.competition.name),
        club = escape(&form.club.name),
        places = form.competition.number_of_places,
        max = MAX_PLACES_PER_BOOKING,
    );
    page(&format!("Booking for {}", form.competition.name), &body)
}

pub fn leaderboard(clubs: &[Club]) -> Html<String> {
    let rows: String = clubs
        .iter()
        .enumerate()
        .map(|(rank, club)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                rank + 1,
                escape(&club.name),
                club.points
            )
        })
        .collect();
    let body = format!(
        "<h1>Leaderboard</h1>\n\
         <table>\n<thead><tr><th>Rank</th><th>Club</th><th>Points</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n\
         <p><a href=\"/\">Back to login</a></p>\n"
    );
    page("Points Board", &body)
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        "{}<p><a href=\"/\">Back to login</a></p>\n",
        notices(Some(message))
    );
    page("Error", &body)
}

fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Competition;
    use chrono::{Duration, NaiveDate};
    use speculoos::prelude::*;

    #[test]
    fn test_escape() {
        assert_that!(escape("<b>Tom & Jerry's</b>").as_str())
            .is_equal_to("&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;");
    }

    #[test]
    fn test_path_segment() {
        assert_that!(path_segment("Spring Festival").as_str()).is_equal_to("Spring%20Festival");
    }

    #[test]
    fn test_leaderboard_rows() {
        let clubs = vec![
            Club::new("She Lifts", "kate@shelifts.co.uk", 12),
            Club::new("Iron Temple", "admin@irontemple.com", 4),
        ];

        let Html(html) = leaderboard(&clubs);

        assert_that!(html).contains("<tr><td>1</td><td>She Lifts</td><td>12</td></tr>\n");
        assert_that!(html).contains("<tr><td>2</td><td>Iron Temple</td><td>4</td></tr>\n");
    }

    #[test]
    fn test_welcome_links_upcoming_only() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let summary = Summary {
            club: Club::new("Simply Lift", "john@simplylift.co", 13),
            competitions: vec![
                Competition::new("Spring Festival", now + Duration::days(1), 25),
                Competition::new("Winter Marathon", now - Duration::days(1), 20),
            ],
        };

        let Html(html) = welcome(&summary, now, Some("Great-booking complete!"));

        assert_that!(html).contains("Welcome, john@simplylift.co");
        assert_that!(html).contains("Points available: 13");
        assert_that!(html).contains("Great-booking complete!");
        assert_that!(html).contains("/book/Spring%20Festival/Simply%20Lift");
        assert_that!(html.contains("/book/Winter%20Marathon")).is_false();
    }
}
