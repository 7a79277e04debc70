//! JSON datasets the store is seeded from
//!
//! Numbers are stored as strings in these files. They are parsed once here, and only turned
//! back into strings by [`ClubsFile::from_clubs`] and [`CompetitionsFile::from_competitions`].

use std::{collections::HashSet, fs, path::Path};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Club, Competition, DATE_FORMAT};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field} for {name}: {value:?}")]
    InvalidNumber {
        name: String,
        field: &'static str,
        value: String,
    },
    #[error("invalid date for {name}: {value:?}")]
    InvalidDate { name: String, value: String },
    #[error("duplicate club name {0}")]
    DuplicateClub(String),
    #[error("duplicate club email {0}")]
    DuplicateEmail(String),
    #[error("duplicate competition name {0}")]
    DuplicateCompetition(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClubRecord {
    pub name: String,
    pub email: String,
    pub points: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompetitionRecord {
    pub name: String,
    pub date: String,
    #[serde(rename = "numberOfPlaces")]
    pub number_of_places: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClubsFile {
    pub clubs: Vec<ClubRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompetitionsFile {
    pub competitions: Vec<CompetitionRecord>,
}

impl ClubsFile {
    pub fn into_clubs(self) -> Result<Vec<Club>, Error> {
        let mut names = HashSet::new();
        let mut emails = HashSet::new();

        self.clubs
            .into_iter()
            .map(|record| {
                if !names.insert(record.name.clone()) {
                    return Err(Error::DuplicateClub(record.name));
                }
                if !emails.insert(record.email.clone()) {
                    return Err(Error::DuplicateEmail(record.email));
                }
                let points = record.points.trim().parse().map_err(|_| Error::InvalidNumber {
                    name: record.name.clone(),
                    field: "points",
                    value: record.points.clone(),
                })?;

                Ok(Club::new(record.name, record.email, points))
            })
            .collect()
    }

    pub fn from_clubs(clubs: &[Club]) -> Self {
        Self {
            clubs: clubs
                .iter()
                .map(|club| ClubRecord {
                    name: club.name.clone(),
                    email: club.email.clone(),
                    points: club.points.to_string(),
                })
                .collect(),
        }
    }
}

impl CompetitionsFile {
    pub fn into_competitions(self) -> Result<Vec<Competition>, Error> {
        let mut names = HashSet::new();

        self.competitions
            .into_iter()
            .map(|record| {
                if !names.insert(record.name.clone()) {
                    return Err(Error::DuplicateCompetition(record.name));
                }
                let date = NaiveDateTime::parse_from_str(record.date.trim(), DATE_FORMAT)
                    .map_err(|_| Error::InvalidDate {
                        name: record.name.clone(),
                        value: record.date.clone(),
                    })?;
                let number_of_places = record
                    .number_of_places
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidNumber {
                        name: record.name.clone(),
                        field: "numberOfPlaces",
                        value: record.number_of_places.clone(),
                    })?;

                Ok(Competition::new(record.name, date, number_of_places.into()))
            })
            .collect()
    }

    pub fn from_competitions(competitions: &[Competition]) -> Self {
        Self {
            competitions: competitions
                .iter()
                .map(|competition| CompetitionRecord {
                    name: competition.name.clone(),
                    date: competition.date.format(DATE_FORMAT).to_string(),
                    number_of_places: competition.number_of_places.to_string(),
                })
                .collect(),
        }
    }
}

pub fn parse_clubs(json: &str) -> Result<Vec<Club>, Error> {
    serde_json::from_str::<ClubsFile>(json)?.into_clubs()
}

pub fn parse_competitions(json: &str) -> Result<Vec<Competition>, Error> {
    serde_json::from_str::<CompetitionsFile>(json)?.into_competitions()
}

pub fn load_clubs(path: impl AsRef<Path>) -> Result<Vec<Club>, Error> {
    parse_clubs(&read(path.as_ref())?)
}

pub fn load_competitions(path: impl AsRef<Path>) -> Result<Vec<Competition>, Error> {
    parse_competitions(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}
