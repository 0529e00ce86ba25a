//! Console form validation.
//!
//! Each editable record has a loosely-typed form body; validation either
//! yields the draft sent to the store or one message per offending field.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::models::{
    Movie, MovieDraft, RecordId, Room, RoomDraft, Showtime, ShowtimeDraft, SnackCombo,
    SnackComboDraft,
};
use super::money::Money;
use super::ports::Editable;

const SHOWTIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const MIN_SYNOPSIS_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first failure for `field`; later ones are ignored.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&joined.join("; "))
    }
}

/// Inputs validation needs from outside the form itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub now: NaiveDateTime,
}

impl ValidationContext {
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Uses the console's local wall clock, the same clock staff enter
    /// showtimes in.
    pub fn local_now() -> Self {
        Self::at(Local::now().naive_local())
    }
}

fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

fn require_positive(errors: &mut FieldErrors, field: &str, value: Option<i64>, label: &str) -> u32 {
    match value {
        None => {
            errors.add(field, format!("{label} is required"));
            0
        }
        Some(n) if n <= 0 => {
            errors.add(field, format!("{label} must be greater than zero"));
            0
        }
        Some(n) => u32::try_from(n).unwrap_or_else(|_| {
            errors.add(field, format!("{label} is out of range"));
            0
        }),
    }
}

fn require_id(errors: &mut FieldErrors, field: &str, value: Option<RecordId>, message: &str) -> RecordId {
    match value {
        Some(id) if !id.is_blank() => id,
        _ => {
            errors.add(field, message);
            RecordId::new("")
        }
    }
}

/// Parses a showtime's local date-time as typed into the console.
pub fn parse_showtime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    SHOWTIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

// ── Movies ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieForm {
    pub title: String,
    pub synopsis: String,
    pub rating: String,
    pub duration: Option<i64>,
    pub genre: String,
    pub start_date: String,
    pub end_date: String,
}

impl Editable for Movie {
    type Form = MovieForm;

    fn validate(form: MovieForm, _ctx: &ValidationContext) -> Result<MovieDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = require_text(&mut errors, "title", &form.title, "Title is required");
        let synopsis = form.synopsis.trim().to_string();
        if synopsis.chars().count() < MIN_SYNOPSIS_CHARS {
            errors.add(
                "synopsis",
                format!("Synopsis must have at least {MIN_SYNOPSIS_CHARS} characters"),
            );
        }
        let rating = require_text(&mut errors, "rating", &form.rating, "Rating is required");
        let duration = require_positive(&mut errors, "duration", form.duration, "Duration");
        let genre = require_text(&mut errors, "genre", &form.genre, "Genre is required");
        let start_date =
            require_text(&mut errors, "startDate", &form.start_date, "Start date is required");
        let end_date = require_text(&mut errors, "endDate", &form.end_date, "End date is required");

        errors.into_result(|| MovieDraft {
            title,
            synopsis,
            rating,
            duration,
            genre,
            start_date,
            end_date,
        })
    }
}

// ── Rooms ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomForm {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
}

impl Editable for Room {
    type Form = RoomForm;

    fn validate(form: RoomForm, _ctx: &ValidationContext) -> Result<RoomDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let number = require_positive(&mut errors, "number", form.number, "Number");
        let capacity = require_positive(&mut errors, "capacity", form.capacity, "Capacity");
        errors.into_result(|| RoomDraft { number, capacity })
    }
}

// ── Showtimes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowtimeForm {
    #[schema(value_type = Option<String>)]
    pub movie_id: Option<RecordId>,
    #[schema(value_type = Option<String>)]
    pub room_id: Option<RecordId>,
    pub date_time: String,
}

impl Editable for Showtime {
    type Form = ShowtimeForm;

    fn validate(form: ShowtimeForm, ctx: &ValidationContext) -> Result<ShowtimeDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let movie_id = require_id(&mut errors, "movieId", form.movie_id, "Select a movie");
        let room_id = require_id(&mut errors, "roomId", form.room_id, "Select a room");
        let date_time = form.date_time.trim().to_string();
        if date_time.is_empty() {
            errors.add("dateTime", "Date and time are required");
        } else {
            match parse_showtime(&date_time) {
                None => errors.add("dateTime", "Date and time are not valid"),
                Some(at) if at < ctx.now => {
                    errors.add("dateTime", "A showtime cannot be scheduled in the past")
                }
                Some(_) => {}
            }
        }
        errors.into_result(|| ShowtimeDraft {
            movie_id,
            room_id,
            date_time,
        })
    }
}

// ── Snack combos ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SnackComboForm {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "super::money::option::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Money>,
    pub units_per_combo: Option<i64>,
}

impl Editable for SnackCombo {
    type Form = SnackComboForm;

    fn validate(
        form: SnackComboForm,
        _ctx: &ValidationContext,
    ) -> Result<SnackComboDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = require_text(&mut errors, "name", &form.name, "Name is required");
        let description = require_text(
            &mut errors,
            "description",
            &form.description,
            "Description is required",
        );
        let unit_price = match form.unit_price {
            Some(price) if price > Money::from(0) => price,
            Some(_) => {
                errors.add("unitPrice", "Unit price must be greater than zero");
                Money::from(0)
            }
            None => {
                errors.add("unitPrice", "Unit price is required");
                Money::from(0)
            }
        };
        let units_per_combo =
            require_positive(&mut errors, "unitsPerCombo", form.units_per_combo, "Units per combo");

        errors.into_result(|| SnackComboDraft {
            subtotal: &unit_price * Money::from(units_per_combo),
            name,
            description,
            unit_price,
            units_per_combo,
        })
    }
}
