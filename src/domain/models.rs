use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::money::Money;
use super::ports::Resource;

/// Opaque identifier issued by the remote store.
///
/// Stores hand out numeric or textual ids depending on the backend; both are
/// normalised to text so foreign keys always compare the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(s) => RecordId(s),
            WireId::Number(n) => RecordId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketCategory {
    #[default]
    Full,
    Half,
}

// ── Movies ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: RecordId,
    pub title: String,
    pub synopsis: String,
    pub rating: String,
    /// Running time in minutes.
    pub duration: u32,
    pub genre: String,
    /// Calendar dates are kept exactly as entered.
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    pub synopsis: String,
    pub rating: String,
    pub duration: u32,
    pub genre: String,
    pub start_date: String,
    pub end_date: String,
}

impl Resource for Movie {
    const PATH: &'static str = "movies";
    type Draft = MovieDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ── Rooms ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RecordId,
    pub number: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub number: u32,
    pub capacity: u32,
}

impl Resource for Room {
    const PATH: &'static str = "rooms";
    type Draft = RoomDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ── Showtimes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: RecordId,
    pub movie_id: RecordId,
    pub room_id: RecordId,
    /// Local date-time as entered, e.g. `2026-11-02T19:30`.
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeDraft {
    pub movie_id: RecordId,
    pub room_id: RecordId,
    pub date_time: String,
}

impl Resource for Showtime {
    const PATH: &'static str = "showtimes";
    type Draft = ShowtimeDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ── Tickets ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: RecordId,
    pub showtime_id: RecordId,
    pub category: TicketCategory,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub showtime_id: RecordId,
    pub category: TicketCategory,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub price: Money,
}

impl Resource for Ticket {
    const PATH: &'static str = "tickets";
    type Draft = TicketDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ── Snack combos ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnackCombo {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub unit_price: Money,
    pub units_per_combo: u32,
    /// Stored product of `unit_price` and `units_per_combo`.
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub subtotal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnackComboDraft {
    pub name: String,
    pub description: String,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub unit_price: Money,
    pub units_per_combo: u32,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub subtotal: Money,
}

impl Resource for SnackCombo {
    const PATH: &'static str = "snack-combos";
    type Draft = SnackComboDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnackLine {
    pub combo_id: RecordId,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub line_subtotal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub showtime_id: RecordId,
    pub tickets: Vec<Ticket>,
    pub snack_lines: Vec<OrderSnackLine>,
    pub full_count: u32,
    pub half_count: u32,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub showtime_id: RecordId,
    pub tickets: Vec<Ticket>,
    pub snack_lines: Vec<OrderSnackLine>,
    pub full_count: u32,
    pub half_count: u32,
    #[serde(with = "super::money")]
    #[schema(value_type = f64)]
    pub total_amount: Money,
}

impl Resource for Order {
    const PATH: &'static str = "orders";
    type Draft = OrderDraft;

    fn id(&self) -> &RecordId {
        &self.id
    }
}
