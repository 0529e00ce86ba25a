use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::sale_service::{SaleContext, SaleReceipt};
use crate::domain::lookup::SENTINEL;
use crate::domain::models::{Order, OrderSnackLine, RecordId, SnackCombo, Ticket, TicketCategory};
use crate::domain::money::{self, Money};
use crate::domain::pricing::{PriceTable, SaleQuote, SnackSelection};
use crate::errors::AppError;

use super::SaleHandle;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Ticket category plus `{comboId: quantity}`; a quantity of 0 drops the combo.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SaleRequest {
    pub category: TicketCategory,
    #[schema(value_type = Object)]
    pub snacks: SnackSelection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketPrices {
    #[serde(serialize_with = "money::serialize")]
    #[schema(value_type = f64)]
    pub full: Money,
    #[serde(serialize_with = "money::serialize")]
    #[schema(value_type = f64)]
    pub half: Money,
}

impl From<&PriceTable> for TicketPrices {
    fn from(prices: &PriceTable) -> Self {
        Self {
            full: prices.ticket_price(TicketCategory::Full),
            half: prices.ticket_price(TicketCategory::Half),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleContextView {
    #[schema(value_type = String)]
    pub showtime_id: RecordId,
    pub date_time: String,
    pub movie_title: String,
    pub room_number: String,
    /// `null` when the showtime's room no longer exists.
    pub capacity: Option<u32>,
    pub sold: usize,
    pub seats_available: Option<u32>,
    pub can_sell: bool,
    pub ticket_prices: TicketPrices,
    pub combos: Vec<SnackCombo>,
}

impl SaleContextView {
    fn new(context: SaleContext, prices: &PriceTable) -> Self {
        let availability = context.availability();
        Self {
            can_sell: !context.is_blocked(),
            showtime_id: context.showtime.id,
            date_time: context.showtime.date_time,
            movie_title: context
                .movie
                .map(|m| m.title)
                .unwrap_or_else(|| SENTINEL.to_string()),
            room_number: context
                .room
                .map(|r| r.number.to_string())
                .unwrap_or_else(|| SENTINEL.to_string()),
            capacity: availability.map(|a| a.capacity()),
            sold: context.sold,
            seats_available: availability.map(|a| a.seats_left()),
            ticket_prices: TicketPrices::from(prices),
            combos: context.combos,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub category: TicketCategory,
    #[serde(serialize_with = "money::serialize")]
    #[schema(value_type = f64)]
    pub ticket_price: Money,
    pub snack_lines: Vec<OrderSnackLine>,
    #[serde(serialize_with = "money::serialize")]
    #[schema(value_type = f64)]
    pub snack_subtotal: Money,
    #[serde(serialize_with = "money::serialize")]
    #[schema(value_type = f64)]
    pub total: Money,
}

impl From<SaleQuote> for QuoteView {
    fn from(q: SaleQuote) -> Self {
        Self {
            category: q.category,
            ticket_price: q.ticket_price,
            snack_lines: q.snack_lines,
            snack_subtotal: q.snack_subtotal,
            total: q.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceiptView {
    pub ticket: Ticket,
    pub order: Order,
    pub quote: QuoteView,
    pub seats_left: Option<u32>,
}

impl From<SaleReceipt> for SaleReceiptView {
    fn from(r: SaleReceipt) -> Self {
        Self {
            ticket: r.ticket,
            order: r.order,
            quote: r.quote.into(),
            seats_left: r.seats_left,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /showtimes/{id}/sale
///
/// Showtime, movie, room, sold tickets and combos fetched together, with the
/// availability derived from scratch.
#[utoipa::path(
    get,
    path = "/showtimes/{id}/sale",
    params(("id" = String, Path, description = "Showtime id")),
    responses(
        (status = 200, description = "Sale screen context", body = SaleContextView),
        (status = 404, description = "Showtime not found"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "sales"
)]
pub async fn sale_context(
    service: web::Data<SaleHandle>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let context = service.load_context(&RecordId::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(SaleContextView::new(context, service.prices())))
}

/// POST /showtimes/{id}/sale/quote
///
/// Prices a selection against freshly loaded combos without writing anything.
#[utoipa::path(
    post,
    path = "/showtimes/{id}/sale/quote",
    params(("id" = String, Path, description = "Showtime id")),
    request_body = SaleRequest,
    responses(
        (status = 200, description = "Priced selection", body = QuoteView),
        (status = 404, description = "Showtime not found"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "sales"
)]
pub async fn quote_sale(
    service: web::Data<SaleHandle>,
    path: web::Path<String>,
    body: web::Json<SaleRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let context = service.load_context(&RecordId::new(path.into_inner())).await?;
    let quote = service.quote(&context, body.category, &body.snacks);
    Ok(HttpResponse::Ok().json(QuoteView::from(quote)))
}

/// POST /showtimes/{id}/sale
///
/// Records the ticket, then the order. The two writes are independent: if
/// the order fails the ticket is not rolled back.
#[utoipa::path(
    post,
    path = "/showtimes/{id}/sale",
    params(("id" = String, Path, description = "Showtime id")),
    request_body = SaleRequest,
    responses(
        (status = 201, description = "Ticket and order recorded", body = SaleReceiptView),
        (status = 404, description = "Showtime not found"),
        (status = 409, description = "No seats available for this showtime"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "sales"
)]
pub async fn confirm_sale(
    service: web::Data<SaleHandle>,
    path: web::Path<String>,
    body: web::Json<SaleRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let receipt = service
        .confirm(&RecordId::new(path.into_inner()), body.category, &body.snacks)
        .await?;
    Ok(HttpResponse::Created().json(SaleReceiptView::from(receipt)))
}
