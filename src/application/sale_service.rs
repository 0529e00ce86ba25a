use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::models::{
    Movie, Order, RecordId, Room, Showtime, SnackCombo, Ticket, TicketCategory,
};
use crate::domain::ports::RecordStore;
use crate::domain::pricing::{self, Availability, PriceTable, SaleQuote, SnackSelection};

const TICKET_SHOWTIME_FIELD: &str = "showtimeId";

/// Everything the sale screen shows for one showtime, fetched in one go.
#[derive(Debug, Clone)]
pub struct SaleContext {
    pub showtime: Showtime,
    pub movie: Option<Movie>,
    pub room: Option<Room>,
    pub sold: usize,
    pub combos: Vec<SnackCombo>,
}

impl SaleContext {
    /// `None` when the showtime's room no longer resolves.
    pub fn availability(&self) -> Option<Availability> {
        self.room
            .as_ref()
            .map(|room| Availability::new(room.capacity, self.sold))
    }

    /// Only a known, exhausted room blocks a sale.
    pub fn is_blocked(&self) -> bool {
        matches!(self.availability(), Some(a) if !a.can_sell())
    }
}

#[derive(Debug, Clone)]
pub struct SaleReceipt {
    pub ticket: Ticket,
    pub order: Order,
    pub quote: SaleQuote,
    /// Seats left after the sale, from a fresh reload.
    pub seats_left: Option<u32>,
}

pub struct SaleService<S> {
    store: Arc<S>,
    prices: PriceTable,
}

impl<S: RecordStore> SaleService<S> {
    pub fn new(store: Arc<S>, prices: PriceTable) -> Self {
        Self { store, prices }
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub async fn load_context(&self, showtime_id: &RecordId) -> Result<SaleContext, DomainError> {
        let showtime: Showtime = self.store.get(showtime_id).await?;
        let (movies, rooms, tickets, combos) = futures::try_join!(
            self.store.list::<Movie>(),
            self.store.list::<Room>(),
            self.store
                .list_by::<Ticket>(TICKET_SHOWTIME_FIELD, &showtime.id),
            self.store.list::<SnackCombo>(),
        )?;

        let movie = movies.into_iter().find(|m| m.id == showtime.movie_id);
        let room = rooms.into_iter().find(|r| r.id == showtime.room_id);

        Ok(SaleContext {
            showtime,
            movie,
            room,
            sold: tickets.len(),
            combos,
        })
    }

    pub fn quote(
        &self,
        context: &SaleContext,
        category: TicketCategory,
        selection: &SnackSelection,
    ) -> SaleQuote {
        pricing::quote(&self.prices, category, selection, &context.combos)
    }

    /// Records one sale as two independent writes: the ticket, then the order.
    ///
    /// Nothing is rolled back. If the order write fails the ticket stays
    /// recorded and the gap is logged with the ticket id.
    pub async fn confirm(
        &self,
        showtime_id: &RecordId,
        category: TicketCategory,
        selection: &SnackSelection,
    ) -> Result<SaleReceipt, DomainError> {
        let context = self.load_context(showtime_id).await.map_err(|e| {
            log::error!("Loading sale context for showtime {} failed: {}", showtime_id, e);
            e
        })?;
        if context.is_blocked() {
            log::info!("Sale refused for showtime {}: no seats left", showtime_id);
            return Err(DomainError::NoSeatsAvailable);
        }

        let quote = self.quote(&context, category, selection);
        let showtime_id = &context.showtime.id;

        let ticket: Ticket = self
            .store
            .create::<Ticket>(&quote.ticket_draft(showtime_id))
            .await
            .map_err(|e| {
                log::error!("Recording ticket for showtime {} failed: {}", showtime_id, e);
                e
            })?;

        let order: Order = self
            .store
            .create::<Order>(&quote.order_draft(showtime_id, ticket.clone()))
            .await
            .map_err(|e| {
                log::error!(
                    "Ticket {} for showtime {} was recorded without a matching order: {}",
                    ticket.id,
                    showtime_id,
                    e
                );
                e
            })?;

        log::info!(
            "Sold {:?} ticket {} with order {} totalling {}",
            quote.category,
            ticket.id,
            order.id,
            order.total_amount
        );

        let seats_left = match self.load_context(showtime_id).await {
            Ok(fresh) => fresh.availability().map(|a| a.seats_left()),
            Err(e) => {
                log::warn!("Reloading showtime {} after sale failed: {}", showtime_id, e);
                None
            }
        };

        Ok(SaleReceipt {
            ticket,
            order,
            quote,
            seats_left,
        })
    }
}
