//! Ticket-sale order computation and seat-availability reconciliation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lookup::Lookup;
use super::models::{OrderDraft, OrderSnackLine, RecordId, SnackCombo, Ticket, TicketCategory, TicketDraft};
use super::money::Money;

pub const DEFAULT_FULL_PRICE: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    full_price: Money,
}

impl PriceTable {
    pub fn new(full_price: Money) -> Self {
        Self { full_price }
    }

    pub fn ticket_price(&self, category: TicketCategory) -> Money {
        match category {
            TicketCategory::Full => self.full_price.clone(),
            TicketCategory::Half => &self.full_price / Money::from(2),
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(Money::from(DEFAULT_FULL_PRICE))
    }
}

/// Seats of one showtime, derived from scratch on every reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    capacity: u32,
    sold: usize,
}

impl Availability {
    pub fn new(capacity: u32, sold: usize) -> Self {
        Self { capacity, sold }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn sold(&self) -> usize {
        self.sold
    }

    /// Unclamped; negative when a room was oversold or shrunk.
    pub fn remaining(&self) -> i64 {
        // A count beyond i64 can only mean the room is far oversold.
        let sold = i64::try_from(self.sold).unwrap_or(i64::MAX);
        i64::from(self.capacity) - sold
    }

    /// Display figure, never below zero.
    pub fn seats_left(&self) -> u32 {
        u32::try_from(self.remaining().max(0)).unwrap_or(0)
    }

    pub fn can_sell(&self) -> bool {
        self.remaining() > 0
    }
}

/// Requested snack quantities keyed by combo id. Zero quantities are never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<RecordId, u32>")]
pub struct SnackSelection(BTreeMap<RecordId, u32>);

impl SnackSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity for a combo; zero removes the line.
    pub fn set(&mut self, combo_id: RecordId, quantity: u32) {
        if quantity == 0 {
            self.0.remove(&combo_id);
        } else {
            self.0.insert(combo_id, quantity);
        }
    }

    pub fn quantity(&self, combo_id: &RecordId) -> u32 {
        self.0.get(combo_id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, u32)> {
        self.0.iter().map(|(id, qty)| (id, *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<RecordId, u32>> for SnackSelection {
    fn from(raw: BTreeMap<RecordId, u32>) -> Self {
        raw.into_iter().collect()
    }
}

impl FromIterator<(RecordId, u32)> for SnackSelection {
    fn from_iter<I: IntoIterator<Item = (RecordId, u32)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (id, qty) in iter {
            selection.set(id, qty);
        }
        selection
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleQuote {
    pub category: TicketCategory,
    pub ticket_price: Money,
    pub snack_lines: Vec<OrderSnackLine>,
    pub snack_subtotal: Money,
    pub total: Money,
}

/// Prices one ticket plus the selected snacks against the current combo list.
///
/// Selected combos missing from `combos` contribute nothing.
pub fn quote(
    prices: &PriceTable,
    category: TicketCategory,
    selection: &SnackSelection,
    combos: &[SnackCombo],
) -> SaleQuote {
    let lookup = Lookup::build(combos);
    let snack_lines: Vec<OrderSnackLine> = selection
        .iter()
        .filter_map(|(id, quantity)| {
            lookup.get(id).map(|combo| OrderSnackLine {
                combo_id: combo.id.clone(),
                name: combo.name.clone(),
                quantity,
                line_subtotal: &combo.unit_price * Money::from(quantity),
            })
        })
        .collect();

    let snack_subtotal = snack_lines
        .iter()
        .fold(Money::from(0), |acc, line| acc + &line.line_subtotal);
    let ticket_price = prices.ticket_price(category);
    let total = &ticket_price + &snack_subtotal;

    SaleQuote {
        category,
        ticket_price,
        snack_lines,
        snack_subtotal,
        total,
    }
}

impl SaleQuote {
    pub fn ticket_draft(&self, showtime_id: &RecordId) -> TicketDraft {
        TicketDraft {
            showtime_id: showtime_id.clone(),
            category: self.category,
            price: self.ticket_price.clone(),
        }
    }

    /// The order written after `ticket` has been recorded.
    pub fn order_draft(&self, showtime_id: &RecordId, ticket: Ticket) -> OrderDraft {
        let (full_count, half_count) = match self.category {
            TicketCategory::Full => (1, 0),
            TicketCategory::Half => (0, 1),
        };
        OrderDraft {
            showtime_id: showtime_id.clone(),
            tickets: vec![ticket],
            snack_lines: self.snack_lines.clone(),
            full_count,
            half_count,
            total_amount: self.total.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::money::parse;

    fn combo(id: &str, unit_price: &str) -> SnackCombo {
        let unit_price = parse(unit_price).unwrap();
        SnackCombo {
            id: RecordId::new(id),
            name: format!("Combo {id}"),
            description: String::new(),
            subtotal: unit_price.clone(),
            unit_price,
            units_per_combo: 1,
        }
    }

    fn selection(pairs: &[(&str, u32)]) -> SnackSelection {
        pairs.iter().map(|(id, q)| (RecordId::new(*id), *q)).collect()
    }

    #[test]
    fn half_ticket_with_two_combos() {
        let prices = PriceTable::new(Money::from(30));
        let combos = vec![combo("A", "15"), combo("B", "8")];
        let quote = quote(
            &prices,
            TicketCategory::Half,
            &selection(&[("A", 2), ("B", 1)]),
            &combos,
        );

        assert_eq!(quote.ticket_price, Money::from(15));
        assert_eq!(quote.snack_subtotal, Money::from(38));
        assert_eq!(quote.total, Money::from(53));
        assert_eq!(quote.snack_lines.len(), 2);
        assert_eq!(quote.snack_lines[0].line_subtotal, Money::from(30));
    }

    #[test]
    fn half_price_is_exact_for_odd_bases() {
        let prices = PriceTable::new(parse("25").unwrap());
        assert_eq!(prices.ticket_price(TicketCategory::Full), Money::from(25));
        assert_eq!(prices.ticket_price(TicketCategory::Half), parse("12.5").unwrap());
    }

    #[test]
    fn stale_combo_ids_are_dropped() {
        let combos = vec![combo("A", "10")];
        let quote = quote(
            &PriceTable::default(),
            TicketCategory::Full,
            &selection(&[("A", 1), ("gone", 4)]),
            &combos,
        );
        assert_eq!(quote.snack_lines.len(), 1);
        assert_eq!(quote.snack_subtotal, Money::from(10));
        assert_eq!(quote.total, Money::from(40));
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut selected = selection(&[("A", 2)]);
        selected.set(RecordId::new("A"), 0);
        assert!(selected.is_empty());

        let from_wire: SnackSelection =
            serde_json::from_value(json!({ "A": 0, "B": 3 })).unwrap();
        assert_eq!(from_wire.quantity(&RecordId::new("A")), 0);
        assert_eq!(from_wire.quantity(&RecordId::new("B")), 3);
        assert_eq!(from_wire.iter().count(), 1);
    }

    #[test]
    fn total_without_snacks_is_the_ticket_price() {
        let quote = quote(
            &PriceTable::default(),
            TicketCategory::Full,
            &SnackSelection::new(),
            &[combo("A", "10")],
        );
        assert!(quote.snack_lines.is_empty());
        assert_eq!(quote.total, Money::from(30));
    }

    #[test]
    fn full_room_blocks_the_sale() {
        let availability = Availability::new(10, 10);
        assert_eq!(availability.seats_left(), 0);
        assert!(!availability.can_sell());
    }

    #[test]
    fn oversold_room_clamps_display_but_stays_blocked() {
        let availability = Availability::new(10, 12);
        assert_eq!(availability.remaining(), -2);
        assert_eq!(availability.seats_left(), 0);
        assert!(!availability.can_sell());
    }

    #[test]
    fn sold_count_above_u32_is_kept_exact() {
        let sold = usize::try_from(u64::from(u32::MAX) + 5).unwrap();
        let availability = Availability::new(10, sold);
        assert_eq!(availability.sold(), sold);
        assert_eq!(availability.remaining(), 10 - (i64::from(u32::MAX) + 5));
        assert!(!availability.can_sell());
    }

    #[test]
    fn availability_matches_capacity_minus_sold() {
        for capacity in 0..6u32 {
            for sold in 0..8usize {
                let availability = Availability::new(capacity, sold);
                let raw = i64::from(capacity) - sold as i64;
                assert_eq!(i64::from(availability.seats_left()), raw.max(0));
                assert_eq!(availability.can_sell(), raw > 0);
            }
        }
    }

    #[test]
    fn order_draft_counts_the_sold_category() {
        let quote = quote(
            &PriceTable::default(),
            TicketCategory::Half,
            &selection(&[("A", 1)]),
            &[combo("A", "4")],
        );
        let showtime = RecordId::new("s1");
        let ticket_draft = quote.ticket_draft(&showtime);
        let ticket = Ticket {
            id: RecordId::new("t1"),
            showtime_id: ticket_draft.showtime_id,
            category: ticket_draft.category,
            price: ticket_draft.price,
        };
        let order = quote.order_draft(&showtime, ticket);

        assert_eq!((order.full_count, order.half_count), (0, 1));
        assert_eq!(order.tickets.len(), 1);
        assert_eq!(order.total_amount, Money::from(19));
    }
}
