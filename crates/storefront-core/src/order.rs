//! # Order Draft
//!
//! The pure half of order placement: request validation plus the running
//! total, kept separate from the transaction that reads and decrements stock.
//!
//! ## Assembly Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderDraft::new(customer, lines)   ← rejects empty / bad quantities   │
//! │       │                                                                 │
//! │       ▼   for each line, in request order (storefront-db):             │
//! │  conditional stock decrement ──► no row? abort, roll back everything   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draft.price_line(line, unit_price)  ← total += price × qty            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draft.total() written on the order row, then COMMIT                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::OrderLineRequest;
use crate::validation::validate_order_request;

/// An order being assembled: validated lines and the total so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    customer_id: i64,
    lines: Vec<OrderLineRequest>,
    total: Money,
    priced: usize,
}

impl OrderDraft {
    /// Starts a draft, rejecting malformed requests up front.
    pub fn new(customer_id: i64, lines: &[OrderLineRequest]) -> CoreResult<Self> {
        validate_order_request(lines)?;

        Ok(OrderDraft {
            customer_id,
            lines: lines.to_vec(),
            total: Money::zero(),
            priced: 0,
        })
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    /// Lines in request order.
    pub fn lines(&self) -> &[OrderLineRequest] {
        &self.lines
    }

    /// Total of the lines priced so far.
    pub fn total(&self) -> Money {
        self.total
    }

    /// True once every line has been priced.
    pub fn is_complete(&self) -> bool {
        self.priced == self.lines.len()
    }

    /// Adds `unit_price × quantity` for one line to the running total.
    pub fn price_line(&mut self, line: &OrderLineRequest, unit_price: Money) -> CoreResult<()> {
        let overflow = || {
            CoreError::from(ValidationError::Overflow {
                field: "total".to_string(),
            })
        };

        let amount = unit_price
            .checked_multiply_quantity(line.quantity)
            .ok_or_else(overflow)?;
        self.total = self.total.checked_add(amount).ok_or_else(overflow)?;
        self.priced += 1;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_draft_rejects_empty_request() {
        let err = OrderDraft::new(1, &[]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }

    #[test]
    fn test_price_line_accumulates() {
        let lines = [OrderLineRequest::new(1, 3), OrderLineRequest::new(2, 2)];
        let mut draft = OrderDraft::new(5, &lines).unwrap();
        assert!(!draft.is_complete());

        draft.price_line(&lines[0], Money::from_cents(1000)).unwrap();
        draft.price_line(&lines[1], Money::from_cents(250)).unwrap();

        assert!(draft.is_complete());
        assert_eq!(draft.customer_id(), 5);
        assert_eq!(draft.total(), Money::from_cents(3500));
    }

    #[test]
    fn test_price_line_rejects_overflow() {
        let lines = [OrderLineRequest::new(1, 2)];
        let mut draft = OrderDraft::new(1, &lines).unwrap();

        let err = draft
            .price_line(&lines[0], Money::from_cents(i64::MAX))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRequest(ValidationError::Overflow { .. })
        ));
        assert_eq!(draft.total(), Money::zero());
    }

    proptest! {
        #[test]
        fn total_is_sum_of_price_times_quantity(
            priced in proptest::collection::vec((0i64..100_000, 1i64..1_000), 1..20)
        ) {
            let lines: Vec<_> = priced
                .iter()
                .enumerate()
                .map(|(i, &(_, qty))| OrderLineRequest::new(i as i64, qty))
                .collect();
            let mut draft = OrderDraft::new(1, &lines).unwrap();

            for (line, &(price, _)) in lines.iter().zip(&priced) {
                draft.price_line(line, Money::from_cents(price)).unwrap();
            }

            let expected: i64 = priced.iter().map(|&(price, qty)| price * qty).sum();
            prop_assert_eq!(draft.total().cents(), expected);
        }
    }
}
