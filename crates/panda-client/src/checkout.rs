//! # Checkout Flow
//!
//! Turns the cart into an order and submits it.
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  checkout(customer)                                                     │
//! │     │                                                                   │
//! │     ├── no active restaurant? ─────────► Skipped(NoActiveRestaurant)    │
//! │     ├── cart empty? ───────────────────► Skipped(EmptyCart)             │
//! │     ├── email or address blank? ───────► Err(InvalidCustomer)           │
//! │     ├── line from other restaurant? ───► Err(InconsistentCart)          │
//! │     ├── submission in flight? ─────────► Skipped(SubmissionInFlight)    │
//! │     │                                                                   │
//! │     └── submit_order ──┬── ok ─────────► Placed(OrderReceipt)           │
//! │                        └── err ────────► Err(Transport | Rejected |     │
//! │                                              MalformedResponse)         │
//! │                                                                         │
//! │  Everything above submit_order makes no backend call.                   │
//! │  The cart and the selection are left as they are, whatever the result. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use panda_core::validation::validate_customer;
use panda_core::{CartLine, Customer, Money, OrderLine, OrderRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::CatalogClient;
use crate::error::CheckoutResult;
use crate::state::{CartStore, SelectionContext};

/// Why a checkout did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoActiveRestaurant,
    EmptyCart,
    /// Another checkout on this flow has not finished yet.
    SubmissionInFlight,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoActiveRestaurant => write!(f, "no restaurant is open"),
            SkipReason::EmptyCart => write!(f, "the cart is empty"),
            SkipReason::SubmissionInFlight => write!(f, "an order is already being placed"),
        }
    }
}

/// A placed order, as confirmed by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Local id for correlating logs of this attempt.
    pub attempt_id: Uuid,

    pub restaurant_id: String,

    /// Total the backend confirmed. This is the number to show.
    pub total: Money,

    /// Total computed locally from the submitted lines and fee.
    pub expected_total: Money,

    /// Lines as submitted.
    pub lines: Vec<OrderLine>,
}

impl OrderReceipt {
    /// True if the backend charged something other than what the cart said.
    pub fn total_differs(&self) -> bool {
        self.total != self.expected_total
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Placed(OrderReceipt),
    Skipped(SkipReason),
}

/// Releases the in-flight flag when dropped, including when the checkout
/// future is dropped mid-submission.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Order submission with a one-at-a-time guard.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    in_flight: AtomicBool,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Builds an order from the cart and the active restaurant and submits
    /// it through `catalog`.
    ///
    /// ## Returns
    /// - `Ok(Placed(_))` with the server-confirmed total
    /// - `Ok(Skipped(_))` when there is nothing to submit or a submission is
    ///   already running; no backend call is made
    ///
    /// ## Errors
    /// - [`CheckoutError::InvalidCustomer`] for a blank email or address.
    ///   Anything else is submitted as typed and the backend decides
    /// - [`CheckoutError::InconsistentCart`] if a line belongs to another
    ///   restaurant
    /// - Transport, rejection and malformed-response errors from the backend
    ///
    /// [`CheckoutError::InvalidCustomer`]: crate::error::CheckoutError::InvalidCustomer
    /// [`CheckoutError::InconsistentCart`]: crate::error::CheckoutError::InconsistentCart
    pub async fn checkout(
        &self,
        catalog: &dyn CatalogClient,
        selection: &SelectionContext,
        cart: &CartStore,
        customer: &Customer,
    ) -> CheckoutResult<CheckoutOutcome> {
        let prepared = selection.with_active(|active| -> CheckoutResult<_> {
            let Some(restaurant) = active else {
                return Ok(Err(SkipReason::NoActiveRestaurant));
            };

            let lines: Vec<CartLine> = cart.with_cart(|c| c.lines().to_vec());
            if lines.is_empty() {
                return Ok(Err(SkipReason::EmptyCart));
            }

            validate_customer(customer)?;
            let order = OrderRequest::build(customer, restaurant, &lines)?;
            Ok(Ok((restaurant.id.clone(), order)))
        })?;

        let (restaurant_id, order) = match prepared {
            Ok(prepared) => prepared,
            Err(reason) => {
                debug!(%reason, "Checkout skipped");
                return Ok(CheckoutOutcome::Skipped(reason));
            }
        };

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Checkout skipped: submission already in flight");
            return Ok(CheckoutOutcome::Skipped(SkipReason::SubmissionInFlight));
        };

        let attempt_id = Uuid::new_v4();
        let expected_total = order.expected_total();
        debug!(
            %attempt_id,
            restaurant_id = %restaurant_id,
            lines = order.items.len(),
            expected_total = %expected_total,
            "Submitting order"
        );

        let confirmation = match catalog.submit_order(&order).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(%attempt_id, error = %e, "Order submission failed");
                return Err(e);
            }
        };

        let receipt = OrderReceipt {
            attempt_id,
            restaurant_id,
            total: confirmation.total,
            expected_total,
            lines: order.items,
        };

        if receipt.total_differs() {
            warn!(
                %attempt_id,
                confirmed = %receipt.total,
                expected = %receipt.expected_total,
                "Backend total differs from cart total"
            );
        }
        info!(%attempt_id, total = %receipt.total, "Order placed");

        Ok(CheckoutOutcome::Placed(receipt))
    }
}
