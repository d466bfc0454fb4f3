//! Cart aggregator.
//!
//! [`Cart`] owns the current [`CartState`] for one session and is the only
//! way to change it. Readers get an `Arc` snapshot: an immutable value that
//! later mutations replace rather than modify.

use std::sync::{Arc, Mutex};

use menu_cart_core::DishId;
use tracing::{debug, warn};

use crate::command::CartCommand;
use crate::error::CartError;
use crate::line::LineCandidate;
use crate::quantity::QuantityInput;
use crate::state::CartState;

/// Single-owner cart for one ordering session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    state: Arc<CartState>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state. Never aliases future mutations.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.state)
    }

    /// Apply a command and return the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns the transition's [`CartError`]; the cart is unchanged.
    pub fn dispatch(&mut self, command: &CartCommand) -> Result<Arc<CartState>, CartError> {
        match self.state.apply(command) {
            Ok(next) => {
                self.commit(command.kind(), next);
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(
                    command = command.kind(),
                    item_id = ?command.item_id().map(DishId::as_str),
                    error = %e,
                    "Rejected cart command"
                );
                Err(e)
            }
        }
    }

    /// Add a line or merge it into an identical one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidLineInput`] if the request is malformed.
    pub fn add_line(&mut self, candidate: LineCandidate) -> Result<(), CartError> {
        self.dispatch(&CartCommand::AddLine(candidate)).map(drop)
    }

    /// Remove every line for `item_id`.
    pub fn remove_line(&mut self, item_id: &DishId) {
        let next = self.state.without_item(item_id);
        self.commit("remove_line", next);
    }

    /// Set the quantity of every line for `item_id`; zero or less removes.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantityInput`] for a non-whole quantity
    /// and [`CartError::QuantityOutOfRange`] for one above `u32::MAX`.
    pub fn set_quantity(
        &mut self,
        item_id: &DishId,
        quantity: impl Into<QuantityInput>,
    ) -> Result<(), CartError> {
        self.dispatch(&CartCommand::SetQuantity {
            item_id: item_id.clone(),
            quantity: quantity.into(),
        })
        .map(drop)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.commit("clear", CartState::empty());
    }

    fn commit(&mut self, kind: &'static str, next: CartState) {
        debug!(
            command = kind,
            lines = next.line_count(),
            units = next.total_unit_count(),
            total = %next.grand_total(),
            "Cart updated"
        );
        self.state = Arc::new(next);
    }
}

/// A [`Cart`] behind one lock, for hosts that touch a session's cart from
/// more than one thread.
///
/// Every operation takes the same lock, so commands are applied one at a
/// time in full.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command under the lock.
    ///
    /// # Errors
    ///
    /// Returns the transition's [`CartError`], or [`CartError::Unavailable`]
    /// if the lock is poisoned.
    pub fn dispatch(&self, command: &CartCommand) -> Result<Arc<CartState>, CartError> {
        self.with_cart(|cart| cart.dispatch(command))?
    }

    /// Current state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Unavailable`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<CartState>, CartError> {
        self.with_cart(|cart| cart.snapshot())
    }

    /// Run `f` with exclusive access to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Unavailable`] if the lock is poisoned.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> Result<R, CartError> {
        let mut cart = self.inner.lock().map_err(|_| CartError::Unavailable)?;
        Ok(f(&mut cart))
    }
}
