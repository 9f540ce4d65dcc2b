//! Order lifecycle manager.
//!
//! Owns the local order collection — a newest-first cache of server truth —
//! and the "currently viewed" order. Every operation calls the gateway,
//! reconciles the cache from the returned record, and converts failures
//! into a stored message plus a `None`/`false` sentinel.
//!
//! The loading and error flags are last-writer-wins across concurrent calls
//! to the same store, and a slow `list` can overwrite the effect of a faster
//! `create`/`update`; requests carry no provenance. That race is accepted,
//! not guarded against.

use waybill_core::{Order, OrderDraft, OrderFilters, OrderId, OrderStatus};

use crate::gateway::{EvidencePhoto, Gateway, GatewayError};

pub struct OrderStore {
    gateway: Gateway,
    orders: Vec<Order>,
    current: Option<Order>,
    loading: bool,
    error: Option<String>,
}

impl OrderStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            orders: Vec::new(),
            current: None,
            loading: false,
            error: None,
        }
    }

    /// Replace the whole collection with the gateway's result set — no
    /// merging. Soft-deleted orders appear only when
    /// `filters.include_deleted` is set.
    pub async fn list(&mut self, filters: &OrderFilters) -> bool {
        self.begin();
        match self.gateway.list_orders(filters).await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "order listing refreshed");
                self.orders = orders;
                self.loading = false;
                true
            }
            Err(err) => self.fail("order listing failed", err),
        }
    }

    /// Fetch one order and make it the currently viewed one. The list
    /// collection is not touched.
    pub async fn get(&mut self, id: OrderId) -> Option<Order> {
        self.begin();
        match self.gateway.get_order(id).await {
            Ok(order) => {
                self.current = Some(order.clone());
                self.loading = false;
                Some(order)
            }
            Err(err) => {
                self.fail("order fetch failed", err);
                None
            }
        }
    }

    /// Create an order; the server-assigned record is prepended (the display
    /// convention is newest-first).
    pub async fn create(&mut self, draft: &OrderDraft) -> Option<Order> {
        self.begin();
        match self.gateway.create_order(draft).await {
            Ok(order) => {
                tracing::info!(id = %order.id, invoice = %order.invoice_number, "order created");
                self.orders.insert(0, order.clone());
                self.loading = false;
                Some(order)
            }
            Err(err) => {
                self.fail("order creation failed", err);
                None
            }
        }
    }

    /// Send a partial update and adopt the returned record: the matching
    /// cache entry is replaced in place (other entries keep their position),
    /// as is the currently viewed order when it has the same id. An id that
    /// is not cached — hidden by an earlier filter, say — updates only the
    /// server.
    pub async fn update(&mut self, id: OrderId, draft: &OrderDraft) -> Option<Order> {
        self.begin();
        match self.gateway.update_order(id, draft).await {
            Ok(order) => {
                if let Some(slot) = self.orders.iter_mut().find(|o| o.id == id) {
                    *slot = order.clone();
                }
                if self.current.as_ref().is_some_and(|c| c.id == id) {
                    self.current = Some(order.clone());
                }
                self.loading = false;
                Some(order)
            }
            Err(err) => {
                self.fail("order update failed", err);
                None
            }
        }
    }

    /// Soft-delete: the gateway marks the record deleted and keeps it; the
    /// cache treats that as eviction from the currently loaded view.
    pub async fn soft_delete(&mut self, id: OrderId) -> bool {
        self.begin();
        match self.gateway.delete_order(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "order soft-deleted");
                self.orders.retain(|o| o.id != id);
                self.loading = false;
                true
            }
            Err(err) => self.fail("order deletion failed", err),
        }
    }

    /// Restore a soft-deleted order. The restored record is returned but not
    /// reinserted into the cache: restore runs from the recycle-bin view,
    /// and the default listing picks the order up on the next `list`.
    pub async fn restore(&mut self, id: OrderId) -> Option<Order> {
        self.begin();
        match self.gateway.restore_order(id).await {
            Ok(order) => {
                tracing::info!(id = %id, "order restored");
                self.loading = false;
                Some(order)
            }
            Err(err) => {
                self.fail("order restore failed", err);
                None
            }
        }
    }

    /// Upload a proof-of-delivery photo, optionally advancing the status in
    /// the same call. Whether the requested transition is legal is the
    /// gateway's decision; a rejection comes back as a stored message.
    pub async fn attach_evidence(
        &mut self,
        id: OrderId,
        photo: EvidencePhoto,
        status: Option<OrderStatus>,
    ) -> Option<Order> {
        self.begin();
        match self.gateway.upload_evidence(id, photo, status).await {
            Ok(order) => {
                tracing::info!(id = %id, status = ?status, "evidence attached");
                self.loading = false;
                Some(order)
            }
            Err(err) => {
                self.fail("evidence upload failed", err);
                None
            }
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn current(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, what: &str, err: GatewayError) -> bool {
        tracing::warn!(error = %err, "{what}");
        self.error = Some(err.to_string());
        self.loading = false;
        false
    }
}
