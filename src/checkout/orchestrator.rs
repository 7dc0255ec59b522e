//! Checkout orchestrator: the order-submission state machine.
//!
//! Drives `Idle -> Validating -> Submitting -> Succeeded` (or `Failed`)
//! for one session's cart. A simple in-flight flag rejects re-entrant
//! submissions, since a duplicate call would create a duplicate order
//! against the at-most-once semantic.

use crate::auth::Principal;
use crate::cart::CartStore;
use crate::checkout::forms::{PaymentInfo, ShippingInfo};
use crate::checkout::order::NewOrder;
use crate::checkout::service::{ConfirmationNotifier, OrderService};
use crate::error::ShopError;
use crate::ids::OrderId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing in progress.
    Idle,
    /// Checking input before submission.
    Validating,
    /// Order-creation call in flight. Cannot be cancelled; only its
    /// resolution changes state.
    Submitting,
    /// Order durably created; the cart has been cleared.
    Succeeded(OrderId),
    /// Submission failed; the cart is untouched and retry is allowed.
    Failed(String),
}

impl CheckoutState {
    /// Check whether an order-creation call is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }

    /// The failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            CheckoutState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Converts a cart into a durable order through the external order
/// service, with a best-effort confirmation notification afterwards.
pub struct CheckoutOrchestrator {
    order_service: Arc<dyn OrderService>,
    notifier: Arc<dyn ConfirmationNotifier>,
    state: Mutex<CheckoutState>,
    in_flight: AtomicBool,
    submitting_since: Mutex<Option<Instant>>,
}

impl CheckoutOrchestrator {
    /// Create an orchestrator over the given external services.
    pub fn new(
        order_service: Arc<dyn OrderService>,
        notifier: Arc<dyn ConfirmationNotifier>,
    ) -> Self {
        Self {
            order_service,
            notifier,
            state: Mutex::new(CheckoutState::Idle),
            in_flight: AtomicBool::new(false),
            submitting_since: Mutex::new(None),
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        lock(&self.state).clone()
    }

    /// How long the current submission has been in flight, if one is.
    ///
    /// The external call cannot be cancelled mid-flight; callers use this
    /// to surface a stalled submission to the user after a wait of their
    /// choosing.
    pub fn submitting_for(&self) -> Option<Duration> {
        let started = *lock(&self.submitting_since);
        started.map(|s| s.elapsed())
    }

    /// Return a `Failed` or `Succeeded` checkout to `Idle`.
    ///
    /// No-op while a submission is in flight.
    pub fn reset(&self) {
        if !self.in_flight.load(Ordering::SeqCst) {
            *lock(&self.state) = CheckoutState::Idle;
        }
    }

    /// Validate input and submit the cart as an order.
    ///
    /// Must run inside a tokio runtime (the confirmation notification is
    /// spawned onto it). On success the cart is cleared; on any failure it
    /// is left exactly as it was so the user can retry.
    pub async fn place_order(
        &self,
        cart: &mut CartStore,
        shipping: &ShippingInfo,
        payment: &PaymentInfo,
        user: Option<&Principal>,
    ) -> Result<OrderId, ShopError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ShopError::CheckoutInProgress);
        }

        let result = self.submit(cart, shipping, payment, user).await;

        *lock(&self.submitting_since) = None;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn submit(
        &self,
        cart: &mut CartStore,
        shipping: &ShippingInfo,
        payment: &PaymentInfo,
        user: Option<&Principal>,
    ) -> Result<OrderId, ShopError> {
        self.set_state(CheckoutState::Validating);

        if let Err(e) = shipping.validate().and_then(|()| payment.validate()) {
            return Err(self.fail(e));
        }
        let Some(user) = user else {
            return Err(self.fail(ShopError::NotAuthenticated));
        };
        if cart.is_empty() {
            return Err(self.fail(ShopError::EmptyCart));
        }

        // Totals come from the live cart at submission time, never from a
        // stale figure captured earlier in the session.
        let snapshot = match cart.snapshot() {
            Ok(s) => s,
            Err(e) => return Err(self.fail(e)),
        };
        let order = match NewOrder::from_snapshot(user.id.clone(), &snapshot, shipping) {
            Ok(o) => o,
            Err(e) => return Err(self.fail(e)),
        };

        self.set_state(CheckoutState::Submitting);
        *lock(&self.submitting_since) = Some(Instant::now());
        tracing::info!(
            user_id = %order.user_id,
            items = order.line_items.len(),
            total = %order.total,
            "submitting order"
        );

        match self.order_service.create_order(order).await {
            Ok(order_id) => {
                tracing::info!(order_id = %order_id, "order placed");
                self.set_state(CheckoutState::Succeeded(order_id.clone()));
                cart.clear();
                self.dispatch_confirmation(order_id.clone());
                Ok(order_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed");
                Err(self.fail(ShopError::OrderSubmission(e)))
            }
        }
    }

    /// Spawn the confirmation notification without blocking the success
    /// path. The order is already durably committed; a notification
    /// failure is logged and never rolled back into the checkout result.
    fn dispatch_confirmation(&self, order_id: OrderId) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.order_confirmation(&order_id).await {
                tracing::error!(order_id = %order_id, error = %e, "order confirmation failed");
            }
        });
    }

    fn fail(&self, error: ShopError) -> ShopError {
        self.set_state(CheckoutState::Failed(error.to_string()));
        error
    }

    fn set_state(&self, state: CheckoutState) {
        *lock(&self.state) = state;
    }
}

/// Lock a mutex, recovering the guard if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::error::{NotificationError, OrderSubmissionError};
    use crate::ids::{ProductId, UserId};
    use crate::money::{Currency, Money};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
    use tokio::sync::Notify;

    struct StaticOrderService {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl StaticOrderService {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_first: 0,
            })
        }

        fn failing(times: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_first: times,
            })
        }
    }

    #[async_trait]
    impl OrderService for StaticOrderService {
        async fn create_order(&self, _order: NewOrder) -> Result<OrderId, OrderSubmissionError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                Err(OrderSubmissionError::new("network unreachable"))
            } else {
                Ok(OrderId::new("ord-1001"))
            }
        }
    }

    /// Parks inside create_order until released, so tests can observe the
    /// Submitting state from outside.
    struct GatedOrderService {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl OrderService for GatedOrderService {
        async fn create_order(&self, _order: NewOrder) -> Result<OrderId, OrderSubmissionError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(OrderId::new("ord-1001"))
        }
    }

    struct ChannelNotifier {
        sent: UnboundedSender<OrderId>,
        fail: bool,
    }

    #[async_trait]
    impl ConfirmationNotifier for ChannelNotifier {
        async fn order_confirmation(&self, order_id: &OrderId) -> Result<(), NotificationError> {
            let _ = self.sent.send(order_id.clone());
            if self.fail {
                Err(NotificationError::new("smtp unavailable"))
            } else {
                Ok(())
            }
        }
    }

    struct SilentNotifier;

    #[async_trait]
    impl ConfirmationNotifier for SilentNotifier {
        async fn order_confirmation(&self, _order_id: &OrderId) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn product(id: i64, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            "Thunder FC Home",
            Money::new(price, Currency::INR),
        )
    }

    fn cart_with_item() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_standard(&product(1, 1000)).unwrap();
        cart.add_standard(&product(1, 1000)).unwrap();
        cart
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Arun".to_string(),
            last_name: "Kapoor".to_string(),
            email: "arun@example.com".to_string(),
            address: "12 Stadium Road".to_string(),
            city: "Mumbai".to_string(),
            state: "MH".to_string(),
            zip_code: "400001".to_string(),
            country: "India".to_string(),
        }
    }

    fn payment() -> PaymentInfo {
        let mut info = PaymentInfo {
            name_on_card: "Arun Kapoor".to_string(),
            ..Default::default()
        };
        info.set_card_number("4111111111111111");
        info.set_expiry_date("1227");
        info.set_cvv("123");
        info
    }

    fn user() -> Principal {
        Principal::new(UserId::new("user-1"), "arun@example.com")
    }

    #[tokio::test]
    async fn test_successful_order_clears_cart_and_notifies() {
        let (tx, mut rx) = unbounded_channel();
        let orchestrator = CheckoutOrchestrator::new(
            StaticOrderService::ok(),
            Arc::new(ChannelNotifier {
                sent: tx,
                fail: false,
            }),
        );
        let mut cart = cart_with_item();

        let order_id = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await
            .unwrap();

        assert_eq!(order_id, OrderId::new("ord-1001"));
        assert_eq!(
            orchestrator.state(),
            CheckoutState::Succeeded(OrderId::new("ord-1001"))
        );
        assert!(cart.is_empty());

        // Dispatched fire-and-forget, after the success transition.
        let notified = rx.recv().await.unwrap();
        assert_eq!(notified, OrderId::new("ord-1001"));
    }

    #[tokio::test]
    async fn test_notification_failure_never_flags_the_order() {
        let (tx, mut rx) = unbounded_channel();
        let orchestrator = CheckoutOrchestrator::new(
            StaticOrderService::ok(),
            Arc::new(ChannelNotifier {
                sent: tx,
                fail: true,
            }),
        );
        let mut cart = cart_with_item();

        let result = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await;

        assert!(result.is_ok());
        // Wait until the notifier has actually run and failed.
        rx.recv().await.unwrap();
        assert!(matches!(orchestrator.state(), CheckoutState::Succeeded(_)));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_user_is_rejected() {
        let orchestrator =
            CheckoutOrchestrator::new(StaticOrderService::ok(), Arc::new(SilentNotifier));
        let mut cart = cart_with_item();

        let result = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), None)
            .await;

        assert!(matches!(result, Err(ShopError::NotAuthenticated)));
        assert!(orchestrator.state().failure_reason().is_some());
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let orchestrator =
            CheckoutOrchestrator::new(StaticOrderService::ok(), Arc::new(SilentNotifier));
        let mut cart = CartStore::new();

        let result = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await;

        assert!(matches!(result, Err(ShopError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_the_order_service() {
        let service = StaticOrderService::ok();
        let orchestrator =
            CheckoutOrchestrator::new(Arc::clone(&service) as Arc<dyn OrderService>, Arc::new(SilentNotifier));
        let mut cart = cart_with_item();
        let mut incomplete = shipping();
        incomplete.email = String::new();

        let result = orchestrator
            .place_order(&mut cart, &incomplete, &payment(), Some(&user()))
            .await;

        assert!(matches!(result, Err(ShopError::Validation(_))));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_submission_preserves_cart_and_allows_retry() {
        let service = StaticOrderService::failing(1);
        let orchestrator = CheckoutOrchestrator::new(
            Arc::clone(&service) as Arc<dyn OrderService>,
            Arc::new(SilentNotifier),
        );
        let mut cart = cart_with_item();
        let before = cart.snapshot().unwrap();

        let first = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await;
        assert!(matches!(first, Err(ShopError::OrderSubmission(_))));
        assert_eq!(
            orchestrator.state().failure_reason(),
            Some("Order placement failed: network unreachable")
        );
        assert_eq!(cart.snapshot().unwrap(), before);

        let retry = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await;
        assert!(retry.is_ok());
        assert!(cart.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_place_order_while_submitting_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let orchestrator = Arc::new(CheckoutOrchestrator::new(
            Arc::new(GatedOrderService {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            }),
            Arc::new(SilentNotifier),
        ));

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                let mut cart = cart_with_item();
                orchestrator
                    .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
                    .await
            })
        };

        entered.notified().await;
        assert!(orchestrator.state().is_submitting());

        let mut other_cart = cart_with_item();
        let second = orchestrator
            .place_order(&mut other_cart, &shipping(), &payment(), Some(&user()))
            .await;
        assert!(matches!(second, Err(ShopError::CheckoutInProgress)));
        assert_eq!(other_cart.item_count(), 2);

        release.notify_one();
        assert!(first.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_submitting_for_reports_elapsed_time() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let orchestrator = Arc::new(CheckoutOrchestrator::new(
            Arc::new(GatedOrderService {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            }),
            Arc::new(SilentNotifier),
        ));

        assert!(orchestrator.submitting_for().is_none());

        let task = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                let mut cart = cart_with_item();
                orchestrator
                    .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
                    .await
            })
        };

        entered.notified().await;
        assert!(orchestrator.submitting_for().is_some());

        release.notify_one();
        task.await.unwrap().unwrap();
        assert!(orchestrator.submitting_for().is_none());
    }

    #[tokio::test]
    async fn test_reset_returns_failed_checkout_to_idle() {
        let orchestrator = CheckoutOrchestrator::new(
            StaticOrderService::failing(1),
            Arc::new(SilentNotifier),
        );
        let mut cart = cart_with_item();

        let _ = orchestrator
            .place_order(&mut cart, &shipping(), &payment(), Some(&user()))
            .await;
        assert!(orchestrator.state().failure_reason().is_some());

        orchestrator.reset();
        assert_eq!(orchestrator.state(), CheckoutState::Idle);
    }
}
