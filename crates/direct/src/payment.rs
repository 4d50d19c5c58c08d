//! Downstream payment hop: trait and in-memory implementation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use domain::{InfrastructureFault, Order};

/// Result of a successful payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// The payment ID assigned by the downstream service.
    pub payment_id: String,
}

/// The downstream dependency the direct topology blocks on.
///
/// Stands in for a payment-style service one synchronous hop away.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Confirms payment for a confirmed order.
    async fn confirm(&self, order: &Order) -> Result<PaymentConfirmation, InfrastructureFault>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    next_id: u32,
    confirmations: u32,
    fail_on_confirm: bool,
    latency: Option<Duration>,
}

/// In-memory payment processor for testing and demos.
///
/// Can be told to fail, or to take a configurable amount of time, so
/// tests can observe how the direct topology transmits both to its
/// caller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProcessor {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentProcessor {
    /// Creates a new in-memory payment processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the processor to decline every confirmation.
    pub fn set_fail_on_confirm(&self, fail: bool) {
        self.state.write().unwrap().fail_on_confirm = fail;
    }

    /// Configures artificial latency per confirmation.
    pub fn set_latency(&self, latency: Duration) {
        self.state.write().unwrap().latency = Some(latency);
    }

    /// Returns how many confirmations have succeeded.
    pub fn confirmation_count(&self) -> u32 {
        self.state.read().unwrap().confirmations
    }
}

#[async_trait]
impl PaymentProcessor for InMemoryPaymentProcessor {
    async fn confirm(&self, order: &Order) -> Result<PaymentConfirmation, InfrastructureFault> {
        let latency = self.state.read().unwrap().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_confirm {
            return Err(InfrastructureFault::Downstream(format!(
                "payment declined for order {}",
                order.id
            )));
        }

        state.next_id += 1;
        state.confirmations += 1;
        Ok(PaymentConfirmation {
            payment_id: format!("PAY-{:04}", state.next_id),
        })
    }
}
