//! Checkout hand-off.
//!
//! Checkout turns the cart into a plain-text order message, hands it to an
//! external sink, clears the cart and thanks the customer. Two channels exist:
//!
//! - [`PaymentMethod::MercadoPago`] - WhatsApp chat with the order, then the payment link
//! - [`PaymentMethod::BankTransfer`] - WhatsApp chat with the order and the CLABE
//!
//! Hand-offs are fire-and-forget. A sink failure is logged, and the cart is
//! still cleared. Checkout of an empty cart is rejected before any sink runs.

mod sink;
mod summary;

pub use sink::{CheckoutError, CheckoutSink, LinkOpener, WhatsAppSink};
pub use summary::{OrderSummary, order_message};

use havana_core::Price;
use tracing::{info, warn};

use crate::cart::CartStore;
use crate::config::CheckoutConfig;
use crate::display::{Notification, Presenter};
use crate::error::add_breadcrumb;
use crate::storage::KeyValueStore;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    MercadoPago,
    BankTransfer,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MercadoPago => "mercado_pago",
            Self::BankTransfer => "bank_transfer",
        }
    }

    /// Notification shown once the hand-off has been initiated.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::MercadoPago => "¡Gracias por tu compra! Te contactaremos pronto.",
            Self::BankTransfer => {
                "¡Gracias por tu pedido! Realiza la transferencia y envía el comprobante."
            }
        }
    }
}

/// What was handed off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub method: PaymentMethod,
    pub message: String,
    pub total: Price,
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing happened.
    Rejected,
    /// The order went to the sink and the cart was cleared.
    HandedOff(Receipt),
}

/// Hand the cart to `sink` using `method`, then clear it and notify.
///
/// The sequence is sink → clear (render, save) → success notification. The
/// cart is cleared even if the sink fails.
pub fn hand_off<S, P, K>(
    store: &mut CartStore<S, P>,
    method: PaymentMethod,
    config: &CheckoutConfig,
    sink: &mut K,
) -> CheckoutOutcome
where
    S: KeyValueStore,
    P: Presenter,
    K: CheckoutSink + ?Sized,
{
    let Some(summary) = OrderSummary::from_cart(store.cart()) else {
        info!(method = method.as_str(), "Checkout rejected: cart is empty");
        return CheckoutOutcome::Rejected;
    };

    let message = order_message(&summary, method, config);
    add_breadcrumb("checkout", "Hand-off", Some(&[("method", method.as_str())]));
    info!(
        method = method.as_str(),
        total = %summary.total(),
        lines = summary.lines().len(),
        "Handing off order"
    );

    if let Err(e) = sink.hand_off(&message) {
        warn!(method = method.as_str(), error = %e, "Checkout sink failed");
    }

    store.clear();
    store.notify(&Notification::success(method.success_message()));

    CheckoutOutcome::HandedOff(Receipt {
        method,
        message,
        total: summary.total(),
    })
}

/// The two checkout channels with their sinks.
#[derive(Debug)]
pub struct Checkout<A, B> {
    config: CheckoutConfig,
    pay_sink: A,
    transfer_sink: B,
}

impl<A: CheckoutSink, B: CheckoutSink> Checkout<A, B> {
    pub const fn new(config: CheckoutConfig, pay_sink: A, transfer_sink: B) -> Self {
        Self {
            config,
            pay_sink,
            transfer_sink,
        }
    }

    /// Pay through Mercado Pago.
    pub fn pay<S: KeyValueStore, P: Presenter>(
        &mut self,
        store: &mut CartStore<S, P>,
    ) -> CheckoutOutcome {
        hand_off(store, PaymentMethod::MercadoPago, &self.config, &mut self.pay_sink)
    }

    /// Pay by bank transfer.
    pub fn transfer<S: KeyValueStore, P: Presenter>(
        &mut self,
        store: &mut CartStore<S, P>,
    ) -> CheckoutOutcome {
        hand_off(
            store,
            PaymentMethod::BankTransfer,
            &self.config,
            &mut self.transfer_sink,
        )
    }

    pub const fn pay_sink(&self) -> &A {
        &self.pay_sink
    }

    pub const fn transfer_sink(&self) -> &B {
        &self.transfer_sink
    }
}

impl<O: LinkOpener + Clone> Checkout<WhatsAppSink<O>, WhatsAppSink<O>> {
    /// WhatsApp sinks for both channels; the pay channel follows up with the
    /// Mercado Pago link.
    pub fn whatsapp(config: CheckoutConfig, opener: O) -> Self {
        let pay_sink = WhatsAppSink::new(config.whatsapp_phone.clone(), opener.clone())
            .with_follow_up(config.mercado_pago_url.clone());
        let transfer_sink = WhatsAppSink::new(config.whatsapp_phone.clone(), opener);
        Self::new(config, pay_sink, transfer_sink)
    }
}
