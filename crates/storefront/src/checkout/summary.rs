//! Order summary and hand-off message formatting.

use std::fmt;

use havana_core::{Cart, Price};

use super::PaymentMethod;
use crate::config::CheckoutConfig;

const GREETING: &str = "¡Hola! Quiero realizar este pedido:";

/// Plain-text summary of a non-empty cart.
///
/// ```text
/// Latte x2 = $90
/// Muffin x1 = $30
///
/// Total: $120
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    lines: Vec<String>,
    total: Price,
}

impl OrderSummary {
    /// Summarize the cart, or `None` if it is empty.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        let lines = cart
            .items()
            .iter()
            .map(|item| format!("{} x{} = {}", item.name, item.quantity, item.line_total()))
            .collect();
        Some(Self {
            lines,
            total: cart.total(),
        })
    }

    /// One `<name> x<quantity> = $<line total>` entry per cart line.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\nTotal: {}", self.lines.join("\n"), self.total)
    }
}

/// Build the message handed to the checkout sink for `method`.
#[must_use]
pub fn order_message(summary: &OrderSummary, method: PaymentMethod, config: &CheckoutConfig) -> String {
    let instructions = match method {
        PaymentMethod::MercadoPago => {
            format!("Pago con Mercado Pago: {}", config.mercado_pago_url)
        }
        PaymentMethod::BankTransfer => format!(
            "Pago por transferencia bancaria.\nClave: {}\n\nEnviaré el comprobante una vez realizada la transferencia.",
            config.transfer_clabe
        ),
    };
    format!("{GREETING}\n\n{summary}\n\n{instructions}")
}
