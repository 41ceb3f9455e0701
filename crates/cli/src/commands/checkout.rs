//! `havana checkout`.
//!
//! There is no browser to open from a terminal, so the WhatsApp and payment
//! links are printed for the customer to follow.

use std::io::Write;

use havana_storefront::checkout::{
    Checkout, CheckoutError, CheckoutOutcome, LinkOpener, PaymentMethod,
};
use havana_storefront::config::StorefrontConfig;
use havana_storefront::display::RenderError;
use havana_storefront::error::Result;
use url::Url;

use super::Store;

/// Prints each link on its own line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&mut self, url: &Url) -> std::result::Result<(), CheckoutError> {
        writeln!(std::io::stdout().lock(), "Abrir: {url}").map_err(|e| CheckoutError::OpenFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Hand the cart off through WhatsApp with `method`.
pub fn run(store: &mut Store, config: &StorefrontConfig, method: PaymentMethod) -> CheckoutOutcome {
    let mut checkout = Checkout::whatsapp(config.checkout.clone(), PrintOpener);
    match method {
        PaymentMethod::MercadoPago => checkout.pay(store),
        PaymentMethod::BankTransfer => checkout.transfer(store),
    }
}

/// Tell the customer what happened.
///
/// # Errors
///
/// Returns `AppError::Render` if writing fails.
pub fn report(outcome: &CheckoutOutcome, out: &mut impl Write) -> Result<()> {
    match outcome {
        CheckoutOutcome::Rejected => {
            writeln!(out, "Tu carrito está vacío").map_err(RenderError::from)?;
        }
        CheckoutOutcome::HandedOff(receipt) => {
            writeln!(out, "\n{}", receipt.message).map_err(RenderError::from)?;
        }
    }
    Ok(())
}
