//! Checkout sinks: where a finished order message goes.

use thiserror::Error;
use url::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Checkout sink errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The deep link could not be built.
    #[error("Invalid link: {0}")]
    InvalidLink(#[from] url::ParseError),

    /// The link could not be opened.
    #[error("Failed to open {url}: {reason}")]
    OpenFailed { url: String, reason: String },
}

/// An external target that accepts one formatted order message.
pub trait CheckoutSink {
    /// Hand the order message over. There is no confirmation round-trip.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the target could not be reached.
    fn hand_off(&mut self, message: &str) -> Result<(), CheckoutError>;
}

impl<K: CheckoutSink + ?Sized> CheckoutSink for Box<K> {
    fn hand_off(&mut self, message: &str) -> Result<(), CheckoutError> {
        (**self).hand_off(message)
    }
}

/// Opens a URL in whatever the host environment uses (browser tab, terminal).
pub trait LinkOpener {
    /// # Errors
    ///
    /// Returns `CheckoutError::OpenFailed` if the link could not be opened.
    fn open(&mut self, url: &Url) -> Result<(), CheckoutError>;
}

/// Records opened links in order.
impl LinkOpener for Vec<Url> {
    fn open(&mut self, url: &Url) -> Result<(), CheckoutError> {
        self.push(url.clone());
        Ok(())
    }
}

/// Sends the order message to a WhatsApp chat through a `wa.me` deep link,
/// optionally followed by a second link (the payment page).
#[derive(Debug, Clone)]
pub struct WhatsAppSink<O> {
    phone: String,
    follow_up: Option<Url>,
    opener: O,
}

impl<O: LinkOpener> WhatsAppSink<O> {
    /// `phone` is the full number with country code, digits only.
    pub fn new(phone: impl Into<String>, opener: O) -> Self {
        Self {
            phone: phone.into(),
            follow_up: None,
            opener,
        }
    }

    /// Open `url` right after the chat link.
    #[must_use]
    pub fn with_follow_up(mut self, url: Url) -> Self {
        self.follow_up = Some(url);
        self
    }

    /// `https://wa.me/<phone>?text=<message>`, with everything but RFC 3986
    /// unreserved characters percent-encoded.
    ///
    /// That is stricter than a browser's `encodeURIComponent`: `!'()*` are
    /// escaped as well. The decoded text WhatsApp sees is the same.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidLink` if the phone does not form a valid URL.
    pub fn deep_link(&self, message: &str) -> Result<Url, CheckoutError> {
        let mut url = Url::parse(WHATSAPP_BASE)?.join(&self.phone)?;
        url.set_query(Some(&format!("text={}", urlencoding::encode(message))));
        Ok(url)
    }

    pub const fn opener(&self) -> &O {
        &self.opener
    }

    pub fn into_opener(self) -> O {
        self.opener
    }
}

impl<O: LinkOpener> CheckoutSink for WhatsAppSink<O> {
    fn hand_off(&mut self, message: &str) -> Result<(), CheckoutError> {
        let chat = self.deep_link(message)?;
        self.opener.open(&chat)?;
        if let Some(follow_up) = &self.follow_up {
            self.opener.open(follow_up)?;
        }
        Ok(())
    }
}
