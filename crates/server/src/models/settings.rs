//! Store settings domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shoptill_core::UserId;

/// Store and website settings. One row per seller, upserted.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSettings {
    /// Owning seller.
    #[serde(skip)]
    pub seller_id: UserId,
    /// Store display name.
    pub store_name: String,
    /// Short strapline shown on the website.
    pub tagline: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// ISO 4217 currency code prices are displayed in.
    pub currency: String,
    /// Uploaded logo URL, if set.
    pub logo_url: Option<String>,
    /// When the settings were last changed.
    pub updated_at: DateTime<Utc>,
}
