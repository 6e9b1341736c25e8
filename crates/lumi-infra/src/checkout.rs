//! Checkout URL construction.
//!
//! The upgrade flow redirects to an external checkout page with the user's
//! email and display name as query parameters; confirmation arrives
//! out-of-band via the billing webhook.

use url::Url;

use lumi_types::error::BillingError;

/// Build the external checkout redirect URL.
///
/// Appends `email` and `name` query parameters when present so the checkout
/// form is prefilled.
pub fn checkout_url(
    base: &str,
    email: Option<&str>,
    display_name: Option<&str>,
) -> Result<Url, BillingError> {
    let mut url = Url::parse(base).map_err(|e| BillingError::InvalidBaseUrl(e.to_string()))?;

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(email) = email {
            pairs.append_pair("email", email);
        }
        if let Some(name) = display_name {
            pairs.append_pair("name", name);
        }
    }

    Ok(url)
}
