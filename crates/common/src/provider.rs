//! Commonly used helpers to construct `Provider`s

use alloy_provider::RootProvider;
use eyre::{Result, WrapErr};
use url::Url;

/// Constructs a plain http provider for the given endpoint.
///
/// No fillers are installed: nonce, chain id and signing are left to the account manager behind
/// the endpoint, the way an injected browser wallet handles `eth_sendTransaction`.
///
/// # Examples
///
/// ```
/// use scw_common::try_get_http_provider;
///
/// let provider = try_get_http_provider("localhost:8545").unwrap();
/// ```
pub fn try_get_http_provider(endpoint: impl AsRef<str>) -> Result<RootProvider> {
    let url = parse_endpoint(endpoint.as_ref())?;
    Ok(RootProvider::new_http(url))
}

/// Parses a rpc endpoint, accepting a bare `localhost:<port>`.
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    // non-prefixed URL scheme is not allowed, so we prepend the default http prefix
    let endpoint = if endpoint.starts_with("localhost:") || endpoint.starts_with("127.0.0.1:") {
        format!("http://{endpoint}")
    } else {
        endpoint.to_string()
    };
    Url::parse(&endpoint).wrap_err_with(|| format!("invalid provider URL: {endpoint:?}"))
}
