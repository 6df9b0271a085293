//! Errors raised while loading the config.

/// Prefix of the message of an [`ExtractConfigError`].
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract scw config:";

/// The merged config sources could not be deserialized into a `Config`.
///
/// The message lists every error figment collected, one per line, each naming the offending key
/// and the source it came from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{FAILED_TO_EXTRACT_CONFIG_MSG}{}", list(.0))]
pub struct ExtractConfigError(#[from] figment::Error);

fn list(error: &figment::Error) -> String {
    error.clone().into_iter().map(|err| format!("\n  {err}")).collect()
}
