use reqwest::ClientBuilder;
use tracing::warn;

/// Disables certificate and hostname verification for `https` targets.
///
/// INSECURE: the tool is aimed at arbitrary and self-signed test endpoints,
/// not at secure communication. The override lives on the run's own client
/// only and is never applied to plain `http` targets.
pub(super) fn apply_tls_settings(builder: ClientBuilder, https: bool) -> ClientBuilder {
    if !https {
        return builder;
    }
    warn!("TLS certificate verification is disabled for this run.");
    builder
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
}
