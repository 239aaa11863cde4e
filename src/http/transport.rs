use reqwest::{Client, Request, header::CONNECTION};
use tracing::{debug, error};

use crate::{
    args::DEFAULT_USER_AGENT,
    domain::{ConnectionPolicy, RunConfig},
    error::{AppError, AppResult, HttpError},
};

use super::tls::apply_tls_settings;

/// HTTP client shared by every worker of a run.
///
/// `reqwest::Client` is an `Arc` around a connection pool that is safe to use
/// from many tasks at once, so workers receive cheap clones.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Builds the run's client from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend or client cannot be initialised.
    pub fn build(config: &RunConfig) -> AppResult<Self> {
        let max_idle = match config.connection_policy() {
            ConnectionPolicy::KeepAlive => config.max_idle_connections(),
            ConnectionPolicy::Close => 0,
        };

        let mut client_builder = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.request_timeout)
            .pool_idle_timeout(Some(config.connect_timeout))
            .pool_max_idle_per_host(max_idle)
            .no_gzip()
            .no_brotli()
            .no_deflate();

        client_builder = apply_tls_settings(client_builder, config.is_https());

        let client = match client_builder.build() {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                return Err(AppError::http(HttpError::BuildClientFailed { source: e }));
            }
        };
        debug!(
            "HTTP client ready (max idle {}, idle timeout {}ms, request timeout {}ms)",
            max_idle,
            config.connect_timeout.as_millis(),
            config.request_timeout.as_millis()
        );

        Ok(Self { client })
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Builds the GET request a worker reuses for all of its calls.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be turned into a request.
    pub fn request_template(&self, url: &str, policy: ConnectionPolicy) -> AppResult<Request> {
        self.client
            .get(url)
            .header(CONNECTION, policy.header_value())
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))
    }

    /// Releases pooled sockets. Clones still held elsewhere keep the pool
    /// alive, so call this after every worker has finished.
    pub fn close_idle_connections(self) {
        debug!("Releasing idle HTTP connections");
        drop(self.client);
    }
}
