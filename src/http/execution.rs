use std::error::Error;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Request, Response};
use tokio::time::Instant;

/// Sends one request and measures the time until the response head (or the
/// error) arrives.
pub(super) async fn send_timed(
    client: &Client,
    request: Request,
) -> (Duration, Result<Response, reqwest::Error>) {
    let start = Instant::now();
    let result = client.execute(request).await;
    (start.elapsed(), result)
}

/// Reads the body to the end so the connection can go back to the pool.
pub(super) async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Renders an error with its full source chain on one line.
pub(super) fn describe_error(err: &(dyn Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !parts.iter().any(|part| part.contains(&cause_text)) {
            parts.push(cause_text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
