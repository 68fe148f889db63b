/// Liveness probe: fixed plain-text body.
pub async fn liveness() -> &'static str {
    "your server is running... better catch it."
}
