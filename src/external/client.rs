use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global blocking HTTP client instance
///
/// This client is initialized lazily on first access and reused across the process,
/// so every notifier shares one connection pool.
///
/// # Features
/// - **Blocking**: requests block the calling thread until a response or a network error
/// - **Compression**: accepts gzip-encoded responses
/// - **Timeouts**: 30s request timeout, 10s connect timeout (not configurable)
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
///
/// The blocking client drives its own runtime. From async code, only touch it
/// inside `tokio::task::spawn_blocking`.
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// fn post_form() -> Result<u16, reqwest::Error> {
///     let response = HTTP_CLIENT
///         .post("https://api.example.com/hook")
///         .form(&[("key", "value")])
///         .send()?;
///
///     Ok(response.status().as_u16())
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::blocking::Client> = LazyLock::new(|| {
    reqwest::blocking::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
