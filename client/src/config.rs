/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "LEASE_ADMIN_API_URL";

/// Default base path of the REST collaborator.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Resolve the API base URL from the environment, falling back to the
/// default. A trailing slash is trimmed so path joining stays uniform.
pub fn api_base_url() -> String {
    let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    url.trim_end_matches('/').to_string()
}
