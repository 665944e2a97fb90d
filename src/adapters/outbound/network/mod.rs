/// Network adapters for external API calls
mod osv_client;
mod reqwest_transport;
mod response_cache;

pub use osv_client::OsvClient;
pub use reqwest_transport::ReqwestTransport;
pub use response_cache::{CacheKey, ResponseCache};
