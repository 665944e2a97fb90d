/// Mock implementations for testing
mod mock_http_transport;

pub use mock_http_transport::MockHttpTransport;
