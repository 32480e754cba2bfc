pub mod auth_gate;
pub mod request_log;
pub mod request_trace;

pub use auth_gate::{AuthGate, AUTH_TOKEN_HEADER};
pub use request_log::RequestLog;
pub use request_trace::{RequestId, RequestTrace, REQUEST_ID_HEADER};
