//! jsoncmp HTTP service
//!
//! Exposes the comparison orchestrator over a small JSON API:
//!
//! | Method       | Path            | Operation                     |
//! |--------------|-----------------|-------------------------------|
//! | `POST`       | `/api/store`    | validate and store a payload  |
//! | `GET`/`POST` | `/api/compare`  | diff both slots, then clear   |
//! | `DELETE`     | `/api/payloads` | clear both slots              |
//! | `GET`        | `/api/status`   | which slots are populated     |
//! | `GET`        | `/health`       | liveness                      |
//!
//! Validation and readiness failures answer 400, storage and internal
//! failures answer 500, both with an `{"error": "..."}` body.

pub mod error;
pub mod handlers;
pub mod request;
pub mod request_id;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{router, serve, serve_with_shutdown};
pub use state::AppState;
