mod api;

pub use self::api::{ApiResponse, MessageResponse};
