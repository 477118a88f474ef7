pub mod api_key;
pub mod instance_mode;
pub mod panic;
pub mod response;

pub use api_key::require_api_key;
pub use instance_mode::{resolve_instance_mode, INSTANCE_MODE_HEADER};
pub use panic::handle_panic;
pub use response::{ApiResponse, ApiResult, Empty, Envelope, ListData, TotalData};
