pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod page_info;
pub mod error;

pub use types::*;
pub use error::{FilterError, PaginationError};
pub use filter::{ListFilter, ListParams};
pub use page_info::PageInfo;
