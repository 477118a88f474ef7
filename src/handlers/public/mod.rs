// handlers/public/mod.rs - Public handlers (no api key required)
//
// Service info and probes for load balancers and orchestrators.
pub mod health;

pub use health::{live, ready, service_info};
