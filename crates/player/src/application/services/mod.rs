//! Application services
//!
//! Adapters between the controller's outbound port and the messaging layer.

mod backend_service;

pub use backend_service::BackendService;
