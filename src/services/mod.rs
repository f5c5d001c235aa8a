pub mod plan_search_service;
pub mod profile_service;
pub mod tracking_service;

pub use plan_search_service::PlanSearchService;
pub use profile_service::ProfileService;
pub use tracking_service::TrackingService;
