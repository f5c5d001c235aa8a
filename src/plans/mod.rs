pub mod model;
pub mod rate;
pub mod normalize;
pub mod filter;

pub use model::{ Plan, UsageTier };
pub use normalize::normalize_plan;
pub use filter::{ FilterCriteria, SortMode };
