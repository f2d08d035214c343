pub mod dataset;
pub mod parameter;
pub mod traits;
