pub mod arch;
mod artifact;
pub mod dataset;
pub mod error;
pub mod optimization;
pub mod training;

pub use arch::LogisticRegression;
pub use dataset::Dataset;
pub use error::{MlErr, Result};
