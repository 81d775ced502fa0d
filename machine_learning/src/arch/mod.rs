mod linear;
pub mod loss;
mod sigmoid;

pub use linear::LogisticRegression;
pub use sigmoid::sigmoid;
