pub mod error;
pub mod frequency;
pub mod models;
pub mod sampler;

pub use error::{CoreError, CoreResult};
pub use frequency::{analyze, DigitCounts, OverallFrequency, PositionalFrequency};
pub use models::{Combination, Constraint, Draw, DIGIT_SUM_MAX, DRAW_LEN};
pub use sampler::{generate, generate_with_rng};
