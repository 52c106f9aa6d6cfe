//! Model input rows for upcoming fixtures

pub mod inference;

pub use inference::{Fixture, InferenceRow};
