mod engine;
mod validator;

pub use engine::ValidationEngine;
pub use validator::{FLOAT_EPSILON, ValueValidator, round_display, within_tolerance};
