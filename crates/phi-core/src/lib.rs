pub mod error;
pub mod json;
pub mod value;

pub use error::{CallSite, PhiError};
pub use value::{Dict, NativeFn, Value};
