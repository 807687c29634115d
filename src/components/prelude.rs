pub use crate::components::airport::*;
pub use crate::components::country::*;
pub use crate::components::wrappers::*;
