/// Holds a row of the airports file
pub mod airport;
/// Holds the country display names
pub mod country;
/// Holds the public exports for the prelude
pub mod prelude;
/// Holds wrappers around primitive types
pub mod wrappers;
