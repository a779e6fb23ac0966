/// Page indices and surface dimensions.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
