pub mod flight;
pub mod prediction;
pub mod zones;

pub use flight::*;
pub use prediction::*;
pub use zones::*;
