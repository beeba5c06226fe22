pub mod error;
pub mod feature_flags;

// Cabin domain
pub mod cabin;

pub use error::*;
pub use feature_flags::*;

pub use cabin::*;
