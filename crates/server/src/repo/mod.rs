pub mod cabin;

pub use cabin::{CabinRepo, NewCabin};
