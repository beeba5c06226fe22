// Form building blocks
pub mod button;
pub mod file_input;
pub mod form;
pub mod form_row;
pub mod input;
pub mod textarea;

// Feedback
pub mod toast;

pub use button::*;
pub use file_input::*;
pub use form::*;
pub use form_row::*;
pub use input::*;
pub use textarea::*;
pub use toast::*;
