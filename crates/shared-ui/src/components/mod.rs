pub mod button;
pub mod form;
pub mod input;

pub use button::*;
pub use form::*;
pub use input::*;
