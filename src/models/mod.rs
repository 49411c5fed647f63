pub mod named;
pub mod person;
pub mod theme;
pub mod view;

pub use named::*;
pub use person::*;
pub use theme::*;
pub use view::*;
