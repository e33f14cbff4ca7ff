pub mod catalog;
pub mod definition;
pub mod draft;
pub mod ids;

pub use catalog::*;
pub use definition::*;
pub use draft::*;
pub use ids::*;
