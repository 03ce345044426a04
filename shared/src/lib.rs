pub mod cache;
pub mod class;
pub mod data;
pub mod generation;
pub mod hash;
pub mod query;
pub mod session;

pub use generation::{Generator, SectorGenerator, Star};
pub use query::{query, InvalidInput};
pub use session::ViewerSession;
