pub mod favorites;
pub mod spotify;

pub use favorites::*;
pub use spotify::*;
