pub mod error;
pub mod feature_flags;

pub mod models;
pub mod requests;

// Case record types
pub mod case;
pub mod unclaimed;
pub mod unidentified;

pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use requests::*;

pub use case::*;
pub use unclaimed::*;
pub use unidentified::*;
