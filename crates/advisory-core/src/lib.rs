pub mod error;
pub mod reading;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod universe;

pub use error::*;
pub use reading::*;
pub use snapshot::*;
pub use traits::*;
pub use types::*;
