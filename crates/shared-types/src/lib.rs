pub mod error;
pub mod feature_flags;

pub mod analytics;
pub mod case;
pub mod export;
pub mod filter;
pub mod format;
pub mod pagination;
pub mod permission;
pub mod session;
pub mod trend;
pub mod user;
pub mod wire;

pub use error::*;
pub use feature_flags::*;

pub use analytics::*;
pub use case::*;
pub use export::*;
pub use filter::*;
pub use pagination::*;
pub use permission::*;
pub use session::*;
pub use trend::*;
pub use user::*;
