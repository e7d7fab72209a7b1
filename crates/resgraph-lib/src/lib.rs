pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::ResgraphOptions;

pub mod model;
pub mod capability;
pub mod events;
pub mod resolution_result;
pub use resolution_result::ResolutionResult;
pub use resolution_result::ResolutionResultBuilder;
pub mod verification;
