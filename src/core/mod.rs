// Public modules
pub mod driver;
pub mod error;
pub mod files;
pub mod inject;
pub mod patch;
pub mod report;
pub mod request;
pub mod resources;
pub mod shell;
pub mod verify;

// Re-export common types for convenience
pub use error::{Error, Result};
pub use report::{Outcome, Report, VerifyCheck};
pub use request::CustomizationRequest;
