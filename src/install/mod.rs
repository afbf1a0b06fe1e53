//! Installation: two-tier download and post-install verification.

pub mod bootstrap;
pub mod verify;

pub use bootstrap::{platform_token, Installer, BOOTSTRAP_URL, RELEASE_API_URL};
pub use verify::{verify_install, CheckOutcome};
