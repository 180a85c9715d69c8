pub mod fingerprint;

pub use fingerprint::{contribution_key, fingerprint};
