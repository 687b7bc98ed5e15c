//! Certificate signing request generation.
//!
//! Subject information comes from an INI profile file and the command line,
//! is merged into a [`plan::Plan`], and turns into a SHA-512 signed PKCS #10
//! request plus the RSA private key, both written as PEM next to each other.

pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod plan;
pub mod request;
pub mod subject;
pub mod writer;

pub use error::{CsrError, Result};
pub use plan::{Plan, PlanDefaults, build_plan};
pub use writer::{Outputs, process};
