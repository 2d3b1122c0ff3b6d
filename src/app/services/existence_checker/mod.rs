//! Existence checking for worksheet PDFs
//!
//! Every catalog record names a PDF at `/{prefix}/{subject}/{filename}.pdf`.
//! Filenames in the CSV drift from the files actually published, so listings
//! can be restricted to records whose PDF is confirmed present.
//!
//! A failed probe never fails the batch: network, protocol and I/O errors are
//! logged and count as "does not exist". Batches probe concurrently and keep
//! the input order.
//!
//! ## Architecture
//!
//! - [`path`] - Resource path construction and encoding
//! - [`probe`] - The [`ResourceProbe`] trait with HTTP and filesystem probes
//! - [`checker`] - [`ExistenceChecker`] single and batch checks

pub mod checker;
pub mod path;
pub mod probe;

#[cfg(test)]
mod tests;

pub use checker::{ExistenceChecker, ExistenceReport};
pub use path::ResourcePath;
pub use probe::{FsProbe, HttpProbe, ResourceProbe};
