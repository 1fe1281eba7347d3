//! Output module
//!
//! Object-storage destinations for the uploaded artifact (GCS, S3, Azure,
//! local filesystem).

mod cloud;

pub use cloud::ObjectDestination;
