//! Shared plumbing for the `amlfig` binaries: logging setup, artifact
//! output, provenance sidecars and CSV export of scene geometry.

pub mod data;
pub mod logging;
pub mod output;
pub mod provenance;
