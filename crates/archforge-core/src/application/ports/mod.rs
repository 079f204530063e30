//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `archforge-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented by
//!   infrastructure
//!   - `Renderer`: template id + context → text
//!   - `FileStore`: file access with atomic writes
//!   - `MetadataSource`: architecture and adapter descriptors
//!   - `ProjectConfigStore`: persisted `.archforge.yml`
//!
//! - **Driving (Input) Ports**: the CLI calls the services directly.

pub mod output;

pub use output::{AdapterQuery, FileStore, MetadataSource, ProjectConfigStore, Renderer};
