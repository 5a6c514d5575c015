//! Country profile search.
//!
//! A delimited dataset is loaded once into an immutable [`RecordSet`]
//! and queried by short or official name through the CLI, the HTML
//! pages, or the JSON API.

pub mod cli;
pub mod loader;
pub mod models;
pub mod render;
pub mod search;
pub mod server;

pub use loader::{load, load_file, LoadError};
pub use models::{FieldNames, Record, RecordSet};
pub use search::search;
