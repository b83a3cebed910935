pub mod error;
pub mod registry;
pub mod store;

pub use error::RegistryError;
pub use registry::{GolferRegistry, GOLFER_ID_LEN};
pub use store::{CsvStore, GolferStore, MemoryStore, REGISTRY_HEADER};
