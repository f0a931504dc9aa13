pub mod batch;
pub mod fetch;
pub mod field_set;
pub mod loaders;

pub use batch::{clamp_delay_ms, BatchRequest, BatchResponse, BatchWindow, WindowState};
pub use fetch::FetchOutcome;
pub use field_set::FieldSet;
pub use loaders::{load_identifiers, parse_identifiers};
