pub mod loaders;
pub mod record;
pub mod result;

pub use loaders::{create_sample_inventory, load_inventory, save_inventory, Inventory};
pub use record::AdRecord;
pub use result::{BatchMode, BatchResult, SubmissionResult};
