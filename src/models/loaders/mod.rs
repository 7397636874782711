pub mod csv_loader;

pub use csv_loader::{create_sample_inventory, load_inventory, save_inventory, Inventory};
