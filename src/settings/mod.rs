pub mod store;

pub use store::{AppSettings, default_data_dir, load_settings, save_settings};
