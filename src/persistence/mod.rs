pub mod files;
pub mod state_file;

pub use files::{
    atomic_write, config_file, ensure_data_dir, init_local_data_dir, read_file, state_file,
};
pub use state_file::{load_or_default, save_state};
