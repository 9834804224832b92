//! Configuration loading for the freight desk service.
//!
//! Settings come from environment variables, optionally seeded from a
//! `.env` file by the binary before [`Settings::from_env`] runs.
//!
//! # Example
//!
//! ```no_run
//! use freight_desk::config::Settings;
//!
//! let settings = Settings::from_env().unwrap();
//! println!("Dataset: {}", settings.loads_path.display());
//! ```

mod settings;

pub use settings::{
    DEFAULT_API_KEY, DEFAULT_BIND_ADDRESS, DEFAULT_FMCSA_API_BASE, DEFAULT_LOADS_PATH,
    FMCSA_KEY_PLACEHOLDER, Settings,
};
