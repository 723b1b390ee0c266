mod settings;

pub use settings::{ClientCredentials, Settings, DEFAULT_CALLBACK_PORT};
