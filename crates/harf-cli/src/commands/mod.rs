pub mod convert_ops;
pub mod dict_ops;
pub mod settings_ops;

use std::io;

use harf_core::settings::SettingsError;
use harf_core::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Settings(#[from] SettingsError),
}
