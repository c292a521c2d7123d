// # Disabled Backend
//
// Stand-in for storage the host has turned off (private browsing,
// blocked cookies). Every call fails.

use crate::Error;
use crate::traits::StorageBackend;

/// Backend whose every operation fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBackend;

impl StorageBackend for DisabledBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, Error> {
        Err(Error::storage("storage is disabled"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::storage("storage is disabled"))
    }

    fn remove_item(&self, _key: &str) -> Result<(), Error> {
        Err(Error::storage("storage is disabled"))
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
