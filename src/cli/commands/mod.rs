//! Command implementations, one module per subcommand.

pub mod add;
pub mod clip;
pub mod completions;
pub mod print;
pub mod update;
pub mod vault_add;
pub mod vault_delete;
pub mod vault_list;
pub mod vault_switch;
pub mod vault_update;

use crate::cli::{data_dir, Cli};
use crate::errors::Result;
use crate::registry::VaultRegistry;

/// Load the registry for this invocation's data directory.
pub(crate) fn load_registry(cli: &Cli) -> Result<VaultRegistry> {
    VaultRegistry::load(&data_dir(cli)?)
}
