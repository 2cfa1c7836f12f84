// Key-value store tools
//
// Tools that operate on the keys inside one database over the managed
// store connection. The dispatcher ensures the connection before any of
// these run; handlers fetch the shared handle and issue commands.

mod batch;
mod bulk;
mod delete;
mod get;
mod keys;
mod set;
mod ttl;

pub use batch::SetValuesTool;
pub use bulk::{DeleteByPatternTool, FlushAllTool};
pub use delete::DeleteKeyTool;
pub use get::GetValueTool;
pub use keys::{CountKeysTool, ListKeysTool};
pub use set::SetValueTool;
pub use ttl::{ExpireKeyTool, GetTtlTool};

use crate::errors::ToolError;
use crate::tools::registry::ToolRegistry;

/// Register store tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    GetValueTool::register(registry)?;
    SetValueTool::register(registry)?;
    DeleteKeyTool::register(registry)?;
    ListKeysTool::register(registry)?;
    CountKeysTool::register(registry)?;
    GetTtlTool::register(registry)?;
    ExpireKeyTool::register(registry)?;
    DeleteByPatternTool::register(registry)?;
    FlushAllTool::register(registry)?;
    SetValuesTool::register(registry)?;
    Ok(())
}
