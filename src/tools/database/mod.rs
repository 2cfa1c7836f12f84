// Database management tools
//
// Tools that talk to the platform control-plane API to manage the
// databases themselves, as opposed to the keys inside one.

mod backup;
mod create;
mod delete;
mod details;
mod list;
mod stats;

pub use backup::DatabaseExportTool;
pub use create::DatabaseCreateTool;
pub use delete::DatabaseDeleteTool;
pub use details::DatabaseDetailsTool;
pub use list::DatabaseListTool;
pub use stats::DatabaseStatsTool;

use crate::errors::ToolError;
use crate::tools::registry::ToolRegistry;

/// Register database management tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    DatabaseCreateTool::register(registry)?;
    DatabaseListTool::register(registry)?;
    DatabaseDetailsTool::register(registry)?;
    DatabaseDeleteTool::register(registry)?;
    DatabaseStatsTool::register(registry)?;
    DatabaseExportTool::register(registry)?;
    Ok(())
}
