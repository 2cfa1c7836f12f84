// Dispatcher module
//
// Routes one incoming call to its handler and produces the uniform
// response envelope. This is the single boundary where failures are
// caught: dispatch never returns an error, and a failed remote call is
// reported once, not retried.

use std::sync::Arc;

use log::{debug, warn};

use crate::backend::{ControlPlaneClient, StoreManager};
use crate::errors::ToolError;
use crate::tools::registry::BackendKind;
use crate::tools::{CallRequest, CallResponse, ToolContext, ToolRegistry};

pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    control: Arc<ControlPlaneClient>,
    store: Arc<StoreManager>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<ToolRegistry>,
        control: Arc<ControlPlaneClient>,
        store: Arc<StoreManager>,
    ) -> Self {
        Self {
            registry,
            control,
            store,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch one call to completion.
    pub async fn dispatch(&self, request: CallRequest) -> CallResponse {
        let ctx = ToolContext::new(self.control.clone(), self.store.clone());
        debug!("[{}] dispatching '{}'", ctx.request_id, request.operation);

        match self.try_dispatch(request, &ctx).await {
            Ok(response) => response,
            Err(err) => {
                warn!("[{}] {}", ctx.request_id, err);
                CallResponse::error(&err)
            }
        }
    }

    async fn try_dispatch(
        &self,
        request: CallRequest,
        ctx: &ToolContext,
    ) -> Result<CallResponse, ToolError> {
        let tool = self
            .registry
            .get(&request.operation)
            .ok_or_else(|| ToolError::UnknownOperation(request.operation.clone()))?;

        // Make sure the backend the tool declared is actually reachable
        // before its handler runs.
        match tool.definition().backend {
            BackendKind::Store => {
                self.store.ensure_ready().await?;
            }
            BackendKind::ControlPlane => {
                self.control.check_configured()?;
            }
            BackendKind::None => {}
        }

        tool.execute(request.arguments, ctx).await
    }
}
