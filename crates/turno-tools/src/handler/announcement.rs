//! Customer-facing announcements.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::backend::AnnouncementRequest;
use crate::context::TurnContext;
use crate::handler::{arg_str, ToolHandler};
use crate::types::{ToolName, ToolOutcome};

pub struct CreateAnnouncementHandler;

#[async_trait]
impl ToolHandler for CreateAnnouncementHandler {
    fn name(&self) -> ToolName {
        ToolName::CreateAnnouncement
    }

    fn schema(&self) -> Value {
        json!({
            "name": "create_announcement",
            "description": "Publica un anuncio para los clientes del negocio.",
            "parameters": {
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Título corto del anuncio, si lo hay"
                    },
                    "body": {
                        "type": "string",
                        "description": "Texto del anuncio tal como debe publicarse"
                    }
                },
                "required": ["body"]
            }
        })
    }

    async fn execute(&self, args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome> {
        vec![create_announcement(args, ctx).await]
    }
}

async fn create_announcement(args: &Value, ctx: &TurnContext<'_>) -> ToolOutcome {
    // The body is never derived from the raw message: an announcement is
    // published verbatim, so the model has to extract it explicitly.
    let body = match arg_str(args, "body") {
        Some(body) => body.to_string(),
        None => {
            return ToolOutcome::needs_info(
                "¿Qué texto quieres publicar en el anuncio?",
                vec!["body".to_string()],
            );
        }
    };
    let title = arg_str(args, "title").map(str::to_string);

    let request = AnnouncementRequest { title, body };
    if let Err(err) = ctx.backend.create_announcement(ctx.scope, &request).await {
        error!("Announcement mutation failed: {}", err);
        return ToolOutcome::error("No he podido publicar el anuncio. Inténtalo de nuevo.");
    }
    info!(scope = %ctx.scope, "Announcement created");

    match &request.title {
        Some(title) => ToolOutcome::created(format!("Anuncio publicado: {}.", title)),
        None => ToolOutcome::created("Anuncio publicado."),
    }
}
