//! Shop-wide holiday periods.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};
use turno_core::{format_date, DateRange};
use turno_temporal::parse_range;

use crate::context::TurnContext;
use crate::handler::{arg_str, ToolHandler};
use crate::types::{ToolName, ToolOutcome};

pub struct AddShopHolidayHandler;

#[async_trait]
impl ToolHandler for AddShopHolidayHandler {
    fn name(&self) -> ToolName {
        ToolName::AddShopHoliday
    }

    fn schema(&self) -> Value {
        json!({
            "name": "add_shop_holiday",
            "description": "Cierra el negocio entero durante un día o un periodo de fechas.",
            "parameters": {
                "type": "object",
                "properties": {
                    "dates": {
                        "type": "string",
                        "description": "Fechas del cierre, en YYYY-MM-DD o tal como las dijo el administrador"
                    }
                },
                "required": ["dates"]
            }
        })
    }

    async fn execute(&self, args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome> {
        vec![add_shop_holiday(args, ctx).await]
    }
}

async fn add_shop_holiday(args: &Value, ctx: &TurnContext<'_>) -> ToolOutcome {
    let range = match resolve_range(args, ctx) {
        Some(range) => range,
        None => {
            return ToolOutcome::needs_info(
                "¿Qué días cierra el negocio?",
                vec!["dates".to_string()],
            );
        }
    };

    if let Err(err) = ctx.backend.add_shop_holiday(ctx.scope, range).await {
        error!("Shop holiday mutation failed: {}", err);
        return ToolOutcome::error("No he podido registrar el cierre. Inténtalo de nuevo.");
    }
    info!(scope = %ctx.scope, range = %range, "Shop holiday added");

    ToolOutcome::added(format!("Cierre del negocio anotado: {}.", range_phrase(range)))
}

/// Range from the tool argument, falling back to the raw user text.
pub(crate) fn resolve_range(args: &Value, ctx: &TurnContext<'_>) -> Option<DateRange> {
    arg_str(args, "dates")
        .and_then(|text| parse_range(text, ctx.now, ctx.tz))
        .or_else(|| parse_range(ctx.message, ctx.now, ctx.tz))
}

pub(crate) fn range_phrase(range: DateRange) -> String {
    if range.start == range.end {
        format!("el {}", format_date(range.start))
    } else {
        format!(
            "del {} al {}",
            format_date(range.start),
            format_date(range.end)
        )
    }
}
