//! Per-staff holiday periods, including bulk "whole team" requests.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info};
use turno_core::{normalize, Staff};
use turno_directory::{resolve_name, NamedRecord, Resolution};

use crate::context::TurnContext;
use crate::handler::shop_holiday::{range_phrase, resolve_range};
use crate::handler::{arg_bool, arg_str, arg_str_list, ToolHandler};
use crate::intent::patterns;
use crate::types::{ToolName, ToolOutcome};

pub struct AddStaffHolidayHandler;

#[async_trait]
impl ToolHandler for AddStaffHolidayHandler {
    fn name(&self) -> ToolName {
        ToolName::AddStaffHoliday
    }

    fn schema(&self) -> Value {
        json!({
            "name": "add_staff_holiday",
            "description": "Anota vacaciones o días libres para una persona, varias, o todo el equipo.",
            "parameters": {
                "type": "object",
                "properties": {
                    "staff": {
                        "type": "string",
                        "description": "Nombre de la persona, si es una sola"
                    },
                    "staff_names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Nombres de varias personas"
                    },
                    "all_staff": {
                        "type": "boolean",
                        "description": "true si las vacaciones son para todo el equipo"
                    },
                    "dates": {
                        "type": "string",
                        "description": "Fechas, en YYYY-MM-DD o tal como las dijo el administrador"
                    }
                },
                "required": ["dates"]
            }
        })
    }

    async fn execute(&self, args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome> {
        add_staff_holiday(args, ctx).await
    }
}

async fn add_staff_holiday(args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome> {
    let range = match resolve_range(args, ctx) {
        Some(range) => range,
        None => {
            return vec![ToolOutcome::needs_info(
                "¿Qué días son las vacaciones?",
                vec!["dates".to_string()],
            )];
        }
    };

    let records = match ctx.directory.list_staff(ctx.scope).await {
        Ok(staff) => staff,
        Err(err) => {
            error!("Staff listing failed: {}", err);
            return vec![ToolOutcome::error(
                "No he podido consultar el equipo. Inténtalo de nuevo.",
            )];
        }
    };

    let targets = match resolve_targets(args, ctx, &records) {
        Ok(targets) => targets,
        Err(outcome) => return vec![*outcome],
    };

    let mut outcomes = Vec::with_capacity(targets.len());
    for member in &targets {
        match ctx
            .backend
            .add_staff_holiday(ctx.scope, member.id, range)
            .await
        {
            Ok(()) => {
                info!(scope = %ctx.scope, staff = %member.name, range = %range, "Staff holiday added");
                outcomes.push(ToolOutcome::added(format!(
                    "Vacaciones de {} anotadas {}.",
                    member.name,
                    range_phrase(range),
                )));
            }
            Err(err) => {
                error!("Staff holiday mutation failed for {}: {}", member.name, err);
                outcomes.push(ToolOutcome::error(format!(
                    "No he podido anotar las vacaciones de {}. Inténtalo de nuevo.",
                    member.name,
                )));
            }
        }
    }
    outcomes
}

/// Which staff the holiday applies to: the whole team, an explicit name
/// list, or a single name (possibly buried in the raw text).
fn resolve_targets(
    args: &Value,
    ctx: &TurnContext<'_>,
    records: &[Staff],
) -> Result<Vec<Staff>, Box<ToolOutcome>> {
    let norm = normalize(ctx.message);
    if arg_bool(args, "all_staff") || patterns::mentions_all_staff(&norm) {
        let active: Vec<Staff> = records.iter().filter(|s| s.active).cloned().collect();
        if active.is_empty() {
            return Err(Box::new(ToolOutcome::unavailable(
                "No hay nadie activo en el equipo.",
                "no_active_staff",
            )));
        }
        return Ok(active);
    }

    let names = arg_str_list(args, "staff_names");
    if names.len() > 1 {
        return resolve_name_list(&names, ctx, records);
    }

    let fragment = names.first().map(String::as_str).or(arg_str(args, "staff"));
    match resolve_name(fragment, records, ctx.message) {
        Resolution::One(member) => Ok(vec![member.clone()]),
        Resolution::Many(candidates) => Err(Box::new(
            ToolOutcome::needs_info(
                "Hay varias personas con ese nombre. ¿De quién son las vacaciones?",
                vec!["staff".to_string()],
            )
            .with_options(display_names(&candidates)),
        )),
        Resolution::Inactive => Err(Box::new(ToolOutcome::unavailable(
            "Esa persona ya no trabaja aquí.",
            "staff_inactive",
        ))),
        Resolution::None => Err(Box::new(ToolOutcome::needs_info(
            "¿Para quién son las vacaciones?",
            vec!["staff".to_string()],
        ))),
    }
}

/// Resolve several names at once. Ambiguous names surface the union of
/// their candidates in a single disambiguation set instead of failing
/// the whole list.
fn resolve_name_list(
    names: &[String],
    ctx: &TurnContext<'_>,
    records: &[Staff],
) -> Result<Vec<Staff>, Box<ToolOutcome>> {
    let mut resolved: Vec<Staff> = Vec::new();
    let mut ambiguous: Vec<String> = Vec::new();
    let mut unknown: Vec<String> = Vec::new();
    let mut inactive_only = false;

    for name in names {
        match resolve_name(Some(name), records, ctx.message) {
            Resolution::One(member) => resolved.push(member.clone()),
            Resolution::Many(candidates) => {
                for candidate in display_names(&candidates) {
                    if !ambiguous.contains(&candidate) {
                        ambiguous.push(candidate);
                    }
                }
            }
            Resolution::Inactive => inactive_only = true,
            Resolution::None => unknown.push(name.clone()),
        }
    }

    if !ambiguous.is_empty() {
        return Err(Box::new(
            ToolOutcome::needs_info(
                "Algunos nombres encajan con varias personas. ¿A quién te refieres?",
                vec!["staff_names".to_string()],
            )
            .with_options(ambiguous),
        ));
    }
    if !unknown.is_empty() {
        return Err(Box::new(ToolOutcome::needs_info(
            format!("No encuentro en el equipo a: {}.", unknown.join(", ")),
            vec!["staff_names".to_string()],
        )));
    }
    if resolved.is_empty() {
        if inactive_only {
            return Err(Box::new(ToolOutcome::unavailable(
                "Esas personas ya no trabajan aquí.",
                "staff_inactive",
            )));
        }
        return Err(Box::new(ToolOutcome::needs_info(
            "¿Para quién son las vacaciones?",
            vec!["staff_names".to_string()],
        )));
    }
    Ok(resolved)
}

fn display_names(records: &[&Staff]) -> Vec<String> {
    records.iter().map(|r| r.display_name().to_string()).collect()
}
