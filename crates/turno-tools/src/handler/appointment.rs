//! Appointment creation.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::error;
use turno_core::{format_date, format_time, normalize, CustomerRef, Service, Staff};
use turno_directory::{resolve_name, Resolution};
use turno_slots::{find_slot, SlotOutcome, SlotQuery, UnavailableReason};
use turno_temporal::{parse_date, parse_time};

use crate::backend::AppointmentRequest;
use crate::context::TurnContext;
use crate::handler::{arg_bool, arg_str, ToolHandler};
use crate::intent::patterns;
use crate::types::{ToolName, ToolOutcome};

pub struct CreateAppointmentHandler;

#[async_trait]
impl ToolHandler for CreateAppointmentHandler {
    fn name(&self) -> ToolName {
        ToolName::CreateAppointment
    }

    fn schema(&self) -> Value {
        json!({
            "name": "create_appointment",
            "description": "Crea una cita para un cliente. Busca el primer hueco libre si faltan fecha u hora.",
            "parameters": {
                "type": "object",
                "properties": {
                    "service": {
                        "type": "string",
                        "description": "Nombre del servicio solicitado"
                    },
                    "staff": {
                        "type": "string",
                        "description": "Nombre del miembro del equipo, si el cliente pidió uno"
                    },
                    "customer_name": {
                        "type": "string",
                        "description": "Nombre del cliente"
                    },
                    "customer_email": {
                        "type": "string",
                        "description": "Email del cliente, si lo dio"
                    },
                    "customer_phone": {
                        "type": "string",
                        "description": "Teléfono del cliente, si lo dio"
                    },
                    "date": {
                        "type": "string",
                        "description": "Fecha pedida, en YYYY-MM-DD o tal como la dijo el cliente"
                    },
                    "time": {
                        "type": "string",
                        "description": "Hora pedida, en HH:MM o tal como la dijo el cliente"
                    },
                    "period": {
                        "type": "string",
                        "enum": ["morning", "afternoon", "night"],
                        "description": "Franja del día preferida"
                    },
                    "soonest": {
                        "type": "boolean",
                        "description": "true si el cliente quiere la cita cuanto antes"
                    }
                },
                "required": ["service", "customer_name"]
            }
        })
    }

    async fn execute(&self, args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome> {
        vec![create_appointment(args, ctx).await]
    }
}

async fn create_appointment(args: &Value, ctx: &TurnContext<'_>) -> ToolOutcome {
    // Service first: nothing else makes sense without one.
    let services = match ctx.directory.list_services(ctx.scope).await {
        Ok(services) => services,
        Err(err) => {
            error!("Service listing failed: {}", err);
            return ToolOutcome::error("No he podido consultar los servicios. Inténtalo de nuevo.");
        }
    };
    let service = match resolve_name(arg_str(args, "service"), &services, ctx.message) {
        Resolution::One(service) => service.clone(),
        Resolution::Many(candidates) => {
            return ToolOutcome::needs_info(
                "Hay varios servicios que encajan. ¿Cuál de ellos es?",
                vec!["service".to_string()],
            )
            .with_options(names_of(&candidates));
        }
        Resolution::Inactive => {
            return ToolOutcome::unavailable(
                "Ese servicio ya no se ofrece.",
                "service_inactive",
            );
        }
        Resolution::None => {
            return ToolOutcome::needs_info(
                "¿Qué servicio quiere el cliente?",
                vec!["service".to_string()],
            );
        }
    };

    let staff_records = match ctx.directory.list_staff(ctx.scope).await {
        Ok(staff) => staff,
        Err(err) => {
            error!("Staff listing failed: {}", err);
            return ToolOutcome::error("No he podido consultar el equipo. Inténtalo de nuevo.");
        }
    };
    let staff_fragment = arg_str(args, "staff");
    let candidates: Vec<Staff> = match resolve_name(staff_fragment, &staff_records, ctx.message) {
        Resolution::One(member) => vec![member.clone()],
        Resolution::Many(candidates) => {
            return ToolOutcome::needs_info(
                "Hay varias personas con ese nombre. ¿Con quién quiere la cita?",
                vec!["staff".to_string()],
            )
            .with_options(names_of(&candidates));
        }
        Resolution::Inactive => {
            return ToolOutcome::unavailable(
                "Esa persona ya no trabaja aquí.",
                "staff_inactive",
            );
        }
        Resolution::None => {
            if staff_fragment.is_some() {
                return ToolOutcome::needs_info(
                    "No encuentro a nadie del equipo con ese nombre. ¿Con quién es la cita?",
                    vec!["staff".to_string()],
                );
            }
            // No preference given: search across all active staff.
            staff_records.iter().filter(|s| s.active).cloned().collect()
        }
    };

    let customer = match resolve_customer(args, ctx).await {
        Ok(customer) => customer,
        Err(outcome) => return *outcome,
    };

    let norm = normalize(ctx.message);
    let date = arg_str(args, "date")
        .and_then(|text| parse_date(text, ctx.now, ctx.tz))
        .or_else(|| parse_date(ctx.message, ctx.now, ctx.tz));
    let time = arg_str(args, "time")
        .and_then(parse_time)
        .or_else(|| parse_time(ctx.message));
    let period = arg_str(args, "period")
        .and_then(|text| text.parse().ok())
        .or_else(|| patterns::day_period_marker(&norm));
    let soonest = arg_bool(args, "soonest") || patterns::wants_soonest(&norm);

    let query = SlotQuery {
        date,
        time,
        period,
        soonest,
    };
    let outcome = find_slot(
        ctx.availability,
        ctx.scope,
        &candidates,
        &service,
        &query,
        ctx.now,
        ctx.tz,
    )
    .await;

    let pick = match outcome {
        SlotOutcome::Found(pick) => pick,
        SlotOutcome::Unavailable(UnavailableReason::SlotUnavailable) => {
            return ToolOutcome::unavailable(
                "No hay hueco a esa hora.",
                UnavailableReason::SlotUnavailable.as_str(),
            );
        }
        SlotOutcome::Unavailable(UnavailableReason::SlotWindowUnavailable) => {
            return ToolOutcome::unavailable(
                "No hay huecos disponibles en los próximos días.",
                UnavailableReason::SlotWindowUnavailable.as_str(),
            );
        }
    };

    let request = AppointmentRequest {
        staff_id: pick.staff_id,
        service_id: service.id,
        customer: customer.clone(),
        date: pick.date,
        time: pick.time,
    };
    if let Err(err) = ctx.backend.create_appointment(ctx.scope, &request).await {
        error!("Appointment creation failed: {}", err);
        return ToolOutcome::error("No he podido crear la cita. Inténtalo de nuevo.");
    }

    ToolOutcome::created(format!(
        "Cita creada: {} con {} el {} a las {} para {}.",
        service.name,
        pick.staff_name,
        format_date(pick.date),
        format_time(pick.time),
        customer.display_name(),
    ))
}

/// Infer the customer: registered record by contact lookup or name
/// resolution, otherwise a transient guest.
async fn resolve_customer(
    args: &Value,
    ctx: &TurnContext<'_>,
) -> Result<CustomerRef, Box<ToolOutcome>> {
    let name = arg_str(args, "customer_name");
    let email = arg_str(args, "customer_email");
    let phone = arg_str(args, "customer_phone");

    if email.is_some() || phone.is_some() {
        match ctx
            .directory
            .find_customer_by_contact(ctx.scope, email, phone)
            .await
        {
            Ok(Some(customer)) => {
                return Ok(CustomerRef::Registered {
                    id: customer.id,
                    name: customer.name,
                });
            }
            Ok(None) => {}
            Err(err) => {
                error!("Customer lookup failed: {}", err);
                return Err(Box::new(ToolOutcome::error(
                    "No he podido consultar los clientes. Inténtalo de nuevo.",
                )));
            }
        }
    }

    if let Some(name) = name {
        let customers = match ctx.directory.list_customers(ctx.scope).await {
            Ok(customers) => customers,
            Err(err) => {
                error!("Customer listing failed: {}", err);
                return Err(Box::new(ToolOutcome::error(
                    "No he podido consultar los clientes. Inténtalo de nuevo.",
                )));
            }
        };
        return match resolve_name(Some(name), &customers, ctx.message) {
            Resolution::One(customer) => Ok(CustomerRef::Registered {
                id: customer.id,
                name: customer.name.clone(),
            }),
            Resolution::Many(candidates) => Err(Box::new(
                ToolOutcome::needs_info(
                    "Hay varios clientes con ese nombre. ¿Cuál de ellos es?",
                    vec!["customer_name".to_string()],
                )
                .with_options(names_of(&candidates)),
            )),
            // An unknown or archived name still books fine as a guest.
            Resolution::Inactive | Resolution::None => Ok(CustomerRef::Guest {
                name: name.to_string(),
                email: email.map(str::to_string),
                phone: phone.map(str::to_string),
            }),
        };
    }

    Err(Box::new(ToolOutcome::needs_info(
        "¿Para qué cliente es la cita?",
        vec!["customer_name".to_string()],
    )))
}

fn names_of<T: turno_directory::NamedRecord>(records: &[&T]) -> Vec<String> {
    records.iter().map(|r| r.display_name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testutil::{ctx, d, t, FakeWorld};
    use crate::types::OutcomeStatus;

    fn world_with_basics() -> FakeWorld {
        let mut world = FakeWorld::new();
        world.add_staff("Ana", true);
        world.add_staff("Luis", true);
        world.add_service("Corte de pelo", true);
        world
    }

    fn staff_id(world: &FakeWorld, name: &str) -> uuid::Uuid {
        world.staff.iter().find(|s| s.name == name).unwrap().id
    }

    async fn run(world: &FakeWorld, message: &str, args: Value) -> ToolOutcome {
        let ctx = ctx(world, message);
        let mut outcomes = CreateAppointmentHandler.execute(&args, &ctx).await;
        assert_eq!(outcomes.len(), 1);
        outcomes.remove(0)
    }

    // ---- Happy path ----

    #[tokio::test]
    async fn test_explicit_booking_creates_appointment() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(18, 0)]);

        let message = "cita mañana a las 18:00 con Ana para corte de pelo, cliente Laura";
        let args = json!({
            "service": "corte de pelo",
            "staff": "Ana",
            "customer_name": "Laura",
            "date": "mañana",
            "time": "18:00",
        });
        let outcome = run(&world, message, args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        assert!(outcome.message.contains("2025-06-11"));
        assert!(outcome.message.contains("18:00"));
        assert!(outcome.message.contains("Ana"));
        assert!(outcome.message.contains("Laura"));

        let created = world.appointments.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].staff_id, ana);
        assert_eq!(created[0].date, d(2025, 6, 11));
        assert_eq!(created[0].time, t(18, 0));
    }

    #[tokio::test]
    async fn test_requested_time_not_open_is_slot_unavailable() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(10, 0)]);

        let args = json!({
            "service": "corte",
            "staff": "Ana",
            "customer_name": "Laura",
            "date": "2025-06-11",
            "time": "18:00",
        });
        let outcome = run(&world, "cita mañana a las 18:00 con Ana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Unavailable);
        assert_eq!(outcome.reason.as_deref(), Some("slot_unavailable"));
        assert!(world.appointments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_date_and_time_derived_from_raw_message() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(18, 0)]);

        // The model extracted nothing but the service and customer.
        let message = "cita mañana a las 18:00 con Ana para corte, cliente Laura";
        let args = json!({ "service": "corte", "customer_name": "Laura" });
        let outcome = run(&world, message, args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        let created = world.appointments.lock().unwrap();
        assert_eq!(created[0].date, d(2025, 6, 11));
        assert_eq!(created[0].time, t(18, 0));
    }

    #[tokio::test]
    async fn test_omitted_staff_searches_all_active() {
        let mut world = world_with_basics();
        world.add_staff("Marta", false);
        let luis = staff_id(&world, "Luis");
        world.open(d(2025, 6, 11), luis, &[(9, 0)]);

        let args = json!({ "service": "corte", "customer_name": "Laura" });
        let outcome = run(&world, "cita para un corte, cliente Laura", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        let created = world.appointments.lock().unwrap();
        assert_eq!(created[0].staff_id, luis);
    }

    #[tokio::test]
    async fn test_soonest_phrase_forces_search() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(9, 0), (18, 0)]);

        // Explicit date and time present, which exact mode would pin to
        // 18:00, but "cuanto antes" wins and takes the earliest slot.
        let message = "cita con Ana cuanto antes, cliente Laura";
        let args = json!({
            "service": "corte",
            "staff": "Ana",
            "customer_name": "Laura",
            "date": "2025-06-11",
            "time": "18:00",
        });
        let outcome = run(&world, message, args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        let created = world.appointments.lock().unwrap();
        assert_eq!(created[0].date, d(2025, 6, 11));
        assert_eq!(created[0].time, t(9, 0));
    }

    // ---- Customer inference ----

    #[tokio::test]
    async fn test_registered_customer_by_email() {
        let mut world = world_with_basics();
        let laura = world.add_customer("Laura Campos", Some("laura@example.com"), None);
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(10, 0)]);

        let args = json!({
            "service": "corte",
            "customer_email": "laura@example.com",
            "date": "2025-06-11",
        });
        let outcome = run(&world, "cita para mañana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        let created = world.appointments.lock().unwrap();
        assert_eq!(
            created[0].customer,
            CustomerRef::Registered {
                id: laura,
                name: "Laura Campos".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_customer_becomes_guest() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(10, 0)]);

        let args = json!({
            "service": "corte",
            "customer_name": "Laura",
            "customer_phone": "600111222",
            "date": "2025-06-11",
        });
        let outcome = run(&world, "cita para mañana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Created);
        let created = world.appointments.lock().unwrap();
        assert_eq!(
            created[0].customer,
            CustomerRef::Guest {
                name: "Laura".to_string(),
                email: None,
                phone: Some("600111222".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_customer_needs_info() {
        let world = world_with_basics();
        let args = json!({ "service": "corte" });
        let outcome = run(&world, "ponme una cita", args).await;

        assert_eq!(outcome.status, OutcomeStatus::NeedsInfo);
        assert_eq!(outcome.missing_fields, vec!["customer_name"]);
    }

    // ---- Entity resolution outcomes ----

    #[tokio::test]
    async fn test_ambiguous_staff_surfaces_options() {
        let mut world = world_with_basics();
        world.add_staff("Ana Maria", true);
        world.add_staff("Ana Belen", true);

        let args = json!({ "service": "corte", "staff": "ana", "customer_name": "Laura" });
        let outcome = run(&world, "cita con ana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::NeedsInfo);
        assert_eq!(outcome.missing_fields, vec!["staff"]);
        assert_eq!(outcome.options.len(), 3);
        assert!(world.appointments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inactive_staff_is_unavailable() {
        let mut world = world_with_basics();
        world.add_staff("Pedro", false);

        let args = json!({ "service": "corte", "staff": "Pedro", "customer_name": "Laura" });
        let outcome = run(&world, "cita con Pedro", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Unavailable);
        assert_eq!(outcome.reason.as_deref(), Some("staff_inactive"));
    }

    #[tokio::test]
    async fn test_missing_service_needs_info() {
        let world = world_with_basics();
        let args = json!({ "customer_name": "Laura" });
        let outcome = run(&world, "ponme una cita con Ana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::NeedsInfo);
        assert_eq!(outcome.missing_fields, vec!["service"]);
    }

    // ---- Failure handling ----

    #[tokio::test]
    async fn test_mutation_failure_is_error_outcome_not_panic() {
        let mut world = world_with_basics();
        let ana = staff_id(&world, "Ana");
        world.open(d(2025, 6, 11), ana, &[(10, 0)]);
        world.fail_mutations = true;

        let args = json!({
            "service": "corte",
            "customer_name": "Laura",
            "date": "2025-06-11",
        });
        let outcome = run(&world, "cita para mañana", args).await;

        assert_eq!(outcome.status, OutcomeStatus::Error);
    }
}
