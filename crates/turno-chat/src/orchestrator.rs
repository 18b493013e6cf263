//! The bounded tool-calling loop driving one chat turn.
//!
//! The model decides which tool to call and with which arguments; the
//! handlers decide what actually happened and phrase it. Whatever the
//! loop produces, the turn ends with exactly one persisted assistant
//! message and an `Ok` reply, except for the caller's own precondition
//! violations and the model's contract violations.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, warn};
use turno_core::{
    format_date, format_time, ActionFlags, AdminUser, ChatConfig, ChatSession, MessageRole, Scope,
    TurnoConfig,
};
use turno_directory::Directory;
use turno_slots::Availability;
use turno_storage::{Database, FactRepository};
use turno_tools::{
    detect, forced_tool, offered_tools, OutcomeStatus, SchedulingBackend, ToolName, ToolOutcome,
    ToolRegistry, TurnContext,
};
use uuid::Uuid;

use crate::compose::{compose_outcomes, post_process, FALLBACK_REPLY, SERVICE_UNAVAILABLE_REPLY};
use crate::error::ChatError;
use crate::llm::{CompletionClient, CompletionRequest, ToolChoice, TranscriptEntry};
use crate::session::SessionManager;
use crate::types::{ChatReply, SessionView};

/// Hard cap on completion rounds within one turn.
pub const MAX_TOOL_ROUNDS: usize = 3;

pub struct ChatOrchestrator {
    scope: Scope,
    tz: FixedOffset,
    chat: ChatConfig,
    client: Arc<dyn CompletionClient>,
    registry: ToolRegistry,
    sessions: SessionManager,
    facts: FactRepository,
    directory: Arc<dyn Directory>,
    availability: Arc<dyn Availability>,
    backend: Arc<dyn SchedulingBackend>,
}

impl ChatOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &TurnoConfig,
        scope: Scope,
        db: Arc<Database>,
        client: Arc<dyn CompletionClient>,
        directory: Arc<dyn Directory>,
        availability: Arc<dyn Availability>,
        backend: Arc<dyn SchedulingBackend>,
    ) -> Result<Self, ChatError> {
        let tz = config.time.offset()?;
        Ok(Self {
            scope,
            tz,
            chat: config.chat.clone(),
            client,
            registry: ToolRegistry::with_default_handlers(),
            sessions: SessionManager::new(db.clone(), config.chat.message_cap, tz),
            facts: FactRepository::new(db),
            directory,
            availability,
            backend,
        })
    }

    /// Run one chat turn against the current clock.
    pub async fn chat(
        &self,
        admin_id: Uuid,
        message: &str,
        session_id: Option<Uuid>,
    ) -> Result<ChatReply, ChatError> {
        self.chat_at(admin_id, message, session_id, Utc::now()).await
    }

    /// Run one chat turn at an explicit instant.
    ///
    /// The only errors are the caller's precondition violations and the
    /// model's contract violations. Infrastructure trouble after the
    /// preconditions (directory, store or completion service down)
    /// degrades to the fixed service-unavailable sentence with whatever
    /// session state was already persisted left intact.
    pub async fn chat_at(
        &self,
        admin_id: Uuid,
        message: &str,
        session_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<ChatReply, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.chat.max_message_length {
            return Err(ChatError::MessageTooLong(self.chat.max_message_length));
        }
        let admin = match self.directory.find_admin(self.scope, admin_id).await {
            Ok(Some(admin)) => admin,
            Ok(None) => return Err(ChatError::NotAdmin(admin_id)),
            Err(e) => {
                warn!(admin = %admin_id, "Directory lookup failed: {}", e);
                return Ok(degraded(session_id.unwrap_or_else(Uuid::new_v4)));
            }
        };

        let session = match self.sessions.resolve(admin_id, session_id, now) {
            Ok(session) => session,
            Err(e) => {
                // No session could be resolved; hand back an id the caller
                // may echo, resolve tolerates unknown ids.
                warn!(admin = %admin_id, "Session store failed: {}", e);
                return Ok(degraded(session_id.unwrap_or_else(Uuid::new_v4)));
            }
        };

        match self.run_turn(&admin, &session, message, now).await {
            Ok(reply) => Ok(reply),
            Err(ChatError::Storage(e)) => {
                warn!(session = %session.id, "Store failed mid-turn: {}", e);
                Ok(degraded(session.id))
            }
            Err(other) => Err(other),
        }
    }

    async fn run_turn(
        &self,
        admin: &AdminUser,
        session: &ChatSession,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<ChatReply, ChatError> {
        let history = self.sessions.recent(session.id, self.chat.context_messages)?;
        self.sessions.append_user(session.id, message, now)?;

        let prior_assistant = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.clone());

        let signals = detect(message);
        let offered = offered_tools(&signals);
        let forced = forced_tool(&signals, prior_assistant.as_deref());
        debug!(
            session = %session.id,
            ?signals,
            ?forced,
            tools = offered.len(),
            "Turn started"
        );

        let system = self.system_prompt(admin, &session.summary, now)?;
        let schemas = self.registry.schemas(&offered);
        let mut transcript: Vec<TranscriptEntry> = history
            .iter()
            .map(|m| match m.role {
                MessageRole::User => TranscriptEntry::user(m.content.clone()),
                MessageRole::Assistant => TranscriptEntry::assistant(m.content.clone()),
            })
            .collect();
        transcript.push(TranscriptEntry::user(message));

        // Tool name and outcomes of every executed call, in order.
        let mut executed: Vec<(ToolName, ToolOutcome)> = Vec::new();
        let mut first_tool: Option<String> = None;
        let mut final_text: Option<String> = None;

        for round in 0..MAX_TOOL_ROUNDS {
            let tool_choice = match forced {
                Some(tool) if round == 0 => ToolChoice::Forced(tool),
                _ => ToolChoice::Auto,
            };
            let request = CompletionRequest {
                system: system.clone(),
                messages: transcript.clone(),
                tools: schemas.clone(),
                tool_choice,
            };
            let response = match self.client.complete(&request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(session = %session.id, round, "Completion service failed: {}", e);
                    return Ok(degraded(session.id));
                }
            };

            if response.tool_calls.is_empty() {
                match response.text.filter(|t| !t.trim().is_empty()) {
                    Some(text) => {
                        final_text = Some(text);
                        break;
                    }
                    None => continue,
                }
            }

            let mut round_outcomes: Vec<ToolOutcome> = Vec::new();
            for call in &response.tool_calls {
                let ctx = TurnContext {
                    scope: self.scope,
                    message,
                    now,
                    tz: self.tz,
                    directory: self.directory.as_ref(),
                    availability: self.availability.as_ref(),
                    backend: self.backend.as_ref(),
                };
                let outcomes = self.registry.execute(&call.name, &call.arguments, &ctx).await?;
                let payload =
                    serde_json::to_string(&outcomes).unwrap_or_else(|_| "[]".to_string());
                transcript.push(TranscriptEntry::tool_result(call.name.clone(), payload));
                if first_tool.is_none() {
                    first_tool = Some(call.name.clone());
                }
                // execute() already rejected unknown names.
                if let Ok(tool) = ToolName::from_str(&call.name) {
                    for outcome in outcomes {
                        executed.push((tool, outcome.clone()));
                        round_outcomes.push(outcome);
                    }
                }
            }

            let composed = compose_outcomes(&round_outcomes);
            if !composed.is_empty() {
                final_text = Some(composed);
                break;
            }
        }

        let mut text = post_process(final_text.as_deref().unwrap_or(FALLBACK_REPLY));
        if text.is_empty() {
            text = FALLBACK_REPLY.to_string();
        }

        let actions = action_flags(&executed);
        let tool_payload = if executed.is_empty() {
            None
        } else {
            let outcomes: Vec<&ToolOutcome> = executed.iter().map(|(_, o)| o).collect();
            Some(serde_json::to_string(&outcomes).unwrap_or_else(|_| "[]".to_string()))
        };

        self.sessions
            .append_assistant(session.id, &text, first_tool, tool_payload, now)?;
        self.sessions.touch(session.id, now)?;
        self.maybe_summarize(session.id).await;

        Ok(ChatReply {
            session_id: session.id,
            text,
            actions,
        })
    }

    /// Summary plus ordered history, for the owning admin only.
    pub fn get_session(&self, admin_id: Uuid, session_id: Uuid) -> Result<SessionView, ChatError> {
        self.sessions.view(admin_id, session_id)
    }

    fn system_prompt(
        &self,
        admin: &AdminUser,
        summary: &str,
        now: DateTime<Utc>,
    ) -> Result<String, ChatError> {
        let local = now.with_timezone(&self.tz);
        let mut prompt = format!(
            "Eres el asistente de agenda del negocio y hablas con {}, su administrador. \
             Hoy es {} y son las {} en hora local. Responde siempre en español, breve y directo, \
             sin formato markdown. Usa las herramientas para crear citas, anotar vacaciones y \
             publicar anuncios; nunca afirmes haber hecho algo sin llamar a la herramienta. \
             Escribe las fechas como YYYY-MM-DD y las horas como HH:MM.",
            admin.name,
            format_date(local.date_naive()),
            format_time(local.time()),
        );

        let facts = self.facts.list()?;
        if !facts.is_empty() {
            prompt.push_str("\n\nDatos del negocio:");
            for fact in &facts {
                prompt.push_str("\n- ");
                prompt.push_str(&fact.fact);
            }
        }

        if !summary.trim().is_empty() {
            prompt.push_str("\n\nResumen de la conversación anterior:\n");
            prompt.push_str(summary.trim());
        }

        Ok(prompt)
    }

    /// Refresh the rolling summary when the stored count hits a multiple
    /// of `summarize_every`. Best effort: any failure is logged and the
    /// turn's reply stands.
    async fn maybe_summarize(&self, session_id: Uuid) {
        if self.chat.summarize_every == 0 {
            return;
        }
        let count = match self.sessions.count(session_id) {
            Ok(count) => count,
            Err(e) => {
                warn!(session = %session_id, "Summary count failed: {}", e);
                return;
            }
        };
        if count == 0 || count % u64::from(self.chat.summarize_every) != 0 {
            return;
        }

        let history = match self.sessions.recent(session_id, self.chat.message_cap) {
            Ok(history) => history,
            Err(e) => {
                warn!(session = %session_id, "Summary history fetch failed: {}", e);
                return;
            }
        };
        let transcript = history
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");
        let request = CompletionRequest {
            system: "Resume la conversación siguiente en un párrafo corto en español. \
                     Conserva nombres, fechas y las acciones ya realizadas."
                .to_string(),
            messages: vec![TranscriptEntry::user(transcript)],
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
        };

        match self.client.complete(&request).await {
            Ok(response) => {
                if let Some(summary) = response.text.filter(|t| !t.trim().is_empty()) {
                    if let Err(e) = self.sessions.update_summary(session_id, summary.trim()) {
                        warn!(session = %session_id, "Summary store failed: {}", e);
                    }
                }
            }
            Err(e) => warn!(session = %session_id, "Summary completion failed: {}", e),
        }
    }
}

/// The fixed reply for a turn the infrastructure could not serve.
fn degraded(session_id: Uuid) -> ChatReply {
    ChatReply {
        session_id,
        text: SERVICE_UNAVAILABLE_REPLY.to_string(),
        actions: ActionFlags::default(),
    }
}

/// Which mutation kinds the executed outcomes amount to.
fn action_flags(executed: &[(ToolName, ToolOutcome)]) -> ActionFlags {
    let mut flags = ActionFlags::default();
    for (tool, outcome) in executed {
        if !matches!(outcome.status, OutcomeStatus::Created | OutcomeStatus::Added) {
            continue;
        }
        match tool {
            ToolName::CreateAppointment => flags.appointment_created = true,
            ToolName::AddShopHoliday | ToolName::AddStaffHoliday => flags.holiday_added = true,
            ToolName::CreateAnnouncement => flags.announcement_created = true,
        }
    }
    flags
}
