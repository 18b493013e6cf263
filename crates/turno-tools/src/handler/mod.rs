//! Tool handlers and the execution registry.

pub mod announcement;
pub mod appointment;
pub mod shop_holiday;
pub mod staff_holiday;

#[cfg(test)]
pub(crate) mod testutil;

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::context::TurnContext;
use crate::error::ToolError;
use crate::types::{ToolName, ToolOutcome};

/// One executable tool.
///
/// `execute` never fails: internal problems surface as `error` outcomes.
/// It returns a list because bulk actions (staff holidays for the whole
/// team) produce one outcome per affected record.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> ToolName;

    /// JSON schema advertised to the model for this tool.
    fn schema(&self) -> Value;

    async fn execute(&self, args: &Value, ctx: &TurnContext<'_>) -> Vec<ToolOutcome>;
}

/// Registry of all executable tools.
pub struct ToolRegistry {
    handlers: HashMap<ToolName, Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry {
            handlers: HashMap::new(),
        }
    }

    /// A registry with every supported tool registered.
    pub fn with_default_handlers() -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(appointment::CreateAppointmentHandler));
        registry.register(Box::new(shop_holiday::AddShopHolidayHandler));
        registry.register(Box::new(staff_holiday::AddStaffHolidayHandler));
        registry.register(Box::new(announcement::CreateAnnouncementHandler));
        registry
    }

    pub fn register(&mut self, handler: Box<dyn ToolHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    pub fn get(&self, name: ToolName) -> Option<&dyn ToolHandler> {
        self.handlers.get(&name).map(Box::as_ref)
    }

    /// Schemas for the given tools, in the given order. Unregistered
    /// names are skipped.
    pub fn schemas(&self, names: &[ToolName]) -> Vec<Value> {
        names
            .iter()
            .filter_map(|name| self.get(*name))
            .map(|handler| handler.schema())
            .collect()
    }

    /// Execute a tool call as requested by the model.
    ///
    /// The only error paths are the model's own contract violations: an
    /// unknown tool name or arguments that do not parse as JSON.
    pub async fn execute(
        &self,
        name: &str,
        arguments: &str,
        ctx: &TurnContext<'_>,
    ) -> Result<Vec<ToolOutcome>, ToolError> {
        let tool = ToolName::from_str(name).map_err(|_| ToolError::UnknownTool(name.to_string()))?;
        let handler = self
            .get(tool)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args: Value =
            serde_json::from_str(arguments).map_err(|e| ToolError::MalformedArguments {
                tool: name.to_string(),
                detail: e.to_string(),
            })?;
        debug!("Executing tool {} with args {}", tool, args);
        Ok(handler.execute(&args, ctx).await)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}

// =============================================================================
// Shared argument helpers
// =============================================================================

/// A non-empty trimmed string argument.
pub(crate) fn arg_str<'v>(args: &'v Value, key: &str) -> Option<&'v str> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn arg_bool(args: &Value, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// A string-array argument, with empty entries dropped.
pub(crate) fn arg_str_list(args: &Value, key: &str) -> Vec<String> {
    args.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::testutil::{ctx, FakeWorld};
    use super::*;

    #[test]
    fn test_default_registry_has_all_tools() {
        let registry = ToolRegistry::with_default_handlers();
        for name in ToolName::ALL {
            assert!(registry.get(name).is_some(), "missing handler for {name}");
        }
        assert_eq!(registry.schemas(&ToolName::ALL).len(), 4);
    }

    #[test]
    fn test_schemas_follow_requested_subset() {
        let registry = ToolRegistry::with_default_handlers();
        let schemas = registry.schemas(&[ToolName::AddShopHoliday]);
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["name"], "add_shop_holiday");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = ToolRegistry::with_default_handlers();
        let world = FakeWorld::new();
        let ctx = ctx(&world, "hola");
        let result = registry.execute("drop_database", "{}", &ctx).await;
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_an_error() {
        let registry = ToolRegistry::with_default_handlers();
        let world = FakeWorld::new();
        let ctx = ctx(&world, "hola");
        let result = registry
            .execute("create_announcement", "{not json", &ctx)
            .await;
        assert!(matches!(result, Err(ToolError::MalformedArguments { .. })));
    }

    #[test]
    fn test_arg_helpers() {
        let args = serde_json::json!({
            "name": "  Ana  ",
            "empty": "   ",
            "flag": true,
            "names": ["Ana", " Luis ", ""],
        });
        assert_eq!(arg_str(&args, "name"), Some("Ana"));
        assert_eq!(arg_str(&args, "empty"), None);
        assert_eq!(arg_str(&args, "missing"), None);
        assert!(arg_bool(&args, "flag"));
        assert!(!arg_bool(&args, "missing"));
        assert_eq!(arg_str_list(&args, "names"), vec!["Ana", "Luis"]);
        assert!(arg_str_list(&args, "missing").is_empty());
    }
}
