//! Intent detection and tool selection.
//!
//! Pure functions over raw text, used for two things: narrowing the tool
//! list offered to the model for a turn, and forcing a specific tool call
//! outright when the intent is unambiguous.

pub(crate) mod patterns;

use turno_core::normalize;

use crate::types::ToolName;
use patterns::{any_match, PATTERNS};

/// Boolean intent signals detected in one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentSignals {
    pub holiday: bool,
    pub appointment: bool,
    pub shop_scope: bool,
    pub staff_scope: bool,
    pub multi_holiday: bool,
}

/// Detect intent signals in raw user text.
pub fn detect(text: &str) -> IntentSignals {
    let norm = normalize(text);
    let pats = &*PATTERNS;
    IntentSignals {
        holiday: any_match(&pats.holiday, &norm),
        appointment: any_match(&pats.appointment, &norm),
        shop_scope: any_match(&pats.shop_scope, &norm),
        staff_scope: any_match(&pats.staff_scope, &norm),
        multi_holiday: any_match(&pats.multi_holiday, &norm),
    }
}

/// Narrow the tool list offered to the model for this turn.
///
/// Holiday intent without appointment intent suppresses appointment
/// creation, and vice versa. Announcements are always offered.
pub fn offered_tools(signals: &IntentSignals) -> Vec<ToolName> {
    ToolName::ALL
        .into_iter()
        .filter(|tool| match tool {
            ToolName::CreateAppointment => !(signals.holiday && !signals.appointment),
            ToolName::AddShopHoliday | ToolName::AddStaffHoliday => {
                !(signals.appointment && !signals.holiday)
            }
            ToolName::CreateAnnouncement => true,
        })
        .collect()
}

/// Force a specific tool call when the intent leaves no real choice.
///
/// Only holiday intent forces, and only when its scope is unambiguous;
/// overlapping shop and staff markers mean asking the model instead. A
/// multi-holiday marker never forces, since a forced choice yields
/// exactly one call. A signal-free message infers the pending tool from
/// the assistant's immediately preceding clarification question.
pub fn forced_tool(
    signals: &IntentSignals,
    prior_assistant_message: Option<&str>,
) -> Option<ToolName> {
    if signals.multi_holiday {
        return None;
    }
    if signals.holiday && !signals.appointment {
        return holiday_tool_by_scope(signals);
    }
    if !signals.holiday && !signals.appointment {
        if let Some(prior) = prior_assistant_message {
            let norm = normalize(prior);
            if norm.contains("cita") {
                return Some(ToolName::CreateAppointment);
            }
            let prior_signals = detect(prior);
            if prior_signals.holiday {
                return holiday_tool_by_scope(&prior_signals);
            }
        }
    }
    None
}

fn holiday_tool_by_scope(signals: &IntentSignals) -> Option<ToolName> {
    match (signals.shop_scope, signals.staff_scope) {
        (true, false) => Some(ToolName::AddShopHoliday),
        (false, true) => Some(ToolName::AddStaffHoliday),
        // Both or neither: let the model decide.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Signal detection
    // =====================================================================

    #[test]
    fn test_holiday_vocabulary() {
        assert!(detect("pon vacaciones la semana que viene").holiday);
        assert!(detect("el viernes es festivo").holiday);
        assert!(detect("cerramos el lunes").holiday);
        assert!(detect("Ana tiene el día libre").holiday);
    }

    #[test]
    fn test_appointment_vocabulary() {
        assert!(detect("ponme una cita mañana").appointment);
        assert!(detect("quiero reservar para el viernes").appointment);
        assert!(detect("¿hay algún hueco por la tarde?").appointment);
    }

    #[test]
    fn test_shop_scope_markers() {
        assert!(detect("cerramos del 10 al 12").shop_scope);
        assert!(detect("vacaciones para el negocio").shop_scope);
        assert!(detect("la tienda no abre el lunes").shop_scope);
    }

    #[test]
    fn test_staff_scope_markers() {
        assert!(detect("vacaciones para Ana").staff_scope);
        assert!(detect("todo el equipo libra el viernes").staff_scope);
        assert!(detect("Luis se va de vacaciones").staff_scope);
    }

    #[test]
    fn test_multi_holiday_marker() {
        assert!(detect("vacaciones el 10 y otro día el 20").multi_holiday);
        assert!(detect("cierra el lunes y además de eso el viernes").multi_holiday);
        assert!(!detect("vacaciones el 10").multi_holiday);
    }

    #[test]
    fn test_plain_text_has_no_signals() {
        assert_eq!(detect("buenos días, ¿qué tal?"), IntentSignals::default());
    }

    #[test]
    fn test_detection_is_diacritic_insensitive() {
        assert!(detect("VACACIONES para el EQUIPO").holiday);
        assert!(detect("VACACIONES para el EQUIPO").staff_scope);
    }

    // =====================================================================
    // Tool narrowing
    // =====================================================================

    #[test]
    fn test_holiday_without_appointment_drops_appointment_tool() {
        let tools = offered_tools(&detect("vacaciones para Ana la semana que viene"));
        assert!(!tools.contains(&ToolName::CreateAppointment));
        assert!(tools.contains(&ToolName::AddStaffHoliday));
        assert!(tools.contains(&ToolName::AddShopHoliday));
        assert!(tools.contains(&ToolName::CreateAnnouncement));
    }

    #[test]
    fn test_appointment_without_holiday_drops_holiday_tools() {
        let tools = offered_tools(&detect("ponme una cita con Ana mañana"));
        assert!(tools.contains(&ToolName::CreateAppointment));
        assert!(!tools.contains(&ToolName::AddShopHoliday));
        assert!(!tools.contains(&ToolName::AddStaffHoliday));
    }

    #[test]
    fn test_mixed_intent_keeps_all_tools() {
        let tools = offered_tools(&detect("cancela la cita y pon vacaciones"));
        assert_eq!(tools.len(), ToolName::ALL.len());
    }

    #[test]
    fn test_no_signals_keeps_all_tools() {
        let tools = offered_tools(&detect("hola"));
        assert_eq!(tools.len(), ToolName::ALL.len());
    }

    // =====================================================================
    // Forced tool
    // =====================================================================

    #[test]
    fn test_shop_holiday_forced() {
        let signals = detect("cerramos la semana que viene");
        assert_eq!(forced_tool(&signals, None), Some(ToolName::AddShopHoliday));
    }

    #[test]
    fn test_staff_holiday_forced() {
        let signals = detect("vacaciones para Ana del 10 al 12");
        assert_eq!(forced_tool(&signals, None), Some(ToolName::AddStaffHoliday));
    }

    #[test]
    fn test_overlapping_scopes_do_not_force() {
        // Shop and staff markers together: ask the model.
        let signals = detect("cerramos y el equipo tiene vacaciones");
        assert!(signals.shop_scope && signals.staff_scope);
        assert_eq!(forced_tool(&signals, None), None);
    }

    #[test]
    fn test_holiday_without_scope_does_not_force() {
        let signals = detect("pon vacaciones del 10 al 12");
        assert_eq!(forced_tool(&signals, None), None);
    }

    #[test]
    fn test_appointment_intent_does_not_force() {
        let signals = detect("ponme una cita mañana");
        assert_eq!(forced_tool(&signals, None), None);
    }

    #[test]
    fn test_multi_holiday_never_forces() {
        let signals = detect("cerramos el 10 y otro día el 20");
        assert_eq!(forced_tool(&signals, None), None);
    }

    #[test]
    fn test_signal_free_reply_infers_appointment_from_prior_question() {
        let signals = detect("mañana a las 10");
        assert_eq!(
            forced_tool(&signals, Some("¿Para qué día quieres la cita?")),
            Some(ToolName::CreateAppointment)
        );
    }

    #[test]
    fn test_signal_free_reply_infers_holiday_from_prior_question() {
        let signals = detect("del 10 al 12 de agosto");
        assert_eq!(
            forced_tool(&signals, Some("¿Qué días cierra el negocio?")),
            Some(ToolName::AddShopHoliday)
        );
    }

    #[test]
    fn test_signal_free_reply_without_prior_question() {
        let signals = detect("mañana a las 10");
        assert_eq!(forced_tool(&signals, None), None);
    }

    #[test]
    fn test_signalful_message_ignores_prior_question() {
        // The current message's own intent wins over history.
        let signals = detect("mejor ponme una cita");
        assert_eq!(
            forced_tool(&signals, Some("¿Qué días cierra el negocio?")),
            None
        );
    }
}
