//! Step type presentation metadata.

use serde::{Deserialize, Serialize};

/// Kind of an assistant step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Lookup,
    Schedule,
    Trigger,
    Code,
    Wait,
    Note,
    Split,
    Parallel,
    Loop,
    Alert,
    /// Older name for an assistant action, kept as an alias.
    Action,
}

/// How a step type is drawn in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTypeMeta {
    pub bg_class: &'static str,
    pub icon: &'static str,
    pub icon_invert: bool,
    pub label: &'static str,
}

const fn meta(
    bg_class: &'static str,
    icon: &'static str,
    icon_invert: bool,
    label: &'static str,
) -> StepTypeMeta {
    StepTypeMeta {
        bg_class,
        icon,
        icon_invert,
        label,
    }
}

const LOOKUP: StepTypeMeta = meta("bg-lookup", "assets/sim-ai/lookup.svg", false, "Lookup");
const SCHEDULE: StepTypeMeta = meta("bg-schedule", "assets/sim-ai/calendar.svg", false, "Schedule");
const TRIGGER: StepTypeMeta = meta("bg-trigger", "assets/sim-ai/trigger.svg", true, "Trigger");
const CODE: StepTypeMeta = meta("bg-code", "assets/sim-ai/code.svg", true, "Code");
const WAIT: StepTypeMeta = meta("bg-wait", "assets/sim-ai/wait.svg", true, "Wait");
const NOTE: StepTypeMeta = meta("bg-note", "assets/sim-ai/note.svg", true, "Note");
const SPLIT: StepTypeMeta = meta("bg-split", "assets/sim-ai/split.svg", true, "Split");
const PARALLEL: StepTypeMeta = meta("bg-parallel", "assets/sim-ai/parallel.svg", true, "Parallel");
const LOOP: StepTypeMeta = meta("bg-loop", "assets/sim-ai/loop.svg", true, "Loop");
const ALERT: StepTypeMeta = meta("bg-alert", "assets/sim-ai/alert.svg", true, "Alert");
const ACTION: StepTypeMeta = meta("bg-ivy", "assets/sim-ai/action.svg", true, "Ivy Action");

impl StepType {
    pub const ALL: [StepType; 11] = [
        StepType::Lookup,
        StepType::Schedule,
        StepType::Trigger,
        StepType::Code,
        StepType::Wait,
        StepType::Note,
        StepType::Split,
        StepType::Parallel,
        StepType::Loop,
        StepType::Alert,
        StepType::Action,
    ];

    /// Lower-case name used in step records.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Lookup => "lookup",
            StepType::Schedule => "schedule",
            StepType::Trigger => "trigger",
            StepType::Code => "code",
            StepType::Wait => "wait",
            StepType::Note => "note",
            StepType::Split => "split",
            StepType::Parallel => "parallel",
            StepType::Loop => "loop",
            StepType::Alert => "alert",
            StepType::Action => "action",
        }
    }

    /// Parse a type name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn meta(&self) -> &'static StepTypeMeta {
        match self {
            StepType::Lookup => &LOOKUP,
            StepType::Schedule => &SCHEDULE,
            StepType::Trigger => &TRIGGER,
            StepType::Code => &CODE,
            StepType::Wait => &WAIT,
            StepType::Note => &NOTE,
            StepType::Split => &SPLIT,
            StepType::Parallel => &PARALLEL,
            StepType::Loop => &LOOP,
            StepType::Alert => &ALERT,
            StepType::Action => &ACTION,
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a type name, falling back to the note style for unknown types.
pub fn step_type_meta(type_name: &str) -> &'static StepTypeMeta {
    StepType::from_name(type_name)
        .unwrap_or(StepType::Note)
        .meta()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type_meta() {
        let meta = step_type_meta("schedule");
        assert_eq!(meta.label, "Schedule");
        assert_eq!(meta.bg_class, "bg-schedule");
        assert!(!meta.icon_invert);
    }

    #[test]
    fn test_unknown_type_falls_back_to_note() {
        assert_eq!(step_type_meta("bogus"), StepType::Note.meta());
        assert_eq!(step_type_meta(""), StepType::Note.meta());
        // Names are case-sensitive like the record keys
        assert_eq!(step_type_meta("Lookup"), StepType::Note.meta());
    }

    #[test]
    fn test_action_alias_label() {
        assert_eq!(StepType::Action.meta().label, "Ivy Action");
        assert_eq!(StepType::Action.meta().bg_class, "bg-ivy");
    }

    #[test]
    fn test_names_round_trip() {
        for t in StepType::ALL {
            assert_eq!(StepType::from_name(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_serialized_name_matches() {
        let json = serde_json::to_string(&StepType::Parallel).unwrap();
        assert_eq!(json, "\"parallel\"");
    }
}
