//! Mock assistant step catalog.
//!
//! Display-only records describing a sample assistant workflow. Nothing here
//! executes; callers get fresh owned copies they are free to modify.

use std::collections::BTreeMap;

use serde::Serialize;

use super::step_type::{StepType, StepTypeMeta};

/// Data sources offered in the step editor.
pub const SOURCE_OPTIONS: &[&str] = &[
    "Entra ID",
    "Cisco Meraki",
    "Kaseya VSA",
    "Sophos XDR",
    "KnowBe4",
    "Avanon",
    "Cisco Umbrella",
    "Kaseya Spanning",
    "Sophos EDR",
    "SharePoint",
    "Microsoft 365",
    "Google Workspace",
    "OneLogin",
];

/// Number of steps in the catalog.
pub const MOCK_STEP_COUNT: usize = 4;

/// A data source attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSource {
    pub label: String,
    pub icon: String,
}

/// A key/value detail row. Code rows carry an optional snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRow {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepComment {
    pub author: String,
    pub body: String,
    pub stamp: String,
}

/// Full definition of one catalog step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub id: u32,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub title: String,
    /// Title shown in the builder, when it differs from `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder_title: Option<String>,
    /// Pill label override; the type label is used otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pill: Option<String>,
    pub sources: Vec<StepSource>,
    pub rows: Vec<StepRow>,
    pub comments: Vec<StepComment>,
    /// Narrative shown in the assistant panel.
    pub ivy_says: String,
    pub builder_data: BTreeMap<String, String>,
    pub details_collapsed: bool,
    pub connections: Vec<u32>,
    pub x: i32,
    pub y: i32,
}

/// Sidebar view of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarStep {
    pub pill: String,
    pub type_meta: StepTypeMeta,
    pub title: String,
    pub sources: Vec<StepSource>,
    pub rows: Vec<StepRow>,
    pub comments: Vec<StepComment>,
    pub ivy_says: String,
}

/// Builder canvas node template for a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderNode {
    pub id: u32,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub type_meta: StepTypeMeta,
    pub title: String,
    pub data: BTreeMap<String, String>,
    pub details_collapsed: bool,
    pub connections: Vec<u32>,
    pub x: i32,
    pub y: i32,
}

impl StepDefinition {
    pub fn type_meta(&self) -> &'static StepTypeMeta {
        self.step_type.meta()
    }

    /// Pill label, defaulting to the type label.
    pub fn pill_label(&self) -> &str {
        self.pill.as_deref().unwrap_or(self.type_meta().label)
    }

    pub fn to_sidebar(&self) -> SidebarStep {
        SidebarStep {
            pill: self.pill_label().to_string(),
            type_meta: *self.type_meta(),
            title: self.title.clone(),
            sources: self.sources.clone(),
            rows: self.rows.clone(),
            comments: self.comments.clone(),
            ivy_says: self.ivy_says.clone(),
        }
    }

    pub fn to_builder_node(&self) -> BuilderNode {
        BuilderNode {
            id: self.id,
            step_type: self.step_type,
            type_meta: *self.type_meta(),
            title: self.builder_title.as_ref().unwrap_or(&self.title).clone(),
            data: self.builder_data.clone(),
            details_collapsed: self.details_collapsed,
            connections: self.connections.clone(),
            x: self.x,
            y: self.y,
        }
    }
}

fn row(key: &str, value: &str) -> StepRow {
    StepRow {
        key: key.to_string(),
        value: Some(value.to_string()),
        is_code: false,
        code: None,
        show_warning: false,
    }
}

fn code_row(key: &str, code: Option<&str>, show_warning: bool) -> StepRow {
    StepRow {
        key: key.to_string(),
        value: None,
        is_code: true,
        code: code.map(str::to_string),
        show_warning,
    }
}

fn comment(author: &str, body: &str, stamp: &str) -> StepComment {
    StepComment {
        author: author.to_string(),
        body: body.to_string(),
        stamp: stamp.to_string(),
    }
}

fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const PRUNE_SQL: &str =
    "DELETE FROM [SP GetAudit] WHERE [Created] < DATEADD(day, -7, GETUTCDATE())";

/// All catalog steps, in workflow order.
pub fn step_definitions() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            id: 1,
            step_type: StepType::Schedule,
            title: "Every Morning".to_string(),
            builder_title: None,
            pill: None,
            sources: Vec::new(),
            rows: vec![
                row("Frequency", "Once Daily"),
                row("Time", "09:00 am"),
                row("Timezone", "CST"),
            ],
            comments: vec![
                comment("Ivy", "Schedule is set for weekday mornings.", "Feb 26, 8:57 AM"),
                comment("You", "Keep this at 9:00 am local time.", "Feb 26, 8:59 AM"),
            ],
            ivy_says: "This step triggers the assistant each weekday morning at 9:00 am."
                .to_string(),
            builder_data: data(&[
                ("frequency", "Once Daily"),
                ("time", "09:00 am"),
                ("timezone", "CST"),
            ]),
            details_collapsed: false,
            connections: vec![2],
            x: 0,
            y: 0,
        },
        StepDefinition {
            id: 2,
            step_type: StepType::Lookup,
            title: "SP GetAudit Data".to_string(),
            builder_title: Some("Get SP Audit Data".to_string()),
            pill: Some("Data Source(s)".to_string()),
            sources: vec![StepSource {
                label: "SharePoint".to_string(),
                icon: "assets/sharepoint.png".to_string(),
            }],
            rows: vec![
                row("Source Table/List", "SP GetAudit"),
                code_row("Code", None, true),
            ],
            comments: vec![
                comment("Ivy", "Using the SP GetAudit list as the source.", "Feb 26, 9:02 AM"),
                comment(
                    "You",
                    "Confirm this should run every weekday morning.",
                    "Feb 26, 9:05 AM",
                ),
            ],
            ivy_says: "This step pulls your SharePoint data for recent users from the \"SP GetAudit\" list."
                .to_string(),
            builder_data: data(&[
                ("source", "SharePoint"),
                ("list", "SP GetAudit"),
                ("code", "Get yesterday's SharePoint audit activity if present."),
            ]),
            details_collapsed: false,
            connections: vec![3],
            x: 0,
            y: 60,
        },
        StepDefinition {
            id: 3,
            step_type: StepType::Code,
            title: "Prune Audit Data".to_string(),
            builder_title: None,
            pill: None,
            sources: Vec::new(),
            rows: vec![
                row("Operation", "Delete old audit records"),
                row("Target", "SP GetAudit"),
                code_row("Code", Some(PRUNE_SQL), false),
            ],
            comments: vec![
                comment(
                    "Ivy",
                    "This cleanup keeps the list focused on recent activity.",
                    "Feb 26, 9:05 AM",
                ),
                comment("You", "Delete anything older than one week.", "Feb 26, 9:06 AM"),
            ],
            ivy_says: "This code step removes SharePoint audit rows older than seven days."
                .to_string(),
            builder_data: data(&[
                ("operation", "Delete old audit records"),
                ("target", "SP GetAudit"),
                ("code", PRUNE_SQL),
            ]),
            details_collapsed: false,
            connections: vec![4],
            x: 0,
            y: 120,
        },
        StepDefinition {
            id: 4,
            step_type: StepType::Action,
            title: "Email Audit List".to_string(),
            builder_title: None,
            pill: Some("Ivy Action".to_string()),
            sources: Vec::new(),
            rows: vec![
                row("Action", "Send Daily Audit Summary"),
                row("Channel", "Email"),
                row("Recipients", "Security Team"),
            ],
            comments: vec![
                comment("Ivy", "This action will send an email digest.", "Feb 26, 9:06 AM"),
                comment("You", "Use this as the final delivery step.", "Feb 26, 9:07 AM"),
            ],
            ivy_says:
                "This action step sends the summarized audit result to your configured recipients."
                    .to_string(),
            builder_data: data(&[
                ("action", "Send Daily Audit Summary"),
                ("channel", "Email"),
                ("recipients", "Security Team"),
            ]),
            details_collapsed: false,
            connections: Vec::new(),
            x: 0,
            y: 180,
        },
    ]
}

/// Look up a single step by id.
pub fn step(id: u32) -> Option<StepDefinition> {
    step_definitions().into_iter().find(|s| s.id == id)
}

/// Sidebar entries keyed by step id.
pub fn sidebar_step_map() -> BTreeMap<u32, SidebarStep> {
    step_definitions()
        .iter()
        .map(|s| (s.id, s.to_sidebar()))
        .collect()
}

/// Builder templates for the first `count` steps (all of them if `count` is larger).
pub fn builder_node_templates(count: usize) -> Vec<BuilderNode> {
    step_definitions()
        .iter()
        .take(count)
        .map(StepDefinition::to_builder_node)
        .collect()
}
