use super::fieldtype::{empty_as_none, SnBool, SnInt, SnTime};
use super::ExpandedParameter;
use serde::{Deserialize, Serialize};

/// Table name of incident records
pub const INCIDENT_TABLE: &str = "incident";

/// Record of the `incident` table.
///
/// Field names match the remote column names. Reference columns decode into
/// [`ExpandedParameter`]; quoted booleans, integers and date-times decode
/// into the wrappers in [`super::fieldtype`]. An empty string on a typed
/// column decodes as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub active: Option<SnBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_assignee_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_set: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub assignment_group: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub business_service: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_stc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_stc: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_incidents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_notes: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<SnTime>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub cmdb_ci: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_and_work_notes: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub company: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub delivery_plan: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub delivery_task: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_state: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<SnBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub location: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub made_sla: Option<SnBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_incident_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<SnTime>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub opened_by: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub parent: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub parent_incident: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub promoted_by: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_on: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub proposed_by: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_on: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub reassignment_count: Option<SnInt>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub reopen_count: Option<SnInt>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub reopened_by: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reopened_time: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<SnTime>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<ExpandedParameter>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub rfc: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_reason: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub service_offering: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_created_by: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sys_created_on: Option<SnTime>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sys_domain: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_domain_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sys_mod_count: Option<SnInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_updated_by: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub sys_updated_on: Option<SnTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_effective_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub task_for: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_worked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_rule: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub universal_request: Option<ExpandedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upon_approval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upon_reject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_notes_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_start: Option<String>,
}
