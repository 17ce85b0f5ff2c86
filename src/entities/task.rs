use crate::entities::{Item, enum_attr};
use crate::error::{Result, TscError, ValidationError};
use crate::macros::string_enum;
use crate::utils::{attr, child, int_attr, parse_document, parse_int, required_attr};
use crate::validators::is_int_in_range;
use roxmltree::Node;

string_enum! {
    RefreshType("refresh_type") {
        FullRefresh => "FullRefresh",
        IncrementalRefresh => "IncrementalRefresh",
    }
}

/// The single resource an extract refresh rebuilds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTarget {
    Datasource(String),
    Workbook(String),
}

impl TaskTarget {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Datasource(id) | Self::Workbook(id) => id,
        }
    }

    /// At most one of `<datasource>` and `<workbook>` may be present
    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Option<Self>> {
        let id_of = |name: &str| child(node, ns, name).and_then(|target| attr(target, "id"));
        match (id_of("datasource"), id_of("workbook")) {
            (Some(_), Some(_)) => Err(TscError::MalformedResponse(
                "Refresh task references both a workbook and a datasource".into(),
            )),
            (Some(id), None) => Ok(Some(Self::Datasource(id))),
            (None, Some(id)) => Ok(Some(Self::Workbook(id))),
            (None, None) => Ok(None),
        }
    }
}

/// A scheduled extract refresh, as reported by the server
///
/// Only the server creates these; both the `<extract>` elements of a
/// schedule and the `<extractRefresh>` elements of the task list parse
/// into this type.
#[derive(Debug, Clone)]
pub struct ExtractRefreshTaskItem {
    id: String,
    schedule_id: Option<String>,
    priority: i64,
    refresh_type: RefreshType,
    target: TaskTarget,
    consecutive_failed_count: Option<i64>,
}

impl ExtractRefreshTaskItem {
    const EXTRACT_TAG: &'static str = "extract";

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn schedule_id(&self) -> Option<&str> {
        self.schedule_id.as_deref()
    }

    pub(crate) fn set_schedule_id(&mut self, schedule_id: impl Into<String>) {
        self.schedule_id = Some(schedule_id.into());
    }

    #[must_use]
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `priority` is outside `[1, 100]`
    pub fn set_priority(&mut self, priority: i64) -> std::result::Result<(), ValidationError> {
        is_int_in_range("priority", priority, 1, 100)?;
        self.priority = priority;
        Ok(())
    }

    #[must_use]
    pub fn refresh_type(&self) -> RefreshType {
        self.refresh_type
    }

    #[must_use]
    pub fn target(&self) -> &TaskTarget {
        &self.target
    }

    #[must_use]
    pub fn consecutive_failed_count(&self) -> Option<i64> {
        self.consecutive_failed_count
    }
}

impl Item for ExtractRefreshTaskItem {
    const TAG: &'static str = "extractRefresh";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let id = required_attr(node, "id")?;
        let priority = parse_int("priority", &required_attr(node, "priority")?)?;
        let refresh_type = required_attr(node, "type")?
            .parse()
            .map_err(|e: ValidationError| TscError::MalformedResponse(e.to_string()))?;
        let target = TaskTarget::from_element(node, ns)?.ok_or_else(|| {
            TscError::MalformedResponse("Missing workbook / datasource element for refresh task".into())
        })?;

        let mut task = Self {
            id,
            schedule_id: None,
            priority: 50,
            refresh_type,
            target,
            consecutive_failed_count: None,
        };
        task.set_priority(priority)
            .map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        task.apply_element(node, ns)?;
        Ok(task)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(priority) = int_attr(node, "priority")? {
            self.set_priority(priority)
                .map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        }
        if let Some(refresh_type) = enum_attr(node, "type")? {
            self.refresh_type = refresh_type;
        }
        if let Some(count) = int_attr(node, "consecutiveFailedCount")? {
            self.consecutive_failed_count = Some(count);
        }
        if let Some(schedule_id) = child(node, ns, "schedule").and_then(|schedule| attr(schedule, "id")) {
            self.schedule_id = Some(schedule_id);
        }
        if let Some(target) = TaskTarget::from_element(node, ns)? {
            self.target = target;
        }
        Ok(())
    }

    fn from_response(body: &str, ns: &str) -> Result<Vec<Self>> {
        let doc = parse_document(body)?;
        doc.root()
            .descendants()
            .filter(|n| n.has_tag_name((ns, Self::TAG)) || n.has_tag_name((ns, Self::EXTRACT_TAG)))
            .map(|node| Self::from_element(node, ns))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NAMESPACE;

    #[test]
    fn test_parse_schedule_extracts() {
        let body = format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><extracts>
                <extract id="t1" priority="60" type="FullRefresh"><workbook id="w1"/></extract>
                <extract id="t2" priority="1" type="IncrementalRefresh"><datasource id="d1"/></extract>
            </extracts></tsResponse>"#
        );
        let tasks = ExtractRefreshTaskItem::from_response(&body, NAMESPACE).unwrap();
        assert_eq!(2, tasks.len());
        assert_eq!(&TaskTarget::Workbook("w1".into()), tasks[0].target());
        assert_eq!(60, tasks[0].priority());
        assert_eq!(RefreshType::IncrementalRefresh, tasks[1].refresh_type());
        assert_eq!("d1", tasks[1].target().id());
        assert_eq!(None, tasks[1].schedule_id());
    }

    #[test]
    fn test_parse_task_list_reads_schedule() {
        let body = format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><tasks><task>
                <extractRefresh id="t9" priority="50" type="FullRefresh" consecutiveFailedCount="2">
                    <schedule id="s1" name="Nightly"/>
                    <datasource id="d7"/>
                </extractRefresh>
            </task></tasks></tsResponse>"#
        );
        let tasks = ExtractRefreshTaskItem::from_response(&body, NAMESPACE).unwrap();
        assert_eq!(1, tasks.len());
        assert_eq!(Some("s1"), tasks[0].schedule_id());
        assert_eq!(Some(2), tasks[0].consecutive_failed_count());
        assert_eq!(&TaskTarget::Datasource("d7".into()), tasks[0].target());
    }

    #[test]
    fn test_task_without_target_is_malformed() {
        let body = format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><extracts><extract id="t1" priority="50" type="FullRefresh"/></extracts></tsResponse>"#
        );
        assert!(matches!(
            ExtractRefreshTaskItem::from_response(&body, NAMESPACE),
            Err(TscError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_task_with_two_targets_is_malformed() {
        let body = format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><extract id="t1" priority="50" type="FullRefresh"><datasource id="d1"/><workbook id="w1"/></extract></tsResponse>"#
        );
        match ExtractRefreshTaskItem::from_response(&body, NAMESPACE) {
            Err(TscError::MalformedResponse(message)) => assert!(message.contains("both")),
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_priority_is_malformed() {
        let body = format!(
            r#"<tsResponse xmlns="{NAMESPACE}"><extract id="t1" priority="500" type="FullRefresh"><workbook id="w1"/></extract></tsResponse>"#
        );
        assert!(matches!(
            ExtractRefreshTaskItem::from_response(&body, NAMESPACE),
            Err(TscError::MalformedResponse(_))
        ));
    }
}
