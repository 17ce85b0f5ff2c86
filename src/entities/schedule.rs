use crate::entities::{Item, enum_attr};
use crate::error::{Result, TscError, ValidationError};
use crate::macros::string_enum;
use crate::utils::{attr, child, datetime_attr, find_all, int_attr, parse_int, required_attr};
use crate::validators::{is_int_in_range, not_empty};
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use roxmltree::Node;

const TIME_FORMAT: &str = "%H:%M:%S";
const VALID_HOURS: [u32; 6] = [1, 2, 4, 6, 8, 12];

string_enum! {
    ScheduleType("schedule_type") {
        Extract => "Extract",
        Subscription => "Subscription",
    }
}

string_enum! {
    ExecutionOrder("execution_order") {
        Parallel => "Parallel",
        Serial => "Serial",
    }
}

string_enum! {
    ScheduleState("state") {
        Active => "Active",
        Suspended => "Suspended",
    }
}

/// When a schedule fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalItem {
    Hourly {
        start: NaiveTime,
        end: NaiveTime,
        every_hours: u32,
    },
    Daily {
        start: NaiveTime,
    },
    Weekly {
        start: NaiveTime,
        weekdays: Vec<Weekday>,
    },
    Monthly {
        start: NaiveTime,
        day: u32,
    },
}

impl IntervalItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] unless `every_hours` is one of 1, 2, 4, 6, 8 or 12
    pub fn hourly(start: NaiveTime, end: NaiveTime, every_hours: u32) -> std::result::Result<Self, ValidationError> {
        if !VALID_HOURS.contains(&every_hours) {
            return Err(ValidationError::new(
                "interval",
                format!("every_hours must be one of {VALID_HOURS:?}, got {every_hours}"),
            ));
        }
        Ok(Self::Hourly {
            start,
            end,
            every_hours,
        })
    }

    #[must_use]
    pub fn daily(start: NaiveTime) -> Self {
        Self::Daily { start }
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no weekday is given
    pub fn weekly(start: NaiveTime, weekdays: Vec<Weekday>) -> std::result::Result<Self, ValidationError> {
        if weekdays.is_empty() {
            return Err(ValidationError::new("interval", "a weekly schedule needs at least one weekday"));
        }
        Ok(Self::Weekly { start, weekdays })
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `day` is outside `[1, 31]`
    pub fn monthly(start: NaiveTime, day: u32) -> std::result::Result<Self, ValidationError> {
        is_int_in_range("interval", i64::from(day), 1, 31)?;
        Ok(Self::Monthly { start, day })
    }

    #[must_use]
    pub fn frequency(&self) -> &'static str {
        match self {
            Self::Hourly { .. } => "Hourly",
            Self::Daily { .. } => "Daily",
            Self::Weekly { .. } => "Weekly",
            Self::Monthly { .. } => "Monthly",
        }
    }

    #[must_use]
    pub fn start_time(&self) -> NaiveTime {
        match self {
            Self::Hourly { start, .. }
            | Self::Daily { start }
            | Self::Weekly { start, .. }
            | Self::Monthly { start, .. } => *start,
        }
    }

    #[must_use]
    pub fn end_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Hourly { end, .. } => Some(*end),
            _ => None,
        }
    }

    /// The `<interval>` attributes of `<frequencyDetails>`, one pair per element
    #[must_use]
    pub fn interval_attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Hourly { every_hours, .. } => vec![("hours", every_hours.to_string())],
            Self::Daily { .. } => Vec::new(),
            Self::Weekly { weekdays, .. } => weekdays
                .iter()
                .map(|day| ("weekDay", weekday_name(*day).to_string()))
                .collect(),
            Self::Monthly { day, .. } => vec![("monthDay", day.to_string())],
        }
    }

    fn from_element(frequency: &str, details: Node<'_, '_>, ns: &str) -> Result<Self> {
        let start = parse_time(&required_attr(details, "start")?)?;
        let intervals: Vec<Node<'_, '_>> = find_all(details, ns, "interval").collect();
        let malformed = |e: ValidationError| TscError::MalformedResponse(e.to_string());

        match frequency {
            "Hourly" => {
                let end = parse_time(&required_attr(details, "end")?)?;
                let hours = intervals
                    .iter()
                    .find_map(|interval| interval.attribute("hours"))
                    .ok_or_else(|| TscError::MalformedResponse("hourly schedule has no hours interval".into()))?;
                let hours = u32::try_from(parse_int("hours", hours)?)
                    .map_err(|_| TscError::MalformedResponse(format!("invalid hours interval {hours:?}")))?;
                Self::hourly(start, end, hours).map_err(malformed)
            }
            "Daily" => Ok(Self::daily(start)),
            "Weekly" => {
                let weekdays = intervals
                    .iter()
                    .filter_map(|interval| interval.attribute("weekDay"))
                    .map(|day| {
                        day.parse::<Weekday>()
                            .map_err(|_| TscError::MalformedResponse(format!("invalid weekday {day:?}")))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::weekly(start, weekdays).map_err(malformed)
            }
            "Monthly" => {
                let day = intervals
                    .iter()
                    .find_map(|interval| interval.attribute("monthDay"))
                    .ok_or_else(|| TscError::MalformedResponse("monthly schedule has no monthDay interval".into()))?;
                let day = u32::try_from(parse_int("monthDay", day)?)
                    .map_err(|_| TscError::MalformedResponse(format!("invalid monthDay {day:?}")))?;
                Self::monthly(start, day).map_err(malformed)
            }
            other => Err(TscError::MalformedResponse(format!("unknown frequency {other:?}"))),
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| TscError::MalformedResponse(format!("invalid time {value:?}: {e}")))
}

#[must_use]
pub(crate) fn format_time(value: NaiveTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A server-wide schedule for extract refreshes or subscriptions
#[derive(Debug, Clone)]
pub struct ScheduleItem {
    id: Option<String>,
    name: String,
    priority: i64,
    pub schedule_type: ScheduleType,
    pub execution_order: ExecutionOrder,
    pub interval: IntervalItem,
    state: Option<ScheduleState>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    next_run_at: Option<DateTime<Utc>>,
    end_schedule_at: Option<DateTime<Utc>>,
}

impl ScheduleItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty or `priority` is outside `[1, 100]`
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        schedule_type: ScheduleType,
        execution_order: ExecutionOrder,
        interval: IntervalItem,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        is_int_in_range("priority", priority, 1, 100)?;
        Ok(Self {
            id: None,
            name,
            priority,
            schedule_type,
            execution_order,
            interval,
            state: None,
            created_at: None,
            updated_at: None,
            next_run_at: None,
            end_schedule_at: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        self.name = name;
        Ok(())
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
    pub fn state(&self) -> Option<ScheduleState> {
        self.state
    }

    #[must_use]
    pub fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }

    #[must_use]
    pub fn next_run_at(&self) -> Option<&DateTime<Utc>> {
        self.next_run_at.as_ref()
    }

    #[must_use]
    pub fn end_schedule_at(&self) -> Option<&DateTime<Utc>> {
        self.end_schedule_at.as_ref()
    }
}

impl Item for ScheduleItem {
    const TAG: &'static str = "schedule";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let malformed = |e: ValidationError| TscError::MalformedResponse(e.to_string());
        let name = required_attr(node, "name")?;
        let priority = parse_int("priority", &required_attr(node, "priority")?)?;
        let schedule_type = required_attr(node, "type")?.parse().map_err(malformed)?;
        let execution_order = required_attr(node, "executionOrder")?
            .parse()
            .map_err(malformed)?;
        let frequency = required_attr(node, "frequency")?;
        let details = child(node, ns, "frequencyDetails").ok_or_else(|| {
            TscError::MalformedResponse("schedule element has no frequencyDetails".into())
        })?;
        let interval = IntervalItem::from_element(&frequency, details, ns)?;

        let mut schedule = Self::new(name, priority, schedule_type, execution_order, interval)
            .map_err(malformed)?;
        schedule.apply_element(node, ns)?;
        Ok(schedule)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        let malformed = |e: ValidationError| TscError::MalformedResponse(e.to_string());
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.set_name(name).map_err(malformed)?;
        }
        if let Some(priority) = int_attr(node, "priority")? {
            self.set_priority(priority).map_err(malformed)?;
        }
        if let Some(schedule_type) = enum_attr(node, "type")? {
            self.schedule_type = schedule_type;
        }
        if let Some(execution_order) = enum_attr(node, "executionOrder")? {
            self.execution_order = execution_order;
        }
        if let Some(state) = enum_attr(node, "state")? {
            self.state = Some(state);
        }
        if let Some(created_at) = datetime_attr(node, "createdAt")? {
            self.created_at = Some(created_at);
        }
        if let Some(updated_at) = datetime_attr(node, "updatedAt")? {
            self.updated_at = Some(updated_at);
        }
        if let Some(next_run_at) = datetime_attr(node, "nextRunAt")? {
            self.next_run_at = Some(next_run_at);
        }
        if let Some(end_schedule_at) = datetime_attr(node, "endScheduleAt")? {
            self.end_schedule_at = Some(end_schedule_at);
        }
        if let (Some(frequency), Some(details)) =
            (node.attribute("frequency"), child(node, ns, "frequencyDetails"))
        {
            self.interval = IntervalItem::from_element(frequency, details, ns)?;
        }
        Ok(())
    }
}
