//! World-building element categories and their attribute schemas.
//!
//! Every world element (story arcs, calendar events, calendar systems, magic
//! entries, research files and research content) lives in one
//! `world_elements` table. The `category` column selects which schema the
//! `attributes` JSON column follows. Attributes are parsed into
//! [`WorldAttributes`] at the boundary so handlers and repositories never see
//! an unchecked blob.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Discriminator stored in `world_elements.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldCategory {
    Arcs,
    Calendar,
    CalendarSystem,
    Magic,
    Research,
}

impl WorldCategory {
    pub const ALL: [WorldCategory; 5] = [
        WorldCategory::Arcs,
        WorldCategory::Calendar,
        WorldCategory::CalendarSystem,
        WorldCategory::Magic,
        WorldCategory::Research,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorldCategory::Arcs => "arcs",
            WorldCategory::Calendar => "calendar",
            WorldCategory::CalendarSystem => "calendar_system",
            WorldCategory::Magic => "magic",
            WorldCategory::Research => "research",
        }
    }
}

impl fmt::Display for WorldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorldCategory {
    type Err = AttributesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorldCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AttributesError::UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AttributesError {
    #[error("Unknown world category '{0}'. Must be one of: {list}", list = category_list())]
    UnknownCategory(String),

    #[error("Invalid {category} attributes: {message}")]
    Invalid {
        category: WorldCategory,
        message: String,
    },
}

fn category_list() -> String {
    WorldCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<AttributesError> for CoreError {
    fn from(err: AttributesError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Arcs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcType {
    #[default]
    Main,
    Subplot,
    Character,
    Thematic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcStatus {
    #[default]
    Planned,
    Active,
    Resolved,
}

/// Attributes for `arcs`: a story arc spanning a chapter range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ArcAttributes {
    #[serde(default)]
    pub arc_type: ArcType,
    #[serde(default)]
    pub status: ArcStatus,
    #[validate(range(min = 1))]
    pub start_chapter: Option<i32>,
    #[validate(range(min = 1))]
    pub end_chapter: Option<i32>,
    #[serde(default)]
    pub characters: Vec<String>,
    #[validate(length(max = 32))]
    pub color: Option<String>,
}

impl ArcAttributes {
    fn check(&self) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.start_chapter, self.end_chapter) {
            if start > end {
                return Err(format!(
                    "start_chapter ({start}) must not be after end_chapter ({end})"
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

/// Attributes for `calendar`: a dated event in the story's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CalendarEventAttributes {
    /// Optional reference to a `calendar_system` element in the same project.
    pub calendar_system_id: Option<DbId>,
    pub year: i32,
    #[validate(range(min = 1))]
    pub month: Option<u32>,
    #[validate(range(min = 1))]
    pub day: Option<u32>,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub event_type: String,
    #[serde(default)]
    pub importance: Importance,
}

impl CalendarEventAttributes {
    fn check(&self) -> Result<(), String> {
        if self.day.is_some() && self.month.is_none() {
            return Err("day requires month".into());
        }
        Ok(())
    }
}

/// One month of a custom calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CalendarMonth {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(range(min = 1))]
    pub days: u32,
}

/// Attributes for `calendar_system`: a custom in-world calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CalendarSystemAttributes {
    #[validate(length(min = 1))]
    pub months: Vec<CalendarMonth>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    pub year_length: u32,
    pub epoch_name: Option<String>,
}

impl CalendarSystemAttributes {
    fn check(&self) -> Result<(), String> {
        for month in &self.months {
            month
                .validate()
                .map_err(|e| format!("month '{}': {e}", month.name))?;
        }
        let total = self
            .months
            .iter()
            .try_fold(0u32, |acc, m| acc.checked_add(m.days))
            .ok_or_else(|| "sum of month days is too large".to_string())?;
        if total != self.year_length {
            return Err(format!(
                "year_length ({}) must equal the sum of month days ({total})",
                self.year_length
            ));
        }
        Ok(())
    }

    /// Check that an event date fits this calendar.
    pub fn check_date(&self, month: Option<u32>, day: Option<u32>) -> Result<(), String> {
        let Some(month) = month else {
            return Ok(());
        };
        let entry = month
            .checked_sub(1)
            .and_then(|index| self.months.get(index as usize));
        let Some(entry) = entry else {
            return Err(format!(
                "month {month} is out of range; calendar has {} months",
                self.months.len()
            ));
        };
        if let Some(day) = day {
            if day > entry.days {
                return Err(format!(
                    "day {day} is out of range; {} has {} days",
                    entry.name, entry.days
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Magic
// ---------------------------------------------------------------------------

/// Attributes for `magic`: a magic system, spell or artefact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MagicAttributes {
    #[validate(length(min = 1, max = 64))]
    pub magic_type: String,
    pub source: Option<String>,
    pub cost: Option<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default)]
    pub practitioners: Vec<String>,
    #[validate(range(min = 1, max = 10))]
    pub power_level: Option<u8>,
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

/// A research file: a container for research content entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ResearchFile {
    #[validate(url)]
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub summary: Option<String>,
}

/// A research content entry belonging to a research file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ResearchContent {
    pub research_file_id: DbId,
    #[validate(length(min = 1, max = 64))]
    pub content_type: String,
    #[serde(default)]
    pub body: String,
    #[validate(url)]
    pub source_url: Option<String>,
}

/// Attributes for `research`, tagged by `research_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "research_type", rename_all = "snake_case")]
pub enum ResearchAttributes {
    File(ResearchFile),
    Content(ResearchContent),
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// Parsed `attributes` of a world element, one variant per category.
///
/// Serializes as the bare attribute object (no extra tag) so the stored JSON
/// keeps the shape clients send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WorldAttributes {
    Arcs(ArcAttributes),
    Calendar(CalendarEventAttributes),
    CalendarSystem(CalendarSystemAttributes),
    Magic(MagicAttributes),
    Research(ResearchAttributes),
}

fn decode<T: DeserializeOwned + Validate>(value: Value) -> Result<T, String> {
    let parsed: T = serde_json::from_value(value).map_err(|e| e.to_string())?;
    parsed.validate().map_err(|e| e.to_string())?;
    Ok(parsed)
}

impl WorldAttributes {
    /// Parse and validate an attribute object against the schema of `category`.
    pub fn parse(category: WorldCategory, value: Value) -> Result<Self, AttributesError> {
        let invalid = |message: String| AttributesError::Invalid { category, message };

        let attrs = match category {
            WorldCategory::Arcs => {
                let arc: ArcAttributes = decode(value).map_err(invalid)?;
                arc.check().map_err(invalid)?;
                WorldAttributes::Arcs(arc)
            }
            WorldCategory::Calendar => {
                let event: CalendarEventAttributes = decode(value).map_err(invalid)?;
                event.check().map_err(invalid)?;
                WorldAttributes::Calendar(event)
            }
            WorldCategory::CalendarSystem => {
                let system: CalendarSystemAttributes = decode(value).map_err(invalid)?;
                system.check().map_err(invalid)?;
                WorldAttributes::CalendarSystem(system)
            }
            WorldCategory::Magic => WorldAttributes::Magic(decode(value).map_err(invalid)?),
            WorldCategory::Research => {
                let research: ResearchAttributes =
                    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
                match &research {
                    ResearchAttributes::File(file) => file.validate(),
                    ResearchAttributes::Content(content) => content.validate(),
                }
                .map_err(|e| invalid(e.to_string()))?;
                WorldAttributes::Research(research)
            }
        };
        Ok(attrs)
    }

    pub fn category(&self) -> WorldCategory {
        match self {
            WorldAttributes::Arcs(_) => WorldCategory::Arcs,
            WorldAttributes::Calendar(_) => WorldCategory::Calendar,
            WorldAttributes::CalendarSystem(_) => WorldCategory::CalendarSystem,
            WorldAttributes::Magic(_) => WorldCategory::Magic,
            WorldAttributes::Research(_) => WorldCategory::Research,
        }
    }

    /// The other element these attributes point at, if any.
    pub fn reference(&self) -> Option<AttributeReference> {
        match self {
            WorldAttributes::Research(ResearchAttributes::Content(c)) => {
                Some(AttributeReference::ResearchFile(c.research_file_id))
            }
            WorldAttributes::Calendar(CalendarEventAttributes {
                calendar_system_id: Some(id),
                ..
            }) => Some(AttributeReference::CalendarSystem(*id)),
            _ => None,
        }
    }

    /// Parent element id for the `parent_id` foreign key column.
    pub fn parent_id(&self) -> Option<DbId> {
        self.reference()
            .filter(|r| r.is_parent())
            .map(AttributeReference::id)
    }
}

/// A cross-element reference carried inside attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeReference {
    /// `attributes.research_file_id` of a research content entry.
    ResearchFile(DbId),
    /// `attributes.calendar_system_id` of a calendar event.
    CalendarSystem(DbId),
}

impl AttributeReference {
    pub fn id(self) -> DbId {
        match self {
            AttributeReference::ResearchFile(id) | AttributeReference::CalendarSystem(id) => id,
        }
    }

    /// Parent references are stored as a cascading foreign key.
    pub fn is_parent(self) -> bool {
        matches!(self, AttributeReference::ResearchFile(_))
    }

    pub fn describe(self) -> &'static str {
        match self {
            AttributeReference::ResearchFile(_) => "research file",
            AttributeReference::CalendarSystem(_) => "calendar system",
        }
    }

    /// Returns `true` if `target` is the kind of element this reference expects.
    pub fn accepts(self, target: &WorldAttributes) -> bool {
        matches!(
            (self, target),
            (
                AttributeReference::ResearchFile(_),
                WorldAttributes::Research(ResearchAttributes::File(_))
            ) | (
                AttributeReference::CalendarSystem(_),
                WorldAttributes::CalendarSystem(_)
            )
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in WorldCategory::ALL {
            assert_eq!(category.as_str().parse::<WorldCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "arc".parse::<WorldCategory>().unwrap_err();
        assert_matches!(err, AttributesError::UnknownCategory(ref s) if s == "arc");
        assert!(err.to_string().contains("calendar_system"));
    }

    #[test]
    fn test_arc_defaults_applied() {
        let attrs = WorldAttributes::parse(WorldCategory::Arcs, json!({})).unwrap();
        let WorldAttributes::Arcs(arc) = attrs else {
            panic!("expected arc attributes");
        };
        assert_eq!(arc.arc_type, ArcType::Main);
        assert_eq!(arc.status, ArcStatus::Planned);
        assert!(arc.characters.is_empty());
    }

    #[test]
    fn test_arc_chapter_range_checked() {
        let err = WorldAttributes::parse(
            WorldCategory::Arcs,
            json!({"start_chapter": 5, "end_chapter": 2}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("start_chapter (5)"));
    }

    #[test]
    fn test_unknown_attribute_key_rejected() {
        let err = WorldAttributes::parse(
            WorldCategory::Magic,
            json!({"magic_type": "elemental", "mana": 3}),
        )
        .unwrap_err();
        assert_matches!(err, AttributesError::Invalid { category: WorldCategory::Magic, .. });
    }

    #[test]
    fn test_magic_power_level_range() {
        let err = WorldAttributes::parse(
            WorldCategory::Magic,
            json!({"magic_type": "runic", "power_level": 11}),
        );
        assert!(err.is_err());

        let ok = WorldAttributes::parse(
            WorldCategory::Magic,
            json!({"magic_type": "runic", "power_level": 10}),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_calendar_system_year_length_must_match() {
        let err = WorldAttributes::parse(
            WorldCategory::CalendarSystem,
            json!({
                "months": [{"name": "Frost", "days": 30}, {"name": "Thaw", "days": 31}],
                "year_length": 60
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("sum of month days (61)"));
    }

    #[test]
    fn test_calendar_system_month_days_overflow_rejected() {
        let err = WorldAttributes::parse(
            WorldCategory::CalendarSystem,
            json!({
                "months": [{"name": "Long", "days": 4294967295u32}, {"name": "Short", "days": 1}],
                "year_length": 0
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_calendar_system_check_date() {
        let system = CalendarSystemAttributes {
            months: vec![
                CalendarMonth { name: "Frost".into(), days: 30 },
                CalendarMonth { name: "Thaw".into(), days: 20 },
            ],
            weekdays: vec![],
            year_length: 50,
            epoch_name: None,
        };
        assert!(system.check_date(Some(2), Some(20)).is_ok());
        assert!(system.check_date(Some(2), Some(21)).is_err());
        assert!(system.check_date(Some(3), None).is_err());
        assert!(system.check_date(None, None).is_ok());
    }

    #[test]
    fn test_calendar_day_requires_month() {
        let err = WorldAttributes::parse(WorldCategory::Calendar, json!({"year": 3, "day": 4}));
        assert!(err.is_err());
    }

    #[test]
    fn test_research_content_references_parent_file() {
        let attrs = WorldAttributes::parse(
            WorldCategory::Research,
            json!({"research_type": "content", "research_file_id": 7, "content_type": "note"}),
        )
        .unwrap();
        assert_eq!(attrs.reference(), Some(AttributeReference::ResearchFile(7)));
        assert_eq!(attrs.parent_id(), Some(7));
    }

    #[test]
    fn test_calendar_reference_is_not_parent() {
        let attrs = WorldAttributes::parse(
            WorldCategory::Calendar,
            json!({"year": 812, "calendar_system_id": 3}),
        )
        .unwrap();
        assert_eq!(attrs.reference(), Some(AttributeReference::CalendarSystem(3)));
        assert_eq!(attrs.parent_id(), None);
    }

    #[test]
    fn test_research_type_required() {
        let err = WorldAttributes::parse(WorldCategory::Research, json!({"summary": "x"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_research_file_serializes_with_tag() {
        let attrs = WorldAttributes::parse(
            WorldCategory::Research,
            json!({"research_type": "file", "summary": "Medieval trade routes"}),
        )
        .unwrap();
        let value = serde_json::to_value(&attrs).unwrap();
        assert_eq!(value["research_type"], "file");
        assert_eq!(value["summary"], "Medieval trade routes");
    }

    #[test]
    fn test_reference_accepts_only_matching_kind() {
        let file = WorldAttributes::parse(
            WorldCategory::Research,
            json!({"research_type": "file"}),
        )
        .unwrap();
        let magic =
            WorldAttributes::parse(WorldCategory::Magic, json!({"magic_type": "blood"})).unwrap();

        assert!(AttributeReference::ResearchFile(1).accepts(&file));
        assert!(!AttributeReference::ResearchFile(1).accepts(&magic));
        assert!(!AttributeReference::CalendarSystem(1).accepts(&file));
    }
}
