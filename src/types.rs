use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;

pub type ProjectId = String;
pub type CrewId = String;

/// A piece of road work scheduled over an inclusive range of whole days.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_id: Option<CrewId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Project {
    /// Parsed inclusive range. `None` when either bound is malformed or the
    /// range is reversed; such a project is never visible.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = dates::parse_date(&self.start_date)?;
        let end = dates::parse_date(&self.end_date)?;
        (start <= end).then_some((start, end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.span()
            .map(|(start, end)| start <= date && date <= end)
            .unwrap_or(false)
    }

    /// The assigned crew id, with an empty string read as unassigned.
    pub fn crew(&self) -> Option<&str> {
        self.crew_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub is_leader: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crew {
    pub id: CrewId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(start: &str, end: &str) -> Project {
        Project {
            id: "p1".to_string(),
            name: "Resurfacing".to_string(),
            location: None,
            start_date: start.to_string(),
            end_date: end.to_string(),
            crew_id: None,
            notes: None,
        }
    }

    #[test]
    fn reversed_range_has_no_span() {
        assert!(project("2024-06-12", "2024-06-10").span().is_none());
    }

    #[test]
    fn malformed_range_has_no_span() {
        assert!(project("", "zzzz").span().is_none());
        assert!(project("2024-6-1", "2024-06-10").span().is_none());
    }

    #[test]
    fn empty_crew_id_reads_as_unassigned() {
        let mut p = project("2024-06-10", "2024-06-10");
        p.crew_id = Some(String::new());
        assert_eq!(p.crew(), None);
        p.crew_id = Some("2".to_string());
        assert_eq!(p.crew(), Some("2"));
    }

    #[test]
    fn project_serializes_with_camel_case_fields() {
        let mut p = project("2024-06-10", "2024-06-12");
        p.crew_id = Some("1".to_string());
        let json = serde_json::to_string(&p).expect("project should serialize");
        assert!(json.contains("\"startDate\":\"2024-06-10\""));
        assert!(json.contains("\"endDate\":\"2024-06-12\""));
        assert!(json.contains("\"crewId\":\"1\""));
    }

    #[test]
    fn member_reads_is_leader_field() {
        let member: Member = serde_json::from_str(r#"{"name":"John Smith","isLeader":true}"#)
            .expect("member should deserialize");
        assert!(member.is_leader);
    }
}
