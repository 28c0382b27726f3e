use std::fmt;
use std::str::FromStr;

use crate::domain::SVError;

/// The record collections served by the scheduling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Colleges,
    Programs,
    Curriculum,
    Professors,
    Rooms,
    Sections,
    Users,
    AuditLogs,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Colleges,
        Resource::Programs,
        Resource::Curriculum,
        Resource::Professors,
        Resource::Rooms,
        Resource::Sections,
        Resource::Users,
        Resource::AuditLogs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Colleges => "Colleges",
            Resource::Programs => "Programs",
            Resource::Curriculum => "Curriculum",
            Resource::Professors => "Professors",
            Resource::Rooms => "Rooms",
            Resource::Sections => "Sections",
            Resource::Users => "Users",
            Resource::AuditLogs => "Audit Logs",
        }
    }

    /// Collection name, used as file stem in the data directory.
    pub fn collection(&self) -> &'static str {
        match self {
            Resource::Colleges => "colleges",
            Resource::Programs => "programs",
            Resource::Curriculum => "curriculum",
            Resource::Professors => "professors",
            Resource::Rooms => "rooms",
            Resource::Sections => "sections",
            Resource::Users => "users",
            Resource::AuditLogs => "audit_logs",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Resource::Colleges => &["Code", "Name", "Dean", "Programs"],
            Resource::Programs => &["Code", "Name", "College", "Years"],
            Resource::Curriculum => &[
                "Course Code",
                "Title",
                "Units",
                "Year Level",
                "Semester",
                "Program",
            ],
            Resource::Professors => &["Name", "Email", "College", "Status", "Max Load"],
            Resource::Rooms => &["Room", "Building", "Capacity", "Type"],
            Resource::Sections => &["Section", "Program", "Year Level", "Students", "Adviser"],
            Resource::Users => &["Username", "Name", "Role", "Position", "College"],
            Resource::AuditLogs => &["Timestamp", "User", "Action", "Entity", "Details"],
        }
    }

    /// Columns that get a filter control.
    pub fn filter_columns(&self) -> &'static [&'static str] {
        match self {
            Resource::Colleges => &[],
            Resource::Programs => &["College"],
            Resource::Curriculum => &["Year Level", "Semester"],
            Resource::Professors => &["College", "Status"],
            Resource::Rooms => &["Building", "Type"],
            Resource::Sections => &["Year Level"],
            Resource::Users => &["Role", "College"],
            Resource::AuditLogs => &["Action"],
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Resource {
    type Err = SVError;

    /// Accepts the title or the collection name, ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |v: &str| {
            v.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = normalize(s);
        Resource::ALL
            .into_iter()
            .find(|r| normalize(r.title()) == wanted || normalize(r.collection()) == wanted)
            .ok_or_else(|| SVError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_titles_and_collection_names() {
        assert_eq!("rooms".parse::<Resource>().unwrap(), Resource::Rooms);
        assert_eq!("Audit Logs".parse::<Resource>().unwrap(), Resource::AuditLogs);
        assert_eq!("audit_logs".parse::<Resource>().unwrap(), Resource::AuditLogs);
        assert!(matches!(
            "timetable".parse::<Resource>(),
            Err(SVError::UnknownView(_))
        ));
    }

    #[test]
    fn filter_columns_are_displayed_columns() {
        for resource in Resource::ALL {
            for column in resource.filter_columns() {
                assert!(resource.columns().contains(column), "{resource}: {column}");
            }
        }
    }
}
