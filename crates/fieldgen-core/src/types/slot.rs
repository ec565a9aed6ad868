//! Locations a project can be declared at.

use std::fmt;

/// Where a project mapping lives in a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectSlot {
    /// Entry of the top-level `projects` sequence, by position
    Data(usize),
    /// The `audit_logs_project` mapping
    AuditLogs,
    /// The `forseti.project` mapping
    Forseti,
}

impl ProjectSlot {
    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            ProjectSlot::Data(_) => "data",
            ProjectSlot::AuditLogs => "audit-logs",
            ProjectSlot::Forseti => "forseti",
        }
    }
}

impl fmt::Display for ProjectSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectSlot::Data(index) => write!(f, "projects[{}]", index),
            ProjectSlot::AuditLogs => f.write_str("audit_logs_project"),
            ProjectSlot::Forseti => f.write_str("forseti.project"),
        }
    }
}
