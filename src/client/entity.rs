//! Remote entity names.

use std::fmt;

/// Entity collections exposed by the PSA REST API.
///
/// `path()` is the URL segment used for `/{Entity}/query`, `/{Entity}/{id}`
/// and child routes such as `/Tickets/{id}/Notes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Companies,
    CompanyNotes,
    Contacts,
    Tickets,
    TicketNotes,
    Projects,
    ProjectNotes,
    Resources,
    Contracts,
    ConfigurationItems,
    ExpenseReports,
    /// Child route segment for note creation under a parent entity.
    Notes,
}

impl EntityKind {
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Companies => "Companies",
            EntityKind::CompanyNotes => "CompanyNotes",
            EntityKind::Contacts => "Contacts",
            EntityKind::Tickets => "Tickets",
            EntityKind::TicketNotes => "TicketNotes",
            EntityKind::Projects => "Projects",
            EntityKind::ProjectNotes => "ProjectNotes",
            EntityKind::Resources => "Resources",
            EntityKind::Contracts => "Contracts",
            EntityKind::ConfigurationItems => "ConfigurationItems",
            EntityKind::ExpenseReports => "ExpenseReports",
            EntityKind::Notes => "Notes",
        }
    }

    /// Human-readable plural used in tool messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Companies => "companies",
            EntityKind::CompanyNotes => "company notes",
            EntityKind::Contacts => "contacts",
            EntityKind::Tickets => "tickets",
            EntityKind::TicketNotes => "ticket notes",
            EntityKind::Projects => "projects",
            EntityKind::ProjectNotes => "project notes",
            EntityKind::Resources => "resources",
            EntityKind::Contracts => "contracts",
            EntityKind::ConfigurationItems => "configuration items",
            EntityKind::ExpenseReports => "expense reports",
            EntityKind::Notes => "notes",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
