//! Field specs shared by several tool schemas.

use super::schema::{FieldKind, FieldSpec};

pub const MAX_NOTE_DESCRIPTION: usize = 32_000;
pub const MAX_NOTE_TITLE: usize = 250;
pub const PUBLISH_VALUES: &[i64] = &[1, 2, 3];
pub const NOTE_TYPE_VALUES: &[i64] = &[1, 2, 3, 4, 5, 6];

/// Identifying key of get/update tools.
pub fn id(entity: &str) -> FieldSpec {
    FieldSpec::required("id", FieldKind::EntityId, format!("{} ID", entity))
}

pub fn page_size(default: u32, what: &str) -> FieldSpec {
    FieldSpec::optional(
        "pageSize",
        FieldKind::PageSize,
        format!(
            "Number of {} to return (default: {}, max: 500). Use -1 to fetch all matching {}.",
            what, default, what
        ),
    )
}

pub fn search_term(description: &str) -> FieldSpec {
    FieldSpec::optional(
        "searchTerm",
        FieldKind::Text { min: 1, max: 255 },
        description,
    )
}

/// Company reference filter/field; 0 is the default company, not "unset".
pub fn company_id(required: bool, description: &str) -> FieldSpec {
    let description = format!("{} (0 is the default/system company)", description);
    if required {
        FieldSpec::required("companyID", FieldKind::CompanyRef, description)
    } else {
        FieldSpec::optional("companyID", FieldKind::CompanyRef, description)
    }
}

pub fn entity_ref(name: &'static str, description: &str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::EntityId, description)
}

pub fn is_active(what: &str) -> FieldSpec {
    FieldSpec::optional(
        "isActive",
        FieldKind::Boolean,
        format!("Only return active (true) or inactive (false) {}", what),
    )
}

pub fn text(name: &'static str, max: usize, required: bool, description: &str) -> FieldSpec {
    let min = usize::from(required);
    if required {
        FieldSpec::required(name, FieldKind::Text { min, max }, description)
    } else {
        FieldSpec::optional(name, FieldKind::Text { min, max }, description)
    }
}

/// Fields shared by every create-note tool, after the parent id.
pub fn note_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required(
            "description",
            FieldKind::Text {
                min: 1,
                max: MAX_NOTE_DESCRIPTION,
            },
            "Note body (1-32000 characters)",
        ),
        FieldSpec::optional(
            "title",
            FieldKind::Text {
                min: 0,
                max: MAX_NOTE_TITLE,
            },
            "Note title (max 250 characters)",
        ),
        FieldSpec::optional(
            "publish",
            FieldKind::OneOf(PUBLISH_VALUES),
            "Visibility: 1 = all users (default), 2 = internal only, 3 = internal and co-managed",
        ),
        FieldSpec::optional(
            "noteType",
            FieldKind::OneOf(NOTE_TYPE_VALUES),
            "Note type 1-6 (default 1)",
        ),
        FieldSpec::optional(
            "creatorResourceID",
            FieldKind::EntityId,
            "Resource recorded as the note author",
        ),
    ]
}
