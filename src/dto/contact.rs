//! Static select options for the contact form template.

/// Application tag preselected for new contacts.
pub const DEFAULT_APP: &str = "contacts-app";

/// Application tags offered by the form.
pub const APPS: &[&str] = &["contacts-app", "crm-app", "sales-app"];

/// `(code, name)` pairs offered by the state select.
pub const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("CA", "California"),
    ("IL", "Illinois"),
    ("MA", "Massachusetts"),
    ("NY", "New York"),
    ("TX", "Texas"),
    ("WA", "Washington"),
];
