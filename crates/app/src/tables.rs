//! The three public listings, shared by the home page and the dashboard.

use dioxus::prelude::*;
use shared_types::{AppError, MissingPersonSummary, UnclaimedPerson, UnidentifiedPerson};
use shared_ui::{
    or_na, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, SortKind, StatusBadge,
};

use crate::format_helpers::{case_href, display_age, display_date, format_date, sort_key};

/// Rows of a list fetch, or none when the fetch failed. The failure is
/// logged; the page shows an empty table either way.
pub fn rows_or_empty<T>(list: &'static str, result: Result<Vec<T>, AppError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(list, error = %e, "List fetch failed");
            Vec::new()
        }
    }
}

#[component]
pub fn MissingTable(rows: Vec<MissingPersonSummary>) -> Element {
    rsx! {
        DataTable { id: "missing-persons", filter_placeholder: "Filter by name, town or status...",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Tracking Number" }
                DataTableColumn { sort: SortKind::Date, "Date of Last Contact" }
                DataTableColumn { sort: SortKind::Text, "Last Name" }
                DataTableColumn { sort: SortKind::Text, "First Name" }
                DataTableColumn { sort: SortKind::Number, "Age" }
                DataTableColumn { sort: SortKind::Text, "Gender" }
                DataTableColumn { sort: SortKind::Text, "Town/Location" }
                DataTableColumn { sort: SortKind::Text, "Status" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 8usize, message: "No missing persons reported." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.case_number}", href: case_href(&row.case_number),
                        DataTableCell { "{row.case_number}" }
                        DataTableCell { sort_value: sort_key(Some(row.date_of_last_contact)),
                            {display_date(row.date_of_last_contact)}
                        }
                        DataTableCell { "{row.legal_last_name}" }
                        DataTableCell { "{row.legal_first_name}" }
                        DataTableCell { "{row.age}" }
                        DataTableCell { "{row.gender}" }
                        DataTableCell { "{row.town_location}" }
                        DataTableCell { sort_value: row.status.clone(),
                            StatusBadge { status: row.status.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn UnidentifiedTable(rows: Vec<UnidentifiedPerson>) -> Element {
    rsx! {
        DataTable { id: "unidentified-persons", filter_placeholder: "Filter by description or location...",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Tracking Number" }
                DataTableColumn { sort: SortKind::Text, "Description" }
                DataTableColumn { sort: SortKind::Text, "Found Location" }
                DataTableColumn { sort: SortKind::Date, "Date Found" }
                DataTableColumn { sort: SortKind::Text, "Gender" }
                DataTableColumn { sort: SortKind::Text, "Current Status" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 6usize, message: "No unidentified persons listed." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.tracking_number}",
                        DataTableCell { "{row.tracking_number}" }
                        DataTableCell { {or_na(row.description.as_deref())} }
                        DataTableCell { {or_na(row.found_location.as_deref())} }
                        DataTableCell { sort_value: sort_key(row.date_found),
                            {format_date(row.date_found)}
                        }
                        DataTableCell { {or_na(row.gender.as_deref())} }
                        DataTableCell { {or_na(row.current_status.as_deref())} }
                    }
                }
            }
        }
    }
}

#[component]
pub fn UnclaimedTable(rows: Vec<UnclaimedPerson>) -> Element {
    rsx! {
        DataTable { id: "unclaimed-persons", filter_placeholder: "Filter by name or location...",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Tracking Number" }
                DataTableColumn { sort: SortKind::Date, "Date of Death" }
                DataTableColumn { sort: SortKind::Number, "Age" }
                DataTableColumn { sort: SortKind::Text, "Last Name" }
                DataTableColumn { sort: SortKind::Text, "First Name" }
                DataTableColumn { sort: SortKind::Text, "Gender" }
                DataTableColumn { sort: SortKind::Text, "Current Status" }
                DataTableColumn { sort: SortKind::Text, "Found Location" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 8usize, message: "No unclaimed persons listed." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.tracking_number}",
                        DataTableCell { "{row.tracking_number}" }
                        DataTableCell { sort_value: sort_key(row.date_of_death),
                            {format_date(row.date_of_death)}
                        }
                        DataTableCell { {display_age(row.age)} }
                        DataTableCell { {or_na(row.legal_last_name.as_deref())} }
                        DataTableCell { {or_na(row.legal_first_name.as_deref())} }
                        DataTableCell { {or_na(row.gender.as_deref())} }
                        DataTableCell { {or_na(row.current_status.as_deref())} }
                        DataTableCell { {or_na(row.found_location.as_deref())} }
                    }
                }
            }
        }
    }
}
