use dioxus::prelude::*;

/// How `table.js` compares the cells of a column when its header is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    #[default]
    None,
    Text,
    Number,
    /// Compares each cell's `data-value`, which holds an ISO date.
    Date,
}

impl SortKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKind::None => "none",
            SortKind::Text => "text",
            SortKind::Number => "number",
            SortKind::Date => "date",
        }
    }
}

/// Table with a filter box and a pager. Sorting, filtering and paging all
/// happen in the browser; the server always renders the full row set.
#[component]
pub fn DataTable(
    id: String,
    #[props(default = "Filter rows...".to_string())] filter_placeholder: String,
    #[props(default = 10)] page_size: usize,
    children: Element,
) -> Element {
    rsx! {
        div { class: "data-table",
            input {
                class: "data-table-filter",
                r#type: "search",
                placeholder: "{filter_placeholder}",
                "aria-label": "Filter rows",
                "data-filter-for": "{id}",
            }
            div { class: "data-table-scroll",
                table { id: "{id}", "data-page-size": "{page_size}",
                    {children}
                }
            }
            div { class: "data-table-pager", "data-pager-for": "{id}" }
        }
    }
}

/// Wraps header cells in `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

/// Header cell. Sortable columns get a pointer and an arrow from the stylesheet.
#[component]
pub fn DataTableColumn(#[props(default)] sort: SortKind, children: Element) -> Element {
    let sortable = sort != SortKind::None;
    rsx! {
        th {
            class: if sortable { "sortable" } else { "" },
            "data-sort": sort.as_str(),
            {children}
        }
    }
}

/// Body row. With an `href` the whole row navigates on click.
#[component]
pub fn DataTableRow(#[props(default)] href: String, children: Element) -> Element {
    let target = (!href.is_empty()).then_some(href);
    rsx! {
        tr {
            class: if target.is_some() { "data-table-row clickable" } else { "data-table-row" },
            "data-href": target,
            {children}
        }
    }
}

/// Body cell. `sort_value` overrides the displayed text when sorting,
/// e.g. an ISO date behind a `DD/MM/YYYY` label.
#[component]
pub fn DataTableCell(#[props(default)] sort_value: String, children: Element) -> Element {
    let value = (!sort_value.is_empty()).then_some(sort_value);
    rsx! {
        td { "data-value": value, {children} }
    }
}

/// Single full-width row shown when there is nothing to list.
#[component]
pub fn DataTableEmpty(
    columns: usize,
    #[props(default = "No records found.".to_string())] message: String,
) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{columns}", "{message}" }
        }
    }
}
