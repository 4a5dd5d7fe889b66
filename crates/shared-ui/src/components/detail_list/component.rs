use dioxus::prelude::*;

/// Label/value pairs for a record's detail page.
#[component]
pub fn DetailList(children: Element) -> Element {
    rsx! {
        dl { class: "detail-list", {children} }
    }
}

/// One row of a `DetailList`. Plain text goes in `value`; rich content
/// (badges, links) goes in children and is used when `value` is empty.
#[component]
pub fn DetailItem(
    label: &'static str,
    #[props(default)] value: String,
    children: Element,
) -> Element {
    rsx! {
        div { class: "detail-item",
            dt { class: "detail-item-label", "{label}" }
            dd { class: "detail-item-value",
                if value.is_empty() {
                    {children}
                } else {
                    "{value}"
                }
            }
        }
    }
}

/// Grid of cards on a detail page.
#[component]
pub fn DetailGrid(children: Element) -> Element {
    rsx! {
        div { class: "detail-grid", {children} }
    }
}

/// Text for an optional field, `N/A` when absent or blank.
pub fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}
