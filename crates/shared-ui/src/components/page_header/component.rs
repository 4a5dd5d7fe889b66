use dioxus::prelude::*;

/// Page heading with an optional subtitle. Children go in the action area
/// on the right.
#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: String,
    children: Element,
) -> Element {
    rsx! {
        div { class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if !subtitle.is_empty() {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}

/// Secondary heading for a section within a page.
#[component]
pub fn SectionTitle(children: Element) -> Element {
    rsx! {
        h2 { class: "section-title", {children} }
    }
}
