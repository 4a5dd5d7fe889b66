use dioxus::prelude::*;

pub const STYLESHEET_PATH: &str = "/static/app.css";
pub const TABLE_SCRIPT_PATH: &str = "/static/table.js";

/// Full document shell shared by every page: head, navigation, main area
/// and footer. The table script is loaded last so tables exist when it runs.
#[component]
pub fn Page(title: String, nav: Element, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{title} | FindMe" }
                link { rel: "stylesheet", href: STYLESHEET_PATH }
            }
            body {
                {nav}
                main { class: "page-main", {children} }
                footer { class: "site-footer",
                    p { "FindMe. Report and track missing persons." }
                }
                script { src: TABLE_SCRIPT_PATH }
            }
        }
    }
}
