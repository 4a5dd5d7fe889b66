use dioxus::prelude::*;

#[component]
pub fn Card(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

#[component]
pub fn CardHeader(children: Element) -> Element {
    rsx! {
        div { class: "card-header", {children} }
    }
}

#[component]
pub fn CardTitle(children: Element) -> Element {
    rsx! {
        h3 { class: "card-title", {children} }
    }
}

#[component]
pub fn CardContent(children: Element) -> Element {
    rsx! {
        div { class: "card-content", {children} }
    }
}

/// Colour accent of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Info,
    Success,
}

impl StatTone {
    fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-neutral",
            StatTone::Info => "stat-info",
            StatTone::Success => "stat-success",
        }
    }
}

/// A single dashboard counter.
#[component]
pub fn StatCard(label: String, value: usize, #[props(default)] tone: StatTone) -> Element {
    let tone_class = tone.class();
    rsx! {
        div { class: "card stat-card {tone_class}",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

/// Row of stat cards.
#[component]
pub fn StatGrid(children: Element) -> Element {
    rsx! {
        div { class: "stat-grid", {children} }
    }
}
