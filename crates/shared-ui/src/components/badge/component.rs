use dioxus::prelude::*;

/// Visual variant for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "neutral",
            BadgeVariant::Info => "info",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
        }
    }

    /// Variant for a stored case status. Unknown values stay neutral.
    pub fn for_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "pending" => BadgeVariant::Warning,
            "active" => BadgeVariant::Info,
            "closed" => BadgeVariant::Success,
            _ => BadgeVariant::Neutral,
        }
    }
}

#[component]
pub fn Badge(#[props(default)] variant: BadgeVariant, children: Element) -> Element {
    rsx! {
        span { class: "badge", "data-style": variant.class(), {children} }
    }
}

/// Badge for a case status such as `pending`, shown capitalised.
#[component]
pub fn StatusBadge(status: String) -> Element {
    let variant = BadgeVariant::for_status(&status);
    let label = capitalize(status.trim());
    rsx! {
        Badge { variant, "{label}" }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Unknown".to_string(),
    }
}
