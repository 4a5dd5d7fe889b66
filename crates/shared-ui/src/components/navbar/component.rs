use dioxus::prelude::*;

/// Which navigation bar a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavVariant {
    /// Visitors who are not signed in.
    #[default]
    Public,
    /// Signed-in reporters.
    Reporter,
    /// Signed-in agents.
    Agent,
}

impl NavVariant {
    /// `(href, label)` pairs in display order.
    pub fn links(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            NavVariant::Public => &[
                ("/", "Missing Persons"),
                ("/unidentified", "Unidentified"),
                ("/unclaimed", "Unclaimed"),
                ("/login", "Login"),
                ("/register", "Register"),
            ],
            NavVariant::Reporter => &[
                ("/dashboard", "Dashboard"),
                ("/dashboard/new-report", "New Report"),
                ("/dashboard/missing", "Missing"),
                ("/dashboard/unidentified", "Unidentified"),
                ("/dashboard/unclaimed", "Unclaimed"),
            ],
            NavVariant::Agent => &[
                ("/lead", "Dashboard"),
                ("/lead/all-cases", "All Cases"),
                ("/dashboard/unidentified", "Unidentified"),
                ("/dashboard/unclaimed", "Unclaimed"),
            ],
        }
    }

    fn home(&self) -> &'static str {
        match self {
            NavVariant::Public => "/",
            NavVariant::Reporter => "/dashboard",
            NavVariant::Agent => "/lead",
        }
    }

    fn signed_in(&self) -> bool {
        !matches!(self, NavVariant::Public)
    }
}

/// Top navigation bar. `current` is the path of the page being rendered and
/// marks the matching link active.
#[component]
pub fn Navbar(variant: NavVariant, #[props(default)] current: String) -> Element {
    let home = variant.home();

    rsx! {
        nav { class: "navbar",
            a { class: "navbar-brand", href: home, "FindMe" }
            ul { class: "navbar-links",
                for (href, label) in variant.links().iter() {
                    NavbarItem {
                        key: "{href}",
                        href: *href,
                        label: *label,
                        active: current == *href,
                    }
                }
            }
            if variant.signed_in() {
                LogoutButton {}
            }
        }
    }
}

#[component]
pub fn NavbarItem(href: &'static str, label: &'static str, #[props(default)] active: bool) -> Element {
    rsx! {
        li {
            a {
                class: if active { "navbar-link active" } else { "navbar-link" },
                href: href,
                "{label}"
            }
        }
    }
}

/// Posts to `/logout`, which clears the session cookie.
#[component]
pub fn LogoutButton() -> Element {
    rsx! {
        form { class: "navbar-logout", method: "post", action: "/logout",
            button { class: "button button-ghost", r#type: "submit", "Log out" }
        }
    }
}
