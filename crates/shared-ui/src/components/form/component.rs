use dioxus::prelude::*;

/// Plain HTML form posting back to the server. `multipart` switches the
/// encoding for file uploads.
#[component]
pub fn Form(
    action: String,
    #[props(default)] multipart: bool,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    let enctype = if multipart {
        "multipart/form-data"
    } else {
        "application/x-www-form-urlencoded"
    };
    rsx! {
        form { class: "form {class}", method: "post", action: "{action}", enctype,
            {children}
        }
    }
}

/// Label plus control plus the field's error message, if any.
#[component]
fn FieldShell(label: String, name: String, error: String, children: Element) -> Element {
    let has_error = !error.is_empty();
    rsx! {
        div { class: if has_error { "field field-invalid" } else { "field" },
            label { class: "field-label", r#for: "{name}", "{label}" }
            {children}
            if has_error {
                p { class: "field-error", "{error}" }
            }
        }
    }
}

#[component]
pub fn TextField(
    label: String,
    name: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] value: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
    #[props(default)] error: String,
) -> Element {
    rsx! {
        FieldShell { label, name: name.clone(), error,
            input {
                class: "input",
                id: "{name}",
                name: "{name}",
                r#type: "{input_type}",
                value: "{value}",
                placeholder: "{placeholder}",
                required,
            }
        }
    }
}

#[component]
pub fn TextAreaField(
    label: String,
    name: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    #[props(default)] error: String,
) -> Element {
    rsx! {
        FieldShell { label, name: name.clone(), error,
            textarea { class: "textarea", id: "{name}", name: "{name}", rows: "{rows}", "{value}" }
        }
    }
}

/// Dropdown. `options` are `(value, label)` pairs; a blank prompt option
/// comes first when `prompt` is set.
#[component]
pub fn SelectField(
    label: String,
    name: String,
    options: Vec<(String, String)>,
    #[props(default)] selected: String,
    #[props(default)] prompt: String,
    #[props(default)] required: bool,
    #[props(default)] error: String,
) -> Element {
    rsx! {
        FieldShell { label, name: name.clone(), error,
            select { class: "select", id: "{name}", name: "{name}", required,
                if !prompt.is_empty() {
                    option { value: "", "{prompt}" }
                }
                for (value, text) in options.iter() {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: *value == selected,
                        "{text}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn FileField(
    label: String,
    name: String,
    #[props(default = "image/*".to_string())] accept: String,
    #[props(default)] error: String,
) -> Element {
    rsx! {
        FieldShell { label, name: name.clone(), error,
            input { class: "input", id: "{name}", name: "{name}", r#type: "file", accept: "{accept}" }
        }
    }
}

#[component]
pub fn SubmitButton(label: String, #[props(default)] class: String) -> Element {
    rsx! {
        button { class: "button button-primary {class}", r#type: "submit", "{label}" }
    }
}

/// Tone of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Error,
}

impl AlertVariant {
    fn class(&self) -> &'static str {
        match self {
            AlertVariant::Info => "alert alert-info",
            AlertVariant::Success => "alert alert-success",
            AlertVariant::Error => "alert alert-error",
        }
    }
}

#[component]
pub fn Alert(#[props(default)] variant: AlertVariant, children: Element) -> Element {
    rsx! {
        div { class: variant.class(), role: "alert", {children} }
    }
}
