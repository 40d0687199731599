//! Context strings handed to the external chat assistant.

const ASSISTANT_ROLE: &str = "You are a helpful agricultural assistant providing information \
about produce, nutrition, and food safety.";

/// Describe the produce under discussion, or `None` when nothing is known.
///
/// `chat_context(Some("banana"), Some("organic"))` →
/// `"Current produce being discussed: banana. Organic status: organic. "`
pub fn chat_context(produce_name: Option<&str>, organic_status: Option<&str>) -> Option<String> {
    let produce_name = produce_name.map(str::trim).filter(|s| !s.is_empty());
    let organic_status = organic_status.map(str::trim).filter(|s| !s.is_empty());
    if produce_name.is_none() && organic_status.is_none() {
        return None;
    }

    let mut context = format!(
        "Current produce being discussed: {}. ",
        produce_name.unwrap_or("Unknown")
    );
    if let Some(status) = organic_status {
        context.push_str(&format!("Organic status: {status}. "));
    }
    Some(context)
}

/// System prompt for the assistant, with optional context appended.
pub fn system_prompt(context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!("{ASSISTANT_ROLE} Context: {ctx}"),
        None => ASSISTANT_ROLE.to_string(),
    }
}
