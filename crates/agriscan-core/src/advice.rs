//! Free-text produce advice sent by the classifier alongside its prediction.
//!
//! The backend returns one markdown-ish string with `**Nutrition:**` and
//! `**Cleaning Tips:**` headings. Older payloads sent the two parts as
//! separate fields; [`join_sections`] folds those back into the single form.

pub const NUTRITION_HEADING: &str = "**Nutrition:**";
pub const CLEANING_HEADING: &str = "**Cleaning Tips:**";
const CLEANING_HEADINGS: &[&str] = &[CLEANING_HEADING, "**Cleaning Tip:**"];

/// Advice split into its display sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviceSections {
    pub nutrition: Option<String>,
    pub cleaning: Option<String>,
}

impl AdviceSections {
    /// Split advice text by heading. Without headings, the first paragraph
    /// is taken as nutrition and the second as cleaning tips.
    pub fn parse(advice: &str) -> Self {
        Self {
            nutrition: section(advice, &[NUTRITION_HEADING]).or_else(|| paragraph(advice, 0)),
            cleaning: section(advice, CLEANING_HEADINGS).or_else(|| paragraph(advice, 1)),
        }
    }
}

/// Combine separately-sent nutrition facts and cleaning tips into one
/// advice string. `None` when both are absent or blank.
pub fn join_sections(nutrition: Option<&str>, cleaning: Option<&str>) -> Option<String> {
    let parts: Vec<String> = [(NUTRITION_HEADING, nutrition), (CLEANING_HEADING, cleaning)]
        .into_iter()
        .filter_map(|(heading, body)| {
            let body = body.map(str::trim).filter(|b| !b.is_empty())?;
            Some(format!("{heading} {body}"))
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// Body under the first heading found: the rest of its line plus following
/// lines up to the next `**` heading.
fn section(advice: &str, headings: &[&str]) -> Option<String> {
    let (start, heading) = headings
        .iter()
        .find_map(|h| advice.find(*h).map(|i| (i, *h)))?;
    let mut lines = advice[start + heading.len()..].lines();
    let mut body = vec![lines.next().unwrap_or_default()];
    body.extend(lines.take_while(|l| !l.trim_start().starts_with("**")));
    non_empty(body.join("\n"))
}

fn paragraph(advice: &str, index: usize) -> Option<String> {
    advice
        .split("\n\n")
        .nth(index)
        .and_then(|p| non_empty(p.replace("**", "")))
}

fn non_empty(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
