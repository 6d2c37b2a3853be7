//! Content of the direct message sent on a match.

use crate::catalogue::CatalogueEntry;

pub const NOTIFICATION_TITLE: &str = "Potential AI Artist detected!";

pub const DISCLAIMER: &str = "Please note that soul over ai is community driven. It is no proof for the artist beeing AI. They're just compiling evidence.";

/// Platform-neutral notification. Adapters decide how to render it
/// (embed, plain text, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    /// Short line naming the matched entry.
    pub headline: String,
    pub body: String,
    pub footer: String,
    pub report_url: String,
}

impl Notification {
    pub fn for_match(entry: &CatalogueEntry, report_url: &str) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            headline: format!("{} is on the Soul Over AI index", entry.name),
            body: format!(
                "The artist you're currently listening to is listed on https://souloverai.com\n\
                 You can find out more at: {}",
                report_url
            ),
            footer: DISCLAIMER.to_string(),
            report_url: report_url.to_string(),
        }
    }
}

/// Substitute the entry id into the report URL template's `{}`.
pub fn format_report_url(template: &str, id: &str) -> String {
    template.replacen("{}", id, 1)
}
