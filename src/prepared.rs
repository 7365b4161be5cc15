//! One-time normalization of an inbound message before classification

use crate::content::extract_text_content;
use crate::toolkit::normalize_currency;
use crate::types::{EmailAddress, InboundEmail};

/// Normalized view of an [`InboundEmail`] shared by the classifier and the
/// extractors, so the body is cleaned once per call.
#[derive(Debug, Clone)]
pub struct PreparedEmail<'a> {
    pub email: &'a InboundEmail,
    pub sender: Option<EmailAddress>,

    /// Subject with entities decoded and currency spellings normalized
    pub subject: String,

    /// Body text: cleaned HTML when present, else the text part
    pub body: String,

    pub subject_lower: String,
    pub body_lower: String,

    /// `subject`, a newline, then `body`
    pub search_text: String,
}

impl<'a> PreparedEmail<'a> {
    /// Prepare `email`, keeping at most `max_body_chars` characters of body
    #[must_use]
    pub fn new(email: &'a InboundEmail, max_body_chars: usize) -> Self {
        let subject = normalize_currency(&extract_text_content(&email.subject)).replace('\n', " ");
        let body = normalize_currency(&truncate_chars(&body_text(email), max_body_chars));
        let search_text = format!("{subject}\n{body}");

        Self {
            email,
            sender: email.sender_address(),
            subject_lower: subject.to_lowercase(),
            body_lower: body.to_lowercase(),
            subject,
            body,
            search_text,
        }
    }

    /// Sender domain, lowercased, or empty when the sender is unparseable
    #[must_use]
    pub fn sender_domain(&self) -> &str {
        self.sender.as_ref().map_or("", |s| s.domain.as_str())
    }

    /// True if the sender is `domain` or one of its subdomains
    #[must_use]
    pub fn is_from_domain(&self, domain: &str) -> bool {
        self.sender
            .as_ref()
            .is_some_and(|s| s.is_from_domain(domain))
    }

    /// True if subject or body contains `needle` (expected lowercase)
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.subject_lower.contains(needle) || self.body_lower.contains(needle)
    }
}

fn body_text(email: &InboundEmail) -> String {
    let from_html = email
        .html_body
        .as_deref()
        .map(extract_text_content)
        .unwrap_or_default();
    if !from_html.trim().is_empty() {
        return from_html;
    }
    email
        .text_body
        .as_deref()
        .map(extract_text_content)
        .unwrap_or_default()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
