//! Build an [`InboundEmail`] from raw RFC 5322 bytes

use crate::error::{ExtractError, Result};
use crate::types::{EmailAddress, InboundEmail};
use chrono::{DateTime, Utc};
use mailparse::{MailHeader, ParsedMail};
use tracing::debug;

/// Parse raw message bytes into an [`InboundEmail`].
///
/// Reads From, Subject, Date and Message-ID, and the first `text/plain` and
/// `text/html` parts found anywhere in the MIME tree.
pub fn parse_inbound(raw: &[u8]) -> Result<InboundEmail> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ExtractError::Structure(e.to_string()))?;

    let sender = extract_sender(&parsed.headers)?;
    let subject = header_value(&parsed.headers, "subject").unwrap_or_default();
    let received_at = extract_date(&parsed.headers);
    let message_id = header_value(&parsed.headers, "message-id")
        .map(|id| id.trim().trim_start_matches('<').trim_end_matches('>').to_string())
        .unwrap_or_default();
    let (text, html) = extract_body_parts(&parsed);

    debug!("Parsed inbound email: {} from {}", subject, sender);

    Ok(InboundEmail {
        sender,
        subject,
        html_body: html,
        text_body: text,
        received_at,
        provider_message_id: message_id,
    })
}

fn header_value(headers: &[MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(MailHeader::get_value)
}

fn extract_sender(headers: &[MailHeader]) -> Result<String> {
    let from = header_value(headers, "from")
        .ok_or_else(|| ExtractError::MissingHeader("From".into()))?;

    if EmailAddress::parse(&from).is_none() {
        return Err(ExtractError::Structure(format!(
            "Could not parse From header: {from}"
        )));
    }
    Ok(from.trim().to_string())
}

fn extract_date(headers: &[MailHeader]) -> DateTime<Utc> {
    header_value(headers, "date")
        .and_then(|v| DateTime::parse_from_rfc2822(v.trim()).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc))
}

fn extract_body_parts(parsed: &ParsedMail) -> (Option<String>, Option<String>) {
    let mut text = None;
    let mut html = None;

    if parsed.subparts.is_empty() {
        let content_type = parsed.ctype.mimetype.to_lowercase();
        if let Ok(body) = parsed.get_body() {
            if content_type.contains("text/html") {
                html = Some(body);
            } else {
                text = Some(body);
            }
        }
    } else {
        extract_body_recursive(parsed, &mut text, &mut html);
    }

    (text, html)
}

fn extract_body_recursive(
    parsed: &ParsedMail,
    text: &mut Option<String>,
    html: &mut Option<String>,
) {
    for part in &parsed.subparts {
        if part.subparts.is_empty() {
            let content_type = part.ctype.mimetype.to_lowercase();
            if let Ok(body) = part.get_body() {
                if content_type.contains("text/plain") && text.is_none() {
                    *text = Some(body);
                } else if content_type.contains("text/html") && html.is_none() {
                    *html = Some(body);
                }
            }
        } else {
            extract_body_recursive(part, text, html);
        }
    }
}
