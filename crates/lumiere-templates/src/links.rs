//! RSVP and share links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Bytes escaped by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const RSVP_GREETING: &str = "¡Hola! Confirmo mi asistencia.";
const SHARE_MESSAGE: &str = "¡Mira mi invitación digital!";

/// Turn a free-form RSVP contact into a link.
///
/// A leading `WhatsApp:` label is dropped. URLs pass through, phone numbers
/// with at least seven digits open a WhatsApp chat, and anything else becomes
/// a WhatsApp message carrying the text.
pub fn rsvp_href(value: &str) -> String {
    let clean = strip_whatsapp_label(value.trim()).trim();

    if has_http_scheme(clean) {
        return clean.to_string();
    }

    let digits: String = clean
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')' | '.' | '+')))
        .collect();
    if digits.len() >= 7 && digits.chars().all(|c| c.is_ascii_digit()) {
        return format!(
            "https://wa.me/{digits}?text={}",
            encode_component(RSVP_GREETING)
        );
    }

    format!(
        "https://wa.me/?text={}",
        encode_component(&format!("RSVP: {clean}"))
    )
}

/// Public page URL for a share token.
pub fn share_url(base: &str, token: &str) -> String {
    format!("{}/invitacion/{}", base.trim_end_matches('/'), token)
}

pub fn whatsapp_share_url(share_url: &str) -> String {
    format!(
        "https://wa.me/?text={}",
        encode_component(&format!("{SHARE_MESSAGE} {share_url}"))
    )
}

fn strip_whatsapp_label(s: &str) -> &str {
    const LABEL: &str = "whatsapp:";
    match s.get(..LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(LABEL) => &s[LABEL.len()..],
        _ => s,
    }
}

fn has_http_scheme(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}
