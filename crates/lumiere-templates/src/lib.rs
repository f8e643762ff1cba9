//! Template resolution and presentation helpers for digital invitations.
//!
//! Everything here is pure: a template key resolves to a static [`Theme`],
//! record-level overrides are layered on by [`PageStyle::compose`], and the
//! link helpers build the RSVP and share URLs shown on the page.

mod demo;
mod links;
mod style;
mod theme;

pub use demo::{demo_invitation, DEMO_TOKEN};
pub use links::{rsvp_href, share_url, whatsapp_share_url};
pub use style::{placeholder_count, PageStyle, StyleOverrides};
pub use theme::{resolve_theme, Template, TemplateInfo, Theme};
