use chrono::{DateTime, Utc};
use lumiere_storage::{Invitation, InvitationId, UserId};
use uuid::Uuid;

/// Reserved share token that always shows the sample invitation.
pub const DEMO_TOKEN: &str = "demo";

/// The sample invitation served for [`DEMO_TOKEN`]. Never stored.
pub fn demo_invitation() -> Invitation {
    let created_at = DateTime::<Utc>::from_timestamp(1_767_225_600, 0).unwrap_or_default();
    Invitation {
        id: InvitationId(Uuid::nil()),
        client_id: UserId(Uuid::nil()),
        share_token: DEMO_TOKEN.to_string(),
        event_type: Some("Boda".into()),
        title: Some("Estas invitado a nuestra boda".into()),
        names: "Elizabeth & Salomon".into(),
        event_date: "12 junio 2026".into(),
        event_time: Some("18:00".into()),
        venue: Some("Hacienda San Rafael".into()),
        location_note: Some("Queretaro, Mexico".into()),
        message: Some(
            "El amor contigo es un viaje sin fin, y cada dia es una nueva aventura.".into(),
        ),
        quote: Some("Amar es encontrar en la felicidad de otro tu propia felicidad.".into()),
        hashtag: Some("#BodaElizabethSalomon".into()),
        dress_code: Some("Etiqueta formal, tonos claros".into()),
        rsvp_label: Some("Confirmar asistencia".into()),
        rsvp_value: Some("WhatsApp: +52 555 123 4567".into()),
        template: "rustic".into(),
        primary_color: "#b07b4b".into(),
        text_color: "#2b1a10".into(),
        font_style: "serif".into(),
        is_dark: true,
        gallery: Vec::new(),
        is_published: true,
        views: 0,
        created_at,
        updated_at: created_at,
    }
}
