use serde::Serialize;

/// The closed set of invitation templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Warm,
    Floral,
    Rustic,
    Moderno,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Warm,
        Template::Floral,
        Template::Rustic,
        Template::Moderno,
    ];

    /// Exact, case-sensitive lookup. Anything unrecognised is `Warm`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "floral" => Template::Floral,
            "rustic" => Template::Rustic,
            "moderno" => Template::Moderno,
            _ => Template::Warm,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Template::Warm => "warm",
            Template::Floral => "floral",
            Template::Rustic => "rustic",
            Template::Moderno => "moderno",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Template::Warm => "Cálida",
            Template::Floral => "Floral",
            Template::Rustic => "Rústica",
            Template::Moderno => "Moderno",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Template::Warm => "Cremas suaves y dorado miel",
            Template::Floral => "Rosa polvoso y romanticismo",
            Template::Rustic => "Tierra oscura, detalles dorados",
            Template::Moderno => "Navy elegante y líneas limpias",
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            Template::Warm => &WARM,
            Template::Floral => &FLORAL,
            Template::Rustic => &RUSTIC,
            Template::Moderno => &MODERNO,
        }
    }

    /// Catalog entry for the template picker.
    pub fn info(self) -> TemplateInfo {
        TemplateInfo {
            id: self,
            label: self.label(),
            description: self.description(),
            is_dark: self.theme().is_dark,
            background: self.theme().background,
        }
    }
}

/// Resolve a stored template key to its theme. Never fails.
pub fn resolve_theme(key: &str) -> &'static Theme {
    Template::from_key(key).theme()
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: Template,
    pub label: &'static str,
    pub description: &'static str,
    pub is_dark: bool,
    pub background: &'static str,
}

/// Visual descriptor of a template.
///
/// Color values are CSS strings. The `*_photo` and `gallery_*` fields name
/// the placeholder image classes used when an invitation has no gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub is_dark: bool,
    pub background: &'static str,
    pub hero_overlay: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub glass: &'static str,
    pub glass_border: &'static str,
    pub divider: &'static str,
    pub rsvp_background: &'static str,
    pub rsvp_text: &'static str,
    pub hero_photo: &'static str,
    pub gallery_a: &'static str,
    pub gallery_b: &'static str,
    pub ornament: &'static str,
}

static WARM: Theme = Theme {
    is_dark: false,
    background: "linear-gradient(180deg, #fdf6ee 0%, #f5e8d4 50%, #ecdbc0 100%)",
    hero_overlay: "radial-gradient(circle at 30% 20%, rgba(168,114,58,0.18), transparent 60%), \
                   radial-gradient(circle at 75% 65%, rgba(197,150,100,0.14), transparent 55%)",
    accent: "#a8723a",
    text: "#2b1a10",
    text_muted: "rgba(43,26,16,0.5)",
    glass: "rgba(255,255,255,0.55)",
    glass_border: "rgba(168,114,58,0.18)",
    divider: "rgba(168,114,58,0.15)",
    rsvp_background: "rgba(168,114,58,0.1)",
    rsvp_text: "#a8723a",
    hero_photo: "photo-placeholder-amber",
    gallery_a: "photo-placeholder-amber",
    gallery_b: "photo-placeholder-warm",
    ornament: "✦",
};

static FLORAL: Theme = Theme {
    is_dark: false,
    background: "linear-gradient(180deg, #fdf0f4 0%, #f8e4ee 50%, #f2d8e6 100%)",
    hero_overlay: "radial-gradient(circle at 25% 25%, rgba(181,96,122,0.16), transparent 55%), \
                   radial-gradient(circle at 80% 60%, rgba(220,140,165,0.12), transparent 50%)",
    accent: "#b5607a",
    text: "#3a1422",
    text_muted: "rgba(58,20,34,0.5)",
    glass: "rgba(255,255,255,0.6)",
    glass_border: "rgba(181,96,122,0.18)",
    divider: "rgba(181,96,122,0.14)",
    rsvp_background: "rgba(181,96,122,0.1)",
    rsvp_text: "#b5607a",
    hero_photo: "photo-placeholder-rose",
    gallery_a: "photo-placeholder-rose",
    gallery_b: "photo-placeholder-warm",
    ornament: "❀",
};

static RUSTIC: Theme = Theme {
    is_dark: true,
    background: "linear-gradient(180deg, #1e1008 0%, #2e1a0a 50%, #1e1208 100%)",
    hero_overlay: "radial-gradient(circle at 35% 20%, rgba(201,169,110,0.2), transparent 60%), \
                   radial-gradient(circle at 75% 70%, rgba(160,110,60,0.15), transparent 55%)",
    accent: "#c9a96e",
    text: "#f5f0e8",
    text_muted: "rgba(245,240,232,0.5)",
    glass: "rgba(255,255,255,0.05)",
    glass_border: "rgba(201,169,110,0.2)",
    divider: "rgba(201,169,110,0.15)",
    rsvp_background: "#c9a96e",
    rsvp_text: "#1e1008",
    hero_photo: "photo-placeholder-amber",
    gallery_a: "photo-placeholder-neutral",
    gallery_b: "photo-placeholder-amber",
    ornament: "◆",
};

static MODERNO: Theme = Theme {
    is_dark: true,
    background: "linear-gradient(180deg, #08101e 0%, #0e1a2e 50%, #08101e 100%)",
    hero_overlay: "radial-gradient(circle at 30% 20%, rgba(123,174,224,0.15), transparent 60%), \
                   radial-gradient(circle at 70% 70%, rgba(80,130,200,0.1), transparent 55%)",
    accent: "#7baee0",
    text: "#e8edf8",
    text_muted: "rgba(232,237,248,0.5)",
    glass: "rgba(255,255,255,0.04)",
    glass_border: "rgba(123,174,224,0.18)",
    divider: "rgba(123,174,224,0.12)",
    rsvp_background: "#7baee0",
    rsvp_text: "#08101e",
    hero_photo: "photo-placeholder-cool",
    gallery_a: "photo-placeholder-cool",
    gallery_b: "photo-placeholder-neutral",
    ornament: "◈",
};
