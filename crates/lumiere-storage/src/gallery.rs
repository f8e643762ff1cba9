//! Gallery encoding.
//!
//! A gallery is an ordered list of image locations. Backends persist it as a
//! JSON array in a single text column; reads never fail on a bad value.

/// Outcome of decoding a stored gallery column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryDecode {
    /// The column held a JSON array of strings.
    Decoded(Vec<String>),
    /// The column was missing, blank, or not a JSON array of strings.
    Empty,
}

impl GalleryDecode {
    /// Decode a raw stored value.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return GalleryDecode::Empty;
        };
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(items) => GalleryDecode::Decoded(items),
            Err(_) => GalleryDecode::Empty,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            GalleryDecode::Decoded(items) => items,
            GalleryDecode::Empty => Vec::new(),
        }
    }
}

/// Decode a stored gallery, collapsing anything unreadable to an empty list.
pub fn decode_gallery(raw: Option<&str>) -> Vec<String> {
    GalleryDecode::parse(raw).into_vec()
}

/// Encode a gallery for storage.
pub fn encode_gallery(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
