use serde::{Deserialize, Serialize};

/// Field projection requested from the catalog API.
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end";

/// One artwork row. Absent and `null` fields both deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    pub title: Option<String>,
    pub place_of_origin: Option<String>,
    pub artist_display: Option<String>,
    pub inscriptions: Option<String>,
    pub date_start: Option<i64>,
    pub date_end: Option<i64>,
}

impl Artwork {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}

/// Records returned by a single page fetch plus the server's total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkPage {
    pub records: Vec<Artwork>,
    pub total_records: u64,
}

/// The slice of the remote record set currently materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_number: u64,
    pub page_size: u64,
    pub total_records: u64,
}

impl PageWindow {
    pub fn new(page_number: u64, page_size: u64) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            total_records: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_records.div_ceil(self.page_size)
    }

    /// Zero-based index of the first record on the current page. Saturates
    /// for page numbers far past the end of the catalog.
    pub fn first_index(&self) -> u64 {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_null_fields_become_none() {
        let json = serde_json::json!({
            "id": 27992,
            "title": "A Sunday on La Grande Jatte",
            "place_of_origin": "France",
            "artist_display": null,
            "date_start": 1884,
            "date_end": null
        });

        let artwork: Artwork = serde_json::from_value(json).unwrap();

        assert_eq!(artwork.id, 27992);
        assert_eq!(artwork.title.as_deref(), Some("A Sunday on La Grande Jatte"));
        assert_eq!(artwork.artist_display, None);
        assert_eq!(artwork.inscriptions, None);
        assert_eq!(artwork.date_start, Some(1884));
        assert_eq!(artwork.date_end, None);
    }

    #[test]
    fn test_page_window_total_pages() {
        let mut window = PageWindow::new(1, 12);
        assert_eq!(window.total_pages(), 0);

        window.total_records = 133;
        assert_eq!(window.total_pages(), 12);

        window.total_records = 132;
        assert_eq!(window.total_pages(), 11);
    }

    #[test]
    fn test_page_window_clamps_inputs() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window.page_number, 1);
        assert_eq!(window.page_size, 1);
        assert_eq!(window.first_index(), 0);

        let window = PageWindow::new(3, 12);
        assert_eq!(window.first_index(), 24);
    }

    #[test]
    fn test_first_index_saturates() {
        let window = PageWindow::new(u64::MAX / 10, 12);
        assert_eq!(window.first_index(), u64::MAX);
    }
}
