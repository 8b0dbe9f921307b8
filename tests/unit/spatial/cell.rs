//! Tests for source references and cell views

#[cfg(test)]
mod tests {
    use chromatile::math::color::Rgb;
    use chromatile::spatial::cell::{CellView, SourceRef};

    // Tests references compare by text and display it unchanged
    #[test]
    fn test_source_ref_identity() {
        let a = SourceRef::new("tiles/a.png");
        let b = SourceRef::from(String::from("tiles/a.png"));
        let c = SourceRef::from("tiles/c.png");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
        assert_eq!(a.as_str(), "tiles/a.png");
        assert_eq!(c.to_string(), "tiles/c.png");
        assert_eq!(a.clone().as_ref(), "tiles/a.png");
    }

    // Tests a cell view is filled exactly when it has a source
    #[test]
    fn test_cell_view_filled() {
        let source = SourceRef::new("x");
        let empty = CellView {
            target: Rgb::BLACK,
            source: None,
        };
        let filled = CellView {
            target: Rgb::BLACK,
            source: Some(&source),
        };

        assert!(!empty.is_filled());
        assert!(filled.is_filled());
    }
}
