//! Tests for the RGB value type

#[cfg(test)]
mod tests {
    use chromatile::math::color::Rgb;

    // Ordering compares red, then green, then blue
    #[test]
    fn test_ordering_is_lexicographic() {
        let mut colors = vec![
            Rgb::new(0, 0, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 1),
        ];
        colors.sort();

        assert_eq!(
            colors,
            vec![
                Rgb::new(0, 0, 1),
                Rgb::new(0, 0, 255),
                Rgb::new(0, 255, 0),
                Rgb::new(255, 0, 0),
            ]
        );
    }

    // Display renders a lowercase hex triplet
    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb::new(255, 16, 0).to_string(), "#ff1000");
        assert_eq!(Rgb::BLACK.to_string(), "#000000");
    }

    // Conversions to and from image pixels keep every channel
    #[test]
    fn test_pixel_conversions() {
        let color = Rgb::new(12, 34, 56);
        let pixel: image::Rgb<u8> = color.into();
        assert_eq!(pixel.0, [12, 34, 56]);
        assert_eq!(Rgb::from(pixel), color);

        let rgba: image::Rgba<u8> = color.into();
        assert_eq!(rgba.0, [12, 34, 56, 255]);

        let channels: [u8; 3] = color.into();
        assert_eq!(Rgb::from(channels), color);
    }

    // Mixing at the ends of the range returns the inputs
    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(200, 100, 0);

        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Rgb::new(100, 100, 100));
        assert_eq!(a.mix(b, 7.0), b, "weight is clamped");
    }
}
