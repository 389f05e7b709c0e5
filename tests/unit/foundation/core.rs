use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(10, 10).is_ok());
}

#[test]
fn canvas_rejects_oversized_buffers() {
    assert!(Canvas::new(8192, 8192).is_ok());
    assert!(Canvas::new(8192, 8193).is_err());
    let err = Canvas::new(100_000, 100_000).unwrap_err();
    assert!(matches!(err, PrimeWheelError::Validation(_)));
    assert!(Canvas::new(u32::MAX, u32::MAX).is_err());
}

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas::new(640, 480).unwrap();
    assert_eq!(c.center(), Point::new(320.0, 240.0));
}

#[test]
fn color_parses_hex_forms() {
    assert_eq!("#0000FF".parse::<Color>().unwrap(), Color::BLUE);
    assert_eq!("#0af".parse::<Color>().unwrap(), Color::rgb(0, 0xAA, 0xFF));
    assert_eq!(
        "#11223380".parse::<Color>().unwrap(),
        Color {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x80
        }
    );
    assert!("#12345".parse::<Color>().is_err());
    assert!("#GGGGGG".parse::<Color>().is_err());
    assert!("#ééé".parse::<Color>().is_err());
}

#[test]
fn color_display_omits_opaque_alpha() {
    assert_eq!(Color::BLUE.to_string(), "#0000FF");
    let c = Color {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    };
    assert_eq!(c.to_string(), "#01020304");
}

#[test]
fn color_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Color::BLUE).unwrap();
    assert_eq!(json, "\"#0000FF\"");
    let back: Color = serde_json::from_str("\"#ff0000\"").unwrap();
    assert_eq!(back, Color::rgb(255, 0, 0));
    assert!(serde_json::from_str::<Color>("\"red\"").is_err());
}

#[test]
fn frame_pixel_bounds() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}
