use super::*;

fn checker(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 == 0 {
                out.extend_from_slice(&[200, 40, 40, 255]);
            } else {
                out.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    out
}

#[test]
fn mime_resolution_falls_back_to_png() {
    assert_eq!(ExportFormat::from_mime("image/png", 90), ExportFormat::Png);
    assert_eq!(
        ExportFormat::from_mime("IMAGE/JPEG", 90),
        ExportFormat::Jpeg { quality: 90 }
    );
    assert_eq!(ExportFormat::from_mime("image/webp", 90), ExportFormat::Png);
    assert_eq!(
        ExportFormat::from_mime("image/jpeg", 0),
        ExportFormat::Jpeg { quality: 1 }
    );
}

#[test]
fn png_export_decodes_back_with_alpha() {
    let data = checker(3, 2);
    let encoded = encode_rgba8_premul(3, 2, &data, ExportFormat::Png).unwrap();
    assert_eq!(encoded.mime, "image/png");

    let back = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.get_pixel(0, 0).0, [200, 40, 40, 255]);
    assert_eq!(back.get_pixel(1, 0).0[3], 0);
}

#[test]
fn jpeg_export_is_opaque() {
    let data = checker(8, 8);
    let encoded =
        encode_rgba8_premul(8, 8, &data, ExportFormat::Jpeg { quality: 90 }).unwrap();
    assert_eq!(encoded.mime, "image/jpeg");
    assert_eq!(&encoded.bytes[..2], &[0xFF, 0xD8]);

    let back = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (8, 8));
    assert!(back.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn empty_or_mismatched_buffers_fail() {
    assert!(encode_rgba8_premul(0, 4, &[], ExportFormat::Png).is_err());
    assert!(encode_rgba8_premul(2, 2, &[0; 8], ExportFormat::Png).is_err());
}

#[test]
fn data_url_roundtrip_and_plain_payloads() {
    let img = EncodedImage {
        mime: "image/png",
        bytes: vec![1, 2, 3, 250],
    };
    let url = img.to_data_url();
    assert!(url.starts_with("data:image/png;base64,"));
    let (mime, bytes) = decode_data_url(&url).unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(bytes, vec![1, 2, 3, 250]);

    let (mime, bytes) = decode_data_url("data:image/svg+xml,%3Csvg%3E").unwrap();
    assert_eq!(mime, "image/svg+xml");
    assert_eq!(bytes, b"<svg>".to_vec());

    assert!(decode_data_url("http://example.com/a.png").is_err());
    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("data:image/png;base64,!!!").is_err());
}
