use super::*;

#[test]
fn normalize_rel_path_cleans_separators_and_dots() {
    assert_eq!(
        normalize_rel_path("photos\\./groom.png").unwrap(),
        "photos/groom.png"
    );
    assert_eq!(normalize_rel_path("a//b/./c.jpg").unwrap(), "a/b/c.jpg");
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../secret.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn from_premul_validates_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
}

#[test]
fn solid_image_pixels_and_aspect() {
    let img = PreparedImage::solid(4, 2, [1, 2, 3, 255]);
    assert_eq!(img.pixel(3, 1), Some([1, 2, 3, 255]));
    assert_eq!(img.pixel(4, 0), None);
    assert!((img.aspect_ratio() - 2.0).abs() < 1e-12);
}
