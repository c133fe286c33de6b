use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KropperError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(KropperError::decode("x").to_string().contains("decode error:"));
    assert!(KropperError::encode("x").to_string().contains("encode error:"));
    assert!(KropperError::render("x").to_string().contains("render error:"));
    assert!(
        KropperError::from(CameraError::PermissionDenied)
            .to_string()
            .contains("camera error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KropperError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
