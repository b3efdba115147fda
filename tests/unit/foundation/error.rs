use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DriftMapError::invalid_config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        DriftMapError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        DriftMapError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DriftMapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn image_io_errors_stay_io() {
    let err = DriftMapError::from(image::ImageError::IoError(std::io::Error::other("disk")));
    assert!(matches!(err, DriftMapError::Io(_)));
}

#[test]
fn image_format_errors_become_encode() {
    let err = DriftMapError::from(image::ImageError::Unsupported(
        image::error::UnsupportedError::from_format_and_kind(
            image::error::ImageFormatHint::Unknown,
            image::error::UnsupportedErrorKind::Format(image::error::ImageFormatHint::Unknown),
        ),
    ));
    assert!(matches!(err, DriftMapError::Encode(_)));
}
