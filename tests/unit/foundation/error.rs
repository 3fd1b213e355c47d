use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::not_found("x").to_string().contains("not found:"));
    assert!(
        ReelError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
    assert!(ReelError::upload("x").to_string().contains("upload error:"));
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_collaborator_failures_are_recoverable() {
    assert!(ReelError::not_found("poster").is_recoverable());
    assert!(ReelError::network("timeout").is_recoverable());
    assert!(!ReelError::validation("bad").is_recoverable());
    assert!(!ReelError::encode("ffmpeg").is_recoverable());
    assert!(!ReelError::upload("b2").is_recoverable());
}

#[test]
fn json_errors_map_to_serde() {
    let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReelError::Serde(_)));
}
