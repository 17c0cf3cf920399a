use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShadeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShadeError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(ShadeError::decode("x").to_string().contains("decode error:"));
    assert!(
        ShadeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShadeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn inference_error_messages() {
    assert_eq!(
        InferenceError::Failed("oom".to_owned()).to_string(),
        "inference failed: oom"
    );
    assert_eq!(InferenceError::Cancelled.to_string(), "inference cancelled");
}
