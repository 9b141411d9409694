use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BokehError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BokehError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        BokehError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = BokehError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
