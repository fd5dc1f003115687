use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BrandmarkError::load("overlay/x.svg", "boom")
            .to_string()
            .contains("load error: overlay/x.svg")
    );
    assert!(
        BrandmarkError::missing_input("x")
            .to_string()
            .contains("missing input:")
    );
    assert!(
        BrandmarkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BrandmarkError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        BrandmarkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn is_load_only_matches_load_errors() {
    assert!(BrandmarkError::load("a", "b").is_load());
    assert!(!BrandmarkError::missing_input("a").is_load());
    assert!(!BrandmarkError::validation("a").is_load());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BrandmarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
