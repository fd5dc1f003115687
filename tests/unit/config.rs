use super::*;

#[test]
fn empty_object_is_the_default() {
    let cfg = BrandConfig::from_json("{}").unwrap();
    assert_eq!(cfg, BrandConfig::default());
    assert_eq!(cfg.brand_icon, "overlay/lightning.svg");
    assert_eq!(cfg.accent_stroke.width, 1.0);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let cfg = BrandConfig::from_json(
        r#"{ "layout": { "padding": 8 }, "icon_fit": "contain", "background": [0, 0, 0, 255] }"#,
    )
    .unwrap();
    assert_eq!(cfg.layout.padding, 8.0);
    assert_eq!(cfg.layout.card_ratio, LayoutParams::default().card_ratio);
    assert_eq!(cfg.icon_fit, IconFit::Contain);

    let opts = cfg.plan_opts();
    assert_eq!(opts.background, Rgba8Premul::from_straight_rgba(0, 0, 0, 255));
    assert_eq!(opts.card_fill, Rgba8Premul::white());
}

#[test]
fn unknown_fields_are_serde_errors() {
    let err = BrandConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
    assert!(matches!(err, BrandmarkError::Serde(_)), "{err}");
}

#[test]
fn out_of_range_values_fail_validation() {
    for json in [
        r#"{ "layout": { "card_ratio": 0.5 } }"#,
        r#"{ "layout": { "padding": -1 } }"#,
        r#"{ "accent_stroke": { "width": -2 } }"#,
        r#"{ "brand_icon": "  " }"#,
    ] {
        let err = BrandConfig::from_json(json).unwrap_err();
        assert!(matches!(err, BrandmarkError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn compositor_opts_parse_brand_icon_source() {
    let cfg = BrandConfig {
        brand_icon: "data:image/svg+xml,<svg/>".to_owned(),
        ..BrandConfig::default()
    };
    let opts = cfg.compositor_opts("/srv/assets");
    assert!(matches!(opts.brand_icon, AssetSource::DataUri(_)));
    assert_eq!(opts.assets_root, PathBuf::from("/srv/assets"));

    let opts = BrandConfig::default().compositor_opts("assets");
    assert_eq!(opts.brand_icon, AssetSource::path("overlay/lightning.svg"));
}

#[test]
fn missing_file_is_reported_with_path() {
    let path = std::env::temp_dir().join("brandmark_missing_config.json");
    let err = BrandConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("brandmark_missing_config.json"));
}
