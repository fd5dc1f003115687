use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./overlay//x.svg").unwrap(), "overlay/x.svg");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn data_uri_base64_and_plain() {
    let d = parse_data_uri("data:image/png;base64,AAEC").unwrap();
    assert_eq!(d.mime, "image/png");
    assert_eq!(d.bytes, vec![0u8, 1, 2]);

    let d = parse_data_uri("data:image/svg+xml,<svg/>").unwrap();
    assert_eq!(d.mime, "image/svg+xml");
    assert_eq!(d.bytes, b"<svg/>".to_vec());

    let d = parse_data_uri("data:,hello").unwrap();
    assert_eq!(d.mime, "text/plain");
    assert_eq!(d.bytes, b"hello".to_vec());
}

#[test]
fn data_uri_rejects_malformed_input() {
    assert!(parse_data_uri("image/png;base64,AAEC").is_err());
    assert!(parse_data_uri("data:image/png;base64").is_err());
    assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
}

#[test]
fn to_data_uri_round_trips_through_parse() {
    let uri = to_data_uri("image/png", &[9, 8, 7]);
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(parse_data_uri(&uri).unwrap().bytes, vec![9u8, 8, 7]);
}

#[test]
fn svg_declaration_hints() {
    assert!(AssetSource::path("overlay/terraform.svg").declares_svg());
    assert!(AssetSource::path("x.SVG").declares_svg());
    assert!(!AssetSource::path("x.png").declares_svg());
    assert!(AssetSource::parse("data:image/svg+xml,<svg/>").declares_svg());
    assert!(!AssetSource::bytes(vec![1u8, 2, 3]).declares_svg());
}

#[test]
fn display_summarizes_inline_sources() {
    let s = AssetSource::parse("data:image/png;base64,AAAAAAAA");
    assert_eq!(s.to_string(), "data:image/png;base64,<8 chars>");
    assert_eq!(AssetSource::bytes(vec![0u8; 4]).to_string(), "<4 bytes>");
    assert_eq!(AssetSource::path("a/b.svg").to_string(), "a/b.svg");
}
