use std::io::Cursor;

use super::*;
use crate::assets::source::to_data_uri;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "brandmark_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"><circle cx="8" cy="8" r="8"/></svg>"#;

#[tokio::test]
async fn loads_relative_path_against_root() {
    let root = temp_dir("loader_rel");
    std::fs::create_dir_all(root.join("overlay")).unwrap();
    std::fs::write(root.join("overlay/icon.svg"), SVG).unwrap();

    let loader = AssetLoader::new(&root, AssetLoaderOpts::default());
    let d = loader
        .load(&AssetSource::path("overlay/icon.svg"))
        .await
        .unwrap();
    assert_eq!(d.kind(), "svg");
    assert_eq!(d.size(), (16.0, 16.0));

    std::fs::remove_dir_all(&root).ok();
}

#[tokio::test]
async fn loads_bytes_and_data_uris() {
    let loader = AssetLoader::new(".", AssetLoaderOpts::default());

    let png = png_bytes(5, 7);
    let d = loader.load(&AssetSource::bytes(png.clone())).await.unwrap();
    assert_eq!(d.size(), (5.0, 7.0));

    let uri = to_data_uri("image/png", &png);
    let d = loader.load(&AssetSource::parse(&uri)).await.unwrap();
    assert_eq!(d.size(), (5.0, 7.0));

    let svg_uri = format!("data:image/svg+xml,{SVG}");
    let d = loader.load(&AssetSource::parse(&svg_uri)).await.unwrap();
    assert_eq!(d.kind(), "svg");

    assert_eq!(loader.decode_count(), 3);
}

#[tokio::test]
async fn failures_are_load_errors() {
    let loader = AssetLoader::new(temp_dir("loader_fail"), AssetLoaderOpts::default());

    let missing = loader.load(&AssetSource::path("nope.png")).await.unwrap_err();
    assert!(missing.is_load(), "{missing}");
    assert!(missing.to_string().contains("nope.png"));

    let corrupt = loader
        .load(&AssetSource::bytes(b"\x89PNG\r\n\x1a\ngarbage".to_vec()))
        .await
        .unwrap_err();
    assert!(corrupt.is_load(), "{corrupt}");

    let traversal = loader
        .load(&AssetSource::path("../etc/passwd"))
        .await
        .unwrap_err();
    assert!(traversal.is_load());

    let bad_uri = loader
        .load(&AssetSource::DataUri("data:image/png;base64".to_string()))
        .await
        .unwrap_err();
    assert!(bad_uri.is_load());
    assert_eq!(loader.decode_count(), 0);
}

#[tokio::test]
async fn cache_decodes_path_sources_once() {
    let root = temp_dir("loader_cache");
    std::fs::write(root.join("img.png"), png_bytes(2, 2)).unwrap();

    let loader = AssetLoader::new(&root, AssetLoaderOpts { cache: true });
    let src = AssetSource::path("img.png");
    loader.load(&src).await.unwrap();
    loader.load(&src).await.unwrap();
    loader.load(&AssetSource::path("./img.png")).await.unwrap();
    assert_eq!(loader.decode_count(), 1);

    let uncached = AssetLoader::new(&root, AssetLoaderOpts::default());
    uncached.load(&src).await.unwrap();
    uncached.load(&src).await.unwrap();
    assert_eq!(uncached.decode_count(), 2);

    std::fs::remove_dir_all(&root).ok();
}

#[tokio::test]
async fn cache_never_keeps_failures() {
    let root = temp_dir("loader_cache_fail");
    let loader = AssetLoader::new(&root, AssetLoaderOpts { cache: true });
    let src = AssetSource::path("late.png");

    assert!(loader.load(&src).await.is_err());
    std::fs::write(root.join("late.png"), png_bytes(1, 1)).unwrap();
    assert!(loader.load(&src).await.is_ok());

    std::fs::remove_dir_all(&root).ok();
}

#[tokio::test]
async fn uncached_loads_see_rewritten_files() {
    let root = temp_dir("loader_uncached");
    let path = root.join("upload.png");
    let loader = AssetLoader::new(&root, AssetLoaderOpts { cache: true });
    let src = AssetSource::path(&path);

    std::fs::write(&path, png_bytes(2, 2)).unwrap();
    assert_eq!(loader.load_uncached(&src).await.unwrap().size(), (2.0, 2.0));

    std::fs::write(&path, png_bytes(3, 3)).unwrap();
    assert_eq!(loader.load_uncached(&src).await.unwrap().size(), (3.0, 3.0));

    // nothing was stored by the uncached loads
    assert_eq!(loader.load(&src).await.unwrap().size(), (3.0, 3.0));
    assert_eq!(loader.decode_count(), 3);

    std::fs::remove_dir_all(&root).ok();
}
