use std::io::Cursor;

use super::*;
use crate::assets::encode::{ExportFormat, encode_rgba8_premul};

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn data_url_loader_decodes_png() {
    let url = encode_rgba8_premul(1, 1, &[10, 20, 30, 255], ExportFormat::Png)
        .unwrap()
        .to_data_url();
    let img = DataUrlLoader.load_url(&url).unwrap();
    assert_eq!(img.pixel(0, 0), Some([10, 20, 30, 255]));
}

#[test]
fn data_url_loader_rejects_plain_paths_and_garbage() {
    assert!(matches!(
        DataUrlLoader.load_url("photo.png"),
        Err(KropperError::Decode(_))
    ));
    assert!(matches!(
        DataUrlLoader.load_url("data:image/png;base64,AAAA"),
        Err(KropperError::Decode(_))
    ));
}

#[test]
fn prepared_sources_bypass_loading() {
    let img = PreparedImage::solid(2, 2, [1, 1, 1, 255]);
    let got = DataUrlLoader.load(&ImageSource::from(img.clone())).unwrap();
    assert_eq!(got, img);
}

#[test]
fn fs_loader_reads_relative_files() {
    let dir = std::env::temp_dir().join(format!("kropper-source-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("photos")).unwrap();
    std::fs::write(dir.join("photos/a.png"), tiny_png()).unwrap();

    let loader = FsImageLoader::new(&dir);
    let img = loader.load_url("photos/a.png").unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(img.pixel(1, 0), Some([0, 0, 255, 255]));

    assert!(loader.load_url("../escape.png").is_err());
    assert!(matches!(
        loader.load_url("photos/missing.png"),
        Err(KropperError::Decode(_))
    ));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn svg_payloads_are_rasterized() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="2"><rect width="3" height="2" fill="#00ff00"/></svg>"##;
    let img = decode_any(svg).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.pixel(1, 1), Some([0, 255, 0, 255]));
}
