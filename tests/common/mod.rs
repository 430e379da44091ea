// 集成测试共用的图片构造工具
#![allow(dead_code)]

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use std::path::{Path, PathBuf};

pub fn write_rgb(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8])
    });
    let path = dir.join(name);
    DynamicImage::ImageRgb8(img)
        .save_with_format(&path, format)
        .expect("failed to write test image");
    path
}

pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, _| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([30, 160, 90, alpha])
    });
    let path = dir.join(name);
    DynamicImage::ImageRgba8(img)
        .save_with_format(&path, ImageFormat::Png)
        .expect("failed to write test image");
    path
}

pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write text file");
    path
}

pub fn read_ico(path: &Path) -> ico::IconDir {
    let file = std::fs::File::open(path).expect("ico output should exist");
    ico::IconDir::read(file).expect("output should be a valid ICO")
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
