//! 画像読み込み
//!
//! 拡張子・サイズの検証 → デコード → EXIF向き補正、までを行い
//! 解析器に渡すRGBバッファを作る。

use crate::config::Config;
use crate::error::{PhotoGuideError, Result};
use crate::scanner::exif::{apply_orientation, extract_orientation};
use crate::scanner::extension_of;
use image::RgbImage;
use photo_guide_common::decode_dynamic;
use std::path::Path;

/// 存在・拡張子・サイズを検証し、ファイルサイズを返す
pub fn validate_file(path: &Path, config: &Config) -> Result<u64> {
    if !path.is_file() {
        return Err(PhotoGuideError::FileNotFound(path.display().to_string()));
    }

    let allowed = extension_of(path)
        .map(|ext| config.is_allowed_extension(&ext))
        .unwrap_or(false);
    if !allowed {
        return Err(PhotoGuideError::UnsupportedFormat(
            path.display().to_string(),
            config.allowed_extensions.join(", "),
        ));
    }

    let size = std::fs::metadata(path)?.len();
    if size > config.max_upload_size {
        return Err(PhotoGuideError::FileTooLarge {
            path: path.display().to_string(),
            size,
            limit: config.max_upload_size,
        });
    }

    Ok(size)
}

/// ファイルを検証してバイト列を読み込む
pub fn read_validated(path: &Path, config: &Config) -> Result<Vec<u8>> {
    validate_file(path, config)?;
    Ok(std::fs::read(path)?)
}

/// バイト列をデコードし、EXIFの向きを反映したRGB画像を返す
pub fn decode_oriented(bytes: &[u8]) -> Result<RgbImage> {
    let image = decode_dynamic(bytes)?;
    let image = match extract_orientation(bytes) {
        Some(orientation) => {
            tracing::debug!(orientation, "applying exif orientation");
            apply_orientation(image, orientation)
        }
        None => image,
    };
    Ok(image.to_rgb8())
}

/// ファイルから解析用画像を読み込む
pub fn load_image(path: &Path, config: &Config) -> Result<RgbImage> {
    let bytes = read_validated(path, config)?;
    decode_oriented(&bytes)
}
