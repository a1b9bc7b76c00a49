//! 画像処理プリミティブ
//!
//! 構図解析で使う処理を `image` クレート上に実装:
//! - グレースケール変換 / ガウシアンぼかし / ラプラシアン / ヒストグラム
//! - Cannyエッジ検出
//! - 確率的ハフ変換（線分検出）
//!
//! パラメータは解析器側で固定値を渡す。

mod canny;
mod filters;
mod hough;

pub use canny::{canny, EdgeMap};
pub use filters::{gaussian_blur_5x5, histogram, laplacian, to_gray, variance};
pub use hough::{hough_lines_p, HoughParams, LineSegment};

use crate::error::{Error, Result};
use image::DynamicImage;

/// エンコード済みバイト列をデコード（形式は内容から判定）
pub fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| Error::UnreadableImage(e.to_string()))
}

/// reflect-101 境界でインデックスを折り返す（…2 1 | 0 1 2 … n-1 | n-2 …）
pub(crate) fn reflect101(i: i64, n: i64) -> usize {
    if n == 1 {
        return 0;
    }
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}
