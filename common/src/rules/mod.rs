//! 構図ルール解析器
//!
//! 4つの解析器はいずれも同じグレースケール画像を読み取り専用で受け取る純粋関数。
//! 互いに状態を共有しないため、任意の順序・並列で実行できる。

pub mod exposure;
pub mod horizon;
pub mod rule_of_thirds;
pub mod sharpness;

pub use exposure::analyze_exposure;
pub use horizon::analyze_horizon;
pub use rule_of_thirds::analyze_rule_of_thirds;
pub use sharpness::analyze_sharpness;

/// 解析器のエッジ検出閾値（8bitグレースケール）
pub(crate) const CANNY_LOW: f32 = 50.0;
pub(crate) const CANNY_HIGH: f32 = 150.0;

#[cfg(test)]
pub(crate) mod test_images {
    use image::{GrayImage, Luma};

    pub fn flat(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    pub fn checkerboard(width: u32, height: u32, cell: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    /// (0, y_start) から (width, y_end) への境界線より上が明るい空、下が暗い地面
    pub fn horizon_scene(width: u32, height: u32, y_start: i64, y_end: i64) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let boundary = y_start + (y_end - y_start) * x as i64 / width as i64;
            if (y as i64) < boundary {
                Luma([210])
            } else {
                Luma([40])
            }
        })
    }

    /// 明るい背景に (0, y_start) → (width, y_end) の太さ3pxの暗い線
    pub fn drawn_line(width: u32, height: u32, y_start: i64, y_end: i64) -> GrayImage {
        let mut image = flat(width, height, 220);
        for x in 0..width {
            let center = y_start as f64 + (y_end - y_start) as f64 * x as f64 / width as f64;
            let row = center.round() as i64;
            for y in (row - 1)..=(row + 1) {
                if (0..height as i64).contains(&y) {
                    image.put_pixel(x, y as u32, Luma([30]));
                }
            }
        }
        image
    }
}
