use super::reflect101;
use image::{GrayImage, Luma, RgbImage};

/// BT.601 輝度でグレースケール化（14bit固定小数点）
pub fn to_gray(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (x, y, p) in rgb.enumerate_pixels() {
        let [r, g, b] = p.0;
        let luma = (r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14;
        gray.put_pixel(x, y, Luma([luma.min(255) as u8]));
    }
    gray
}

/// 5×5 ガウシアンぼかし（分離型 [1,4,6,4,1]/16、reflect-101 境界）
pub fn gaussian_blur_5x5(gray: &GrayImage) -> GrayImage {
    const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return gray.clone();
    }
    let (wi, hi) = (w as i64, h as i64);

    // 横方向（重み合計16）
    let mut horizontal = vec![0u32; (w * h) as usize];
    for y in 0..h {
        for x in 0..wi {
            let sum: u32 = KERNEL
                .iter()
                .enumerate()
                .map(|(k, &weight)| {
                    let sx = reflect101(x + k as i64 - 2, wi) as u32;
                    weight * gray.get_pixel(sx, y).0[0] as u32
                })
                .sum();
            horizontal[(y * w + x as u32) as usize] = sum;
        }
    }

    // 縦方向（合計256で正規化）
    let mut out = GrayImage::new(w, h);
    for y in 0..hi {
        for x in 0..w {
            let sum: u32 = KERNEL
                .iter()
                .enumerate()
                .map(|(k, &weight)| {
                    let sy = reflect101(y + k as i64 - 2, hi) as u32;
                    weight * horizontal[(sy * w + x) as usize]
                })
                .sum();
            out.put_pixel(x, y as u32, Luma([((sum + 128) / 256).min(255) as u8]));
        }
    }
    out
}

/// 4近傍ラプラシアン [0,1,0; 1,-4,1; 0,1,0]（f64、reflect-101 境界）
pub fn laplacian(gray: &GrayImage) -> Vec<f64> {
    let (w, h) = gray.dimensions();
    let (wi, hi) = (w as i64, h as i64);
    let at = |x: i64, y: i64| -> f64 {
        gray.get_pixel(reflect101(x, wi) as u32, reflect101(y, hi) as u32).0[0] as f64
    };

    let mut out = Vec::with_capacity((w * h) as usize);
    for y in 0..hi {
        for x in 0..wi {
            let value = at(x, y - 1) + at(x, y + 1) + at(x - 1, y) + at(x + 1, y) - 4.0 * at(x, y);
            out.push(value);
        }
    }
    out
}

/// 母分散
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// 正規化済み256ビンヒストグラム（合計1.0）
pub fn histogram(gray: &GrayImage) -> [f64; 256] {
    let mut counts = [0u64; 256];
    for p in gray.pixels() {
        counts[p.0[0] as usize] += 1;
    }

    let total: u64 = counts.iter().sum();
    let mut hist = [0.0; 256];
    if total == 0 {
        return hist;
    }
    for (bin, &count) in hist.iter_mut().zip(counts.iter()) {
        *bin = count as f64 / total as f64;
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_to_gray_primaries() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([0, 0, 0]));
        rgb.put_pixel(2, 0, Rgb([128, 128, 128]));
        let gray = to_gray(&rgb);
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 0);
        assert_eq!(gray.get_pixel(2, 0).0[0], 128);
    }

    #[test]
    fn test_to_gray_green_weighs_most() {
        let mut rgb = RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([0, 0, 255]));
        let gray = to_gray(&rgb);
        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
        assert_eq!(gray.get_pixel(1, 0).0[0], 150);
        assert_eq!(gray.get_pixel(2, 0).0[0], 29);
    }

    #[test]
    fn test_blur_keeps_flat_image() {
        let gray = GrayImage::from_pixel(10, 8, Luma([77]));
        let blurred = gaussian_blur_5x5(&gray);
        assert!(blurred.pixels().all(|p| p.0[0] == 77));
    }

    #[test]
    fn test_blur_softens_step() {
        let mut gray = GrayImage::from_pixel(10, 10, Luma([0]));
        for y in 5..10 {
            for x in 0..10 {
                gray.put_pixel(x, y, Luma([200]));
            }
        }
        let blurred = gaussian_blur_5x5(&gray);
        let above = blurred.get_pixel(5, 4).0[0];
        let below = blurred.get_pixel(5, 5).0[0];
        assert!(above > 0 && above < 100);
        assert!(below > 100 && below < 200);
    }

    #[test]
    fn test_laplacian_flat_is_zero() {
        let gray = GrayImage::from_pixel(6, 6, Luma([200]));
        assert!(laplacian(&gray).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_laplacian_single_dot() {
        let mut gray = GrayImage::from_pixel(5, 5, Luma([0]));
        gray.put_pixel(2, 2, Luma([10]));
        let lap = laplacian(&gray);
        assert_eq!(lap[2 * 5 + 2], -40.0);
        assert_eq!(lap[2 * 5 + 1], 10.0);
        assert_eq!(lap[0], 0.0);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
    }

    #[test]
    fn test_histogram_normalized() {
        let mut gray = GrayImage::from_pixel(2, 2, Luma([0]));
        gray.put_pixel(1, 1, Luma([255]));
        let hist = histogram(&gray);
        assert_eq!(hist[0], 0.75);
        assert_eq!(hist[255], 0.25);
        assert!((hist.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
