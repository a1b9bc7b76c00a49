//! シャープネスの解析（ラプラシアン分散）

use crate::imaging::{laplacian, variance};
use crate::types::{round_to, RuleResult, SharpnessMetadata, SharpnessQuality};
use image::GrayImage;

/// 正規化の基準画素数（1MP）
const REFERENCE_PIXELS: f64 = 1_000_000.0;

/// 画素数で正規化した分散からスコアを算出
pub fn variance_score(normalized_variance: f64) -> f64 {
    let v = normalized_variance;
    if v >= 500.0 {
        100.0
    } else if v >= 300.0 {
        80.0 + (v - 300.0) / 200.0 * 20.0
    } else if v >= 100.0 {
        50.0 + (v - 100.0) / 200.0 * 30.0
    } else {
        (v / 100.0 * 50.0).max(0.0)
    }
}

fn quality_of(normalized_variance: f64) -> SharpnessQuality {
    if normalized_variance >= 500.0 {
        SharpnessQuality::Excellent
    } else if normalized_variance >= 300.0 {
        SharpnessQuality::Good
    } else if normalized_variance >= 100.0 {
        SharpnessQuality::Moderate
    } else {
        SharpnessQuality::Poor
    }
}

fn feedback(quality: SharpnessQuality) -> (&'static str, &'static str) {
    match quality {
        SharpnessQuality::Excellent => (
            "Image is very sharp with excellent detail",
            "Sharpness is excellent",
        ),
        SharpnessQuality::Good => ("Image has good sharpness", "Detail level is acceptable"),
        SharpnessQuality::Moderate => (
            "Image sharpness is moderate",
            "Consider using faster shutter speed or better focus",
        ),
        SharpnessQuality::Poor => (
            "Image appears blurry or out of focus",
            "Improve focus or reduce camera shake (use tripod/faster shutter)",
        ),
    }
}

pub fn analyze_sharpness(gray: &GrayImage) -> RuleResult<SharpnessMetadata> {
    let (width, height) = gray.dimensions();
    let raw_variance = variance(&laplacian(gray));

    let pixels = (width as f64) * (height as f64);
    let normalized_variance = if pixels > 0.0 {
        raw_variance * (REFERENCE_PIXELS / pixels)
    } else {
        0.0
    };

    let score = variance_score(normalized_variance);
    let quality = quality_of(normalized_variance);
    let (message, suggestion) = feedback(quality);

    tracing::debug!(raw_variance, normalized_variance, score, "sharpness analyzed");

    RuleResult {
        score: round_to(score, 1),
        message: message.to_string(),
        suggestion: suggestion.to_string(),
        metadata: SharpnessMetadata {
            laplacian_variance: round_to(raw_variance, 2),
            normalized_variance: round_to(normalized_variance, 2),
            quality,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_images::{checkerboard, flat};

    #[test]
    fn test_flat_image_scores_zero() {
        let result = analyze_sharpness(&flat(300, 300, 128));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.metadata.laplacian_variance, 0.0);
        assert_eq!(result.metadata.quality, SharpnessQuality::Poor);
        assert_eq!(result.message, "Image appears blurry or out of focus");
    }

    #[test]
    fn test_high_contrast_texture_is_excellent() {
        let result = analyze_sharpness(&checkerboard(200, 200, 4));
        assert_eq!(result.score, 100.0);
        assert_eq!(result.metadata.quality, SharpnessQuality::Excellent);
    }

    #[test]
    fn test_normalization_to_one_megapixel() {
        // 同じ模様でも画素数が4倍なら正規化分散はほぼ1/4
        let small = analyze_sharpness(&checkerboard(100, 100, 4));
        let large = analyze_sharpness(&checkerboard(200, 200, 4));
        let ratio = small.metadata.normalized_variance / large.metadata.normalized_variance;
        assert!((ratio - 4.0).abs() < 0.5, "ratio = {}", ratio);
    }

    #[test]
    fn test_variance_score_bands() {
        assert_eq!(variance_score(0.0), 0.0);
        assert_eq!(variance_score(50.0), 25.0);
        assert_eq!(variance_score(100.0), 50.0);
        assert_eq!(variance_score(200.0), 65.0);
        assert_eq!(variance_score(300.0), 80.0);
        assert_eq!(variance_score(400.0), 90.0);
        assert_eq!(variance_score(500.0), 100.0);
        assert_eq!(variance_score(10_000.0), 100.0);
    }

    #[test]
    fn test_variance_score_monotonic() {
        let mut prev = -1.0;
        for v in (0..700).map(|i| i as f64) {
            let score = variance_score(v);
            assert!(score >= prev, "v = {}", v);
            prev = score;
        }
    }

    #[test]
    fn test_quality_bands_align_with_score() {
        assert_eq!(quality_of(99.9), SharpnessQuality::Poor);
        assert_eq!(quality_of(100.0), SharpnessQuality::Moderate);
        assert_eq!(quality_of(300.0), SharpnessQuality::Good);
        assert_eq!(quality_of(500.0), SharpnessQuality::Excellent);
    }
}
