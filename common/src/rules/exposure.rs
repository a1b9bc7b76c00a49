//! 露出の解析
//!
//! 輝度ヒストグラムから黒つぶれ・白飛びと明るさの広がり（ダイナミックレンジ）を評価する。

use crate::imaging::histogram;
use crate::types::{round_to, ExposureMetadata, RuleResult};
use image::GrayImage;

/// 黒つぶれとみなすビン [0, 10)
const SHADOW_BINS: std::ops::Range<usize> = 0..10;
/// 白飛びとみなすビン [245, 256)
const HIGHLIGHT_BINS: std::ops::Range<usize> = 245..256;

const SEVERE_CLIP: f64 = 0.15;
const MINOR_CLIP: f64 = 0.08;
const LOW_CONTRAST_RANGE: f64 = 30.0;

/// ヒストグラム統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureStats {
    pub shadow_clip: f64,
    pub highlight_clip: f64,
    pub mean_brightness: f64,
    pub std_brightness: f64,
    /// 0-100
    pub dynamic_range: f64,
}

impl ExposureStats {
    pub fn from_histogram(hist: &[f64; 256]) -> Self {
        let shadow_clip: f64 = hist[SHADOW_BINS].iter().sum();
        let highlight_clip: f64 = hist[HIGHLIGHT_BINS].iter().sum();

        let mean_brightness: f64 = hist.iter().enumerate().map(|(v, p)| v as f64 * p).sum();
        let std_brightness = hist
            .iter()
            .enumerate()
            .map(|(v, p)| p * (v as f64 - mean_brightness).powi(2))
            .sum::<f64>()
            .sqrt();
        let dynamic_range = (std_brightness / 128.0 * 100.0).min(100.0);

        Self {
            shadow_clip,
            highlight_clip,
            mean_brightness,
            std_brightness,
            dynamic_range,
        }
    }

    /// 黒つぶれ・白飛びの減点（各最大30）とレンジ加点（最大20）
    pub fn score(&self) -> f64 {
        let shadow_penalty = (self.shadow_clip * 300.0).min(30.0);
        let highlight_penalty = (self.highlight_clip * 300.0).min(30.0);
        let range_bonus = self.dynamic_range * 0.2;
        (100.0 - shadow_penalty - highlight_penalty + range_bonus).clamp(0.0, 100.0)
    }

    /// 検出された問題の一覧
    pub fn issues(&self) -> Vec<&'static str> {
        let mut issues = Vec::new();

        if self.shadow_clip > SEVERE_CLIP {
            issues.push("significant shadow clipping");
        } else if self.shadow_clip > MINOR_CLIP {
            issues.push("minor shadow clipping");
        }

        if self.highlight_clip > SEVERE_CLIP {
            issues.push("significant highlight clipping");
        } else if self.highlight_clip > MINOR_CLIP {
            issues.push("minor highlight clipping");
        }

        if self.dynamic_range < LOW_CONTRAST_RANGE {
            issues.push("low contrast");
        }

        issues
    }

    fn suggestion_for_issues(&self) -> &'static str {
        let shadow_severe = self.shadow_clip > SEVERE_CLIP;
        let highlight_severe = self.highlight_clip > SEVERE_CLIP;
        match (shadow_severe, highlight_severe) {
            (true, true) => "Reduce contrast or use HDR techniques",
            (true, false) => "Increase exposure or lift shadows",
            (false, true) => "Decrease exposure or recover highlights",
            (false, false) => "Increase contrast to improve visual impact",
        }
    }
}

pub fn analyze_exposure(gray: &GrayImage) -> RuleResult<ExposureMetadata> {
    let stats = ExposureStats::from_histogram(&histogram(gray));
    let score = stats.score();
    let issues = stats.issues();

    let (message, suggestion) = if issues.is_empty() {
        if score >= 90.0 {
            (
                "Excellent exposure with good dynamic range".to_string(),
                "Exposure is well-balanced",
            )
        } else {
            (
                "Good exposure overall".to_string(),
                "Minor adjustments could improve contrast",
            )
        }
    } else {
        (
            format!("Exposure issues detected: {}", issues.join(", ")),
            stats.suggestion_for_issues(),
        )
    };

    tracing::debug!(?stats, score, "exposure analyzed");

    RuleResult {
        score: round_to(score, 1),
        message,
        suggestion: suggestion.to_string(),
        metadata: ExposureMetadata {
            mean_brightness: round_to(stats.mean_brightness, 1),
            dynamic_range: round_to(stats.dynamic_range, 1),
            shadow_clipping: round_to(stats.shadow_clip * 100.0, 2),
            highlight_clipping: round_to(stats.highlight_clip * 100.0, 2),
        },
    }
}
