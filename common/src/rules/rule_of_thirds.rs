//! 三分割法の解析
//!
//! 3×3グリッドの4交点（パワーポイント）周辺のエッジ密度から、
//! 主要な被写体が交点付近に配置されているかを評価する。

use super::{CANNY_HIGH, CANNY_LOW};
use crate::imaging::canny;
use crate::types::{round_to, RuleResult, ThirdsMetadata};
use image::GrayImage;

/// エッジ密度 → スコアの倍率
const DENSITY_SCALE: f64 = 500.0;

/// 4つのパワーポイント（整数除算）
pub fn power_points(width: u32, height: u32) -> Vec<(u32, u32)> {
    let third_x = width / 3;
    let third_y = height / 3;
    vec![
        (third_x, third_y),
        (2 * third_x, third_y),
        (third_x, 2 * third_y),
        (2 * third_x, 2 * third_y),
    ]
}

/// 平均エッジ密度からスコアを算出（0-100）
pub fn score_from_density(avg_density: f64) -> f64 {
    (avg_density * DENSITY_SCALE).min(100.0)
}

/// スコア帯ごとの定型メッセージ
fn feedback(score: f64) -> (&'static str, &'static str) {
    if score >= 80.0 {
        (
            "Excellent composition following the Rule of Thirds",
            "Your subject placement is well-balanced",
        )
    } else if score >= 60.0 {
        (
            "Good use of Rule of Thirds",
            "Consider positioning key elements closer to power points",
        )
    } else if score >= 40.0 {
        (
            "Moderate alignment with Rule of Thirds",
            "Try moving your subject toward the intersection points",
        )
    } else {
        (
            "Subject is not aligned with Rule of Thirds",
            "Reframe to place your subject at one of the four intersection points",
        )
    }
}

pub fn analyze_rule_of_thirds(gray: &GrayImage) -> RuleResult<ThirdsMetadata> {
    let (width, height) = gray.dimensions();
    let points = power_points(width, height);
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);

    // 画像短辺の10%
    let radius = width.min(height) / 10;

    // 面積0の領域は平均から除外
    let densities: Vec<f64> = points
        .iter()
        .filter_map(|&(px, py)| {
            let (x1, x2) = (px.saturating_sub(radius), (px + radius).min(width));
            let (y1, y2) = (py.saturating_sub(radius), (py + radius).min(height));
            let area = (x2.saturating_sub(x1) as usize) * (y2.saturating_sub(y1) as usize);
            if area == 0 {
                return None;
            }
            Some(edges.count_in(x1, y1, x2, y2) as f64 / area as f64)
        })
        .collect();

    let avg_density = if densities.is_empty() {
        0.0
    } else {
        densities.iter().sum::<f64>() / densities.len() as f64
    };
    let score = score_from_density(avg_density);

    let (message, suggestion) = feedback(score);

    tracing::debug!(avg_density, score, "rule of thirds analyzed");

    RuleResult {
        score: round_to(score, 1),
        message: message.to_string(),
        suggestion: suggestion.to_string(),
        metadata: ThirdsMetadata {
            power_points: points,
            interest_scores: densities.into_iter().map(|d| round_to(d, 3)).collect(),
        },
    }
}
