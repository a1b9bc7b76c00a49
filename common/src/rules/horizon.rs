//! 水平線の傾き解析
//!
//! ぼかし → Cannyエッジ → 確率的ハフ変換で水平に近い線分を集め、
//! その角度の中央値を傾きとして評価する。水平線が見つからない写真は減点しない。

use super::{CANNY_HIGH, CANNY_LOW};
use crate::imaging::{canny, gaussian_blur_5x5, hough_lines_p, HoughParams, LineSegment};
use crate::types::{round_to, HorizonMetadata, RuleResult};
use image::GrayImage;
use std::f64::consts::PI;

/// 水平線候補とみなす最大角度（度、この値以上は除外）
const MAX_CANDIDATE_ANGLE: f64 = 30.0;

/// 傾き（絶対値、度）からスコアを算出
pub fn tilt_score(abs_angle: f64) -> f64 {
    if abs_angle <= 1.0 {
        100.0
    } else if abs_angle <= 2.0 {
        100.0 - (abs_angle - 1.0) * 10.0
    } else {
        (90.0 - (abs_angle - 2.0) * 15.0).max(0.0)
    }
}

/// 中央値（偶数個は中央2値の平均）
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn direction(angle: f64) -> &'static str {
    if angle > 0.0 {
        "right"
    } else {
        "left"
    }
}

fn no_horizon() -> RuleResult<HorizonMetadata> {
    RuleResult {
        score: 100.0,
        message: "No clear horizon line detected".to_string(),
        suggestion: "This analysis is most useful for landscape photos".to_string(),
        metadata: HorizonMetadata {
            angle: 0.0,
            has_horizon: false,
            line_count: 0,
        },
    }
}

pub fn analyze_horizon(gray: &GrayImage) -> RuleResult<HorizonMetadata> {
    let width = gray.width();

    let blurred = gaussian_blur_5x5(gray);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);
    let params = HoughParams {
        rho: 1.0,
        theta: PI / 180.0,
        threshold: 80,
        min_line_length: width / 4,
        max_line_gap: 10,
    };
    let lines = hough_lines_p(&edges, &params);
    tracing::debug!(segments = lines.len(), "horizon segments detected");

    evaluate_segments(&lines)
}

/// 検出済み線分から傾きを評価
///
/// ±30°未満の非垂直線分だけを水平線候補とし、その角度の中央値で採点する。
pub fn evaluate_segments(lines: &[LineSegment]) -> RuleResult<HorizonMetadata> {
    let mut angles: Vec<f64> = lines
        .iter()
        .filter_map(|line| line.angle_degrees())
        .filter(|angle| angle.abs() < MAX_CANDIDATE_ANGLE)
        .collect();

    if angles.is_empty() {
        return no_horizon();
    }

    let line_count = angles.len();
    let median_angle = median(&mut angles);
    let abs_angle = median_angle.abs();
    let score = tilt_score(abs_angle);

    let (message, suggestion) = if abs_angle < 1.0 {
        (
            "Horizon is perfectly level".to_string(),
            "Great job keeping the horizon straight",
        )
    } else if abs_angle < 2.0 {
        (
            format!("Horizon is slightly tilted ({:.1}°)", median_angle),
            "Minor adjustment needed - barely noticeable",
        )
    } else if abs_angle < 5.0 {
        (
            format!("Horizon is tilted {:.1}° to the {}", abs_angle, direction(median_angle)),
            "Consider rotating the image to level the horizon",
        )
    } else {
        (
            format!("Horizon is significantly tilted ({:.1}°)", median_angle),
            "Straighten the horizon - this can be distracting to viewers",
        )
    };

    RuleResult {
        score: round_to(score, 1),
        message,
        suggestion: suggestion.to_string(),
        metadata: HorizonMetadata {
            angle: round_to(median_angle, 2),
            has_horizon: true,
            line_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_images::{drawn_line, flat, horizon_scene};

    fn segment(x1: i32, y1: i32, x2: i32, y2: i32) -> LineSegment {
        LineSegment { x1, y1, x2, y2 }
    }

    #[test]
    fn test_flat_image_has_no_horizon() {
        let result = analyze_horizon(&flat(300, 300, 128));
        assert_eq!(result.score, 100.0);
        assert!(!result.metadata.has_horizon);
        assert_eq!(result.message, "No clear horizon line detected");
    }

    #[test]
    fn test_level_line_scores_full() {
        let result = analyze_horizon(&horizon_scene(300, 300, 150, 150));
        assert!(result.metadata.has_horizon);
        assert_eq!(result.metadata.angle, 0.0);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.message, "Horizon is perfectly level");
    }

    #[test]
    fn test_line_from_150_to_156_scores_about_99() {
        let result = evaluate_segments(&[segment(0, 150, 300, 156)]);
        assert!(result.metadata.has_horizon);
        assert_eq!(result.metadata.line_count, 1);
        assert!((result.metadata.angle - 1.1).abs() < 0.2, "angle = {}", result.metadata.angle);
        assert!((result.score - 99.0).abs() <= 0.5, "score = {}", result.score);
        assert_eq!(result.metadata.angle, 1.15);
        assert_eq!(result.score, 98.5);
        assert_eq!(result.message, "Horizon is slightly tilted (1.1°)");
        assert_eq!(result.suggestion, "Minor adjustment needed - barely noticeable");
    }

    #[test]
    fn test_drawn_slight_line_is_detected() {
        // 1°刻みの投票で検出されるため、角度は 1° 付近に量子化される
        let result = analyze_horizon(&drawn_line(300, 300, 150, 156));
        assert!(result.metadata.has_horizon);
        let angle = result.metadata.angle;
        assert!(angle > 0.5 && angle < 1.3, "angle = {}", angle);
        assert!(result.score >= 97.0, "score = {}", result.score);
    }

    #[test]
    fn test_moderate_tilt_names_direction() {
        let right = analyze_horizon(&horizon_scene(300, 300, 150, 166));
        assert!(right.metadata.angle > 2.0 && right.metadata.angle < 5.0, "angle = {}", right.metadata.angle);
        assert!(right.message.starts_with("Horizon is tilted "), "{}", right.message);
        assert!(right.message.ends_with("° to the right"), "{}", right.message);
        assert_eq!(right.suggestion, "Consider rotating the image to level the horizon");
        assert!(right.score > 45.0 && right.score < 90.0);

        let left = analyze_horizon(&horizon_scene(300, 300, 166, 150));
        assert!(left.metadata.angle < -2.0 && left.metadata.angle > -5.0, "angle = {}", left.metadata.angle);
        assert!(left.message.ends_with("° to the left"), "{}", left.message);
    }

    #[test]
    fn test_segment_median_and_candidates() {
        let lines = [
            segment(0, 0, 100, 2),
            segment(0, 0, 0, 100),
            segment(0, 0, 100, 100),
            segment(0, 10, 200, 10),
            segment(0, 50, 100, 53),
        ];
        let result = evaluate_segments(&lines);
        // 垂直と45°は除外、残り3本の中央値は atan(0.02)
        assert_eq!(result.metadata.line_count, 3);
        assert_eq!(result.metadata.angle, 1.15);
        assert_eq!(evaluate_segments(&[]).metadata.line_count, 0);
        assert!(!evaluate_segments(&[segment(5, 0, 5, 90)]).metadata.has_horizon);
    }

    #[test]
    fn test_strong_tilt_direction_and_penalty() {
        // 約 -8.5°（右上がり）
        let result = analyze_horizon(&horizon_scene(300, 300, 180, 135));
        assert!(result.metadata.has_horizon);
        assert!(result.metadata.angle < -5.0, "angle = {}", result.metadata.angle);
        assert!(result.score < 90.0);
        assert!(result.message.starts_with("Horizon is significantly tilted"));
    }

    #[test]
    fn test_steep_lines_are_not_candidates() {
        // 約45°の線のみ
        let result = analyze_horizon(&horizon_scene(300, 300, 0, 300));
        assert!(!result.metadata.has_horizon);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_tilt_score_ladder() {
        assert_eq!(tilt_score(0.0), 100.0);
        assert_eq!(tilt_score(1.0), 100.0);
        assert!((tilt_score(1.1) - 99.0).abs() < 1e-9);
        assert!((tilt_score(2.0) - 90.0).abs() < 1e-9);
        assert!((tilt_score(4.0) - 60.0).abs() < 1e-9);
        assert_eq!(tilt_score(8.0), 0.0);
        assert_eq!(tilt_score(29.0), 0.0);
    }

    #[test]
    fn test_tilt_score_strictly_decreasing_past_one_degree() {
        let mut prev = tilt_score(1.0);
        let mut angle = 1.05;
        while angle < 8.0 {
            let score = tilt_score(angle);
            assert!(score < prev, "angle {}", angle);
            prev = score;
            angle += 0.05;
        }
    }

    #[test]
    fn test_median_is_robust_to_outliers() {
        assert_eq!(median(&mut [1.0, 1.2, 25.0]), 1.2);
        assert_eq!(median(&mut [-2.0, 1.0, 3.0, 100.0]), 2.0);
    }

    #[test]
    fn test_direction_follows_sign() {
        assert_eq!(direction(3.0), "right");
        assert_eq!(direction(-3.0), "left");
    }
}
