//! コーチガイド生成
//!
//! 初心者向けの解説文。総合スコア帯の導入文に続けて、
//! 条件を満たしたアドバイスだけを固定順で並べる。

use crate::types::RuleResults;

/// 導入文の後に並ぶアドバイス1件
struct CoachTip {
    applies: fn(&RuleResults) -> bool,
    text: fn(&RuleResults) -> String,
}

/// 評価順 = 表示順
const COACH_TIPS: [CoachTip; 5] = [
    CoachTip { applies: thirds_applies, text: thirds_text },
    CoachTip { applies: horizon_applies, text: horizon_text },
    CoachTip { applies: shadow_applies, text: shadow_text },
    CoachTip { applies: highlight_applies, text: highlight_text },
    CoachTip { applies: sharpness_applies, text: sharpness_text },
];

const FALLBACK_LINE: &str = "Keep up the great work! All the fundamentals are looking good.";

/// 露出アドバイス全体の条件
const EXPOSURE_TIP_SCORE: f64 = 60.0;
/// 黒つぶれ・白飛びアドバイスの条件（%）
const CLIPPING_TIP_PERCENT: f64 = 8.0;

fn thirds_applies(r: &RuleResults) -> bool {
    r.rule_of_thirds.score < 60.0
}

fn thirds_text(_: &RuleResults) -> String {
    "💡 **Rule of Thirds**: Imagine a 3×3 grid on your viewfinder. Try placing your main subject at one of the four intersection points instead of dead center. This creates more dynamic, interesting compositions.".to_string()
}

fn horizon_applies(r: &RuleResults) -> bool {
    r.horizon.score < 80.0 && r.horizon.metadata.has_horizon
}

fn horizon_text(r: &RuleResults) -> String {
    let angle = r.horizon.metadata.angle;
    format!(
        "🌅 **Horizon Level**: Your horizon is tilted {:.1}° to the {}. Use your camera's grid overlay or level feature to keep horizons straight. Tilted horizons can make viewers feel uneasy.",
        angle.abs(),
        if angle > 0.0 { "right" } else { "left" }
    )
}

fn shadow_applies(r: &RuleResults) -> bool {
    r.exposure.score < EXPOSURE_TIP_SCORE && r.exposure.metadata.shadow_clipping > CLIPPING_TIP_PERCENT
}

fn shadow_text(_: &RuleResults) -> String {
    "💡 **Exposure - Shadows**: Your shadows are too dark (clipping). Try increasing exposure or using fill light to reveal more detail in dark areas.".to_string()
}

fn highlight_applies(r: &RuleResults) -> bool {
    r.exposure.score < EXPOSURE_TIP_SCORE
        && r.exposure.metadata.highlight_clipping > CLIPPING_TIP_PERCENT
}

fn highlight_text(_: &RuleResults) -> String {
    "☀️ **Exposure - Highlights**: Your bright areas are overexposed (blown out). Reduce exposure or use exposure compensation to preserve highlight details.".to_string()
}

fn sharpness_applies(r: &RuleResults) -> bool {
    r.sharpness.score < 60.0
}

fn sharpness_text(_: &RuleResults) -> String {
    [
        "🔍 **Sharpness**: Your image appears soft or blurry. Make sure to:",
        "  - Focus carefully on your subject",
        "  - Use a faster shutter speed (1/focal_length minimum)",
        "  - Hold the camera steady or use a tripod",
        "  - Check if your lens is clean",
    ]
    .join("\n")
}

/// 総合スコア帯の導入文
pub fn intro_line(total_score: f64) -> &'static str {
    if total_score >= 85.0 {
        "🎉 Excellent photo! Your composition is very strong."
    } else if total_score >= 70.0 {
        "👍 Good job! Your photo has solid composition with room for minor improvements."
    } else if total_score >= 50.0 {
        "📷 Your photo is on the right track, but there are some areas to improve."
    } else {
        "📚 Let's work on improving your composition. Here are the key areas to focus on:"
    }
}

/// コーチガイドを生成（各ブロックは空行区切り）
pub fn generate_coach_guide(total_score: f64, results: &RuleResults) -> String {
    let tips: Vec<String> = COACH_TIPS
        .iter()
        .filter(|tip| (tip.applies)(results))
        .map(|tip| (tip.text)(results))
        .collect();

    let mut blocks = vec![intro_line(total_score).to_string()];
    if tips.is_empty() {
        blocks.push(FALLBACK_LINE.to_string());
    } else {
        blocks.extend(tips);
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_results;

    #[test]
    fn test_intro_tiers() {
        assert!(intro_line(85.0).starts_with("🎉"));
        assert!(intro_line(84.9).starts_with("👍"));
        assert!(intro_line(70.0).starts_with("👍"));
        assert!(intro_line(50.0).starts_with("📷"));
        assert!(intro_line(49.9).starts_with("📚"));
    }

    #[test]
    fn test_all_good_gets_fallback_line() {
        let results = sample_results();
        let guide = generate_coach_guide(92.0, &results);
        let blocks: Vec<&str> = guide.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], intro_line(92.0));
        assert_eq!(blocks[1], FALLBACK_LINE);
    }

    #[test]
    fn test_tips_follow_fixed_order() {
        let mut results = sample_results();
        results.rule_of_thirds.score = 20.0;
        results.horizon.score = 60.0;
        results.horizon.metadata.has_horizon = true;
        results.horizon.metadata.angle = -4.0;
        results.exposure.score = 40.0;
        results.exposure.metadata.shadow_clipping = 12.0;
        results.exposure.metadata.highlight_clipping = 9.0;
        results.sharpness.score = 10.0;

        let guide = generate_coach_guide(30.0, &results);
        let positions: Vec<usize> = [
            "📚",
            "**Rule of Thirds**",
            "**Horizon Level**",
            "**Exposure - Shadows**",
            "**Exposure - Highlights**",
            "**Sharpness**",
        ]
        .iter()
        .map(|needle| guide.find(needle).expect(needle))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(guide.contains("tilted 4.0° to the left"));
        assert!(!guide.contains(FALLBACK_LINE));
    }

    #[test]
    fn test_horizon_tip_requires_detected_horizon() {
        let mut results = sample_results();
        results.horizon.score = 50.0;
        results.horizon.metadata.has_horizon = false;
        let guide = generate_coach_guide(80.0, &results);
        assert!(!guide.contains("Horizon Level"));
    }

    #[test]
    fn test_horizon_tip_reports_right_tilt() {
        let mut results = sample_results();
        results.horizon.score = 75.0;
        results.horizon.metadata.has_horizon = true;
        results.horizon.metadata.angle = 3.0;
        let guide = generate_coach_guide(80.0, &results);
        assert!(guide.contains("tilted 3.0° to the right"));
    }

    #[test]
    fn test_exposure_tips_gated_by_score() {
        let mut results = sample_results();
        results.exposure.metadata.shadow_clipping = 20.0;
        results.exposure.metadata.highlight_clipping = 20.0;
        results.exposure.score = 60.0;
        let guide = generate_coach_guide(80.0, &results);
        assert!(!guide.contains("Exposure -"));

        results.exposure.score = 59.9;
        let guide = generate_coach_guide(80.0, &results);
        assert!(guide.contains("Exposure - Shadows"));
        assert!(guide.contains("Exposure - Highlights"));
    }

    #[test]
    fn test_highlight_tip_alone() {
        let mut results = sample_results();
        results.exposure.score = 50.0;
        results.exposure.metadata.shadow_clipping = 8.0;
        results.exposure.metadata.highlight_clipping = 8.01;
        let guide = generate_coach_guide(80.0, &results);
        assert!(!guide.contains("Exposure - Shadows"));
        assert!(guide.contains("Exposure - Highlights"));
    }

    #[test]
    fn test_sharpness_tip_lists_checklist() {
        let mut results = sample_results();
        results.sharpness.score = 30.0;
        let guide = generate_coach_guide(80.0, &results);
        assert!(guide.contains("Make sure to:\n  - Focus carefully on your subject"));
    }
}
