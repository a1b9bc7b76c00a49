//! プロンプト生成モジュール
//!
//! - generate_expert_prompt: 解析結果から画像編集AI向けの修正指示を生成
//! - build_touchup_prompt: 修正指示にスタイル・強度を加えたレタッチ依頼文を生成

use crate::genre::Genre;
use crate::types::{RuleResults, SharpnessQuality};
use std::fmt;
use std::str::FromStr;

/// 解析結果に応じた修正指示1件
struct Directive {
    applies: fn(&RuleResults) -> bool,
    text: fn(&RuleResults) -> String,
}

/// 評価順 = 出力順（ジャンル固有の指示はこの後に続く）
const DIRECTIVES: [Directive; 6] = [
    Directive { applies: reframe_applies, text: reframe_text },
    Directive { applies: rotate_applies, text: rotate_text },
    Directive { applies: shadows_applies, text: shadows_text },
    Directive { applies: highlights_applies, text: highlights_text },
    Directive { applies: contrast_applies, text: contrast_text },
    Directive { applies: sharpen_applies, text: sharpen_text },
];

/// 黒つぶれ・白飛びの指示を出す閾値（%）
const CLIPPING_PERCENT: f64 = 8.0;

fn reframe_applies(r: &RuleResults) -> bool {
    r.rule_of_thirds.score < 70.0
}

fn reframe_text(_: &RuleResults) -> String {
    "reframe composition to better align with rule of thirds, positioning key subject elements at power points (intersection of grid lines)".to_string()
}

fn rotate_applies(r: &RuleResults) -> bool {
    r.horizon.metadata.has_horizon && r.horizon.metadata.angle.abs() > 1.0
}

fn rotate_text(r: &RuleResults) -> String {
    format!(
        "rotate image {:.1} degrees to level the horizon line",
        -r.horizon.metadata.angle
    )
}

fn shadows_applies(r: &RuleResults) -> bool {
    r.exposure.metadata.shadow_clipping > CLIPPING_PERCENT
}

fn shadows_text(_: &RuleResults) -> String {
    "lift shadows and recover detail in dark areas".to_string()
}

fn highlights_applies(r: &RuleResults) -> bool {
    r.exposure.metadata.highlight_clipping > CLIPPING_PERCENT
}

fn highlights_text(_: &RuleResults) -> String {
    "reduce highlights and recover detail in bright areas".to_string()
}

fn contrast_applies(r: &RuleResults) -> bool {
    r.exposure.metadata.dynamic_range < 40.0
}

fn contrast_text(_: &RuleResults) -> String {
    "increase contrast and dynamic range for more visual impact".to_string()
}

fn sharpen_applies(r: &RuleResults) -> bool {
    r.sharpness.score < 70.0
        && matches!(
            r.sharpness.metadata.quality,
            SharpnessQuality::Poor | SharpnessQuality::Moderate
        )
}

fn sharpen_text(_: &RuleResults) -> String {
    "enhance sharpness and clarity, add micro-contrast to bring out details".to_string()
}

/// ジャンル固有の指示（常に2件）
pub fn genre_directives(genre: Genre) -> [&'static str; 2] {
    match genre {
        Genre::Portrait => [
            "ensure flattering skin tones and natural colors",
            "optimize lighting on face with proper catchlights in eyes",
        ],
        Genre::Landscape => [
            "enhance color saturation and vibrancy while maintaining natural look",
            "improve depth and dimensionality through selective sharpening",
        ],
        Genre::Product => [
            "ensure perfect focus and maximum sharpness on product",
            "create clean, professional lighting with no harsh shadows",
        ],
    }
}

/// 解析結果から修正指示を収集（ルール由来 → ジャンル固有の順）
pub fn collect_directives(results: &RuleResults, genre: Genre) -> Vec<String> {
    DIRECTIVES
        .iter()
        .filter(|d| (d.applies)(results))
        .map(|d| (d.text)(results))
        .chain(genre_directives(genre).iter().map(|s| s.to_string()))
        .collect()
}

/// 修正指示を依頼文に整形
///
/// 指示が空の場合は控えめな全体補正を依頼する定型文を返す。
pub fn render_expert_prompt(genre: Genre, directives: &[String]) -> String {
    if directives.is_empty() {
        return format!(
            "Enhance this {genre} photograph while maintaining its natural character. Subtle improvements to color, tone, and overall polish."
        );
    }

    let list = directives
        .iter()
        .map(|d| format!("- {d}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Improve this {genre} photograph with the following adjustments:\n\n{list}\n\nMaintain natural, photographic quality. Avoid over-processing. Target style: professional {genre} photography."
    )
}

/// エキスパートプロンプトを生成
pub fn generate_expert_prompt(results: &RuleResults, genre: Genre) -> String {
    render_expert_prompt(genre, &collect_directives(results, genre))
}

/// レタッチのスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchupStyle {
    #[default]
    Natural,
    Vivid,
    Dramatic,
}

impl TouchupStyle {
    pub const ALL: [TouchupStyle; 3] = [
        TouchupStyle::Natural,
        TouchupStyle::Vivid,
        TouchupStyle::Dramatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TouchupStyle::Natural => "natural",
            TouchupStyle::Vivid => "vivid",
            TouchupStyle::Dramatic => "dramatic",
        }
    }

    fn modifier(&self) -> &'static str {
        match self {
            TouchupStyle::Natural => "Maintain natural, photographic look with subtle enhancements.",
            TouchupStyle::Vivid => "Enhance colors and contrast for more vibrant, eye-catching result.",
            TouchupStyle::Dramatic => "Apply dramatic lighting and tones for artistic, moody effect.",
        }
    }
}

impl fmt::Display for TouchupStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TouchupStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TouchupStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = TouchupStyle::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown style '{wanted}' (expected one of {})", valid.join(", "))
            })
    }
}

/// 強度ごとの調整量の説明
const STRENGTH_LEVELS: [(f64, &str); 4] = [
    (0.3, "Make very subtle adjustments, barely noticeable changes."),
    (0.5, "Make moderate adjustments, balanced improvements."),
    (0.7, "Make clear improvements while keeping natural feel."),
    (0.9, "Make strong, obvious improvements and corrections."),
];

/// 最も近い強度の説明（同距離なら小さい方）
pub fn strength_description(strength: f64) -> &'static str {
    let mut best = STRENGTH_LEVELS[0];
    for level in &STRENGTH_LEVELS[1..] {
        if (level.0 - strength).abs() < (best.0 - strength).abs() {
            best = *level;
        }
    }
    best.1
}

/// レタッチ依頼文を生成
pub fn build_touchup_prompt(base_prompt: &str, style: TouchupStyle, strength: f64) -> String {
    let style_text = style.modifier();
    let strength_text = strength_description(strength);

    format!(
        r#"You are a professional photo editor. Analyze this image and provide specific, actionable recommendations for improvement.

{base_prompt}

Style preference: {style_text}
Adjustment strength: {strength_text}

Provide a detailed list of specific edits that should be made, including:
- Exact adjustments needed (e.g., "increase exposure by +0.5 EV", "rotate 2° clockwise")
- Color and tone corrections
- Composition improvements
- Any cropping or straightening needed

Be specific and technical in your recommendations."#
    )
}
