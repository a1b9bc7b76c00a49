//! 構図解析結果の型定義
//!
//! CLIとライブラリで共有される型:
//! - RuleResult: 各ルール解析器の出力（スコア・メッセージ・提案・詳細）
//! - RuleResults: 4ルールの結果一式
//! - CompositionReport: 最終出力（総合スコア＋コーチガイド＋エキスパートプロンプト）

use crate::genre::{Genre, GenreWeights};
use serde::{Deserialize, Serialize};

/// 構図ルールの種類（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "Rule of Thirds")]
    RuleOfThirds,
    #[serde(rename = "Horizon Level")]
    Horizon,
    #[serde(rename = "Exposure")]
    Exposure,
    #[serde(rename = "Sharpness")]
    Sharpness,
}

impl RuleKind {
    /// 表示順に並んだ全ルール
    pub const ALL: [RuleKind; 4] = [
        RuleKind::RuleOfThirds,
        RuleKind::Horizon,
        RuleKind::Exposure,
        RuleKind::Sharpness,
    ];

    /// 表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            RuleKind::RuleOfThirds => "Rule of Thirds",
            RuleKind::Horizon => "Horizon Level",
            RuleKind::Exposure => "Exposure",
            RuleKind::Sharpness => "Sharpness",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// 1ルール分の解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult<M> {
    /// 0-100（小数1桁に丸め済み）
    pub score: f64,
    pub message: String,
    pub suggestion: String,
    pub metadata: M,
}

/// 三分割法の詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdsMetadata {
    /// 4つのパワーポイント座標 (x, y)
    pub power_points: Vec<(u32, u32)>,
    /// 各パワーポイント周辺のエッジ密度（小数3桁）。面積0の領域は含まない
    pub interest_scores: Vec<f64>,
}

/// 水平線の詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonMetadata {
    /// 中央値角度（度、小数2桁）。正 = 右下がり
    pub angle: f64,
    pub has_horizon: bool,
    /// ±30°以内に残った候補線分の数
    pub line_count: usize,
}

/// 露出の詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureMetadata {
    pub mean_brightness: f64,
    pub dynamic_range: f64,
    /// 黒つぶれ率（%）
    pub shadow_clipping: f64,
    /// 白飛び率（%）
    pub highlight_clipping: f64,
}

/// シャープネス品質ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharpnessQuality {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl SharpnessQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharpnessQuality::Excellent => "excellent",
            SharpnessQuality::Good => "good",
            SharpnessQuality::Moderate => "moderate",
            SharpnessQuality::Poor => "poor",
        }
    }
}

/// シャープネスの詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpnessMetadata {
    pub laplacian_variance: f64,
    pub normalized_variance: f64,
    pub quality: SharpnessQuality,
}

/// 4ルールの解析結果一式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResults {
    pub rule_of_thirds: RuleResult<ThirdsMetadata>,
    pub horizon: RuleResult<HorizonMetadata>,
    pub exposure: RuleResult<ExposureMetadata>,
    pub sharpness: RuleResult<SharpnessMetadata>,
}

impl RuleResults {
    /// ルール種別からスコアを取得
    pub fn score(&self, kind: RuleKind) -> f64 {
        match kind {
            RuleKind::RuleOfThirds => self.rule_of_thirds.score,
            RuleKind::Horizon => self.horizon.score,
            RuleKind::Exposure => self.exposure.score,
            RuleKind::Sharpness => self.sharpness.score,
        }
    }

    /// 表示順のスコア一覧
    pub fn to_scores(&self) -> Vec<RuleScore> {
        RuleKind::ALL
            .iter()
            .map(|&kind| {
                let (message, suggestion) = match kind {
                    RuleKind::RuleOfThirds => (&self.rule_of_thirds.message, &self.rule_of_thirds.suggestion),
                    RuleKind::Horizon => (&self.horizon.message, &self.horizon.suggestion),
                    RuleKind::Exposure => (&self.exposure.message, &self.exposure.suggestion),
                    RuleKind::Sharpness => (&self.sharpness.message, &self.sharpness.suggestion),
                };
                RuleScore {
                    rule: kind,
                    score: self.score(kind),
                    message: message.clone(),
                    suggestion: suggestion.clone(),
                }
            })
            .collect()
    }
}

/// レポートに載せる1ルール分のスコア
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleScore {
    #[serde(rename = "name")]
    pub rule: RuleKind,
    pub score: f64,
    pub message: String,
    pub suggestion: String,
}

/// 画像サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// 各ルールの詳細メタデータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResults {
    pub rule_of_thirds: ThirdsMetadata,
    pub horizon: HorizonMetadata,
    pub exposure: ExposureMetadata,
    pub sharpness: SharpnessMetadata,
}

/// レポートのメタデータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub image_size: ImageSize,
    /// 実際に使用した重みテーブル
    pub weights: GenreWeights,
    pub raw_results: RawResults,
}

/// 構図解析レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionReport {
    pub total_score: f64,
    pub genre: Genre,
    /// 常に [RuleOfThirds, Horizon, Exposure, Sharpness] の4件
    pub rules: Vec<RuleScore>,
    pub coach_guide: String,
    pub expert_prompt: String,
    pub metadata: ReportMetadata,
}

impl CompositionReport {
    /// ルール種別でスコアを検索
    pub fn rule(&self, kind: RuleKind) -> Option<&RuleScore> {
        self.rules.iter().find(|r| r.rule == kind)
    }
}

/// 小数点以下 `digits` 桁に丸める（ちょうど半分は偶数側）
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}
