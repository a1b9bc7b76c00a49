//! 構図解析のオーケストレーション
//!
//! グレースケール化 → 4ルール解析（並列） → ジャンル重みで総合スコア →
//! コーチガイド・エキスパートプロンプト生成、までを1回の呼び出しで行う。

use crate::coach::generate_coach_guide;
use crate::error::Result;
use crate::genre::{Genre, GenreWeights};
use crate::imaging::to_gray;
use crate::prompts::generate_expert_prompt;
use crate::rules::{analyze_exposure, analyze_horizon, analyze_rule_of_thirds, analyze_sharpness};
use crate::types::{
    round_to, CompositionReport, ImageSize, RawResults, ReportMetadata, RuleKind, RuleResults,
};
use image::{GrayImage, RgbImage};

/// ジャンルを固定した構図解析器
#[derive(Debug, Clone, Copy)]
pub struct CompositionAnalyzer {
    genre: Genre,
    weights: GenreWeights,
}

impl CompositionAnalyzer {
    pub fn new(genre: Genre) -> Self {
        Self {
            genre,
            weights: genre.weights(),
        }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn weights(&self) -> GenreWeights {
        self.weights
    }

    /// 画像を解析してレポートを生成
    ///
    /// 解析そのものは失敗しない。極小画像でも面積0の領域を除外して採点する。
    pub fn analyze(&self, image: &RgbImage) -> Result<CompositionReport> {
        let (width, height) = image.dimensions();

        let gray = to_gray(image);
        let results = run_rules(&gray);
        let total_score = self.total_score(&results);

        tracing::debug!(
            genre = %self.genre,
            width,
            height,
            total_score,
            "composition analyzed"
        );

        let coach_guide = generate_coach_guide(total_score, &results);
        let expert_prompt = generate_expert_prompt(&results, self.genre);

        Ok(CompositionReport {
            total_score,
            genre: self.genre,
            rules: results.to_scores(),
            coach_guide,
            expert_prompt,
            metadata: ReportMetadata {
                image_size: ImageSize { width, height },
                weights: self.weights,
                raw_results: RawResults {
                    rule_of_thirds: results.rule_of_thirds.metadata,
                    horizon: results.horizon.metadata,
                    exposure: results.exposure.metadata,
                    sharpness: results.sharpness.metadata,
                },
            },
        })
    }

    /// 重み付き合計（小数1桁）
    pub fn total_score(&self, results: &RuleResults) -> f64 {
        let total: f64 = RuleKind::ALL
            .iter()
            .map(|&kind| self.weights.weight(kind) * results.score(kind))
            .sum();
        round_to(total, 1)
    }
}

impl Default for CompositionAnalyzer {
    fn default() -> Self {
        Self::new(Genre::default())
    }
}

/// 4ルールを並列に実行
///
/// 各解析器は同じグレースケール画像を共有参照で読むだけなので、
/// 実行順序は結果に影響しない。
fn run_rules(gray: &GrayImage) -> RuleResults {
    let ((rule_of_thirds, horizon), (exposure, sharpness)) = rayon::join(
        || rayon::join(|| analyze_rule_of_thirds(gray), || analyze_horizon(gray)),
        || rayon::join(|| analyze_exposure(gray), || analyze_sharpness(gray)),
    );
    RuleResults {
        rule_of_thirds,
        horizon,
        exposure,
        sharpness,
    }
}

/// ジャンル指定で1枚を解析
pub fn analyze_composition(image: &RgbImage, genre: Genre) -> Result<CompositionReport> {
    CompositionAnalyzer::new(genre).analyze(image)
}
