//! ジャンル別重みテーブル
//!
//! portrait / landscape / product の3ジャンルのみ定義。
//! それ以外の値は portrait のテーブルにフォールバックする（エラーにはしない）。

use crate::types::RuleKind;
use serde::{Deserialize, Serialize};

/// 写真ジャンル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Genre {
    #[default]
    Portrait,
    Landscape,
    Product,
}

impl Genre {
    pub const ALL: [Genre; 3] = [Genre::Portrait, Genre::Landscape, Genre::Product];

    /// 文字列からジャンルを解決（未知の値は Portrait）
    pub fn resolve(value: &str) -> Genre {
        match value.trim().to_lowercase().as_str() {
            "portrait" => Genre::Portrait,
            "landscape" => Genre::Landscape,
            "product" => Genre::Product,
            _ => Genre::Portrait,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Portrait => "portrait",
            Genre::Landscape => "landscape",
            Genre::Product => "product",
        }
    }

    /// ジャンルの重みテーブル
    pub fn weights(&self) -> GenreWeights {
        match self {
            Genre::Portrait => GenreWeights {
                rule_of_thirds: 0.35,
                horizon: 0.10,
                exposure: 0.35,
                sharpness: 0.20,
            },
            Genre::Landscape => GenreWeights {
                rule_of_thirds: 0.30,
                horizon: 0.35,
                exposure: 0.25,
                sharpness: 0.10,
            },
            Genre::Product => GenreWeights {
                rule_of_thirds: 0.20,
                horizon: 0.05,
                exposure: 0.35,
                sharpness: 0.40,
            },
        }
    }
}

/// 設定ファイルやJSONでも未知の値は Portrait として読む
impl From<String> for Genre {
    fn from(value: String) -> Self {
        Genre::resolve(&value)
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Genre::resolve(s))
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ルールごとの重み（合計 1.0）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreWeights {
    pub rule_of_thirds: f64,
    pub horizon: f64,
    pub exposure: f64,
    pub sharpness: f64,
}

impl GenreWeights {
    pub fn weight(&self, kind: RuleKind) -> f64 {
        match kind {
            RuleKind::RuleOfThirds => self.rule_of_thirds,
            RuleKind::Horizon => self.horizon,
            RuleKind::Exposure => self.exposure,
            RuleKind::Sharpness => self.sharpness,
        }
    }

    pub fn sum(&self) -> f64 {
        RuleKind::ALL.iter().map(|&k| self.weight(k)).sum()
    }
}
