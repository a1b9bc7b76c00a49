//! Photo Guide Common Library
//!
//! CLIと共有される構図解析コア:
//! 画像処理プリミティブ、4つの構図ルール、ジャンル別スコアリング、
//! コーチガイドとエキスパートプロンプトの生成

pub mod analyzer;
pub mod coach;
pub mod error;
pub mod genre;
pub mod imaging;
pub mod prompts;
pub mod rules;
pub mod types;

pub use analyzer::{analyze_composition, CompositionAnalyzer};
pub use error::{Error, Result};
pub use genre::{Genre, GenreWeights};
pub use imaging::decode_dynamic;
pub use prompts::{build_touchup_prompt, TouchupStyle};
pub use types::{CompositionReport, RuleKind, RuleScore};
