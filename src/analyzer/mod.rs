//! 構図解析の実行層
//!
//! - analyze_with_timeout: 1枚の解析を切り離したスレッドで実行し、時間制限をかける
//! - analyze_file: 読み込み〜解析
//! - analyze_images: 複数枚をプログレスバー付きで順に解析

mod report;

pub use report::{render_report, render_score_table};

use crate::config::Config;
use crate::error::{PhotoGuideError, Result};
use crate::loader;
use crate::scanner::ImageInfo;
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use photo_guide_common::{analyze_composition, CompositionReport, Genre};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// 1枚分の解析結果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedImage {
    pub file_name: String,
    pub file_path: String,
    pub report: CompositionReport,
}

/// 解析できなかった画像
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFailure {
    pub file_name: String,
    pub file_path: String,
    pub error: String,
}

/// 一括解析の結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub analyzed: Vec<AnalyzedImage>,
    pub failures: Vec<AnalysisFailure>,
}

/// `job` を切り離したスレッドで実行し、制限時間内に終わらなければ見捨てる
///
/// スレッドは join しないため、ランタイムの終了やプロセスの終了はジョブを待たない。
async fn run_detached<T, F>(job: F, limit: Duration) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::Builder::new()
        .name("photo-guide-analysis".to_string())
        .spawn(move || {
            // 受信側がタイムアウトで破棄済みなら結果は捨てる
            let _ = tx.send(job());
        })?;

    match tokio::time::timeout(limit, rx).await {
        Err(_) => Err(PhotoGuideError::AnalysisTimeout(limit.as_secs())),
        Ok(Err(_)) => Err(PhotoGuideError::AnalysisFailed(
            "解析スレッドが結果を返さずに終了しました".to_string(),
        )),
        Ok(Ok(value)) => Ok(value),
    }
}

/// 制限時間付きで解析する。途中結果は返さない
pub async fn analyze_with_timeout(
    image: RgbImage,
    genre: Genre,
    limit: Duration,
) -> Result<CompositionReport> {
    let report = run_detached(move || analyze_composition(&image, genre), limit).await??;
    Ok(report)
}

/// ファイルを読み込んで解析
pub async fn analyze_file(path: &Path, genre: Genre, config: &Config) -> Result<CompositionReport> {
    let image = loader::load_image(path, config)?;
    let limit = Duration::from_secs(config.analysis_timeout_seconds);
    let report = analyze_with_timeout(image, genre, limit).await?;

    tracing::debug!(
        file = %path.display(),
        total_score = report.total_score,
        "image analyzed"
    );

    Ok(report)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .map(|s| s.progress_chars("█▓▒░  "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

/// 複数画像を順に解析（失敗した画像はスキップして記録）
pub async fn analyze_images(
    images: &[ImageInfo],
    genre: Genre,
    config: &Config,
    show_progress: bool,
) -> BatchOutcome {
    let pb = progress_bar(images.len() as u64, show_progress);
    let mut outcome = BatchOutcome::default();

    for info in images {
        pb.set_message(info.file_name.clone());

        match analyze_file(&info.path, genre, config).await {
            Ok(report) => outcome.analyzed.push(AnalyzedImage {
                file_name: info.file_name.clone(),
                file_path: info.path.display().to_string(),
                report,
            }),
            Err(e) => {
                tracing::warn!(file = %info.path.display(), error = %e, "analysis skipped");
                outcome.failures.push(AnalysisFailure {
                    file_name: info.file_name.clone(),
                    file_path: info.path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    outcome
}
