//! レタッチ提案（外部AI CLI連携）
//!
//! エキスパートプロンプトにスタイル・強度を加えて外部AI CLIに渡し、
//! 返ってきた編集提案テキストをそのまま返す。画像そのものは編集しない。

use crate::ai_provider::AiProvider;
use crate::config::{Config, API_KEY_ENV};
use crate::error::{PhotoGuideError, Result};
use crate::loader;
use photo_guide_common::{build_touchup_prompt, TouchupStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// レタッチ依頼の内容
#[derive(Debug, Clone)]
pub struct TouchupRequest {
    pub image: PathBuf,
    /// ベースとなる指示（通常はエキスパートプロンプト）
    pub base_prompt: String,
    pub style: TouchupStyle,
    pub strength: f64,
    pub provider: AiProvider,
}

/// スタイル文字列を検証
pub fn parse_style(value: &str) -> Result<TouchupStyle> {
    value.parse().map_err(PhotoGuideError::InvalidStyle)
}

/// 強度が 0.0〜1.0 に収まっているか検証
pub fn validate_strength(strength: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&strength) {
        Ok(strength)
    } else {
        Err(PhotoGuideError::InvalidStrength(strength))
    }
}

impl TouchupRequest {
    /// AIに渡す完成プロンプト
    pub fn prompt(&self) -> String {
        build_touchup_prompt(&self.base_prompt, self.style, self.strength)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::fs::canonicalize(path)?)
}

/// 外部AI CLIを実行して編集提案を取得
pub async fn request_touchup(request: &TouchupRequest, config: &Config) -> Result<String> {
    validate_strength(request.strength)?;
    loader::validate_file(&request.image, config)?;

    let image = absolute(&request.image)?;
    let prompt = request.prompt();
    let provider = request.provider;
    let args = provider.build_args(&prompt, &image, &config.gemini_model);

    let mut command = Command::new(provider.command_name());
    command.args(&args).kill_on_drop(true);
    if provider.needs_api_key() {
        command.env(API_KEY_ENV, config.get_api_key()?);
    }

    tracing::debug!(
        provider = provider.command_name(),
        prompt_len = prompt.len(),
        "running touch-up request"
    );

    let limit = Duration::from_secs(config.generation_timeout_seconds);
    let output = match tokio::time::timeout(limit, command.output()).await {
        Err(_) => {
            return Err(PhotoGuideError::CliExecution(format!(
                "{} が{}秒以内に応答しませんでした",
                provider.command_name(),
                limit.as_secs()
            )))
        }
        Ok(result) => result.map_err(|e| {
            PhotoGuideError::CliExecution(format!("{} CLI実行エラー: {}", provider.command_name(), e))
        })?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PhotoGuideError::CliExecution(format!(
            "{} failed (code {:?}): {}",
            provider.command_name(),
            output.status.code(),
            stderr.trim()
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).trim().to_string();
    tracing::debug!(response_len = response.len(), "touch-up response received");
    Ok(response)
}
