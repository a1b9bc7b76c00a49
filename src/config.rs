use crate::error::{PhotoGuideError, Result};
use photo_guide_common::Genre;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーを上書きする環境変数
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    /// アップロード可能な最大ファイルサイズ（bytes）
    pub max_upload_size: u64,
    /// 小文字・ドットなし
    pub allowed_extensions: Vec<String>,
    pub analysis_timeout_seconds: u64,
    pub generation_timeout_seconds: u64,
    pub default_genre: Genre,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: "gemini-2.0-flash-exp".into(),
            max_upload_size: 10 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            analysis_timeout_seconds: 5,
            generation_timeout_seconds: 30,
            default_genre: Genre::Portrait,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoGuideError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-guide").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.google_api_key.clone().ok_or(PhotoGuideError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.google_api_key = Some(key);
        self.save()
    }

    /// 拡張子が許可リストに含まれるか（大文字小文字を区別しない）
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.allowed_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}
