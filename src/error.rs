use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoGuideError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`photo-guide config --set-api-key YOUR_KEY` または環境変数 GOOGLE_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない画像形式です: {0}（対応形式: {1}）")]
    UnsupportedFormat(String, String),

    #[error("ファイルサイズが上限を超えています: {path}（{size} bytes > {limit} bytes）")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("解析がタイムアウトしました（{0}秒）")]
    AnalysisTimeout(u64),

    #[error("解析処理が異常終了しました: {0}")]
    AnalysisFailed(String),

    #[error("不正なスタイル: {0}")]
    InvalidStyle(String),

    #[error("強度は0.0〜1.0の範囲で指定してください: {0}")]
    InvalidStrength(f64),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_guide_common::Error),
}

pub type Result<T> = std::result::Result<T, PhotoGuideError>;
