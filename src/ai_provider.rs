use clap::ValueEnum;
use std::path::Path;

/// レタッチ提案を依頼する外部AI CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum AiProvider {
    #[default]
    Gemini,
    Claude,
    Codex,
}

impl AiProvider {
    pub fn command_name(&self) -> &'static str {
        match self {
            AiProvider::Claude => "claude",
            AiProvider::Codex => "codex",
            AiProvider::Gemini => "gemini",
        }
    }

    /// 画像とプロンプトを渡すためのコマンド引数
    pub fn build_args(&self, prompt: &str, image: &Path, model: &str) -> Vec<String> {
        let image = image.display().to_string().replace('\\', "/");
        match self {
            AiProvider::Claude => vec![
                "-p".into(),
                format!("Read the image file {image} and follow these instructions.\n\n{prompt}"),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec![
                "exec".into(),
                "--image".into(),
                image,
                prompt.to_string(),
            ],
            AiProvider::Gemini => vec![
                "-m".into(),
                model.to_string(),
                "-p".into(),
                format!("@{image}\n\n{prompt}"),
            ],
        }
    }

    /// APIキーを環境変数で渡す必要があるか
    pub fn needs_api_key(&self) -> bool {
        matches!(self, AiProvider::Gemini)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(AiProvider::Claude.command_name(), "claude");
        assert_eq!(AiProvider::Codex.command_name(), "codex");
        assert_eq!(AiProvider::Gemini.command_name(), "gemini");
    }

    #[test]
    fn test_gemini_args_reference_image_and_model() {
        let args = AiProvider::Gemini.build_args("PROMPT", Path::new("/tmp/a.jpg"), "gemini-x");
        assert_eq!(args[0..3], ["-m", "gemini-x", "-p"]);
        assert_eq!(args[3], "@/tmp/a.jpg\n\nPROMPT");
    }

    #[test]
    fn test_claude_args_use_text_output() {
        let args = AiProvider::Claude.build_args("PROMPT", Path::new("/tmp/a.jpg"), "unused");
        assert_eq!(args[0], "-p");
        assert!(args[1].contains("/tmp/a.jpg"));
        assert!(args[1].ends_with("PROMPT"));
        assert_eq!(args[2..], ["--output-format", "text"]);
    }

    #[test]
    fn test_codex_args_attach_image() {
        let args = AiProvider::Codex.build_args("PROMPT", Path::new("/tmp/a.jpg"), "unused");
        assert_eq!(args, vec!["exec", "--image", "/tmp/a.jpg", "PROMPT"]);
    }

    #[test]
    fn test_only_gemini_needs_key() {
        assert!(AiProvider::Gemini.needs_api_key());
        assert!(!AiProvider::Claude.needs_api_key());
        assert_eq!(AiProvider::default(), AiProvider::Gemini);
    }
}
