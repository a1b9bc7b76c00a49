use clap::Parser;
use photo_guide::{analyzer, cli, config, error, scanner, touchup};
use cli::{Cli, Commands};
use config::Config;
use error::{PhotoGuideError, Result};
use tracing::Level;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { path, genre, output, recursive } => {
            let genre = genre.unwrap_or(config.default_genre);

            if path.is_file() {
                let report = analyzer::analyze_file(&path, genre, &config).await?;
                write_json(&report, output.as_deref())?;
                return Ok(());
            }

            let images = scanner::scan_path(&path, recursive, &config.allowed_extensions)?;
            if images.is_empty() {
                return Err(PhotoGuideError::NoImagesFound(path.display().to_string()));
            }
            tracing::info!(count = images.len(), genre = %genre, "analyzing images");

            let outcome = analyzer::analyze_images(&images, genre, &config, output.is_some()).await;
            for failure in &outcome.failures {
                eprintln!("✘ {}: {}", failure.file_name, failure.error);
            }
            write_json(&outcome, output.as_deref())?;

            if output.is_some() {
                println!(
                    "\n✅ 解析完了: {}枚成功 / {}枚失敗",
                    outcome.analyzed.len(),
                    outcome.failures.len()
                );
            }
        }

        Commands::Guide { image, genre } => {
            let genre = genre.unwrap_or(config.default_genre);
            let report = analyzer::analyze_file(&image, genre, &config).await?;
            println!("📷 {}\n", image.display());
            println!("{}", analyzer::render_report(&report));
        }

        Commands::Enhance { image, prompt, genre, style, strength, ai_provider } => {
            let style = touchup::parse_style(&style)?;
            let strength = touchup::validate_strength(strength)?;

            let base_prompt = match prompt {
                Some(prompt) => prompt,
                None => {
                    let genre = genre.unwrap_or(config.default_genre);
                    println!("[1/2] 構図を解析中...");
                    let report = analyzer::analyze_file(&image, genre, &config).await?;
                    println!("✔ 総合スコア: {:.1}\n", report.total_score);
                    report.expert_prompt
                }
            };

            println!("[2/2] {} にレタッチ提案を依頼中...", ai_provider.command_name());
            let request = touchup::TouchupRequest {
                image,
                base_prompt,
                style,
                strength,
                provider: ai_provider,
            };
            let suggestions = touchup::request_touchup(&request, &config).await?;
            println!("✔ 完了\n");
            println!("{}", suggestions);
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.gemini_model);
                println!("  最大ファイルサイズ: {} bytes", config.max_upload_size);
                println!("  対応拡張子: {}", config.allowed_extensions.join(", "));
                println!("  解析タイムアウト: {}秒", config.analysis_timeout_seconds);
                println!("  生成タイムアウト: {}秒", config.generation_timeout_seconds);
                println!("  デフォルトジャンル: {}", config.default_genre);
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
