use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use plate_ai_common::labels::{failure_message, status_label, vehicle_type_label};
use plate_ai_common::{encode_data_url, mime_type_for_extension, Language};
use plate_ai_rust::cli::{Cli, Commands, ExportFormat};
use plate_ai_rust::config::Config;
use plate_ai_rust::error::PlateAiError;
use plate_ai_rust::processor::Processor;
use plate_ai_rust::recognizer::{GeminiClient, Recognizer};
use plate_ai_rust::store::ItemStore;
use plate_ai_rust::{export, intake, scanner};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_records(store: &ItemStore, lang: Language) {
    for record in store.snapshot() {
        let status = status_label(lang, record.status());
        match (record.result(), record.error()) {
            (Some(r), _) => println!(
                "  [{}] {} → {} {} | {} | {} | {} | {}",
                status,
                record.file_name,
                r.plate_number,
                r.letter,
                r.city,
                vehicle_type_label(lang, r.vehicle_type),
                r.country,
                r.confidence_percent(),
            ),
            (None, Some(err)) => println!("  [{}] {} → {}", status, record.file_name, err),
            (None, None) => println!("  [{}] {}", status, record.file_name),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Run { inputs, output, format, lang, recursive, max_concurrent, json } => {
            println!("🚗 plate-ai - ナンバープレート認識\n");

            let lang = lang.unwrap_or(config.language);

            // 1. 画像スキャン
            println!("[1/3] 画像をスキャン中...");
            let images = scanner::scan_inputs(&inputs, recursive)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(PlateAiError::NoImagesFound(
                    inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "),
                )
                .into());
            }

            // 2. AI認識
            println!("[2/3] AI認識中...");
            let recognizer: Arc<dyn Recognizer> = Arc::new(GeminiClient::from_config(&config)?);
            let store = ItemStore::new();
            let processor = Processor::new(store.clone(), recognizer, failure_message(lang))
                .with_max_concurrent(max_concurrent.or(config.max_concurrent));

            let total = images.len() as u64;
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")?
                    .progress_chars("=>-"),
            );

            let mut revisions = store.subscribe();
            let watcher = {
                let store = store.clone();
                let bar = bar.clone();
                tokio::spawn(async move {
                    while revisions.changed().await.is_ok() {
                        let stats = store.stats();
                        bar.set_position((stats.completed + stats.failed) as u64);
                        bar.set_message(format!("成功 {} / 失敗 {}", stats.completed, stats.failed));
                    }
                })
            };

            intake::submit_batch(&processor, images).wait().await;
            watcher.abort();
            bar.finish_and_clear();

            let stats = store.stats();
            print_records(&store, lang);
            println!(
                "\n✔ 認識完了: 合計 {} / 成功 {} / 失敗 {} / 未完了 {}\n",
                stats.total, stats.completed, stats.failed, stats.in_flight
            );

            // 3. エクスポート
            println!("[3/3] エクスポート中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            if let Some(json_path) = json {
                let content = serde_json::to_string_pretty(&store.snapshot())?;
                std::fs::write(&json_path, content)
                    .with_context(|| format!("JSON書き込み失敗: {}", json_path.display()))?;
                println!("✔ JSON出力: {}", json_path.display());
            }

            if format != ExportFormat::None {
                let written = export::export_results(&store, &format, &output_dir, lang)?;
                if let Some(path) = &written.excel {
                    println!("✔ Excel出力: {}", path.display());
                }
                if let Some(path) = &written.archive {
                    println!("✔ ZIP出力: {}", path.display());
                }
                if written.excel.is_none() && written.archive.is_none() {
                    println!("- 認識済みの画像がないため出力をスキップしました");
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Recognize { image } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("画像読み込み失敗: {}", image.display()))?;
            let mime_type = image
                .extension()
                .map(|ext| mime_type_for_extension(&ext.to_string_lossy()))
                .unwrap_or("image/jpeg");

            let client = GeminiClient::from_config(&config)?;
            let result = client
                .recognize(&encode_data_url(&bytes, mime_type))
                .await
                .with_context(|| format!("認識失敗: {}", image.display()))?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Config { set_api_key, set_model, set_language, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.model = model;
                config.save()?;
                println!("✔ モデルを設定しました: {}", config.model);
            }

            if let Some(lang) = set_language {
                config.language = lang;
                config.save()?;
                println!("✔ 言語を設定しました: {}", config.language);
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  言語: {}", config.language);
                println!("  自国: {}", config.home_country);
                match config.max_concurrent {
                    Some(n) => println!("  同時リクエスト上限: {}", n),
                    None => println!("  同時リクエスト上限: 無制限"),
                }
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
