use clap::Parser;
use inci_scout::{analyzer, cli, config, error, logging, ocr, preprocess, report, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use inci_scout_common::{analyze_with, KeywordDictionary};
use report::{OutputFormat, Report};
use std::io::Read;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init_logger(cli.verbose, &config.log_level);

    match cli.command {
        Commands::Analyze {
            path,
            output,
            format,
            lang,
            batch_size,
            no_preprocess,
            use_cache,
            dictionary,
            recursive,
        } => {
            // JSON表示時は進捗を出さない
            let show = format == OutputFormat::Text;
            if show {
                println!("🧴 inci-scout - 성분표 분석\n");
                println!("[1/3] 이미지 검색 중...");
            }

            let images = scanner::scan_path(&path, recursive)?;
            if images.is_empty() {
                return Err(error::InciScoutError::NoImagesFound(path.display().to_string()));
            }
            if show {
                println!("✔ 이미지 {}장\n", images.len());
            }

            let dictionary = config.load_dictionary(dictionary.as_deref())?;
            let mut ocr = ocr::TesseractOcr::from_config(&config);
            if let Some(lang) = lang {
                ocr = ocr.with_language(lang);
            }

            let options = analyzer::AnalyzeOptions {
                batch_size: batch_size.unwrap_or(config.batch_size),
                preprocess: (!no_preprocess).then(|| preprocess::PreprocessOptions::from(&config)),
                cache_dir: use_cache.then(|| cache_folder_for(&path)),
                temp_root: None,
                show_progress: show,
            };

            if show {
                println!(
                    "[2/3] OCR 및 분석 중... ({} -l {}){}",
                    ocr.command(),
                    ocr.language(),
                    if use_cache { " (캐시 사용)" } else { "" }
                );
            }
            let results = analyzer::analyze_images(&images, &ocr, &dictionary, &options).await?;
            let failed = results.iter().filter(|r| r.is_failed()).count();
            if show {
                println!("✔ 분석 완료 (OCR 실패 {}건)\n", failed);
                println!("[3/3] 결과 출력\n");
            }

            let report = Report::new(results);
            if let Some(output) = &output {
                report.save(output)?;
                if show {
                    println!("✔ 결과 저장: {}\n", output.display());
                }
            }
            print_report(&report, format)?;
        }

        Commands::Text { input, format, dictionary } => {
            let raw_text = if input == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                let path = Path::new(&input);
                if !path.exists() {
                    return Err(error::InciScoutError::FileNotFound(input.clone()));
                }
                std::fs::read_to_string(path)?
            };

            let dictionary = config.load_dictionary(dictionary.as_deref())?;
            let result = analyze_with(&raw_text, &dictionary);
            tracing::debug!(
                ingredients = result.ingredients.len(),
                tags = result.tags.len(),
                warnings = result.warnings.len(),
                "텍스트 분석 완료"
            );

            print_report(&Report::new(vec![result]), format)?;
        }

        Commands::Preprocess { input, output, upscale, threshold } => {
            let mut options = preprocess::PreprocessOptions::from(&config);
            if let Some(upscale) = upscale {
                options.upscale = upscale;
            }
            if let Some(threshold) = threshold {
                options.threshold = threshold;
            }

            let (width, height) = preprocess::preprocess_file(&input, &output, &options)?;
            println!("✔ 전처리 이미지 저장: {} ({}x{})", output.display(), width, height);
        }

        Commands::Dictionary { show, export } => {
            let dictionary = config.load_dictionary(None)?;

            if let Some(path) = export {
                std::fs::write(&path, dictionary.to_json()?)?;
                println!("✔ 사전 저장: {}", path.display());
            }

            if show {
                print_dictionary(&dictionary);
            }
        }

        Commands::Config { set_ocr_command, set_language, show } => {
            let mut config = config;

            if let Some(command) = set_ocr_command {
                config.set_ocr_command(command)?;
                println!("✔ OCR 명령을 설정했습니다");
            }

            if let Some(language) = set_language {
                config.set_language(language)?;
                println!("✔ OCR 언어를 설정했습니다");
            }

            if show {
                println!("설정:");
                println!("  OCR 명령: {}", config.ocr_command());
                println!("  언어: {}", config.language);
                println!("  PSM: {}", config.page_segmentation_mode);
                println!("  확대 배율: {}", config.upscale);
                println!("  이진화 임계값: {}", config.threshold);
                println!("  동시 처리 수: {}", config.batch_size);
                println!("  시간 제한: {}초", config.timeout_seconds);
                println!(
                    "  사전: {}",
                    config
                        .dictionary_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "내장".to_string())
                );
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = analyzer::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&target);
                    println!("캐시 정보:");
                    println!("  경로: {}", cache_path.display());
                    println!("  항목 수: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  크기: {} bytes", meta.len());
                    }
                } else {
                    println!("캐시 파일이 없습니다: {}", cache_path.display());
                }
            }

            if clear {
                match analyzer::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ 캐시를 삭제했습니다: {}", cache_path.display()),
                    Ok(false) => println!("캐시 파일이 없습니다"),
                    Err(e) => println!("캐시 삭제 오류: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// 単体ファイルなら親フォルダ、フォルダならそのもの
fn cache_folder_for(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            for result in &report.results {
                println!("{}", report::render_text(result));
            }
        }
    }
    Ok(())
}

fn print_dictionary(dictionary: &KeywordDictionary) {
    println!("기능 태그:");
    for category in &dictionary.categories {
        println!("  #{} ({}개): {}", category.tag, category.keywords.len(), category.keywords.join(", "));
    }
    println!("주의 성분:");
    for rule in &dictionary.cautions {
        println!("  {} ({}개): {}", rule.label, rule.keywords.len(), rule.keywords.join(", "));
    }
    println!("분할 힌트: {}개", dictionary.split_hints.len());
    println!("유분막 성분 표지: {}", dictionary.occlusive_markers.join(", "));
}
