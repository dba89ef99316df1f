//! Resume optimizer: heuristic resume and job description matching tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_optimizer::cli::{self, Cli, Commands, ConfigAction, DocumentKind, JobSource};
use resume_optimizer::config::{Config, OutputFormat};
use resume_optimizer::enhance::{self, ChatCompletionsClient};
use resume_optimizer::error::{Result, ResumeOptimizerError};
use resume_optimizer::input::InputManager;
use resume_optimizer::output::formatter::{save_report_to_file, suggest_filename};
use resume_optimizer::output::render::{self, DocumentRenderer, ResumeContent, TemplateId};
use resume_optimizer::output::report::{AnalysisReport, ReportMetadata};
use resume_optimizer::output::ReportGenerator;
use resume_optimizer::processing::facts::Facts;
use resume_optimizer::processing::{MatchScorer, SuggestionEngine, TextAnalyzer};
use resume_optimizer::scraper::JobScraper;
use std::fmt::Display;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Load configuration
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

/// Progress output on stdout. Silent when stdout carries a machine-readable
/// report, so JSON or Markdown can be piped cleanly.
struct Progress {
    enabled: bool,
}

impl Progress {
    fn line(&self, message: impl Display) {
        if self.enabled {
            println!("{}", message);
        } else {
            info!("{}", message);
        }
    }

    async fn spin<F: Future>(&self, message: &str, work: F) -> F::Output {
        let pb = if self.enabled {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());

        let output = work.await;
        pb.finish_and_clear();
        output
    }
}

fn invalid_input(message: String) -> ResumeOptimizerError {
    ResumeOptimizerError::InvalidInput(message)
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            enhance: use_ai,
            render,
            template,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"]).map_err(invalid_input)?;
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(invalid_input)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let progress = Progress {
                enabled: format == OutputFormat::Console || save.is_some(),
            };
            let started = Instant::now();

            progress.line("🚀 Starting resume analysis");
            progress.line(format!("📄 Resume: {}", resume.display()));
            progress.line(format!("💼 Job Description: {}", job.describe()));
            progress.line(format!("🔧 Output Format: {:?}", format));

            let provider = if use_ai || config.enhancement.enabled {
                match ChatCompletionsClient::from_config(&config.enhancement) {
                    Ok(client) => {
                        progress.line(format!("🤖 AI enhancement: {}", config.enhancement.model));
                        Some(client)
                    }
                    Err(e) => {
                        warn!("AI enhancement disabled: {}", e);
                        None
                    }
                }
            } else {
                None
            };

            let mut input_manager = InputManager::from_config(&config.input);
            let resume_text = progress
                .spin("Extracting resume text...", input_manager.extract_resume(&resume))
                .await?;
            let job_text = load_job_text(&job, &mut input_manager, &config, provider.as_ref(), &progress).await?;
            progress.line(format!(
                "📊 Extracted {} resume and {} job description characters",
                resume_text.chars().count(),
                job_text.chars().count()
            ));

            let analyzer = TextAnalyzer::new()?;
            let resume_facts = analyzer.analyze_resume(&resume_text)?;
            let job_facts = analyzer.analyze_job_description(&job_text)?;

            let result = MatchScorer::new(analyzer.shared_catalog()).score(&resume_facts, &job_facts);
            let suggestions = SuggestionEngine::new().suggest(&result, &resume_facts, &job_facts);

            let metadata = ReportMetadata::new(resume.display().to_string(), job.describe());
            let mut report = AnalysisReport::new(metadata, resume_facts, job_facts, result, suggestions);

            if let Some(provider) = &provider {
                let enhancement = progress
                    .spin(
                        "Requesting AI suggestions...",
                        enhance::enhance(provider, &resume_text, &job_text, &report.resume, &report.job),
                    )
                    .await;
                report.apply_enhancement(enhancement);
            }

            let report = report.with_processing_time(started.elapsed().as_millis() as u64);
            write_report(&report, format, save.as_deref(), detailed, &config)?;

            if render {
                let template = TemplateId::resolve(template.as_deref().unwrap_or(&config.output.template));
                let content = ResumeContent::build(
                    &resume_text,
                    &report.resume,
                    &report.match_result,
                    &report.suggestions,
                    report.optimized_content.as_ref(),
                    analyzer.catalog(),
                );

                let renderer = DocumentRenderer::new();
                let output_dir = &config.output.output_dir;
                let document = renderer.render(&content, template, output_dir)?;
                progress.line(format!(
                    "\n📄 Optimized resume ({}) saved to: {}",
                    template.display_name(),
                    document.file_path.display()
                ));

                let alternatives = renderer.render_alternatives(&content, template, output_dir);
                if !alternatives.is_empty() {
                    progress.line("📚 Alternative versions:");
                    for alternative in &alternatives {
                        progress.line(format!(
                            "  • {}: {}",
                            alternative.template.display_name(),
                            alternative.file_path.display()
                        ));
                    }
                }

                if detailed {
                    progress.line(format!("\n📝 Preview:\n{}", document.text_preview));
                }
            }

            progress.line(format!(
                "\n🎯 Analysis complete! Overall match: {:.1}%",
                report.match_result.overall_score
            ));
        }

        Commands::Facts { input, kind, output } => {
            cli::validate_file_extension(&input, &["pdf", "txt", "md"]).map_err(invalid_input)?;
            let format = cli::parse_output_format(&output).map_err(invalid_input)?;

            let mut input_manager = InputManager::from_config(&config.input);
            let text = input_manager.extract_text(&input).await?;

            let analyzer = TextAnalyzer::new()?;
            let facts = match kind {
                DocumentKind::Resume => analyzer.analyze_resume(&text)?,
                DocumentKind::Job => analyzer.analyze_job_description(&text)?,
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&facts)?),
                OutputFormat::Console => print_facts(&facts, kind),
                other => {
                    return Err(invalid_input(format!(
                        "facts supports console or json output, not {:?}",
                        other
                    )))
                }
            }
        }

        Commands::Scrape { url } => {
            let scraper = JobScraper::new(&config.scraper)?;
            let progress = Progress { enabled: true };
            let job = progress.spin("Fetching job posting...", scraper.scrape(&url)).await?;

            println!("💼 {}", job.title);
            println!("🏢 {}", job.company);
            if !job.location.is_empty() {
                println!("📍 {}", job.location);
            }
            println!("🔗 {} ({})", job.url, job.scraped_from);
            println!("\n{}", job.description);
        }

        Commands::Templates => {
            println!("📚 Available Templates\n");
            for template in TemplateId::ALL {
                println!("  • {} ({})", template.display_name(), template.id());
                println!("    {}", template.description());
            }
            println!("\n💡 Use: resume-optimizer analyze --render --template <ID> ...");
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeOptimizerError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Set { key, value }) => {
                if key == "output.template" && TemplateId::from_id(&value).is_none() {
                    return Err(ResumeOptimizerError::Configuration(format!("Unknown template: {}", value)));
                }

                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("🔧 Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

async fn load_job_text(
    job: &JobSource,
    input_manager: &mut InputManager,
    config: &Config,
    provider: Option<&ChatCompletionsClient>,
    progress: &Progress,
) -> Result<String> {
    if let Some(path) = &job.job {
        cli::validate_file_extension(path, &["txt", "md"]).map_err(invalid_input)?;
        return progress
            .spin("Extracting job description...", input_manager.extract_text(path))
            .await;
    }

    if let Some(url) = &job.job_url {
        let scraper = JobScraper::new(&config.scraper)?;
        let scraped = progress.spin("Fetching job posting...", scraper.scrape(url)).await?;
        progress.line(format!("🌐 Scraped '{}' at {}", scraped.title, scraped.company));

        return Ok(match provider {
            Some(provider) => {
                progress
                    .spin(
                        "Cleaning job description...",
                        enhance::refine_job_text(provider, url, scraped.description),
                    )
                    .await
            }
            None => scraped.description,
        });
    }

    job.job_text
        .clone()
        .ok_or_else(|| invalid_input("No job description given".to_string()))
}

fn write_report(
    report: &AnalysisReport,
    format: OutputFormat,
    save: Option<&Path>,
    detailed: bool,
    config: &Config,
) -> Result<()> {
    if format == OutputFormat::Pdf {
        let path: PathBuf = match save {
            Some(path) => path.to_path_buf(),
            None => config
                .output
                .output_dir
                .join(suggest_filename(format, &report.metadata.resume_source, true)),
        };
        let text = ReportGenerator::with_options(false, true).generate_report(report, OutputFormat::Console)?;
        render::write_text_pdf("Resume Analysis Report", &text, &path)?;
        println!("💾 Report saved to: {}", path.display());
        return Ok(());
    }

    let use_colors = config.output.color_output && save.is_none();
    let content = ReportGenerator::with_options(use_colors, detailed).generate_report(report, format)?;

    match save {
        Some(path) => {
            save_report_to_file(&content, path)?;
            println!("💾 Report saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn print_facts(facts: &Facts, kind: DocumentKind) {
    let heading = match kind {
        DocumentKind::Resume => "📄 Resume Facts",
        DocumentKind::Job => "💼 Job Description Facts",
    };
    println!("{}\n", heading);

    println!("🛠️  Technical Skills ({}): {}", facts.technical_skills.len(), join_or_none(&facts.technical_skills));
    println!("🤝 Soft Skills ({}): {}", facts.soft_skills.len(), join_or_none(&facts.soft_skills));
    println!("⏳ Experience: {} years ({})", facts.experience_years, facts.experience_level);
    println!(
        "🎓 Education: {}",
        facts.education_level.map_or("not detected".to_string(), |l| l.to_string())
    );
    println!("🏭 Industry: {}", facts.industry().unwrap_or("not detected"));
    println!("🔤 Keywords: {}", join_or_none(&facts.keywords));

    if let Some(ats) = facts.ats_score {
        println!("🤖 ATS Score: {:.1}%", ats);
    }
    if let Some(quality) = &facts.quality_metrics {
        println!(
            "✍️  Quality: {:.1}% ({} numbers, {} action verbs)",
            quality.overall_quality, quality.numbers_found, quality.action_verbs_found
        );
    }

    let contact = &facts.contact_info;
    if !contact.is_empty() {
        println!("\n📇 Contact:");
        for (label, value) in [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("LinkedIn", &contact.linkedin),
            ("GitHub", &contact.github),
        ] {
            if let Some(value) = value {
                println!("  • {}: {}", label, value);
            }
        }
    }

    if let Some(profile) = &facts.job_profile {
        println!("\n📋 Job Profile:");
        println!("  • Level: {}", profile.job_level);
        println!("  • Experience Required: {} years", profile.experience_required);
        if let Some(education) = profile.education_required {
            println!("  • Education Required: {}", education);
        }
        println!("  • Company Size: {}", profile.company_size);
        println!("  • Remote Friendly: {}", profile.remote_friendly);
        println!("  • Complexity: {:.1}", profile.job_complexity_score);
    }

    println!(
        "\n📊 {} words, {} lines, {} paragraphs",
        facts.text_stats.word_count, facts.text_stats.line_count, facts.text_stats.paragraph_count
    );
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
