use std::time::Duration;

use clap::Parser;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use resume_ai::cli::{Cli, Commands, JobDescriptionArgs, ProjectAction};
use resume_ai::client::{read_resume, ApiClient};
use resume_ai::config::Config;
use resume_ai::error::{ResumeAiError, Result};
use resume_ai::report;
use resume_ai_common::api::{EmailRequest, FetchResumes};
use resume_ai_common::controller::DEFAULT_PROJECT_TITLE;
use resume_ai_common::{sort_by_score, EmailKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Projects { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                ProjectAction::List => {
                    let projects = with_spinner("プロジェクトを取得中...", client.list_projects()).await?;
                    print!("{}", report::project_table(&projects));
                }
                ProjectAction::Create { title, description } => {
                    let title = match title.trim() {
                        "" => DEFAULT_PROJECT_TITLE.to_string(),
                        t => t.to_string(),
                    };
                    let project = client.create_project(title, description).await?;
                    println!("✔ プロジェクトを作成しました: {} ({})", project.title, project.id);
                }
                ProjectAction::Show { id, detail } => {
                    let project = with_spinner("プロジェクトを取得中...", client.get_project(&id)).await?;
                    println!("Project: {}", project.title);
                    println!(
                        "Resumes: {} | Top kept: {}\n",
                        project.resumes.len(),
                        project.top_resumes.len()
                    );
                    let mut candidates = project.active_candidates();
                    sort_by_score(&mut candidates);
                    print!("{}", report::candidate_ranking(&candidates, true));
                    if detail {
                        for candidate in &candidates {
                            println!("\n{}", report::candidate_detail(candidate));
                        }
                    }
                }
                ProjectAction::DeleteResume { project_id, resume_id } => {
                    if !confirm(cli.yes, &format!("履歴書 {} を削除しますか？", resume_id))? {
                        println!("中止しました");
                        return Ok(());
                    }
                    client.delete_resume(&project_id, &resume_id).await?;
                    println!("✔ 削除しました: {}", resume_id);
                }
            }
        }

        Commands::Upload { file, job_description, project, detail } => {
            println!("📄 resume-ai - 履歴書解析\n");
            let job_description = resolve_job_description(&mut config, &job_description)?;
            let resume = read_resume(&file)?;
            println!("- {} ({} bytes)", resume.file_name, resume.bytes.len());

            let client = ApiClient::new(&config)?;
            let mut candidates = with_spinner(
                "AI解析中...",
                client.upload_resume(resume, job_description, project),
            )
            .await?;

            if candidates.is_empty() {
                println!("履歴書を解析できませんでした");
                return Ok(());
            }
            sort_by_score(&mut candidates);
            print!("{}", report::candidate_ranking(&candidates, false));
            if detail {
                for candidate in &candidates {
                    println!("\n{}", report::candidate_detail(candidate));
                }
            }
            println!("\n✅ 解析完了");
        }

        Commands::Gmail { role, job_description, project, days } => {
            println!("📧 resume-ai - Gmail取り込み\n");
            let job_description = resolve_job_description(&mut config, &job_description)?;
            let request = FetchResumes {
                job_description,
                job_role: role,
                days_filter: days.unwrap_or(config.days_filter),
                project_id: project,
            };

            let client = ApiClient::new(&config)?;
            let reply = with_spinner("Gmailから取得・解析中...", client.fetch_resumes(request)).await?;
            if reply.candidates.is_empty() {
                println!(
                    "{}",
                    reply
                        .message
                        .unwrap_or_else(|| "No suitable resumes were found in your Gmail account.".into())
                );
                return Ok(());
            }
            let mut candidates = reply.candidates;
            sort_by_score(&mut candidates);
            print!("{}", report::candidate_ranking(&candidates, false));
            println!("\n✅ {}件を解析しました", candidates.len());
        }

        Commands::Email { project_id, resume_id, kind, job_description } => {
            let kind = EmailKind::from(kind);
            let job_description = resolve_job_description(&mut config, &job_description)?;
            let client = ApiClient::new(&config)?;
            let project = client.get_project(&project_id).await?;
            let candidate = project
                .active_candidates()
                .into_iter()
                .find(|c| c.id == resume_id)
                .ok_or_else(|| ResumeAiError::Input(format!("履歴書が見つかりません: {}", resume_id)))?;
            let email = candidate
                .email()
                .ok_or_else(|| {
                    ResumeAiError::Input(format!("{} のメールアドレスがありません", candidate.display_name()))
                })?
                .to_string();

            let prompt = format!(
                "{} <{}> に{}メールを送信しますか？",
                candidate.display_name(),
                email,
                match kind {
                    EmailKind::Accept => "採用",
                    EmailKind::Reject => "不採用",
                }
            );
            if !confirm(cli.yes, &prompt)? {
                println!("中止しました");
                return Ok(());
            }

            let request = EmailRequest {
                email,
                name: candidate.display_name().to_string(),
                job_description,
                kind,
            };
            let message = with_spinner("送信中...", client.send_email(request)).await?;
            println!("✔ {}", if message.is_empty() { "送信しました" } else { message.as_str() });
        }

        Commands::Chat { message } => {
            let client = ApiClient::new(&config)?;
            match message {
                Some(message) => print_reply(client.chat(message).await),
                None => loop {
                    let line: String = Input::new()
                        .with_prompt("you")
                        .allow_empty(true)
                        .interact_text()?;
                    let line = line.trim();
                    if line.is_empty() || line == "exit" {
                        break;
                    }
                    print_reply(client.chat(line.to_string()).await);
                },
            }
        }

        Commands::Config { set_base_url, set_days, show } => {
            let mut changed = false;
            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                changed = true;
                println!("✔ 接続先を設定しました: {}", config.base_url);
            }
            if let Some(days) = set_days {
                config.set_days_filter(days)?;
                changed = true;
                println!("✔ 取得日数を設定しました: {}日", days);
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  接続先: {}", config.base_url());
                println!("  取得日数: {}日", config.days_filter);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  求人票: {}",
                    if config.job_description.is_some() { "保存済み" } else { "未設定" }
                );
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "resume_ai=debug,resume_ai_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 求人票を決める。指定があれば次回用に保存する
fn resolve_job_description(config: &mut Config, args: &JobDescriptionArgs) -> Result<String> {
    let given = match (&args.text, &args.file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => {
            if !path.is_file() {
                return Err(ResumeAiError::FileNotFound(path.display().to_string()));
            }
            Some(std::fs::read_to_string(path)?)
        }
        (None, None) => None,
    };

    match given {
        Some(text) if !text.trim().is_empty() => {
            if config.job_description.as_deref() != Some(text.as_str()) {
                config.job_description = Some(text.clone());
                if let Err(e) = config.save() {
                    tracing::warn!("Failed to save job description: {}", e);
                }
            }
            Ok(text)
        }
        _ => config
            .job_description
            .clone()
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| {
                ResumeAiError::Input("求人票を --jd または --jd-file で指定してください".into())
            }),
    }
}

fn confirm(skip: bool, prompt: &str) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

async fn with_spinner<T>(message: &str, task: impl std::future::Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = task.await;
    spinner.finish_and_clear();
    result
}

fn print_reply(reply: Result<Option<String>>) {
    match reply {
        Ok(Some(text)) => println!("assistant> {}\n", resume_ai_common::markup::plain_text(text.as_str())),
        Ok(None) => println!("assistant> {}\n", resume_ai_common::chat::CHAT_APOLOGY),
        Err(e) => {
            tracing::warn!("Chat request failed: {}", e);
            println!("assistant> {}\n", resume_ai_common::chat::CHAT_APOLOGY);
        }
    }
}
