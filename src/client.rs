//! バックエンドAPIクライアント
//!
//! リクエストの組み立てとレスポンスの解釈は `resume_ai_common::api` に任せ、
//! ここでは送受信だけを行う。

use std::time::Duration;

use reqwest::multipart::{Form, Part as FormPart};
use reqwest::RequestBuilder;
use resume_ai_common::api::{
    decode, decode_lenient, CandidatesReply, ChatReply, DeleteReply, EmailReply, EmailRequest,
    FetchResumes, Method, Outcome, ProjectList, ProjectReply, ProjectUploadReply, RawResponse,
};
use resume_ai_common::{ApiRequest, Body, Candidate, Part, Project, ResumeFile};

use crate::config::Config;
use crate::error::{ResumeAiError, Result};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 送信してステータスと本文を返す。通信失敗はErr(理由)
    pub async fn execute(&self, request: &ApiRequest) -> Outcome {
        let url = request.url(&self.base_url);
        tracing::debug!("{} {}", request.method().as_str(), url);

        let builder = self.prepare(request, &url).map_err(|e| e.to_string())?;
        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        tracing::debug!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(RawResponse::new(status, body))
    }

    fn prepare(&self, request: &ApiRequest, url: &str) -> Result<RequestBuilder> {
        let builder = match request.method() {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Delete => self.http.delete(url),
        };
        Ok(match request.body()? {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = match part {
                        Part::Text { name, value } => form.text(name, value),
                        Part::File { name, file } => form.part(name, file_part(file)?),
                    };
                }
                builder.multipart(form)
            }
        })
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let outcome = self.execute(&ApiRequest::ListProjects).await;
        Ok(decode::<ProjectList>(&outcome)?.projects)
    }

    pub async fn create_project(&self, title: String, description: String) -> Result<Project> {
        let outcome = self
            .execute(&ApiRequest::CreateProject { title, description })
            .await;
        decode::<ProjectReply>(&outcome)?
            .project
            .ok_or_else(|| ResumeAiError::Input("作成したプロジェクトが返されませんでした".into()))
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        let outcome = self
            .execute(&ApiRequest::GetProject { id: id.to_string() })
            .await;
        decode::<ProjectReply>(&outcome)?
            .project
            .ok_or_else(|| ResumeAiError::ProjectNotFound(id.to_string()))
    }

    pub async fn delete_resume(&self, project_id: &str, resume_id: &str) -> Result<DeleteReply> {
        let outcome = self
            .execute(&ApiRequest::DeleteResume {
                project_id: project_id.to_string(),
                resume_id: resume_id.to_string(),
            })
            .await;
        let reply: DeleteReply = decode(&outcome)?;
        if !reply.success {
            let message = reply.error.clone().unwrap_or_else(|| "Failed to delete resume.".into());
            return Err(ResumeAiError::Rejected(message));
        }
        Ok(reply)
    }

    /// 1件アップロードして解析結果を返す
    pub async fn upload_resume(
        &self,
        file: ResumeFile,
        job_description: String,
        project_id: Option<String>,
    ) -> Result<Vec<Candidate>> {
        let scoped = project_id.is_some();
        let outcome = self
            .execute(&ApiRequest::UploadResume {
                project_id,
                job_description,
                file,
            })
            .await;
        if scoped {
            let reply: ProjectUploadReply = decode(&outcome)?;
            Ok(reply.candidate.into_iter().collect())
        } else {
            Ok(decode::<CandidatesReply>(&outcome)?.candidates)
        }
    }

    pub async fn fetch_resumes(&self, request: FetchResumes) -> Result<CandidatesReply> {
        let outcome = self.execute(&ApiRequest::FetchResumes(request)).await;
        Ok(decode(&outcome)?)
    }

    /// 合否メール送信。失敗時はサーバーのメッセージをそのまま返す
    pub async fn send_email(&self, request: EmailRequest) -> Result<String> {
        let outcome = self.execute(&ApiRequest::SendEmail(request)).await;
        let reply: EmailReply = decode_lenient(&outcome)?;
        let message = reply.message.unwrap_or_default();
        if reply.success {
            Ok(message)
        } else {
            Err(ResumeAiError::Rejected(message))
        }
    }

    pub async fn chat(&self, message: String) -> Result<Option<String>> {
        let outcome = self.execute(&ApiRequest::Chat { message }).await;
        Ok(decode::<ChatReply>(&outcome)?.response)
    }
}

fn file_part(file: ResumeFile) -> Result<FormPart> {
    Ok(FormPart::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)?)
}

/// パスから履歴書ファイルを読み込む
pub fn read_resume(path: &std::path::Path) -> Result<ResumeFile> {
    if !path.is_file() {
        return Err(ResumeAiError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "resume.pdf".to_string());
    let content_type = match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase) {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some(ext) if ext == "txt" => "text/plain",
        _ => "",
    };
    Ok(ResumeFile::new(file_name, content_type, bytes))
}
