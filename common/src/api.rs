//! バックエンドAPIの呼び出し定義
//!
//! ここではリクエストの記述とレスポンスの解釈だけを行う。
//! 実際の送信はブラウザ（fetch）とCLI（reqwest）がそれぞれ担当する。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::modal::EmailKind;
use crate::types::{null_as_default, Candidate, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// アップロードする履歴書ファイル
#[derive(Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = content_type.into();
        Self {
            file_name: file_name.into(),
            content_type: if content_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                content_type
            },
            bytes,
        }
    }
}

impl std::fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// multipartの1パート
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: ResumeFile },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

/// Gmailからの履歴書取得条件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResumes {
    pub job_description: String,
    pub job_role: String,
    pub days_filter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub email: String,
    pub name: String,
    pub job_description: String,
    #[serde(rename = "type")]
    pub kind: EmailKind,
}

/// APIリクエスト
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    ListProjects,
    CreateProject { title: String, description: String },
    GetProject { id: String },
    DeleteResume { project_id: String, resume_id: String },
    /// project_id があればプロジェクトに追加する
    UploadResume {
        project_id: Option<String>,
        job_description: String,
        file: ResumeFile,
    },
    FetchResumes(FetchResumes),
    SendEmail(EmailRequest),
    Chat { message: String },
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        match self {
            ApiRequest::ListProjects | ApiRequest::GetProject { .. } => Method::Get,
            ApiRequest::DeleteResume { .. } => Method::Delete,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ApiRequest::ListProjects | ApiRequest::CreateProject { .. } => "/projects".to_string(),
            ApiRequest::GetProject { id } => format!("/projects/{}", encode_segment(id)),
            ApiRequest::DeleteResume { project_id, resume_id } => format!(
                "/projects/{}/resumes/{}",
                encode_segment(project_id),
                encode_segment(resume_id)
            ),
            ApiRequest::UploadResume { project_id: Some(id), .. } => {
                format!("/projects/{}/upload_resume", encode_segment(id))
            }
            ApiRequest::UploadResume { project_id: None, .. } => "/upload_resume".to_string(),
            ApiRequest::FetchResumes(_) => "/fetch_resumes".to_string(),
            ApiRequest::SendEmail(_) => "/send_email".to_string(),
            ApiRequest::Chat { .. } => "/chat".to_string(),
        }
    }

    pub fn body(&self) -> Result<Body> {
        Ok(match self {
            ApiRequest::ListProjects | ApiRequest::GetProject { .. } | ApiRequest::DeleteResume { .. } => {
                Body::Empty
            }
            ApiRequest::CreateProject { title, description } => {
                Body::Json(json!({ "title": title, "description": description }))
            }
            ApiRequest::UploadResume { job_description, file, .. } => Body::Multipart(vec![
                Part::File {
                    name: "resume".to_string(),
                    file: file.clone(),
                },
                Part::Text {
                    name: "job_description".to_string(),
                    value: job_description.clone(),
                },
            ]),
            ApiRequest::FetchResumes(req) => Body::Json(serde_json::to_value(req)?),
            ApiRequest::SendEmail(req) => Body::Json(serde_json::to_value(req)?),
            ApiRequest::Chat { message } => Body::Json(json!({ "message": message })),
        })
    }

    /// ベースURLと結合した完全なURL（ベースが空なら同一オリジン）
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

/// URLパスの1セグメントをパーセントエンコード
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// 受信したレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 送信結果。Errは通信自体が失敗した理由
pub type Outcome = std::result::Result<RawResponse, String>;

/// エラーボディの `error`、なければ `message`
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// 成功レスポンスを型に変換。非2xxは `Error::Api`
pub fn decode<T: DeserializeOwned>(outcome: &Outcome) -> Result<T> {
    let response = outcome.as_ref().map_err(|reason| Error::Network(reason.clone()))?;
    if !response.is_success() {
        return Err(Error::Api {
            status: response.status,
            message: error_message(&response.body),
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// 4xxでも本文が読めればそれを返す（send_email用）
pub fn decode_lenient<T: DeserializeOwned>(outcome: &Outcome) -> Result<T> {
    let response = outcome.as_ref().map_err(|reason| Error::Network(reason.clone()))?;
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(_) if !response.is_success() => Err(Error::Api {
            status: response.status,
            message: error_message(&response.body),
        }),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectList {
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectReply {
    pub project: Option<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectUploadReply {
    pub candidate: Option<Candidate>,
    pub project: Option<Project>,
}

/// `/upload_resume` と `/fetch_resumes` の応答
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidatesReply {
    #[serde(deserialize_with = "null_as_default")]
    pub candidates: Vec<Candidate>,
    pub message: Option<String>,
    pub project: Option<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteReply {
    pub success: bool,
    pub project: Option<Project>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailReply {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> ResumeFile {
        ResumeFile::new("cv.pdf", "application/pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(ApiRequest::ListProjects.path(), "/projects");
        assert_eq!(ApiRequest::ListProjects.method(), Method::Get);

        let delete = ApiRequest::DeleteResume {
            project_id: "p1".into(),
            resume_id: "r 2".into(),
        };
        assert_eq!(delete.path(), "/projects/p1/resumes/r%202");
        assert_eq!(delete.method(), Method::Delete);
        assert_eq!(delete.body().unwrap(), Body::Empty);
    }

    #[test]
    fn test_path_segment_escapes_slash_and_unicode() {
        assert_eq!(encode_segment("ä b/c"), "%C3%A4%20b%2Fc");
        assert_eq!(encode_segment("abc-123_~."), "abc-123_~.");
        let get = ApiRequest::GetProject { id: "a/b".into() };
        assert_eq!(get.path(), "/projects/a%2Fb");
    }

    #[test]
    fn test_upload_path_scoped_by_project() {
        let global = ApiRequest::UploadResume {
            project_id: None,
            job_description: "JD".into(),
            file: pdf(),
        };
        assert_eq!(global.path(), "/upload_resume");

        let scoped = ApiRequest::UploadResume {
            project_id: Some("p9".into()),
            job_description: "JD".into(),
            file: pdf(),
        };
        assert_eq!(scoped.path(), "/projects/p9/upload_resume");
    }

    #[test]
    fn test_upload_body_multipart_fields() {
        let req = ApiRequest::UploadResume {
            project_id: None,
            job_description: "Rust dev".into(),
            file: pdf(),
        };
        let Body::Multipart(parts) = req.body().unwrap() else {
            panic!("expected multipart");
        };
        assert!(matches!(&parts[0], Part::File { name, file } if name == "resume" && file.file_name == "cv.pdf"));
        assert!(matches!(&parts[1], Part::Text { name, value } if name == "job_description" && value == "Rust dev"));
    }

    #[test]
    fn test_fetch_body_omits_missing_project() {
        let req = ApiRequest::FetchResumes(FetchResumes {
            job_description: "JD".into(),
            job_role: "Backend".into(),
            days_filter: 30,
            project_id: None,
        });
        let Body::Json(value) = req.body().unwrap() else {
            panic!("expected json");
        };
        assert_eq!(value["days_filter"], 30);
        assert!(value.get("project_id").is_none());
    }

    #[test]
    fn test_email_body_uses_type_key() {
        let req = ApiRequest::SendEmail(EmailRequest {
            email: "a@example.com".into(),
            name: "A".into(),
            job_description: "JD".into(),
            kind: EmailKind::Reject,
        });
        let Body::Json(value) = req.body().unwrap() else {
            panic!("expected json");
        };
        assert_eq!(value["type"], "reject");
    }

    #[test]
    fn test_url_joins_base() {
        assert_eq!(ApiRequest::ListProjects.url("http://localhost:5000/"), "http://localhost:5000/projects");
        assert_eq!(ApiRequest::ListProjects.url(""), "/projects");
    }

    #[test]
    fn test_decode_success() {
        let outcome: Outcome = Ok(RawResponse::new(200, r#"{"projects": [{"id": "p1", "title": "T"}]}"#));
        let list: ProjectList = decode(&outcome).unwrap();
        assert_eq!(list.projects.len(), 1);
    }

    #[test]
    fn test_decode_api_error_message() {
        let outcome: Outcome = Ok(RawResponse::new(404, r#"{"error": "Project not found"}"#));
        let err = decode::<ProjectReply>(&outcome).unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Project not found"));

        let fallback: Outcome = Ok(RawResponse::new(500, "<html>oops</html>"));
        let err = decode::<ProjectReply>(&fallback).unwrap_err();
        assert_eq!(err.message_or("A server error occurred."), "A server error occurred.");
    }

    #[test]
    fn test_decode_network_error() {
        let outcome: Outcome = Err("Failed to fetch".into());
        assert!(decode::<ChatReply>(&outcome).unwrap_err().is_network());
    }

    #[test]
    fn test_decode_lenient_reads_4xx_body() {
        let outcome: Outcome = Ok(RawResponse::new(400, r#"{"success": false, "message": "Missing required data."}"#));
        let reply: EmailReply = decode_lenient(&outcome).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("Missing required data."));
    }

    #[test]
    fn test_candidates_reply_message_only() {
        let outcome: Outcome = Ok(RawResponse::new(200, r#"{"message": "No new resumes found."}"#));
        let reply: CandidatesReply = decode(&outcome).unwrap();
        assert!(reply.candidates.is_empty());
        assert_eq!(reply.message.as_deref(), Some("No new resumes found."));
    }
}
