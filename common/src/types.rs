//! 候補者・プロジェクトの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Candidate: AI解析済みの履歴書1件
//! - Sections: AIが生成した各セクション（スコア・要約・面接質問など）
//! - Project: 候補者をまとめる採用プロジェクト

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// AI生成セクション
///
/// バックエンドは数値・文字列・nullを混在させて返すため、
/// 既知のキーはすべて文字列として保持する。未知のキーは `extra` に残す。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub hr_summary: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub strengths_weaknesses: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub interview_questions: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<String>,

    /// hr_score, ats_json など画面で使わないキー
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// AI解析済みの候補者
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,
    pub sender: Option<String>,
    pub subject: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sections: Sections,

    /// uploaded_at, storage_path など
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// 採用プロジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub resumes: Vec<Candidate>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_resumes: Vec<Candidate>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// スコア文字列の先頭整数を取り出す
///
/// `"85"`, `"85%"`, `"85.7"` はいずれも85。先頭が数字でなければNone。
///
/// # Examples
/// ```
/// use resume_ai_common::parse_score;
///
/// assert_eq!(parse_score("92%"), Some(92));
/// assert_eq!(parse_score("N/A"), None);
/// ```
pub fn parse_score(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl Sections {
    /// 数値としてのATSスコア
    pub fn score(&self) -> Option<i64> {
        self.ats_score.as_deref().and_then(parse_score)
    }
}

impl Candidate {
    pub fn score(&self) -> Option<i64> {
        self.sections.score()
    }

    /// 並び替え用スコア（数値でなければ0）
    pub fn sort_score(&self) -> i64 {
        self.score().unwrap_or(0)
    }

    /// カード表示用のスコア（"85%" または "N/A"）
    pub fn score_label(&self) -> String {
        match self.sections.ats_score.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                if raw.ends_with('%') {
                    raw.to_string()
                } else {
                    format!("{}%", raw)
                }
            }
            _ => "N/A".to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or("Unknown Candidate")
    }

    /// 名前がなければファイル名で代用（比較画面・セレクタ用）
    pub fn short_name(&self) -> &str {
        non_empty(self.name.as_deref())
            .or_else(|| non_empty(Some(self.filename.as_str())))
            .unwrap_or("Unknown")
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

impl Project {
    /// 表示対象の候補者一覧（resumesが空ならtop_resumes）
    pub fn active_candidates(&self) -> Vec<Candidate> {
        if self.resumes.is_empty() {
            self.top_resumes.clone()
        } else {
            self.resumes.clone()
        }
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// セレクタ用ラベル: "タイトル (3 resumes)"
    pub fn option_label(&self) -> String {
        format!("{} ({} resumes)", self.title, self.resumes.len())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// 文字列・数値・真偽値をすべて文字列として受け取る
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

/// 明示的なnullをデフォルト値として扱う
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("85"), Some(85));
        assert_eq!(parse_score(" 85% "), Some(85));
        assert_eq!(parse_score("85.7"), Some(85));
        assert_eq!(parse_score("-3"), Some(-3));
        assert_eq!(parse_score("N/A"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("-"), None);
    }

    #[test]
    fn test_candidate_deserialize_numeric_score() {
        let json = r#"{
            "id": "171234567890012",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": null,
            "filename": "jane.pdf",
            "sections": {
                "ats_score": 87,
                "hr_score": 80,
                "hr_summary": "Strong Python background"
            },
            "storage_path": "resumes/jane.pdf"
        }"#;

        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "171234567890012");
        assert_eq!(candidate.sections.ats_score.as_deref(), Some("87"));
        assert_eq!(candidate.score(), Some(87));
        assert_eq!(candidate.phone(), None);
        assert!(candidate.sections.extra.contains_key("hr_score"));
        assert!(candidate.extra.contains_key("storage_path"));
    }

    #[test]
    fn test_candidate_deserialize_minimal() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"filename": "cv.pdf", "sections": null}"#).unwrap();
        assert_eq!(candidate.id, "");
        assert!(!candidate.has_id());
        assert_eq!(candidate.display_name(), "Unknown Candidate");
        assert_eq!(candidate.short_name(), "cv.pdf");
        assert_eq!(candidate.score_label(), "N/A");
        assert_eq!(candidate.sort_score(), 0);
    }

    #[test]
    fn test_candidate_roundtrip_keeps_extra_keys() {
        let json = r#"{"id": 42, "name": "A", "sections": {"ats_score": "70", "ats_json": "[]"}, "uploaded_at": "2025-01-01T00:00:00Z"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "42");

        let out = serde_json::to_string(&candidate).unwrap();
        assert!(out.contains("\"uploaded_at\""));
        assert!(out.contains("\"ats_json\""));

        let back: Candidate = serde_json::from_str(&out).unwrap();
        assert_eq!(back, candidate);
    }

    #[test]
    fn test_score_label() {
        let mut candidate = Candidate::default();
        candidate.sections.ats_score = Some("85".to_string());
        assert_eq!(candidate.score_label(), "85%");

        candidate.sections.ats_score = Some("85%".to_string());
        assert_eq!(candidate.score_label(), "85%");
    }

    #[test]
    fn test_project_active_candidates_fallback() {
        let json = r#"{
            "id": "p1",
            "title": "Backend Hiring",
            "resumes": null,
            "top_resumes": [{"id": "r1", "name": "Top"}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.resumes.is_empty());

        let active = project.active_candidates();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "r1");
        assert_eq!(project.option_label(), "Backend Hiring (0 resumes)");
    }

    #[test]
    fn test_project_prefers_resumes() {
        let project = Project {
            resumes: vec![Candidate { id: "a".into(), ..Default::default() }],
            top_resumes: vec![Candidate { id: "b".into(), ..Default::default() }],
            ..Default::default()
        };
        assert_eq!(project.active_candidates()[0].id, "a");
    }
}
