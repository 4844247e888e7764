//! 候補者の並び替えとカード表示モデル

use std::cmp::Reverse;

use regex::Regex;

use crate::types::Candidate;

lazy_static::lazy_static! {
    static ref SKILL_PHRASE_RE: Regex = Regex::new(r"[A-Z][a-z]+(\s[A-Z][a-z]+)*").unwrap();
}

pub const MAX_SKILL_TAGS: usize = 7;

/// スコア帯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    /// 80以上: High / 50以上: Medium / それ以外・数値でない: Low
    pub fn from_score(score: Option<i64>) -> Self {
        match score {
            Some(s) if s >= 80 => ScoreTier::High,
            Some(s) if s >= 50 => ScoreTier::Medium,
            _ => ScoreTier::Low,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::High => "match-high",
            ScoreTier::Medium => "match-medium",
            ScoreTier::Low => "match-low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::High => "High",
            ScoreTier::Medium => "Medium",
            ScoreTier::Low => "Low",
        }
    }
}

/// スコア降順に安定ソート（同点は元の順序を保つ）
pub fn sort_by_score(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|c| Reverse(c.sort_score()));
}

/// HR要約から大文字始まりの語句をスキルタグとして抽出
pub fn skill_tags<'a>(summary: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(summary) = summary.into() else {
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::new();
    for m in SKILL_PHRASE_RE.find_iter(summary) {
        let phrase = m.as_str();
        if !tags.iter().any(|t| t == phrase) {
            tags.push(phrase.to_string());
        }
        if tags.len() == MAX_SKILL_TAGS {
            break;
        }
    }
    tags
}

/// 結果グリッドの1枚分
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCard {
    /// 元リスト内の位置（詳細表示で使う）
    pub index: usize,
    /// 描画用のキー（idがなければ位置から生成）
    pub key: String,
    pub id: String,
    pub name: String,
    pub filename: String,
    pub email: String,
    pub phone: String,
    pub score_label: String,
    pub tier: ScoreTier,
    pub skills: Vec<String>,
    pub deletable: bool,
}

impl CandidateCard {
    pub fn from_candidate(index: usize, candidate: &Candidate, in_project: bool) -> Self {
        let key = if candidate.has_id() {
            candidate.id.clone()
        } else {
            format!("idx-{}", index)
        };
        Self {
            index,
            key,
            id: candidate.id.clone(),
            name: candidate.display_name().to_string(),
            filename: candidate.filename.clone(),
            email: candidate.email().unwrap_or("No email provided").to_string(),
            phone: candidate.phone().unwrap_or("No phone provided").to_string(),
            score_label: candidate.score_label(),
            tier: ScoreTier::from_score(candidate.score()),
            skills: skill_tags(candidate.sections.hr_summary.as_deref()),
            deletable: in_project && candidate.has_id(),
        }
    }
}

/// 表示順のカード一覧を組み立てる
///
/// 入力はソート済みでなくてもよい。`index` は入力リスト上の位置を指す。
pub fn build_cards(candidates: &[Candidate], in_project: bool) -> Vec<CandidateCard> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| Reverse(candidates[i].sort_score()));
    order
        .into_iter()
        .map(|i| CandidateCard::from_candidate(i, &candidates[i], in_project))
        .collect()
}

/// 比較セレクタ用ラベル: "Jane (85%)"
pub fn selector_label(candidate: &Candidate) -> String {
    format!("{} ({})", candidate.short_name(), candidate.score_label())
}
