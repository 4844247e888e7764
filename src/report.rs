//! 端末向けの結果表示

use std::fmt::Write;

use resume_ai_common::markup::plain_text;
use resume_ai_common::parser::{
    parse_interview_questions, split_strengths_weaknesses, Extraction, NO_QUESTIONS,
};
use resume_ai_common::{build_cards, Candidate, Project};

pub fn project_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "プロジェクトがありません。`resume-ai projects create` で作成してください。\n".into();
    }
    let mut out = String::new();
    for project in projects {
        let _ = writeln!(
            out,
            "{:<24} {} ({}件)",
            project.id,
            project.title,
            project.resumes.len()
        );
        if let Some(description) = project.description() {
            let _ = writeln!(out, "{:<24} {}", "", first_line(description));
        }
    }
    out
}

/// スコア順の候補者一覧
pub fn candidate_ranking(candidates: &[Candidate], in_project: bool) -> String {
    if candidates.is_empty() {
        return "候補者がいません。\n".into();
    }
    let mut out = String::new();
    for (rank, card) in build_cards(candidates, in_project).iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<28} {:>5}  [{}]",
            rank + 1,
            card.name,
            card.score_label,
            card.tier.label()
        );
        let _ = writeln!(out, "    {} / {} / {}", card.email, card.phone, card.filename);
        if !card.skills.is_empty() {
            let _ = writeln!(out, "    スキル: {}", card.skills.join(", "));
        }
        if card.deletable {
            let _ = writeln!(out, "    ID: {}", card.id);
        }
    }
    out
}

/// 1件分の詳細
pub fn candidate_detail(candidate: &Candidate) -> String {
    let sections = &candidate.sections;
    let mut out = String::new();

    let _ = writeln!(out, "■ {} ({})", candidate.display_name(), candidate.score_label());
    let _ = writeln!(out, "  Email: {}", candidate.email().unwrap_or("No email provided"));
    let _ = writeln!(out, "  Phone: {}", candidate.phone().unwrap_or("No phone provided"));
    if !candidate.filename.is_empty() {
        let _ = writeln!(out, "  File: {}", candidate.filename);
    }

    let split = split_strengths_weaknesses(sections.strengths_weaknesses.as_deref());
    let _ = writeln!(out, "\n[Strengths]");
    for line in split.strength_lines() {
        let _ = writeln!(out, "  + {}", line);
    }
    let _ = writeln!(out, "[Weaknesses]");
    for line in split.weakness_lines() {
        let _ = writeln!(out, "  - {}", line);
    }

    section(&mut out, "HR Summary", sections.hr_summary.as_deref(), "No summary provided.");
    section(
        &mut out,
        "Justification",
        sections.justification.as_deref(),
        "No justification provided.",
    );
    section(
        &mut out,
        "Recommendation",
        sections.recommendation.as_deref(),
        "No recommendation provided.",
    );

    let _ = writeln!(out, "\n[Interview Questions]");
    match parse_interview_questions(sections.interview_questions.as_deref()) {
        Extraction::Parsed(questions) => {
            for q in questions {
                let _ = write!(out, "  {}. {}", q.number, q.question);
                if let Some(level) = &q.match_level {
                    let _ = write!(out, " [{}]", level.label());
                }
                out.push('\n');
                if let Some(explanation) = q.explanation {
                    let _ = writeln!(out, "     {}", explanation);
                }
            }
        }
        Extraction::Unparsed(raw) => {
            let _ = writeln!(out, "  {}", raw.trim());
        }
        Extraction::Missing => {
            let _ = writeln!(out, "  {}", NO_QUESTIONS);
        }
    }
    out
}

fn section(out: &mut String, title: &str, text: Option<&str>, placeholder: &str) {
    let text = plain_text(text);
    let _ = writeln!(out, "\n[{}]", title);
    let body = if text.is_empty() { placeholder } else { text.as_str() };
    for line in body.lines() {
        let _ = writeln!(out, "  {}", line);
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, name: &str, score: &str) -> Candidate {
        let mut c = Candidate {
            id: id.into(),
            name: Some(name.into()),
            email: Some(format!("{}@example.com", id)),
            filename: format!("{}.pdf", id),
            ..Default::default()
        };
        c.sections.ats_score = Some(score.into());
        c
    }

    #[test]
    fn test_ranking_is_sorted_by_score() {
        let candidates = vec![candidate("a", "Alice", "40"), candidate("b", "Bob", "91")];
        let text = candidate_ranking(&candidates, false);
        let bob = text.find("Bob").unwrap();
        let alice = text.find("Alice").unwrap();
        assert!(bob < alice);
        assert!(text.contains("91%"));
        assert!(text.contains("[High]"));
        // プロジェクト外ではIDを出さない
        assert!(!text.contains("ID: b"));
    }

    #[test]
    fn test_ranking_shows_ids_in_project() {
        let text = candidate_ranking(&[candidate("r9", "Jane", "70")], true);
        assert!(text.contains("ID: r9"));
    }

    #[test]
    fn test_empty_ranking() {
        assert_eq!(candidate_ranking(&[], false), "候補者がいません。\n");
    }

    #[test]
    fn test_detail_uses_placeholders() {
        let text = candidate_detail(&candidate("a", "Alice", "80"));
        assert!(text.contains("■ Alice (80%)"));
        assert!(text.contains("No summary provided."));
        assert!(text.contains(NO_QUESTIONS));
        assert!(text.contains("No phone provided"));
    }

    #[test]
    fn test_detail_lists_questions_and_strengths() {
        let mut c = candidate("a", "Alice", "80");
        c.sections.strengths_weaknesses =
            Some("- **Strength:** Rust- **Weakness:** Public speaking".into());
        c.sections.interview_questions = Some(
            "1. Describe ownership. [Match level: Clear match] Listed on resume. 2. Any Go?".into(),
        );
        c.sections.hr_summary = Some("**Strong** systems background".into());
        c.sections.justification = Some("Shipped two Rust services".into());

        let text = candidate_detail(&c);
        assert!(text.contains("+ Rust"));
        assert!(text.contains("- Public speaking"));
        assert!(text.contains("1. Describe ownership. [Clear match]"));
        assert!(text.contains("2. Any Go?"));
        assert!(text.contains("Strong systems background"));
        assert!(text.contains("[Justification]"));
        assert!(text.contains("Shipped two Rust services"));
    }

    #[test]
    fn test_project_table() {
        let project = Project {
            id: "p1".into(),
            title: "Backend".into(),
            description: Some("Rust services\nsecond line".into()),
            ..Default::default()
        };
        let text = project_table(&[project]);
        assert!(text.contains("Backend (0件)"));
        assert!(text.contains("Rust services"));
        assert!(!text.contains("second line"));
    }
}
