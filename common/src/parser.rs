//! AI生成テキストのパーサー
//!
//! バックエンドのAI要約は自由形式のテキストで返ってくるため、
//! 緩い書式から強み/弱みリストと面接質問を取り出す。
//! どの関数も不正な入力でpanicせず、`Extraction` で結果の種類を返す。

use regex::Regex;

lazy_static::lazy_static! {
    // 先頭または空白の直後にある "1. " 形式の番号
    static ref QUESTION_NUMBER_RE: Regex = Regex::new(r"(?:^|\s)\d+\.\s").unwrap();
    static ref MATCH_LEVEL_RE: Regex = Regex::new(r"\[Match level:\s*([^\]]*)\]").unwrap();
}

pub const STRENGTH_MARKER: &str = "- **Strength:**";
pub const WEAKNESS_MARKER: &str = "- **Weakness:**";

pub const NO_STRENGTHS: &str = "No strengths provided.";
pub const NO_WEAKNESSES: &str = "No weaknesses provided.";
pub const NO_QUESTIONS: &str = "No interview questions provided.";

/// 抽出結果
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    /// 書式どおりに取り出せた
    Parsed(T),
    /// テキストはあるが書式に合わない（生テキストを保持）
    Unparsed(String),
    /// テキスト自体がない
    Missing,
}

impl<T> Extraction<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Extraction::Parsed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }
}

/// 強み/弱みの分割結果
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthsWeaknesses {
    pub strengths: Extraction<Vec<String>>,
    pub weaknesses: Extraction<Vec<String>>,
}

impl StrengthsWeaknesses {
    /// 表示用: 取り出せなければプレースホルダー1行
    pub fn strength_lines(&self) -> Vec<String> {
        lines_or(&self.strengths, NO_STRENGTHS)
    }

    pub fn weakness_lines(&self) -> Vec<String> {
        lines_or(&self.weaknesses, NO_WEAKNESSES)
    }
}

fn lines_or(extraction: &Extraction<Vec<String>>, placeholder: &str) -> Vec<String> {
    match extraction {
        Extraction::Parsed(items) => items.clone(),
        _ => vec![placeholder.to_string()],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Strength,
    Weakness,
}

/// 強み/弱みテキストを分割
///
/// - 強み: 最初の弱みマーカーより前にある各強みマーカーの後ろ
/// - 弱み: 各弱みマーカーの後ろ（次のマーカーまで）
///
/// マーカーが1つもなければ両方 `Unparsed`。
pub fn split_strengths_weaknesses<'a>(text: impl Into<Option<&'a str>>) -> StrengthsWeaknesses {
    let text = match text.into() {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            return StrengthsWeaknesses {
                strengths: Extraction::Missing,
                weaknesses: Extraction::Missing,
            }
        }
    };

    let mut markers: Vec<(usize, usize, Marker)> = text
        .match_indices(STRENGTH_MARKER)
        .map(|(pos, m)| (pos, m.len(), Marker::Strength))
        .chain(
            text.match_indices(WEAKNESS_MARKER)
                .map(|(pos, m)| (pos, m.len(), Marker::Weakness)),
        )
        .collect();

    if markers.is_empty() {
        let raw = text.trim().to_string();
        return StrengthsWeaknesses {
            strengths: Extraction::Unparsed(raw.clone()),
            weaknesses: Extraction::Unparsed(raw),
        };
    }
    markers.sort_by_key(|(pos, _, _)| *pos);

    let first_weakness = markers
        .iter()
        .find(|(_, _, kind)| *kind == Marker::Weakness)
        .map(|(pos, _, _)| *pos)
        .unwrap_or(text.len());

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for (i, (pos, len, kind)) in markers.iter().enumerate() {
        let start = pos + len;
        let end = markers.get(i + 1).map(|(next, _, _)| *next).unwrap_or(text.len());
        let entry = text[start..end].trim();
        if entry.is_empty() {
            continue;
        }
        match kind {
            Marker::Strength if *pos < first_weakness => strengths.push(entry.to_string()),
            Marker::Strength => {}
            Marker::Weakness => weaknesses.push(entry.to_string()),
        }
    }

    StrengthsWeaknesses {
        strengths: non_empty(strengths),
        weaknesses: non_empty(weaknesses),
    }
}

fn non_empty<T>(items: Vec<T>) -> Extraction<Vec<T>> {
    if items.is_empty() {
        Extraction::Missing
    } else {
        Extraction::Parsed(items)
    }
}

/// 面接質問に付く一致度
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchLevel {
    Clear,
    Partial,
    NotEvident,
    Other(String),
}

impl MatchLevel {
    pub fn classify(level: &str) -> Self {
        let lower = level.to_lowercase();
        if lower.contains("clear") {
            MatchLevel::Clear
        } else if lower.contains("partial") {
            MatchLevel::Partial
        } else if lower.contains("not evident") {
            MatchLevel::NotEvident
        } else {
            MatchLevel::Other(level.trim().to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MatchLevel::Clear => "Clear match",
            MatchLevel::Partial => "Partial match",
            MatchLevel::NotEvident => "Not evident",
            MatchLevel::Other(raw) => raw,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MatchLevel::Clear => "bg-green-500",
            MatchLevel::Partial => "bg-yellow-500",
            MatchLevel::NotEvident => "bg-red-500",
            MatchLevel::Other(_) => "bg-gray-400",
        }
    }
}

/// 面接質問1件
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewQuestion {
    /// 入力の番号ではなく出現順（1始まり）
    pub number: usize,
    pub question: String,
    pub match_level: Option<MatchLevel>,
    pub explanation: Option<String>,
}

/// 番号付き面接質問をパース
///
/// `[Match level: ...]` 注記があれば、その前を質問、後ろを説明とする。
/// 注記がなければチャンク全体が質問。番号が1つもなければ `Unparsed`。
/// 最初の番号より前の前置きは質問として扱わない。
pub fn parse_interview_questions<'a>(
    text: impl Into<Option<&'a str>>,
) -> Extraction<Vec<InterviewQuestion>> {
    let text = match text.into() {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Extraction::Missing,
    };

    let starts: Vec<(usize, usize)> = QUESTION_NUMBER_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if starts.is_empty() {
        return Extraction::Unparsed(text.trim().to_string());
    }

    let questions: Vec<InterviewQuestion> = starts
        .iter()
        .enumerate()
        .map(|(i, (_, body_start))| {
            let end = starts.get(i + 1).map(|(next, _)| *next).unwrap_or(text.len());
            &text[*body_start..end]
        })
        .filter(|chunk| !chunk.trim().is_empty())
        .enumerate()
        .map(|(i, chunk)| parse_question_chunk(i + 1, chunk))
        .collect();

    if questions.is_empty() {
        Extraction::Unparsed(text.trim().to_string())
    } else {
        Extraction::Parsed(questions)
    }
}

fn parse_question_chunk(number: usize, chunk: &str) -> InterviewQuestion {
    match MATCH_LEVEL_RE.captures(chunk) {
        Some(caps) => {
            // captures が Some なら 0 番グループは必ず存在する
            let (start, end) = caps
                .get(0)
                .map(|m| (m.start(), m.end()))
                .unwrap_or((chunk.len(), chunk.len()));
            let level = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let explanation = chunk[end..].trim();
            InterviewQuestion {
                number,
                question: chunk[..start].trim().to_string(),
                match_level: (!level.is_empty()).then(|| MatchLevel::classify(level)),
                explanation: (!explanation.is_empty()).then(|| explanation.to_string()),
            }
        }
        None => InterviewQuestion {
            number,
            question: chunk.trim().to_string(),
            match_level: None,
            explanation: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // split_strengths_weaknesses テスト
    // =============================================

    #[test]
    fn test_split_single_pair() {
        let result = split_strengths_weaknesses("- **Strength:** A- **Weakness:** B");
        assert_eq!(result.strengths, Extraction::Parsed(vec!["A".to_string()]));
        assert_eq!(result.weaknesses, Extraction::Parsed(vec!["B".to_string()]));
    }

    #[test]
    fn test_split_multiple_entries() {
        let text = "- **Strength:** Rust experience\n- **Strength:** Led a team of 5\n- **Weakness:** No cloud certs\n- **Weakness:** Short tenure";
        let result = split_strengths_weaknesses(text);
        assert_eq!(
            result.strengths.parsed().unwrap(),
            &vec!["Rust experience".to_string(), "Led a team of 5".to_string()]
        );
        assert_eq!(
            result.weaknesses.parsed().unwrap(),
            &vec!["No cloud certs".to_string(), "Short tenure".to_string()]
        );
    }

    #[test]
    fn test_split_no_markers_gives_placeholder() {
        let result = split_strengths_weaknesses("The candidate is good overall.");
        assert!(matches!(result.strengths, Extraction::Unparsed(_)));
        assert_eq!(result.strength_lines(), vec![NO_STRENGTHS.to_string()]);
        assert_eq!(result.weakness_lines(), vec![NO_WEAKNESSES.to_string()]);
    }

    #[test]
    fn test_split_empty_and_none() {
        let empty = split_strengths_weaknesses("");
        assert_eq!(empty.strengths, Extraction::Missing);
        assert_eq!(empty.weaknesses, Extraction::Missing);

        let none = split_strengths_weaknesses(None::<&str>);
        assert_eq!(none.strength_lines(), vec![NO_STRENGTHS.to_string()]);
    }

    #[test]
    fn test_split_strength_after_weakness_is_ignored() {
        let text = "- **Weakness:** B - **Strength:** late";
        let result = split_strengths_weaknesses(text);
        assert_eq!(result.strengths, Extraction::Missing);
        assert_eq!(result.weaknesses, Extraction::Parsed(vec!["B".to_string()]));
    }

    #[test]
    fn test_split_drops_blank_entries() {
        let result = split_strengths_weaknesses("- **Strength:** - **Strength:** X");
        assert_eq!(result.strengths, Extraction::Parsed(vec!["X".to_string()]));
        assert_eq!(result.weaknesses, Extraction::Missing);
    }

    // =============================================
    // parse_interview_questions テスト
    // =============================================

    #[test]
    fn test_questions_two_in_order() {
        let result = parse_interview_questions("1. What is X? 2. What is Y?");
        let questions = result.parsed().unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[0].question, "What is X?");
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[1].question, "What is Y?");
    }

    #[test]
    fn test_questions_renumbered_with_gaps() {
        let result = parse_interview_questions("3. First?\n7. Second?");
        let questions = result.parsed().unwrap();
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[1].question, "Second?");
    }

    #[test]
    fn test_questions_with_match_level() {
        let text = "1. Describe your Kafka work. [Match level: Clear] Listed on two projects.\n2. Any Kubernetes? [Match level: Not evident]";
        let questions = parse_interview_questions(text).parsed().cloned().unwrap();

        assert_eq!(questions[0].question, "Describe your Kafka work.");
        assert_eq!(questions[0].match_level, Some(MatchLevel::Clear));
        assert_eq!(questions[0].explanation.as_deref(), Some("Listed on two projects."));

        assert_eq!(questions[1].match_level, Some(MatchLevel::NotEvident));
        assert_eq!(questions[1].explanation, None);
    }

    #[test]
    fn test_questions_malformed_annotation_falls_back_to_raw() {
        let text = "1. Tell me about SQL [Match level Partial";
        let questions = parse_interview_questions(text).parsed().cloned().unwrap();
        assert_eq!(questions[0].question, "Tell me about SQL [Match level Partial");
        assert_eq!(questions[0].explanation, None);
    }

    #[test]
    fn test_questions_without_numbers_unparsed() {
        let result = parse_interview_questions("Ask about leadership.");
        assert_eq!(result, Extraction::Unparsed("Ask about leadership.".to_string()));
    }

    #[test]
    fn test_questions_preamble_skipped() {
        let result = parse_interview_questions("Questions:\n1. Why Rust?");
        let questions = result.parsed().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Why Rust?");
    }

    #[test]
    fn test_questions_empty_and_none() {
        assert_eq!(parse_interview_questions(""), Extraction::Missing);
        assert_eq!(parse_interview_questions("   "), Extraction::Missing);
        assert_eq!(parse_interview_questions(None::<&str>), Extraction::Missing);
    }

    #[test]
    fn test_match_level_classify() {
        assert_eq!(MatchLevel::classify("Clear evidence"), MatchLevel::Clear);
        assert_eq!(MatchLevel::classify("partial"), MatchLevel::Partial);
        assert_eq!(MatchLevel::classify("Not evident"), MatchLevel::NotEvident);
        assert_eq!(
            MatchLevel::classify(" Unknown "),
            MatchLevel::Other("Unknown".to_string())
        );
        assert_eq!(MatchLevel::NotEvident.css_class(), "bg-red-500");
    }
}
