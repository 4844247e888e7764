//! 簡易Markdown整形
//!
//! AI要約テキストの `**太字**` と行頭 `- ` のリストだけをHTML化する。
//! ネストしたリストやその他のMarkdown記法は扱わない。

use regex::Regex;

lazy_static::lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref LIST_ITEM_RE: Regex = Regex::new(r"(?m)^- (.*)$").unwrap();
    // 最初の<li>から最後の</li>までをまとめて1つの<ul>にする
    static ref LIST_RUN_RE: Regex = Regex::new(r"(?s)(<li>.*</li>)").unwrap();
}

/// テキストをHTML断片に変換
///
/// 空文字・Noneは空文字を返す。入力は先にHTMLエスケープする。
///
/// # Examples
/// ```
/// use resume_ai_common::format_markdown;
///
/// assert_eq!(format_markdown("**Go**"), "<strong>Go</strong>");
/// assert_eq!(format_markdown(None::<&str>), "");
/// ```
pub fn format_markdown<'a>(text: impl Into<Option<&'a str>>) -> String {
    let text = match text.into() {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let escaped = escape_html(text);
    let bolded = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let listed = LIST_ITEM_RE.replace_all(&bolded, "<li>$1</li>");
    let wrapped = LIST_RUN_RE.replace(&listed, "<ul>$1</ul>");
    wrapped.replace('\n', "<br>")
}

/// 端末表示用に太字記号を取り除く
pub fn plain_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(t) => BOLD_RE.replace_all(t, "$1").trim().to_string(),
        None => String::new(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
