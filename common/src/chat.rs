//! アシスタントチャットの履歴

use crate::markup::format_markdown;

pub const CHAT_APOLOGY: &str = "I'm sorry, I'm unable to connect right now. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChatRole::User => "message user-message",
            ChatRole::Assistant => "message assistant-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn html(&self) -> String {
        format_markdown(self.text.as_str())
    }
}

/// チャットポップアップの状態
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    open: bool,
    pending: usize,
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 応答待ち（スピナー表示）
    pub fn is_waiting(&self) -> bool {
        self.pending > 0
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// 送信するメッセージを追加。空白だけなら None
    pub fn push_user(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_string(),
        });
        self.pending += 1;
        Some(text.to_string())
    }

    pub fn push_reply(&mut self, reply: Option<String>) {
        self.pending = self.pending.saturating_sub(1);
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: reply.unwrap_or_else(|| CHAT_APOLOGY.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_is_not_sent() {
        let mut chat = ChatLog::default();
        assert_eq!(chat.push_user("   "), None);
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn test_reply_and_apology() {
        let mut chat = ChatLog::default();
        assert_eq!(chat.push_user(" hi ").as_deref(), Some("hi"));
        assert!(chat.is_waiting());

        chat.push_reply(Some("**Hello**".into()));
        chat.push_user("again");
        chat.push_reply(None);

        let messages = chat.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].html(), "<strong>Hello</strong>");
        assert_eq!(messages[3].text, CHAT_APOLOGY);
        assert!(!chat.is_waiting());
    }
}
