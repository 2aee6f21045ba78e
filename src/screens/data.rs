//! Chat and message models plus the sample roster the chats tab starts with.

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub name: String,
    pub last_message: String,
    pub timestamp: String,
    pub online: bool,
    pub unread: u32,
    pub initials: String,
}

impl Chat {
    /// Short seeded history ending with the chat's last message.
    pub fn history(&self) -> Vec<Message> {
        vec![
            Message::mine("Hi, how are you?"),
            Message::theirs("Great!"),
            Message::theirs(&self.last_message),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sent_by_me: bool,
    pub text: String,
}

impl Message {
    pub fn mine(text: &str) -> Self {
        Self {
            sent_by_me: true,
            text: text.to_string(),
        }
    }

    pub fn theirs(text: &str) -> Self {
        Self {
            sent_by_me: false,
            text: text.to_string(),
        }
    }
}

const NAMES: [&str; 12] = [
    "Alice Johnson",
    "Bob Smith",
    "Charlie Brown",
    "Diana Prince",
    "Edward Norton",
    "Fiona Apple",
    "George Lucas",
    "Helen Keller",
    "Ivan Petrov",
    "Julia Roberts",
    "Kevin Hart",
    "Lisa Simpson",
];

const LAST_MESSAGES: [&str; 10] = [
    "Hey! How are you doing today?",
    "Thanks for the help yesterday",
    "Are we still meeting tomorrow?",
    "Just finished watching that movie you recommended",
    "Check out this cool photo I took!",
    "Running a bit late, be there in 10 minutes",
    "Happy birthday!",
    "Let's grab coffee sometime this week",
    "Did you see the news about the new update?",
    "Working from home today, how about you?",
];

pub fn sample_chats() -> Vec<Chat> {
    sample_chats_at(Local::now())
}

/// The sample roster with timestamps relative to `now`.
pub fn sample_chats_at(now: DateTime<Local>) -> Vec<Chat> {
    NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| Chat {
            id: format!("chat_{index}"),
            name: (*name).to_string(),
            last_message: LAST_MESSAGES[index % LAST_MESSAGES.len()].to_string(),
            timestamp: timestamp_for(index, now),
            online: index % 2 == 0,
            unread: if index % 3 == 0 { (index % 9) as u32 + 1 } else { 0 },
            initials: initials(name),
        })
        .collect()
}

fn timestamp_for(index: usize, now: DateTime<Local>) -> String {
    match index % 4 {
        0 => now.format("%H:%M").to_string(),
        1 => (now - Duration::hours(2)).format("%H:%M").to_string(),
        2 => "Yesterday".to_string(),
        _ => (now - Duration::days(2 + (index % 6) as i64))
            .format("%b %d")
            .to_string(),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_roster_shape() {
        let now = Local.with_ymd_and_hms(2025, 7, 4, 12, 30, 0).unwrap();
        let chats = sample_chats_at(now);
        assert_eq!(chats.len(), 12);
        assert_eq!(chats[0].id, "chat_0");
        assert_eq!(chats[0].initials, "AJ");
        assert_eq!(chats[0].timestamp, "12:30");
        assert_eq!(chats[1].timestamp, "10:30");
        assert_eq!(chats[2].timestamp, "Yesterday");
        assert_eq!(chats[0].unread, 1);
        assert_eq!(chats[1].unread, 0);
    }

    #[test]
    fn test_history_ends_with_last_message() {
        let chat = &sample_chats()[3];
        let history = chat.history();
        assert_eq!(history.last().map(|m| m.text.as_str()), Some(chat.last_message.as_str()));
        assert!(history[0].sent_by_me);
    }
}
