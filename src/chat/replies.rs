//! Static reply tables: canned answers to greetings and the `/joke` pool.

use rand::seq::SliceRandom;

/// Answered locally without a provider call. Keys are lowercase and trimmed.
const CANNED_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello! I'm ready to help. What can I do for you?"),
    ("hi", "Hi! How can I help?"),
    ("hey", "Hey there! What do you need?"),
    (
        "help",
        "Available commands:\n\
         - /help - show all commands\n\
         - /clear - clear chat history\n\
         - /history - show chat history\n\
         - /addapi - add a provider API key\n\
         - /switch - switch between saved providers\n\
         - /deleteapi - delete a saved API key\n\
         - /exit - exit termchat\n\n\
         Or just ask me anything!",
    ),
    ("bye", "Goodbye! See you soon. 👋"),
    ("goodbye", "Goodbye! Thanks for chatting. 👋"),
    ("thanks", "You're welcome! 😊"),
    ("thank you", "Happy to help! 😊"),
    ("ok", "Alright! Anything else?"),
    ("okay", "Sure! What else can I help with?"),
];

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why did the developer go broke? Because he used up all his cache!",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem!",
    "Why do programmers always confuse Halloween and Christmas? Because Oct 31 = Dec 25!",
    "A SQL query walks into a bar, walks up to two tables and asks, 'Can I join you?'",
    "What's a programmer's favorite place? The Foo Bar.",
    "Why don't programmers like nature? It has too many bugs and no debugging tool.",
    "Why do programmers hate nature? Too many bugs, not enough doc!",
];

/// Canned reply for `input`, matched case-insensitively after trimming.
pub(crate) fn canned_reply(input: &str) -> Option<&'static str> {
    let key = input.trim().to_lowercase();
    CANNED_REPLIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, reply)| *reply)
}

pub(crate) fn random_joke() -> &'static str {
    JOKES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(JOKES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_reply_exact_match_only() {
        assert!(canned_reply("  HeLLo ").is_some());
        assert_eq!(canned_reply("thank you"), canned_reply("Thank You"));
        assert!(canned_reply("hello there").is_none());
        assert!(canned_reply("").is_none());
    }

    #[test]
    fn test_joke_comes_from_pool() {
        assert!(JOKES.contains(&random_joke()));
    }
}
