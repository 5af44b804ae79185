//! Message texts.
use crate::feed::FeedEntry;
use crate::util::{truncate_message, MAX_MESSAGE_LEN};

/// Shown in reply to `/start`.
pub const MENU_GREETING: &str = "📰 Hello there! Choose a news category:";
/// Shown when returning to the menu from a category.
pub const MENU_PROMPT: &str = "📰 Choose a news category:";
/// The single user-visible outcome of every load failure.
pub const FAILURE_NOTICE: &str = "❌ Unable to load the news.";

/// Renders up to `max_entries` entries under a header naming `label`.
///
/// Entries are numbered from 1 in the order given. Each block carries the
/// title, the publication date (or `unknown`) and the link; blocks are
/// separated by a blank line. The result never exceeds the chat message
/// length limit.
///
/// Callers substitute [`FAILURE_NOTICE`] instead of rendering an empty list.
pub fn render(entries: &[FeedEntry], label: &str, max_entries: usize) -> String {
    let mut text = format!("🗞 News on «{label}»:");

    for (i, entry) in entries.iter().take(max_entries).enumerate() {
        text.push_str(&format!(
            "\n\n{}. {}\nPublished: {}\n🔗 {}",
            i + 1,
            entry.title,
            entry.published_or_unknown(),
            entry.link
        ));
    }

    truncate_message(&text, MAX_MESSAGE_LEN).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn entry(n: usize, published: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: format!("Story {n}"),
            link: format!("https://example.com/{n}"),
            published: published.map(str::to_string),
        }
    }

    #[test]
    fn test_render_layout() {
        let entries = vec![
            entry(1, Some("Mon, 13 Sep 2021 16:45:00 +0000")),
            entry(2, None),
        ];
        let text = render(&entries, "⚽ Sports", 5);
        assert_eq!(
            text,
            "🗞 News on «⚽ Sports»:\n\n\
             1. Story 1\nPublished: Mon, 13 Sep 2021 16:45:00 +0000\n🔗 https://example.com/1\n\n\
             2. Story 2\nPublished: unknown\n🔗 https://example.com/2"
        );
    }

    #[test]
    fn test_render_caps_entries() {
        let entries: Vec<FeedEntry> = (1..=7).map(|n| entry(n, None)).collect();
        let text = render(&entries, "General", 5);
        assert!(text.contains("5. Story 5"));
        assert!(!text.contains("Story 6"));
    }

    #[test]
    fn test_render_stays_within_message_limit() {
        let long = FeedEntry {
            title: "x".repeat(3000),
            link: "https://example.com/long".to_string(),
            published: None,
        };
        let entries = vec![long.clone(), long];
        let text = render(&entries, "General", 5);
        assert!(text.encode_utf16().count() <= MAX_MESSAGE_LEN);
        assert!(text.starts_with("🗞 News on «General»:"));
    }

    proptest! {
        #[test]
        fn render_numbers_blocks_in_order(count in 0usize..12, max in 1usize..=5) {
            let entries: Vec<FeedEntry> = (1..=count).map(|n| entry(n, None)).collect();
            let text = render(&entries, "Label", max);

            let shown = count.min(max);
            prop_assert_eq!(text.matches("\nPublished: ").count(), shown);
            for n in 1..=shown {
                let block = format!("\n\n{}. Story {}\n", n, n);
                prop_assert!(text.contains(&block));
            }
        }
    }
}
