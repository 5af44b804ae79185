use std::borrow::Cow;

/// Ellipsis appended when a message is cut short.
const ELLIPSIS: char = '…';

/// Caps a message at `max_len` UTF-16 code units.
///
/// Telegram measures message length in UTF-16 units, so emoji outside the
/// Basic Multilingual Plane count twice. When truncation is needed the
/// result ends with a single `…` and still fits within `max_len`. Cuts
/// always land on a `char` boundary.
///
/// Returns `Cow::Borrowed` when the input already fits.
///
/// # Examples
///
/// ```
/// use newsbot::util::truncate_message;
///
/// assert_eq!(truncate_message("Short", 10), "Short");
/// assert_eq!(truncate_message("Hello world", 6), "Hello…");
/// ```
pub fn truncate_message(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.encode_utf16().count() <= max_len {
        return Cow::Borrowed(s);
    }
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_len - ELLIPSIS.len_utf16();
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let width = c.len_utf16();
        if used + width > budget {
            break;
        }
        used += width;
        end = idx + c.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len_utf8());
    out.push_str(&s[..end]);
    out.push(ELLIPSIS);
    Cow::Owned(out)
}
