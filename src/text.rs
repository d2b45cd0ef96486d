//! Plain-text utilities for building excerpts.

use scraper::Html;
use unicode_segmentation::UnicodeSegmentation;

/// Default maximum length of an excerpt, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Appended to text that was cut short.
pub const ELLIPSIS: &str = "...";

/// Strip every HTML tag and comment from `html`, keeping only the text.
///
/// The result is trimmed plain text that is safe to embed in a page: entities
/// are decoded while parsing, then `<`, `>` and `&` in the text are escaped
/// again, so `&lt;b&gt;` stays `&lt;b&gt;` instead of turning into a tag.
pub fn strip_tags(html: &str) -> String {
  escape_text(&text_content(html))
}

/// Escape the characters that would let plain text be read as markup.
pub fn escape_text(text: &str) -> String {
  if !text.contains(['<', '>', '&']) {
    return text.to_owned();
  }

  let mut escaped = String::with_capacity(text.len() + 8);
  for c in text.chars() {
    match c {
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '&' => escaped.push_str("&amp;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// Decoded, trimmed text nodes of `html`.
fn text_content(html: &str) -> String {
  if !html.contains(['<', '&']) {
    return html.trim().to_owned();
  }

  let fragment = Html::parse_fragment(html);
  let text: String = fragment.root_element().text().collect();
  text.trim().to_owned()
}

/// Limit `text` to `limit` characters.
///
/// Characters are counted as grapheme clusters so that accented letters and
/// emoji are never split. Text that fits is returned as-is; otherwise the
/// first `limit` characters are kept, trailing whitespace is dropped and
/// [`ELLIPSIS`] is appended.
pub fn truncate(text: &str, limit: usize) -> String {
  let mut graphemes = text.grapheme_indices(true);

  match graphemes.nth(limit) {
    None => text.to_owned(),
    Some((cut, _)) => {
      let mut truncated = text[..cut].trim_end().to_owned();
      truncated.push_str(ELLIPSIS);
      truncated
    }
  }
}

/// Strip markup from `html` and truncate it to `limit` characters.
///
/// Truncation counts the decoded text, so an escaped entity is never cut in
/// half.
pub fn excerpt_from(html: &str, limit: usize) -> String {
  escape_text(&truncate(&text_content(html), limit))
}
