//! Parsing of `mailsig:` DNS TXT records into signature windows.
//!
//! A domain publishes its tokens as a TXT record of the form
//!
//! ```text
//! mailsig:<current-token>[,<previous-token>]
//! ```
//!
//! The previous token covers the grace period while a freshly signed token
//! replaces one that has not yet expired.

use serde::{Deserialize, Serialize};

use crate::constants::{RECORD_PREFIX, TOKEN_SEPARATOR};

/// The tokens a domain currently publishes: one current, one optional previous.
///
/// The type separates the three cases a lookup can produce: no window at all
/// (`Option::None` at the call site), a window without a previous token, and
/// a full window.
///
/// # Example
///
/// ```
/// use mailsig::{SignatureWindow, parse_txt};
///
/// let window = parse_txt("mailsig:AAA,BBB").unwrap();
/// assert_eq!(window, SignatureWindow::new("AAA", Some("BBB".to_string())));
/// assert_eq!(window.tokens(), vec!["AAA", "BBB"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureWindow {
    /// The token most recently published
    pub current: String,
    /// The token it replaced, kept while the rotation completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl SignatureWindow {
    /// Creates a window from its tokens.
    #[must_use]
    pub fn new(current: impl Into<String>, previous: Option<String>) -> Self {
        Self {
            current: current.into(),
            previous,
        }
    }

    /// Creates a window holding only a current token.
    #[must_use]
    pub fn current_only(current: impl Into<String>) -> Self {
        Self::new(current, None)
    }

    /// Returns the present tokens in publication order (current, then previous).
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.current.as_str())
            .chain(self.previous.as_deref())
            .collect()
    }

    /// Renders the window back into TXT record form.
    #[must_use]
    pub fn to_txt(&self) -> String {
        match &self.previous {
            Some(previous) => format!("{RECORD_PREFIX}{}{TOKEN_SEPARATOR}{previous}", self.current),
            None => format!("{RECORD_PREFIX}{}", self.current),
        }
    }
}

/// Extracts a signature window from one TXT record string.
///
/// The first `mailsig:` occurrence followed by a non-empty token wins. A token
/// is a run of characters without commas, trimmed of surrounding whitespace.
/// A second token after a single comma is the previous token; anything after
/// it is ignored.
///
/// # Arguments
///
/// * `record` - One TXT record, with character-strings already concatenated
///
/// # Returns
///
/// The window, or `None` if the record carries no usable `mailsig:` entry
///
/// # Examples
///
/// ```
/// use mailsig::parse_txt;
///
/// assert_eq!(parse_txt("mailsig:AAA").unwrap().current, "AAA");
/// assert_eq!(parse_txt("mailsig:AAA,BBB").unwrap().previous.as_deref(), Some("BBB"));
/// assert!(parse_txt("v=spf1 -all").is_none());
/// ```
#[must_use]
pub fn parse_txt(record: &str) -> Option<SignatureWindow> {
    record
        .match_indices(RECORD_PREFIX)
        .find_map(|(start, _)| parse_tokens(&record[start + RECORD_PREFIX.len()..]))
}

/// Returns the window from the first record that parses.
///
/// # Arguments
///
/// * `records` - Every TXT record published for a domain, in answer order
///
/// # Returns
///
/// The window from the first record for which [`parse_txt`] succeeds
///
/// # Examples
///
/// ```
/// use mailsig::select_window;
///
/// let records = ["v=spf1 -all", "mailsig:AAA", "mailsig:BBB"];
/// assert_eq!(select_window(records).unwrap().current, "AAA");
/// ```
#[must_use]
pub fn select_window<I, S>(records: I) -> Option<SignatureWindow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .find_map(|record| parse_txt(record.as_ref()))
}

fn parse_tokens(rest: &str) -> Option<SignatureWindow> {
    let mut parts = rest.split(TOKEN_SEPARATOR);
    let current = parts.next().map(str::trim).filter(|t| !t.is_empty())?;
    let previous = parts
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from);

    Some(SignatureWindow::new(current, previous))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_only() {
        assert_eq!(parse_txt("mailsig:AAA"), Some(SignatureWindow::current_only("AAA")));
    }

    #[test]
    fn current_and_previous() {
        assert_eq!(
            parse_txt("mailsig:AAA,BBB"),
            Some(SignatureWindow::new("AAA", Some("BBB".to_string())))
        );
    }

    #[test]
    fn unrelated_text_does_not_match() {
        assert_eq!(parse_txt("random text"), None);
    }

    #[test]
    fn empty_record_does_not_match() {
        assert_eq!(parse_txt(""), None);
    }

    #[test]
    fn prefix_without_token_does_not_match() {
        assert_eq!(parse_txt("mailsig:"), None);
        assert_eq!(parse_txt("mailsig:,BBB"), None);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(parse_txt("MAILSIG:AAA"), None);
    }

    #[test]
    fn trailing_separator_leaves_previous_absent() {
        assert_eq!(parse_txt("mailsig:AAA,"), Some(SignatureWindow::current_only("AAA")));
    }

    #[test]
    fn third_token_is_ignored() {
        assert_eq!(
            parse_txt("mailsig:AAA,BBB,CCC"),
            Some(SignatureWindow::new("AAA", Some("BBB".to_string())))
        );
    }

    #[test]
    fn prefix_may_follow_other_text() {
        assert_eq!(
            parse_txt("note mailsig:AAA"),
            Some(SignatureWindow::current_only("AAA"))
        );
    }

    #[test]
    fn later_occurrence_used_when_first_is_empty() {
        assert_eq!(
            parse_txt("mailsig:, mailsig:AAA"),
            Some(SignatureWindow::current_only("AAA"))
        );
    }

    #[test]
    fn whitespace_around_tokens_is_trimmed() {
        assert_eq!(
            parse_txt("mailsig: AAA , BBB "),
            Some(SignatureWindow::new("AAA", Some("BBB".to_string())))
        );
    }

    #[test]
    fn select_skips_malformed_records() {
        let records = vec!["v=spf1 include:_spf.example.com ~all".to_string(), "mailsig:AAA".to_string()];
        assert_eq!(select_window(&records), Some(SignatureWindow::current_only("AAA")));
    }

    #[test]
    fn select_takes_first_match() {
        let records = ["mailsig:AAA", "mailsig:BBB,CCC"];
        assert_eq!(select_window(records), Some(SignatureWindow::current_only("AAA")));
    }

    #[test]
    fn select_on_no_records_is_none() {
        assert_eq!(select_window(Vec::<String>::new()), None);
    }

    #[test]
    fn tokens_lists_present_tokens() {
        assert_eq!(SignatureWindow::current_only("AAA").tokens(), vec!["AAA"]);
        assert_eq!(
            SignatureWindow::new("AAA", Some("BBB".to_string())).tokens(),
            vec!["AAA", "BBB"]
        );
    }

    #[test]
    fn to_txt_renders_record() {
        assert_eq!(SignatureWindow::current_only("AAA").to_txt(), "mailsig:AAA");
        assert_eq!(
            SignatureWindow::new("AAA", Some("BBB".to_string())).to_txt(),
            "mailsig:AAA,BBB"
        );
    }
}
