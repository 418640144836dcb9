//! Cosmetic conversion of model replies into `<br>`-separated HTML.
//!
//! The output echoes the model text verbatim and is NOT escaped or sanitized.
//! Running it twice on text without `<li>` is not idempotent: newlines are
//! gone after the first pass.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERED_STEP: Regex = Regex::new(r"([0-9]+\)\s)").expect("Invalid step regex");
    static ref DASH_BULLET: Regex = Regex::new(r"(^|\s)-\s").expect("Invalid bullet regex");
}

const LIST_ITEM: &str = "<li>";
const BREAK: &str = "<br>";

/// Inserts `<br>` before inline `1) ` steps and `- ` bullets, then turns
/// every newline into `<br>`. Replies that already carry `<li>` pass through.
pub fn to_html_with_step_breaks(raw: &str) -> String {
    if raw.contains(LIST_ITEM) {
        return raw.to_string();
    }

    let stepped = NUMBERED_STEP.replace_all(raw, "<br>${1}");
    // The whitespace around the dash is consumed along with it.
    let bulleted = DASH_BULLET.replace_all(&stepped, "<br>- ");

    bulleted.replace('\n', BREAK)
}
