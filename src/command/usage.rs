//! command::usage
//!
//! Text layout helpers shared by every usage renderer.
//!
//! # Layout
//!
//! Listings (commands, flags, arguments) are two columns. Each line starts
//! with [`INDENT`] spaces; the right column begins [`COLUMN_GAP`] spaces after
//! the longest left entry. Continuation lines of a multi-line description are
//! indented to the description column. Padding is always spaces.

/// Leading indent of every usage line below a section header.
pub const INDENT: usize = 2;

/// Spaces between the widest left column entry and its description.
pub const COLUMN_GAP: usize = 3;

/// Render `(left, right)` rows as an aligned listing, one line per row.
///
/// Returns an empty string for no rows.
pub fn align_columns<L, R>(rows: &[(L, R)]) -> String
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let width = rows
        .iter()
        .map(|(left, _)| left.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    let continuation = format!("\n{}", " ".repeat(INDENT + width + COLUMN_GAP));

    let mut out = String::new();
    for (left, right) in rows {
        let left = left.as_ref();
        let pad = width - left.chars().count() + COLUMN_GAP;
        let line = format!(
            "{}{}{}{}",
            " ".repeat(INDENT),
            left,
            " ".repeat(pad),
            right.as_ref().replace('\n', &continuation)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Strip tabs from a usage hint and indent its continuation lines.
pub fn indent_continuation(text: &str, indent: usize) -> String {
    text.replace('\t', "")
        .replace('\n', &format!("\n{}", " ".repeat(indent)))
}
