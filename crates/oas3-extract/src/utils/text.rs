use std::borrow::Cow;

use itertools::Itertools;

const ELLIPSIS: &str = "...";

/// Shortens `input` to at most `limit` characters, appending `...` when
/// anything was cut. `None` leaves the text untouched.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// inside a code point.
#[must_use]
pub(crate) fn truncate(input: &str, limit: Option<usize>) -> Cow<'_, str> {
  let Some(limit) = limit else {
    return Cow::Borrowed(input);
  };

  match input.char_indices().nth(limit) {
    Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &input[..cut])),
    None => Cow::Borrowed(input),
  }
}

/// Fills each line of `input` to at most `width` characters, breaking at
/// whitespace. Existing line breaks are kept and runs of spaces collapse. A
/// word longer than `width` sits alone on its own line.
#[must_use]
pub(crate) fn wrap(input: &str, width: usize) -> String {
  input.lines().map(|line| fill_line(line, width)).join("\n")
}

fn fill_line(line: &str, width: usize) -> String {
  let mut out = String::with_capacity(line.len());
  let mut column = 0;
  for word in line.split_whitespace() {
    let len = word.chars().count();
    if column > 0 {
      if column + 1 + len > width {
        out.push('\n');
        column = 0;
      } else {
        out.push(' ');
        column += 1;
      }
    }
    out.push_str(word);
    column += len;
  }
  out
}

/// Splits text into lines, prefixing every line after the first with `indent`
/// so wrapped descriptions stay aligned under their label.
#[must_use]
pub(crate) fn hanging_indent(input: &str, indent: &str) -> String {
  let mut lines = input.lines();
  let Some(first) = lines.next() else {
    return String::new();
  };

  let mut out = first.to_string();
  for line in lines {
    out.push('\n');
    if !line.is_empty() {
      out.push_str(indent);
      out.push_str(line);
    }
  }
  out
}
