use crate::config::FunctionType;

/// Textual pre-processing applied before parsing.
///
/// `^` becomes `**` everywhere (expressions carry no string literals, so no
/// quoting rules apply). `Math.` qualifiers are dropped. For exponential
/// functions written as `e^...` without any `exp(`, each standalone `e**`
/// is turned into an `exp(...)` call around its exponent.
pub fn rewrite(expression: &str, function_type: FunctionType) -> String {
  let mut processed = strip_math_qualifier(&expression.replace('^', "**"));

  if function_type == FunctionType::Exponential
    && processed.contains("e**")
    && !processed.contains("exp(")
  {
    processed = rewrite_e_power(&processed);
  }

  processed
}

/// `Math.sin(x)` -> `sin(x)`.
pub fn strip_math_qualifier(expression: &str) -> String {
  let mut out = String::with_capacity(expression.len());
  let mut rest = expression;
  while let Some(pos) = rest.find("Math.") {
    let preceded_by_ident = rest[..pos]
      .chars()
      .next_back()
      .is_some_and(is_identifier_char);
    out.push_str(&rest[..pos]);
    if preceded_by_ident {
      out.push_str("Math.");
    }
    rest = &rest[pos + "Math.".len()..];
  }
  out.push_str(rest);
  out
}

fn is_identifier_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

fn rewrite_e_power(expression: &str) -> String {
  let mut out = String::with_capacity(expression.len() + 4);
  let mut rest = expression;
  while let Some(pos) = rest.find("e**") {
    out.push_str(&rest[..pos]);
    let after = &rest[pos + "e**".len()..];
    if out.chars().next_back().is_some_and(is_identifier_char) {
      out.push_str("e**");
      rest = after;
      continue;
    }
    let len = operand_len(after);
    out.push_str("exp(");
    out.push_str(after[..len].trim_end());
    out.push(')');
    out.push_str(&after[after[..len].trim_end().len()..len]);
    rest = &after[len..];
  }
  out.push_str(rest);
  out
}

/// Byte length of the power operand at the start of `s`:
/// `sign* atom (** sign* atom)*`, where an atom is a number, an identifier
/// with an optional call group, or a parenthesised group.
fn operand_len(s: &str) -> usize {
  let bytes = s.as_bytes();
  let mut start = 0;
  loop {
    let end = start + atom_len(&bytes[start..]);
    let mut j = end;
    skip_whitespace(bytes, &mut j);
    if !s[j..].starts_with("**") {
      return end;
    }
    start = j + 2;
  }
}

fn atom_len(bytes: &[u8]) -> usize {
  let mut i = 0;
  skip_whitespace(bytes, &mut i);
  while i < bytes.len() && (bytes[i] == b'-' || bytes[i] == b'+') {
    i += 1;
    skip_whitespace(bytes, &mut i);
  }

  if i < bytes.len() && bytes[i] == b'(' {
    return group_end(bytes, i);
  }
  let start = i;
  while i < bytes.len()
    && (is_identifier_char(bytes[i] as char) || bytes[i] == b'.')
  {
    i += 1;
  }
  if i > start {
    let mut j = i;
    skip_whitespace(bytes, &mut j);
    if j < bytes.len() && bytes[j] == b'(' {
      return group_end(bytes, j);
    }
  }
  i
}

fn skip_whitespace(bytes: &[u8], i: &mut usize) {
  while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
    *i += 1;
  }
}

/// Index just past the `)` matching the `(` at `open`, or the end of input.
fn group_end(bytes: &[u8], open: usize) -> usize {
  let mut depth = 0usize;
  for (idx, &b) in bytes.iter().enumerate().skip(open) {
    match b {
      b'(' => depth += 1,
      b')' => {
        depth -= 1;
        if depth == 0 {
          return idx + 1;
        }
      }
      _ => {}
    }
  }
  bytes.len()
}
