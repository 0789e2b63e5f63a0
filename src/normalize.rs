use regex::Regex;
use std::sync::OnceLock;

// 2x, 3( — a digit running into a symbol or group is a coefficient
fn coefficient_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(\d)([A-Za-z(])").unwrap())
}

// (x)2, (x)y, (x)(x) — a closing parenthesis running into the next operand
fn adjacency_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(\))(\d|[A-Za-z(])").unwrap())
}

/// Rewrite user-typed notation into the form the grammar accepts:
/// `^` becomes `**`, and implicit multiplication gets an explicit `*`.
///
/// The rewrites are purely lexical; malformed input that happens to match
/// is rewritten all the same and left for the parser to reject.
pub fn normalize(input: &str) -> String {
  let text = input.replace('^', "**");
  let text = coefficient_re().replace_all(&text, "${1}*${2}");
  let text = adjacency_re().replace_all(&text, "${1}*${2}");
  text.into_owned()
}
