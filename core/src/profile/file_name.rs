// stagehand/src/profile/file_name.rs

//! Output file-name templates such as `js/[name]-[contenthash].min.js`.
//!
//! A template is validated when it is constructed, so an unknown placeholder is
//! a configuration error long before anything is emitted.

use crate::error::ConfigurationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::OnceLock;
use xxhash_rust::xxh3::xxh3_128;

/// Hash length used when a placeholder does not specify one.
pub const DEFAULT_HASH_LENGTH: usize = 20;
const MAX_HASH_LENGTH: usize = 32;

fn placeholder_regex() -> &'static Regex {
  static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
  PLACEHOLDER.get_or_init(|| Regex::new(r"\[([^\]]*)\]").expect("placeholder regex is valid"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
  Name,
  Id,
  ContentHash(usize),
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
  pub name: &'a str,
  pub id: &'a str,
  pub content: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileNameTemplate(String);

impl FileNameTemplate {
  pub fn new(template: impl Into<String>) -> Result<Self, ConfigurationError> {
    let template = template.into();
    if template.trim().is_empty() {
      return Err(ConfigurationError::InvalidTemplate {
        template,
        reason: "template is empty".to_string(),
      });
    }
    for caps in placeholder_regex().captures_iter(&template) {
      parse_placeholder(&template, &caps[1])?;
    }
    Ok(Self(template))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// True when the template embeds a content hash (`[contenthash]` or `[chunkhash]`).
  pub fn has_content_hash(&self) -> bool {
    self.placeholders().any(|p| matches!(p, Placeholder::ContentHash(_)))
  }

  pub fn has_name(&self) -> bool {
    self.placeholders().any(|p| p == Placeholder::Name)
  }

  fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
    placeholder_regex()
      .captures_iter(&self.0)
      .filter_map(|caps| parse_placeholder(&self.0, &caps[1]).ok())
  }

  /// Substitutes every placeholder.
  pub fn render(&self, input: RenderInput<'_>) -> String {
    let digest = format!("{:032x}", xxh3_128(input.content));
    placeholder_regex()
      .replace_all(&self.0, |caps: &regex::Captures<'_>| {
        // Validated at construction, so every capture parses.
        match parse_placeholder(&self.0, &caps[1]) {
          Ok(Placeholder::Name) => input.name.to_string(),
          Ok(Placeholder::Id) => input.id.to_string(),
          Ok(Placeholder::ContentHash(len)) => digest[..len].to_string(),
          Err(_) => caps[0].to_string(),
        }
      })
      .into_owned()
  }
}

// Every bracketed token must be one of the known placeholders, spelled exactly.
fn parse_placeholder(template: &str, token: &str) -> Result<Placeholder, ConfigurationError> {
  let invalid = |reason: String| ConfigurationError::InvalidTemplate {
    template: template.to_string(),
    reason,
  };
  let (name, length) = match token.split_once(':') {
    Some((name, length)) => (name, Some(length)),
    None => (token, None),
  };
  match (name, length) {
    ("name", None) => Ok(Placeholder::Name),
    ("id", None) => Ok(Placeholder::Id),
    ("contenthash" | "chunkhash", None) => Ok(Placeholder::ContentHash(DEFAULT_HASH_LENGTH)),
    ("contenthash" | "chunkhash", Some(len)) => {
      if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("hash length '{len}' is not a number")));
      }
      let len: usize = len.parse().map_err(|_| invalid(format!("hash length '{len}' is out of range")))?;
      if len == 0 || len > MAX_HASH_LENGTH {
        return Err(invalid(format!("hash length must be between 1 and {MAX_HASH_LENGTH}")));
      }
      Ok(Placeholder::ContentHash(len))
    }
    ("name" | "id", Some(_)) => Err(invalid(format!("placeholder '[{name}]' does not take a length"))),
    _ => Err(invalid(format!("unknown placeholder '[{token}]'"))),
  }
}

impl TryFrom<String> for FileNameTemplate {
  type Error = ConfigurationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<FileNameTemplate> for String {
  fn from(value: FileNameTemplate) -> Self {
    value.0
  }
}

impl Display for FileNameTemplate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn input<'a>(content: &'a [u8]) -> RenderInput<'a> {
    RenderInput { name: "index", id: "3", content }
  }

  #[test]
  fn renders_name_without_hash() {
    let template = FileNameTemplate::new("js/[name].js").unwrap();
    assert!(!template.has_content_hash());
    assert_eq!(template.render(input(b"console.log(1)")), "js/index.js");
  }

  #[test]
  fn renders_truncated_content_hash() {
    let template = FileNameTemplate::new("js/[name]-[contenthash:8].min.js").unwrap();
    let rendered = template.render(input(b"console.log(1)"));
    let hash = rendered.trim_start_matches("js/index-").trim_end_matches(".min.js");
    assert_eq!(hash.len(), 8);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn default_hash_length_and_stability() {
    let template = FileNameTemplate::new("[contenthash]").unwrap();
    let a = template.render(input(b"same"));
    let b = template.render(input(b"same"));
    let c = template.render(input(b"different"));
    assert_eq!(a.len(), DEFAULT_HASH_LENGTH);
    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn chunkhash_is_an_alias() {
    let content = input(b"body {}");
    let chunk = FileNameTemplate::new("[chunkhash]").unwrap().render(content);
    let contenthash = FileNameTemplate::new("[contenthash]").unwrap().render(content);
    assert_eq!(chunk, contenthash);
  }

  #[test]
  fn rejects_unknown_placeholders_and_bad_lengths() {
    assert!(matches!(
      FileNameTemplate::new("js/[hash].js"),
      Err(ConfigurationError::InvalidTemplate { .. })
    ));
    assert!(FileNameTemplate::new("js/[contenthash:0].js").is_err());
    assert!(FileNameTemplate::new("js/[contenthash:33].js").is_err());
    assert!(FileNameTemplate::new("js/[name:4].js").is_err());
    assert!(FileNameTemplate::new("  ").is_err());
    for template in ["js/[Hash].js", "js/[content_hash].js", "js/[name ].js", "js/[contenthash:x].js", "js/[].js"] {
      assert!(
        matches!(FileNameTemplate::new(template), Err(ConfigurationError::InvalidTemplate { .. })),
        "{template} should be rejected"
      );
    }
  }

  #[test]
  fn deserializing_validates() {
    let err = serde_json::from_str::<FileNameTemplate>("\"[nope]\"").unwrap_err();
    assert!(err.to_string().contains("unknown placeholder"));
  }
}
