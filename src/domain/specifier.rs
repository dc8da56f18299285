//! `TAG[=VALUE]` arguments

use std::fmt;
use std::str::FromStr;

/// A tag name with an optional value name, as typed on the command line.
///
/// The split happens on the first `=`. A leading `=` is part of the tag
/// name, and `TAG=` is the same as `TAG`.
///
/// # Examples
///
/// ```
/// use tagshelf::domain::TagSpecifier;
///
/// let spec = TagSpecifier::parse("year=2015");
/// assert_eq!(spec.tag, "year");
/// assert_eq!(spec.value.as_deref(), Some("2015"));
///
/// assert_eq!(TagSpecifier::parse("holiday").value, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagSpecifier {
    pub tag: String,
    pub value: Option<String>,
}

impl TagSpecifier {
    pub fn new(tag: impl Into<String>, value: Option<String>) -> Self {
        TagSpecifier {
            tag: tag.into(),
            value: value.filter(|v| !v.is_empty()),
        }
    }

    pub fn parse(arg: &str) -> Self {
        match arg.find('=') {
            None | Some(0) => TagSpecifier::new(arg, None),
            Some(index) => TagSpecifier::new(&arg[..index], Some(arg[index + 1..].to_string())),
        }
    }

    /// Parse a whitespace separated list, as given to `--tags`.
    pub fn parse_list(args: &str) -> Vec<Self> {
        args.split_whitespace().map(Self::parse).collect()
    }

    /// The value segment, or `""` for a bare tag.
    pub fn value_name(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl FromStr for TagSpecifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for TagSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.tag, value),
            None => write!(f, "{}", self.tag),
        }
    }
}
