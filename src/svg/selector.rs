use std::fmt;

/// Element locator understood by [`crate::SvgDocument::query`].
///
/// Only the forms frame schemas use are supported: `#id`, `.class`, `tag` and `tag[attr]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `tag[attr]`, matching elements carrying `attr` with any value.
    TagWithAttr {
        /// Element local name.
        tag: String,
        /// Required attribute name.
        attr: String,
    },
}

impl Selector {
    /// Parse a selector string. Returns `None` for empty or unsupported input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix('#') {
            return non_empty(id)
                .filter(|id| is_ident(id))
                .map(|id| Self::Id(id.to_owned()));
        }
        if let Some(class) = s.strip_prefix('.') {
            return non_empty(class)
                .filter(|c| is_ident(c))
                .map(|c| Self::Class(c.to_owned()));
        }
        if let Some((tag, rest)) = s.split_once('[') {
            let attr = rest.strip_suffix(']')?;
            let tag = non_empty(tag)?;
            let attr = non_empty(attr)?;
            if !is_name(tag) || !is_name(attr) {
                return None;
            }
            return Some(Self::TagWithAttr {
                tag: tag.to_owned(),
                attr: attr.to_owned(),
            });
        }
        non_empty(s)
            .filter(|s| is_name(s))
            .map(|tag| Self::Tag(tag.to_owned()))
    }

    pub(crate) fn matches(&self, local_name: &str, attrs: &[(String, String)]) -> bool {
        let attr = |key: &str| attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
        match self {
            Self::Id(id) => attr("id") == Some(id.as_str()),
            Self::Class(class) => attr("class")
                .is_some_and(|list| list.split_whitespace().any(|c| c == class)),
            Self::Tag(tag) => local_name == tag,
            Self::TagWithAttr { tag, attr: name } => local_name == tag && attr(name).is_some(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => f.write_str(tag),
            Self::TagWithAttr { tag, attr } => write!(f, "{tag}[{attr}]"),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Id or class name: no whitespace, combinators or compound parts.
fn is_ident(s: &str) -> bool {
    s.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
}

fn is_name(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
