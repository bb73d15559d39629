//! Request-struct field metadata
//!
//! Fields describe where they are read from with Go-style tag strings:
//!
//! ```text
//! path:"id"  query:"page,omitempty"  header:"X-Request-Id"  json:"email"
//! required:"true"  optional:"true"  format:"email"
//! ```

use std::fmt;

/// Parsed `key:"value"` pairs, in source order
///
/// # Example
///
/// ```
/// use service_kit::validation::StructTag;
///
/// let tag = StructTag::parse(r#"json:"email,omitempty" format:"email""#);
/// assert_eq!(tag.get("json"), "email,omitempty");
/// assert_eq!(tag.lookup("query"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    pairs: Vec<(String, String)>,
}

impl StructTag {
    /// Parse a tag string; parsing stops at the first malformed pair
    pub fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        let mut rest = raw;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let key_len = rest
                .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\x7f')
                .unwrap_or(rest.len());
            if key_len == 0 || !rest[key_len..].starts_with(":\"") {
                break;
            }
            let key = &rest[..key_len];
            rest = &rest[key_len + 2..];

            let Some((value, remaining)) = read_quoted(rest) else {
                break;
            };
            pairs.push((key.to_string(), value));
            rest = remaining;
        }

        Self { pairs }
    }

    /// Value for `key`, distinguishing absent from empty
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or "" when absent
    pub fn get(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Read up to the closing quote, resolving backslash escapes
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &input[i + 1..])),
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            other => value.push(other),
        }
    }
    None
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}:{:?}", k, v))
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Name, tag and shape of one struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub tag: StructTag,
    /// `Option<T>` and other nullable fields
    pub is_pointer: bool,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, tag: &str) -> Self {
        Self {
            name: name.into(),
            tag: StructTag::parse(tag),
            is_pointer: false,
        }
    }

    /// Same field, marked nullable
    #[must_use]
    pub fn pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }
}

/// Types that can describe their fields
///
/// ```
/// use service_kit::validation::{classify_params, FieldMeta, TaggedStruct};
///
/// struct GetUser;
///
/// impl TaggedStruct for GetUser {
///     fn field_meta() -> Vec<FieldMeta> {
///         vec![
///             FieldMeta::new("ID", r#"path:"id""#),
///             FieldMeta::new("Verbose", r#"query:"verbose""#).pointer(),
///         ]
///     }
/// }
///
/// let params = classify_params::<GetUser>();
/// assert_eq!(params.path[0].name, "ID");
/// assert_eq!(params.query.len(), 1);
/// ```
pub trait TaggedStruct {
    fn field_meta() -> Vec<FieldMeta>;
}

/// Tags that name where a field is read from
const SOURCE_TAGS: [&str; 4] = ["json", "query", "header", "body"];

/// Whether a request must carry this field
///
/// Precedence: `optional:"true"`, then `required:"true"`, then an
/// `omitempty` source tag, then nullability; untagged fields are required.
pub fn is_field_required(meta: &FieldMeta) -> bool {
    if meta.tag.get("optional") == "true" {
        return false;
    }
    if meta.tag.get("required") == "true" {
        return true;
    }
    if SOURCE_TAGS
        .iter()
        .any(|key| meta.tag.get(key).contains(",omitempty"))
    {
        return false;
    }
    !meta.is_pointer
}

/// External name of a field: `path`, `query`, `header`, then `json`, else the declared name
///
/// Options after the first comma are dropped; a `-` name is not usable and
/// falls through like an absent tag.
pub fn field_name(meta: &FieldMeta) -> String {
    ["path", "query", "header", "json"]
        .iter()
        .filter_map(|key| meta.tag.lookup(key))
        .map(|value| value.split(',').next().unwrap_or_default())
        .find(|name| !name.is_empty() && *name != "-")
        .unwrap_or(meta.name.as_str())
        .to_string()
}

/// Where a request parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Body,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamLocation::Path => write!(f, "path"),
            ParamLocation::Query => write!(f, "query"),
            ParamLocation::Header => write!(f, "header"),
            ParamLocation::Body => write!(f, "body"),
        }
    }
}

pub fn param_location(meta: &FieldMeta) -> ParamLocation {
    if meta.tag.lookup("path").is_some() {
        ParamLocation::Path
    } else if meta.tag.lookup("query").is_some() {
        ParamLocation::Query
    } else if meta.tag.lookup("header").is_some() {
        ParamLocation::Header
    } else {
        ParamLocation::Body
    }
}

/// A struct's fields grouped by location, declaration order kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamClassification {
    pub path: Vec<FieldMeta>,
    pub query: Vec<FieldMeta>,
    pub header: Vec<FieldMeta>,
    pub body: Vec<FieldMeta>,
}

impl ParamClassification {
    pub fn from_fields(fields: Vec<FieldMeta>) -> Self {
        let mut classification = Self::default();
        for field in fields {
            let bucket = match param_location(&field) {
                ParamLocation::Path => &mut classification.path,
                ParamLocation::Query => &mut classification.query,
                ParamLocation::Header => &mut classification.header,
                ParamLocation::Body => &mut classification.body,
            };
            bucket.push(field);
        }
        classification
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

pub fn classify_params<T: TaggedStruct>() -> ParamClassification {
    ParamClassification::from_fields(T::field_meta())
}
