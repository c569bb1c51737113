//! Policies controlling which anchors are generated and how they look.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Information about a heading for which an anchor is being considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo<'a> {
    /// Level of the heading, 1 to 6.
    pub level: u8,
    /// Identifier of the heading on the page; the anchor's URL fragment.
    pub id: &'a [u8],
}

/// Determines the anchor text.
///
/// Functions and closures `Fn(&HeaderInfo) -> Vec<u8>` are texters.
pub trait Texter: Send + Sync {
    /// Text written inside the anchor for the heading described by `info`.
    ///
    /// An empty text means the heading gets no anchor.
    fn anchor_text<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, [u8]>;
}

impl<F> Texter for F
where
    F: Fn(&HeaderInfo<'_>) -> Vec<u8> + Send + Sync,
{
    fn anchor_text<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, [u8]> {
        Cow::Owned(self(info))
    }
}

/// A [`Texter`] using the same text for every heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(Vec<u8>);

impl Text {
    pub const DEFAULT: &'static str = "¶";

    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self(text.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Texter for Text {
    fn anchor_text<'a>(&'a self, _info: &HeaderInfo<'_>) -> Cow<'a, [u8]> {
        Cow::Borrowed(&self.0)
    }
}

/// Where inside a heading the anchor is placed.
///
/// The same value decides the insertion side in the tree and whether the
/// anchor is written when the renderer enters or exits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// After the heading text.
    #[default]
    After,
    /// Before the heading text.
    Before,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::After => "After",
            Position::Before => "Before",
        })
    }
}

/// Determines the attributes attached to an anchor.
///
/// Functions and closures `Fn(&HeaderInfo) -> BTreeMap<String, String>`
/// are attributers.
pub trait Attributer: Send + Sync {
    /// Attributes set on the anchor for the heading described by `info`.
    ///
    /// An empty map means the anchor carries no attributes besides `href`.
    fn anchor_attributes<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, BTreeMap<String, String>>;
}

impl<F> Attributer for F
where
    F: Fn(&HeaderInfo<'_>) -> BTreeMap<String, String> + Send + Sync,
{
    fn anchor_attributes<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, BTreeMap<String, String>> {
        Cow::Owned(self(info))
    }
}

/// An [`Attributer`] using the same attributes for every heading.
///
/// Defaults to `class="anchor"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// No attributes at all.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::empty().with("class", "anchor")
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Attributer for Attributes {
    fn anchor_attributes<'a>(&'a self, _info: &HeaderInfo<'_>) -> Cow<'a, BTreeMap<String, String>> {
        Cow::Borrowed(&self.0)
    }
}
