//! Navigation documents and the page-request walk.
//!
//! A navigation document (`docs_nav_*.yml`) describes one product release:
//!
//! ```yaml
//! product: gateway
//! release: "3.0"
//! generate: true
//! assume_generated: true
//! items:
//!   - text: Home
//!     url: /gateway/
//!   - text: Install
//!     url: /install/
//!     items:
//!       - text: Docker
//!         url: /install/docker/
//!       - text: Config reference
//!         url: /reference/configuration/#admin_listen
//! ```
//!
//! [`walk`] turns the item tree into [`PageRequest`]s, depth-first, parent
//! before children, in document order.

use serde::Deserialize;
use serde::de::Error as _;
use serde_yaml::{Mapping, Value};

use crate::yaml::{kind, scalar_string};

/// One product release's navigation document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavDocument {
    /// Product (edition) name, e.g. "gateway".
    #[serde(deserialize_with = "scalar_string")]
    pub product: String,
    /// Release line, e.g. "3.0".
    #[serde(deserialize_with = "scalar_string")]
    pub release: String,
    /// Whether this document takes part in generation.
    #[serde(default)]
    pub generate: bool,
    /// Default eligibility for nodes without their own `generate` flag.
    /// Absent means `true`.
    #[serde(default)]
    pub assume_generated: Option<bool>,
    /// Top-level navigation entries.
    #[serde(default)]
    pub items: Option<NavTree>,
}

impl NavDocument {
    /// Effective `assume_generated` value.
    #[must_use]
    pub fn assume_generated(&self) -> bool {
        self.assume_generated.unwrap_or(true)
    }
}

/// A navigation entry.
///
/// Keys other than these (display text, icons) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NavNode {
    /// Explicit generation flag.
    pub generate: Option<bool>,
    /// Destination URL.
    pub url: Option<String>,
    /// Source document, relative to the product source tree, or rooted at
    /// the source tree when it starts with `/`.
    pub src: Option<String>,
    /// URL points outside the generated docs (built elsewhere).
    pub absolute_url: Option<bool>,
    /// Child entries.
    pub items: Option<NavTree>,
}

/// Ordered list of navigation entries.
///
/// Accepts either a YAML sequence of entries or a mapping whose values are
/// entries; mapping keys are labels only and document order is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawTree")]
pub struct NavTree(Vec<NavNode>);

impl NavTree {
    /// Iterate entries in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavNode> {
        self.0.iter()
    }

    /// Number of direct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no direct entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<NavNode>> for NavTree {
    fn from(nodes: Vec<NavNode>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a NavTree {
    type Item = &'a NavNode;
    type IntoIter = std::slice::Iter<'a, NavNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Wire shape of a [`NavTree`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTree {
    List(Vec<NavNode>),
    Map(Mapping),
}

impl TryFrom<RawTree> for NavTree {
    type Error = serde_yaml::Error;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        match raw {
            RawTree::List(nodes) => Ok(Self(nodes)),
            RawTree::Map(mapping) => mapping
                .into_iter()
                .map(|(key, value)| {
                    serde_yaml::from_value::<NavNode>(value).map_err(|e| {
                        serde_yaml::Error::custom(format!("item {}: {e}", label(&key)))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
        }
    }
}

/// Printable label for a mapping key.
fn label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => kind(other).to_owned(),
    }
}

/// How a node's `generate` flag combines with the document default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EligibilityPolicy {
    /// `generate: true` or the document default enables a node. An explicit
    /// `generate: false` cannot switch off a node in a document that assumes
    /// generation. This matches how existing navigation files were authored.
    #[default]
    Permissive,
    /// The node's own flag wins when present; the document default applies
    /// only when the flag is absent.
    Strict,
}

impl EligibilityPolicy {
    /// Whether a node with the given flag is eligible for generation.
    #[must_use]
    pub fn is_eligible(self, generate: Option<bool>, assume_generated: bool) -> bool {
        match self {
            Self::Permissive => generate == Some(true) || assume_generated,
            Self::Strict => generate.unwrap_or(assume_generated),
        }
    }
}

/// A request to materialize one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Source document, if known (`index` for the product root).
    pub src: Option<String>,
    /// Destination URL as written in the navigation file.
    pub dest_url: String,
    /// Product name.
    pub product: String,
    /// Release line.
    pub release: String,
    /// Resolved version string.
    pub version: String,
}

/// Document-level values shared by every node of a walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkContext<'a> {
    pub product: &'a str,
    pub release: &'a str,
    pub version: &'a str,
    pub assume_generated: bool,
    pub policy: EligibilityPolicy,
}

impl WalkContext<'_> {
    /// Build the page request for a single node, ignoring its children.
    fn request_for(&self, node: &NavNode) -> Option<PageRequest> {
        if !self.policy.is_eligible(node.generate, self.assume_generated) {
            return None;
        }

        let url = node.url.as_deref();

        // The product root is always generated, even when marked absolute.
        let src = match (&node.src, url) {
            (Some(src), _) => Some(src.clone()),
            (None, Some(url)) if self.is_product_root(url) => Some("index".to_owned()),
            (None, _) => None,
        };

        let linked = url.is_some() && !node.absolute_url.unwrap_or(false);
        if !linked && src.is_none() {
            return None;
        }

        // In-page anchors never become pages.
        if url.is_some_and(|u| u.contains("/#")) {
            return None;
        }

        let dest_url = url.map(str::to_owned).or_else(|| src.clone())?;

        Some(PageRequest {
            src,
            dest_url,
            product: self.product.to_owned(),
            release: self.release.to_owned(),
            version: self.version.to_owned(),
        })
    }

    fn is_product_root(&self, url: &str) -> bool {
        url.strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .is_some_and(|name| name == self.product)
    }
}

/// Walk a navigation tree and collect page requests.
///
/// Children are visited whether or not their parent produced a page, with the
/// same context, so a non-generated section can still hold generated pages.
#[must_use]
pub fn walk(tree: &NavTree, ctx: &WalkContext<'_>) -> Vec<PageRequest> {
    let mut requests = Vec::new();
    walk_into(tree, ctx, &mut requests);
    requests
}

fn walk_into(tree: &NavTree, ctx: &WalkContext<'_>, out: &mut Vec<PageRequest>) {
    for node in tree {
        if let Some(request) = ctx.request_for(node) {
            out.push(request);
        }
        if let Some(items) = &node.items {
            walk_into(items, ctx, out);
        }
    }
}
