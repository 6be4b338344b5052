use crate::errors::EkitError;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Parsed view of a package's `metadata.xml`.
///
/// Accepts either the XML file itself or a package directory containing one.
/// Everything is extracted eagerly in document order; optional fields stay
/// `None` rather than defaulting.
#[derive(Debug, Serialize)]
pub struct MetaData {
    pub path: String,
    pub descriptions: Vec<String>,
    pub maintainers: Vec<Maintainer>,
    pub use_flags: Vec<UseFlag>,
    pub upstreams: Vec<Upstream>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Maintainer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Version restriction, e.g. a dependency atom limiting which versions
    /// this maintainer covers.
    pub restrict: Option<String>,
    /// `active` or `inactive`; only used on upstream maintainers.
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct UseFlag {
    pub name: Option<String>,
    pub restrict: Option<String>,
    pub description: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct Upstream {
    pub maintainers: Vec<Maintainer>,
    pub changelogs: Vec<String>,
    pub docs: Vec<Doc>,
    pub bugtrackers: Vec<String>,
    pub remote_ids: Vec<RemoteId>,
}

#[derive(Debug, Serialize, Clone)]
pub struct Doc {
    pub url: String,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RemoteId {
    pub id: String,
    pub site: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct MetaIssue {
    pub kind: String,
    pub detail: String,
}

pub fn resolve_metadata_file(pkg: &str) -> PathBuf {
    let p = Path::new(pkg);
    if p.is_dir() {
        p.join("metadata.xml")
    } else {
        p.to_path_buf()
    }
}

impl MetaData {
    pub fn from_path(pkg: &str) -> anyhow::Result<Self> {
        let file = resolve_metadata_file(pkg);
        let raw = std::fs::read_to_string(&file)
            .map_err(|_| EkitError::MetaRead(file.display().to_string()))?;
        let md = Self::from_str(&raw)?;
        Ok(Self {
            path: file.display().to_string(),
            ..md
        })
    }

    pub fn from_str(raw: &str) -> anyhow::Result<Self> {
        let doc = roxmltree::Document::parse(raw)
            .map_err(|e| EkitError::MetaParse(e.to_string()))?;
        let root = doc.root_element();

        let descriptions = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "longdescription")
            .filter_map(|n| n.text())
            .map(|t| t.to_string())
            .collect();

        let maintainers = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "maintainer")
            .map(parse_maintainer)
            .collect();

        let use_flags = root
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "flag")
            .map(parse_use_flag)
            .collect();

        let upstreams = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "upstream")
            .map(parse_upstream)
            .collect();

        Ok(Self {
            path: String::new(),
            descriptions,
            maintainers,
            use_flags,
            upstreams,
        })
    }
}

fn child_text(node: roxmltree::Node, tag: &str) -> Option<String> {
    node.children()
        .filter(|c| c.is_element() && c.tag_name().name() == tag)
        .filter_map(|c| c.text())
        .map(|t| t.to_string())
        .last()
}

fn parse_maintainer(node: roxmltree::Node) -> Maintainer {
    Maintainer {
        email: child_text(node, "email"),
        name: child_text(node, "name"),
        description: child_text(node, "description"),
        restrict: node.attribute("restrict").map(str::to_string),
        status: node.attribute("status").map(str::to_string),
    }
}

fn parse_use_flag(node: roxmltree::Node) -> UseFlag {
    // Flag descriptions may nest <pkg>/<cat> elements; gather every text
    // fragment in document order, skipping fragments already present.
    let mut desc = String::new();
    for t in node.descendants().filter(|n| n.is_text()) {
        if let Some(text) = t.text() {
            if !text.is_empty() && !desc.contains(text) {
                desc.push_str(text);
            }
        }
    }
    let description = desc.split_whitespace().collect::<Vec<_>>().join(" ");
    UseFlag {
        name: node.attribute("name").map(str::to_string),
        restrict: node.attribute("restrict").map(str::to_string),
        description,
    }
}

fn parse_upstream(node: roxmltree::Node) -> Upstream {
    let elems = |tag: &str| {
        node.children()
            .filter(|c| c.is_element() && c.tag_name().name() == tag)
            .collect::<Vec<_>>()
    };

    Upstream {
        maintainers: elems("maintainer").into_iter().map(parse_maintainer).collect(),
        changelogs: elems("changelog")
            .into_iter()
            .filter_map(|c| c.text())
            .map(str::to_string)
            .collect(),
        docs: elems("doc")
            .into_iter()
            .filter_map(|c| {
                c.text().map(|t| Doc {
                    url: t.to_string(),
                    lang: c.attribute("lang").map(str::to_string),
                })
            })
            .collect(),
        bugtrackers: elems("bugs-to")
            .into_iter()
            .filter_map(|c| c.text())
            .map(str::to_string)
            .collect(),
        remote_ids: elems("remote-id")
            .into_iter()
            .filter_map(|c| {
                c.text().map(|t| RemoteId {
                    id: t.to_string(),
                    site: c.attribute("type").map(str::to_string),
                })
            })
            .collect(),
    }
}

pub fn validate(md: &MetaData) -> Vec<MetaIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for flag in &md.use_flags {
        match &flag.name {
            None => issues.push(MetaIssue {
                kind: "unnamed_flag".to_string(),
                detail: "flag element without a name attribute".to_string(),
            }),
            Some(name) => {
                if !seen.insert(name.clone()) {
                    issues.push(MetaIssue {
                        kind: "duplicate_flag".to_string(),
                        detail: name.clone(),
                    });
                }
            }
        }
    }

    for m in &md.maintainers {
        if m.email.is_none() {
            issues.push(MetaIssue {
                kind: "maintainer_without_email".to_string(),
                detail: m.name.clone().unwrap_or_else(|| "unnamed".to_string()),
            });
        }
    }

    issues
}
