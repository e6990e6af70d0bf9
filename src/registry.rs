//! Target-directory rule table, loaded from the embedded targets.toml.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// How a target name must be corroborated before it may be deleted.
///
/// Unambiguous names (`node_modules`, `.next`) match anywhere; ambiguous
/// short names (`build`, `target`, `vendor`) require context from the
/// surrounding tree. This asymmetry is the tool's core safety property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// The name alone is sufficient, anywhere in the tree.
    Direct,
    /// The immediate parent directory must have this name.
    ParentName { parent: String },
    /// The two components above the candidate must be exactly
    /// (grandparent, parent), in order.
    ParentPath { grandparent: String, parent: String },
    /// A file with this name must exist alongside the candidate.
    SiblingFile { sibling: String },
}

/// A single entry in the rule table.
#[derive(Debug, Clone)]
pub struct TargetRule {
    /// Exact directory basename this rule applies to.
    pub name: String,
    pub strategy: Strategy,
}

/// Raw TOML row; converted into [`TargetRule`] with validation.
#[derive(Debug, Deserialize)]
struct RawRule {
    name: String,
    strategy: String,
    parent: Option<String>,
    parents: Option<[String; 2]>,
    sibling: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RuleTable {
    #[serde(rename = "target")]
    targets: Vec<RawRule>,
}

// Embed the rule table in the binary at compile time
const TARGETS_TOML: &str = include_str!("../targets.toml");

fn convert_rule(raw: RawRule) -> Result<TargetRule> {
    let strategy = match raw.strategy.as_str() {
        "direct" => Strategy::Direct,
        "parent-name" => {
            let parent = raw
                .parent
                .with_context(|| format!("rule '{}': parent-name requires `parent`", raw.name))?;
            Strategy::ParentName { parent }
        }
        "parent-path" => {
            let [grandparent, parent] = raw
                .parents
                .with_context(|| format!("rule '{}': parent-path requires `parents`", raw.name))?;
            Strategy::ParentPath {
                grandparent,
                parent,
            }
        }
        "sibling-file" => {
            let sibling = raw
                .sibling
                .with_context(|| format!("rule '{}': sibling-file requires `sibling`", raw.name))?;
            Strategy::SiblingFile { sibling }
        }
        other => bail!("rule '{}': unknown strategy '{}'", raw.name, other),
    };

    Ok(TargetRule {
        name: raw.name,
        strategy,
    })
}

fn parse_rules(toml_str: &str) -> Result<Vec<TargetRule>> {
    let table: RuleTable = toml::from_str(toml_str).context("failed to parse target rule table")?;

    let mut seen = HashSet::new();
    let mut rules = Vec::with_capacity(table.targets.len());
    for raw in table.targets {
        if !seen.insert(raw.name.clone()) {
            bail!("duplicate rule name '{}'", raw.name);
        }
        rules.push(convert_rule(raw)?);
    }

    Ok(rules)
}

/// Static table of deletion targets. Built once at startup, never mutated.
#[derive(Debug)]
pub struct Registry {
    rules: Vec<TargetRule>,
}

impl Registry {
    /// Load the embedded rule table. A malformed table is a build defect,
    /// surfaced at process start.
    pub fn load() -> Result<Registry> {
        Ok(Registry {
            rules: parse_rules(TARGETS_TOML)?,
        })
    }

    /// All rules whose name equals the given basename. Today at most one,
    /// but callers must not assume uniqueness.
    pub fn rules_for(&self, name: &str) -> Vec<&TargetRule> {
        self.rules.iter().filter(|r| r.name == name).collect()
    }

    /// Whether any rule claims this basename, regardless of whether its
    /// safety check would pass. Drives traversal pruning: a known target
    /// name is never descended into, matched or not.
    pub fn is_known_target_name(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name)
    }

    #[cfg(test)]
    pub(crate) fn from_rules(rules: Vec<TargetRule>) -> Registry {
        Registry { rules }
    }
}
