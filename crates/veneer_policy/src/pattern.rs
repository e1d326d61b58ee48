//! Pattern-tree selectors evaluated per class name.
//!
//! A rule document holds one pattern per line; `#` starts a comment.
//! Patterns are slash-separated class-name paths. `*` matches exactly one
//! segment; a trailing `**` matches any non-empty remainder:
//!
//! ```text
//! # expose the world package and every entity class
//! core/world/**
//! core/entity/*
//! core/Bootstrap
//! ```

use std::collections::HashMap;

use crate::error::PolicyError;

/// Segment key for the single-segment wildcard.
const WILDCARD: &str = "*";

/// An immutable tree of selector patterns.
///
/// Built once at load time; [`PatternTree::matches`] walks the tree per
/// slashed class name.
#[derive(Debug, Default, Clone)]
pub struct PatternTree {
    root: Node,
}

#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<String, Node>,
    /// A pattern terminates exactly here.
    terminal: bool,
    /// A `**` pattern covers the whole subtree below here.
    subtree: bool,
}

impl PatternTree {
    /// Parses a rule document.
    ///
    /// Fails on an empty segment, a `**` anywhere but the final position,
    /// or a pattern that is only `**`.
    pub fn parse(content: &str) -> Result<Self, PolicyError> {
        let mut tree = PatternTree::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let pattern = match raw.find('#') {
                Some(i) => raw[..i].trim(),
                None => raw.trim(),
            };
            if pattern.is_empty() {
                continue;
            }
            tree.insert(pattern, line)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, pattern: &str, line: usize) -> Result<(), PolicyError> {
        let err = |reason: &str| PolicyError::Pattern {
            line,
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = pattern.split('/').collect();
        let mut node = &mut self.root;
        for (i, segment) in segments.iter().enumerate() {
            let last = i + 1 == segments.len();
            match *segment {
                "" => return Err(err("empty segment")),
                "**" if !last => return Err(err("'**' is only allowed as the final segment")),
                "**" if i == 0 => return Err(err("'**' cannot be the whole pattern")),
                "**" => {
                    node.subtree = true;
                    return Ok(());
                }
                seg => {
                    node = node.children.entry(seg.to_string()).or_default();
                }
            }
        }
        node.terminal = true;
        Ok(())
    }

    /// Returns `true` when the slashed class name matches any pattern.
    pub fn matches(&self, class_name: &str) -> bool {
        if class_name.is_empty() {
            return false;
        }
        let segments: Vec<&str> = class_name.split('/').collect();
        Self::walk(&self.root, &segments)
    }

    fn walk(node: &Node, segments: &[&str]) -> bool {
        match segments.split_first() {
            None => node.terminal,
            Some((head, rest)) => {
                if node.subtree {
                    return true;
                }
                if let Some(child) = node.children.get(*head) {
                    if Self::walk(child, rest) {
                        return true;
                    }
                }
                if let Some(child) = node.children.get(WILDCARD) {
                    if Self::walk(child, rest) {
                        return true;
                    }
                }
                false
            }
        }
    }

    /// Returns `true` when the tree holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && !self.root.subtree && !self.root.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pattern() {
        let tree = PatternTree::parse("core/Bootstrap\n").unwrap();
        assert!(tree.matches("core/Bootstrap"));
        assert!(!tree.matches("core/Bootstrap2"));
        assert!(!tree.matches("core"));
        assert!(!tree.matches("core/Bootstrap/Inner"));
    }

    #[test]
    fn single_segment_wildcard() {
        let tree = PatternTree::parse("core/entity/*\n").unwrap();
        assert!(tree.matches("core/entity/Player"));
        assert!(!tree.matches("core/entity"));
        assert!(!tree.matches("core/entity/ai/Goal"));
    }

    #[test]
    fn subtree_wildcard() {
        let tree = PatternTree::parse("core/world/**\n").unwrap();
        assert!(tree.matches("core/world/World"));
        assert!(tree.matches("core/world/chunk/Chunk"));
        assert!(!tree.matches("core/world"));
        assert!(!tree.matches("core/entity/Player"));
    }

    #[test]
    fn comments_and_blank_lines() {
        let content = "# exposed classes\n\ncore/world/** # the world package\n";
        let tree = PatternTree::parse(content).unwrap();
        assert!(tree.matches("core/world/World"));
    }

    #[test]
    fn multiple_patterns_accumulate() {
        let tree = PatternTree::parse("core/world/**\ncore/entity/*\ncore/Bootstrap\n").unwrap();
        assert!(tree.matches("core/world/chunk/Chunk"));
        assert!(tree.matches("core/entity/Player"));
        assert!(tree.matches("core/Bootstrap"));
        assert!(!tree.matches("internal/Helper"));
    }

    #[test]
    fn empty_document_matches_nothing() {
        let tree = PatternTree::parse("# nothing selected\n").unwrap();
        assert!(tree.is_empty());
        assert!(!tree.matches("core/world/World"));
    }

    #[test]
    fn empty_segment_errors() {
        let err = PatternTree::parse("core//world\n").unwrap_err();
        assert!(matches!(err, PolicyError::Pattern { line: 1, .. }));
    }

    #[test]
    fn interior_subtree_wildcard_errors() {
        let err = PatternTree::parse("core/**/world\n").unwrap_err();
        assert!(matches!(err, PolicyError::Pattern { .. }));
    }

    #[test]
    fn bare_subtree_wildcard_errors() {
        let err = PatternTree::parse("**\n").unwrap_err();
        assert!(matches!(err, PolicyError::Pattern { .. }));
    }

    #[test]
    fn wildcard_and_literal_siblings() {
        let tree = PatternTree::parse("core/*/Event\ncore/world/World\n").unwrap();
        assert!(tree.matches("core/world/Event"));
        assert!(tree.matches("core/entity/Event"));
        assert!(tree.matches("core/world/World"));
        assert!(!tree.matches("core/world/Other"));
    }
}
