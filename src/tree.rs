//! Converts a flat repository listing into the nested [`Node`] forest consumed
//! by the client-side tree widget. The conversion happens in two passes:
//!
//! 1. Classification: every path is split on [`SEPARATOR`] and each non-empty
//!    segment is tagged as a file or a directory, building an
//!    insertion-ordered mapping keyed by `(segment, kind)`.
//! 2. Shaping: the mapping is recursively converted into [`Node`]s.
//!
//! A segment is a file only when it is the final segment of its path and is
//! non-empty; `trunk/` ends with an empty segment, so `trunk` is a directory.
//! Classification is per occurrence, which means a name listed both as a file
//! (`x`) and as a directory (`x/y`) yields two sibling nodes rather than one.

use serde::Serialize;
use std::collections::HashMap;

/// Separates the segments of a listed path.
pub const SEPARATOR: char = '/';

/// The `icon` value the tree widget renders as a file.
pub const FILE_ICON: &str = "jstree-file";

/// A single entry in the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// The path segment, with no separators.
    pub text: String,

    /// Child entries in first-seen order. Always empty for files.
    pub children: Vec<Node>,

    /// [`FILE_ICON`] for files, empty for directories.
    pub icon: String,
}

impl Node {
    /// Returns true if the node was classified as a file.
    pub fn is_file(&self) -> bool {
        self.icon == FILE_ICON
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Directory,
    File,
}

// The classification mapping. `index` points into `entries`, which preserves
// the order in which keys were first seen.
#[derive(Default)]
struct Tagged {
    entries: Vec<(String, Kind, Tagged)>,
    index: HashMap<(String, Kind), usize>,
}

impl Tagged {
    // Returns the child for `(name, kind)`, inserting an empty one if absent.
    // Existing children are never replaced.
    fn child(&mut self, name: &str, kind: Kind) -> &mut Tagged {
        let key = (name.to_owned(), kind);
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push((name.to_owned(), kind, Tagged::default()));
                self.index.insert(key, i);
                i
            }
        };
        &mut self.entries[i].2
    }

    fn insert_path(&mut self, path: &str) {
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        let last = segments.len() - 1;
        let mut current = self;
        for (i, segment) in segments.into_iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            let kind = match i == last {
                true => Kind::File,
                false => Kind::Directory,
            };
            current = current.child(segment, kind);
        }
    }

    fn into_nodes(self) -> Vec<Node> {
        self.entries
            .into_iter()
            .filter(|(name, _, _)| !name.is_empty())
            .map(|(name, kind, children)| Node {
                text: name,
                children: children.into_nodes(),
                icon: match kind {
                    Kind::File => FILE_ICON.to_owned(),
                    Kind::Directory => String::new(),
                },
            })
            .collect()
    }
}

/// Builds the tree forest for a flat listing. The top-level nodes are returned
/// directly; there is no synthetic root. Node order follows the order in which
/// segments first appear in `paths`, and nothing is sorted.
pub fn build_tree<I, S>(paths: I) -> Vec<Node>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = Tagged::default();
    for path in paths {
        root.insert_path(path.as_ref());
    }
    root.into_nodes()
}
