use std::fmt;

/// A single entry in the emulated namespace: a directory or a file.
///
/// Children are kept sorted by name with sibling names unique, so lookups
/// are a binary search and iteration order is deterministic without an
/// auxiliary map. A file's child list is always empty; nothing ever
/// inserts into a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    is_directory: bool,
    children: Vec<Node>,
}

impl Node {
    /// The distinguished root: an empty-named directory that is always
    /// present and never removable.
    pub fn root() -> Self {
        Self {
            name: String::new(),
            is_directory: true,
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            children: Vec::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Consumes the node and gives it a new name, keeping its whole
    /// subtree. Used by copy/move when the destination renames the entry.
    pub fn into_renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.children
            .binary_search_by(|child| child.name.as_str().cmp(name))
    }

    /// Binary-search lookup of a direct child by exact name.
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        let index = self.position(name).ok()?;
        Some(&self.children[index])
    }

    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Node> {
        let index = self.position(name).ok()?;
        Some(&mut self.children[index])
    }

    /// Walks the given segments starting at this node. Fails as soon as a
    /// segment is missing or a node that still has to be traversed into is
    /// a file. An empty slice resolves to the node itself, so the final
    /// node may be a file.
    pub fn resolve(&self, segments: &[String]) -> Option<&Node> {
        let mut current = self;
        for segment in segments {
            if !current.is_directory {
                return None;
            }
            current = current.find_child(segment)?;
        }
        Some(current)
    }

    pub fn resolve_mut(&mut self, segments: &[String]) -> Option<&mut Node> {
        let mut current = self;
        for segment in segments {
            if !current.is_directory {
                return None;
            }
            current = current.find_child_mut(segment)?;
        }
        Some(current)
    }

    /// Inserts a child at its sorted position and returns a reference to
    /// it. Returns `None` without mutating when a sibling with the same
    /// name already exists; insertion never overwrites.
    pub fn insert(&mut self, child: Node) -> Option<&mut Node> {
        match self.position(&child.name) {
            Ok(_) => None,
            Err(index) => {
                self.children.insert(index, child);
                Some(&mut self.children[index])
            }
        }
    }

    /// Removes the named child and returns it with its whole subtree, or
    /// `None` if no such child exists.
    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self.position(name).ok()?;
        Some(self.children.remove(index))
    }

    fn fmt_with_prefix(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        // An empty prefix marks the root, which prints as the bare
        // separator on its own line.
        let child_prefix = if prefix.is_empty() {
            writeln!(f, "/")?;
            String::from("|")
        } else {
            writeln!(
                f,
                "{}_{}{}",
                prefix,
                self.name,
                if self.is_directory { "/" } else { "" }
            )?;
            format!("{prefix} |")
        };
        for child in self.children() {
            child.fmt_with_prefix(f, &child_prefix)?;
        }
        Ok(())
    }
}

/// Depth-first pre-order dump: one node per line, directories suffixed
/// with `/`, indentation reflecting depth through the ` |` prefix.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_prefix(f, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with(name: &str, children: &[Node]) -> Node {
        let mut node = Node::directory(name);
        for child in children {
            node.insert(child.clone());
        }
        node
    }

    #[test]
    fn children_stay_sorted_regardless_of_insertion_order() {
        let mut root = Node::root();
        root.insert(Node::directory("zeta"));
        root.insert(Node::file("alpha"));
        root.insert(Node::directory("mid"));

        let names: Vec<_> = root
            .children()
            .iter()
            .map(|child| child.name().to_string())
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn insert_refuses_duplicate_names() {
        let mut root = Node::root();
        assert!(root.insert(Node::directory("a")).is_some());
        assert!(root.insert(Node::file("a")).is_none());
        assert_eq!(root.children().len(), 1);
        assert!(root.find_child("a").unwrap().is_directory());
    }

    #[test]
    fn find_child_returns_none_for_absent_name() {
        let mut root = Node::root();
        root.insert(Node::directory("a"));
        assert!(root.find_child("b").is_none());
    }

    #[test]
    fn remove_child_detaches_the_whole_subtree() {
        let mut root = Node::root();
        root.insert(directory_with("a", &[Node::file("inner.txt")]));

        let removed = root.remove_child("a").unwrap();
        assert_eq!(removed.children().len(), 1);
        assert!(root.children().is_empty());
        assert!(root.remove_child("a").is_none());
    }

    #[test]
    fn resolve_walks_nested_directories() {
        let mut root = Node::root();
        root.insert(directory_with(
            "a",
            &[directory_with("b", &[Node::file("c.txt")])],
        ));

        let segments = ["a".to_string(), "b".to_string(), "c.txt".to_string()];
        let node = root.resolve(&segments).unwrap();
        assert_eq!(node.name(), "c.txt");
        assert!(!node.is_directory());
    }

    #[test]
    fn resolve_of_no_segments_is_the_node_itself() {
        let root = Node::root();
        let node = root.resolve(&[]).unwrap();
        assert_eq!(node.name(), "");
    }

    #[test]
    fn resolve_fails_when_traversing_into_a_file() {
        let mut root = Node::root();
        root.insert(Node::file("f.txt"));
        let segments = ["f.txt".to_string(), "below".to_string()];
        assert!(root.resolve(&segments).is_none());
    }

    #[test]
    fn cloned_subtrees_are_independent() {
        let mut original = directory_with("a", &[Node::file("one.txt")]);
        let mut copy = original.clone();

        copy.insert(Node::file("two.txt"));
        original.remove_child("one.txt");

        assert_eq!(original.children().len(), 0);
        assert_eq!(copy.children().len(), 2);
    }

    #[test]
    fn display_matches_the_expected_dump_format() {
        let mut root = Node::root();
        root.insert(directory_with(
            "Dir1",
            &[directory_with("Dir2", &[Node::file("file.txt")])],
        ));
        root.insert(Node::file("root.txt"));

        let expected = "/\n\
                        |_Dir1/\n\
                        | |_Dir2/\n\
                        | | |_file.txt\n\
                        |_root.txt\n";
        assert_eq!(root.to_string(), expected);
    }
}
