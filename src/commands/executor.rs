use snafu::{OptionExt, Snafu, ensure};
use tracing::{debug, error};

use crate::commands::Command;
use crate::filesystem::{Node, NodePath};

/// Where a copied or moved node ends up: the container directory's
/// segments plus the name the node takes there.
struct Placement {
    container: Vec<String>,
    name: String,
}

/// Applies structural commands to the namespace tree it owns. Carries no
/// state besides the tree; every command is validated and applied
/// independently, and a failing command leaves the tree untouched.
pub struct Executor {
    root: Node,
}

impl Executor {
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        debug!("Applying command: {command:?}");
        match command {
            Command::MakeDirectory { path } => self.make_directory(path),
            Command::MakeFile { path } => self.make_file(path),
            Command::Remove { path } => self.remove(path),
            Command::Copy {
                source,
                destination,
            } => self.copy(source, destination),
            Command::Move {
                source,
                destination,
            } => self.rename(source, destination),
        }
    }

    fn make_directory(&mut self, path: &NodePath) -> Result<(), CommandError> {
        let Some((name, container)) = path.split_last() else {
            // The root always exists, so creating it collides.
            return NameCollisionSnafu { path: path.clone() }.fail();
        };
        let directory = self
            .root
            .resolve_mut(container)
            .filter(|node| node.is_directory())
            .context(MissingParentSnafu { path: path.clone() })?;
        directory
            .insert(Node::directory(name))
            .context(NameCollisionSnafu { path: path.clone() })?;
        Ok(())
    }

    fn make_file(&mut self, path: &NodePath) -> Result<(), CommandError> {
        let Some((name, container)) = path.split_last() else {
            return NameCollisionSnafu { path: path.clone() }.fail();
        };
        let directory = self
            .root
            .resolve_mut(container)
            .filter(|node| node.is_directory())
            .context(MissingParentSnafu { path: path.clone() })?;
        match directory.find_child(name) {
            Some(existing) if existing.is_directory() => {
                NameCollisionSnafu { path: path.clone() }.fail()
            }
            Some(_) => {
                // An identically named file is fine; nothing to do.
                debug!("File '{path}' already exists, skipping");
                Ok(())
            }
            None => {
                let _ = directory.insert(Node::file(name));
                Ok(())
            }
        }
    }

    fn remove(&mut self, path: &NodePath) -> Result<(), CommandError> {
        ensure!(!path.is_root(), RootRemovalSnafu);
        let (name, container) = path.split_last().context(NotFoundSnafu { path: path.clone() })?;
        let directory = self
            .root
            .resolve_mut(container)
            .filter(|node| node.is_directory())
            .context(NotFoundSnafu { path: path.clone() })?;
        directory
            .remove_child(name)
            .context(NotFoundSnafu { path: path.clone() })?;
        Ok(())
    }

    fn copy(&mut self, source: &NodePath, destination: &NodePath) -> Result<(), CommandError> {
        let subtree = self.source_node(source)?.clone();
        let placement = self.placement_for(subtree.name(), destination)?;

        let directory = self
            .root
            .resolve_mut(&placement.container)
            .filter(|node| node.is_directory())
            .context(DestinationMissingSnafu {
                path: destination.clone(),
            })?;
        directory
            .insert(subtree.into_renamed(placement.name))
            .context(NameCollisionSnafu {
                path: destination.clone(),
            })?;
        Ok(())
    }

    fn rename(&mut self, source: &NodePath, destination: &NodePath) -> Result<(), CommandError> {
        let source_name = self.source_node(source)?.name().to_owned();
        let placement = self.placement_for(&source_name, destination)?;

        // Collision check up front, before anything is detached.
        let target = self
            .root
            .resolve(&placement.container)
            .filter(|node| node.is_directory())
            .context(DestinationMissingSnafu {
                path: destination.clone(),
            })?;
        if target.find_child(&placement.name).is_some() {
            return NameCollisionSnafu {
                path: destination.clone(),
            }
            .fail();
        }

        let (_, source_container) = source.split_last().context(NotFoundSnafu {
            path: source.clone(),
        })?;
        let source_container = source_container.to_vec();
        let subtree = self
            .root
            .resolve_mut(&source_container)
            .and_then(|directory| directory.remove_child(&source_name))
            .context(NotFoundSnafu {
                path: source.clone(),
            })?;

        // Re-resolve the destination container: detaching the source may
        // have taken it away (mv /a /a/b).
        match self
            .root
            .resolve_mut(&placement.container)
            .filter(|node| node.is_directory())
        {
            Some(directory) => {
                let _ = directory.insert(subtree.into_renamed(placement.name));
                Ok(())
            }
            None => {
                self.restore(&source_container, subtree);
                DestinationInsideSourceSnafu {
                    path: destination.clone(),
                }
                .fail()
            }
        }
    }

    /// Looks up the node a copy/move originates from. The root is not a
    /// valid source.
    fn source_node(&self, path: &NodePath) -> Result<&Node, CommandError> {
        path.split_last()
            .and_then(|(name, container)| {
                self.root
                    .resolve(container)
                    .filter(|node| node.is_directory())?
                    .find_child(name)
            })
            .context(NotFoundSnafu { path: path.clone() })
    }

    /// The shared copy/move destination rule: a destination that resolves
    /// to an existing directory receives the node under its source name;
    /// a destination that resolves to a file is occupied; anything else
    /// renames the node, and its container must already exist.
    fn placement_for(
        &self,
        source_name: &str,
        destination: &NodePath,
    ) -> Result<Placement, CommandError> {
        if let Some(existing) = self.root.resolve(destination.segments()) {
            if existing.is_directory() {
                return Ok(Placement {
                    container: destination.segments().to_vec(),
                    name: source_name.to_owned(),
                });
            }
            return DestinationOccupiedSnafu {
                path: destination.clone(),
            }
            .fail();
        }

        // The root always resolves, so an unresolved destination has a
        // base name.
        let (name, container) = destination.split_last().context(DestinationMissingSnafu {
            path: destination.clone(),
        })?;
        self.root
            .resolve(container)
            .filter(|node| node.is_directory())
            .context(DestinationMissingSnafu {
                path: destination.clone(),
            })?;
        Ok(Placement {
            container: container.to_vec(),
            name: name.to_owned(),
        })
    }

    /// Puts a detached subtree back where it came from after a move that
    /// could not complete.
    fn restore(&mut self, container: &[String], node: Node) {
        if let Some(directory) = self.root.resolve_mut(container) {
            let _ = directory.insert(node);
        } else {
            error!("Source directory vanished while restoring a failed move");
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(display("Cannot create '{}': intermediate directories are not created", path))]
    MissingParentError { path: NodePath },
    #[snafu(display("'{}': no such file or directory", path))]
    NotFoundError { path: NodePath },
    #[snafu(display("'{}': a node with that name already exists", path))]
    NameCollisionError { path: NodePath },
    #[snafu(display("A file already exists at destination '{}'", path))]
    DestinationOccupiedError { path: NodePath },
    #[snafu(display("Destination directory for '{}' doesn't exist", path))]
    DestinationMissingError { path: NodePath },
    #[snafu(display("Destination '{}' lies inside the moved subtree", path))]
    DestinationInsideSourceError { path: NodePath },
    #[snafu(display("Removal of the root is not allowed"))]
    RootRemovalError,
}
