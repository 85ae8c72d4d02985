use tracing::error;

use crate::error::{LayoutError, Result};
use crate::layout::{NodeId, NodeKind, NodeRef, Scene};

/// Recursion cap for tree searches. Exceeding it is a fault, not a miss.
pub const MAX_DEPTH: usize = 64;

/// Where a node sits in the tree.
#[derive(Clone, Debug)]
pub struct Found<'a> {
    pub item: NodeRef<'a>,
    /// Immediate container; `None` for windows, whose parent is the scene.
    pub parent: Option<NodeRef<'a>>,
    /// Position within the parent's members (or the scene's window list).
    pub index: usize,
    /// Distance from the scene root; windows are at depth 1.
    pub depth: usize,
    /// Member indices from the scene down to `item`, for [`Scene::node_mut`].
    pub path: Vec<usize>,
}

impl Found<'_> {
    pub fn kind(&self) -> NodeKind {
        self.item.kind()
    }

    pub fn parent_path(&self) -> &[usize] {
        &self.path[..self.path.len() - 1]
    }

    /// Path of the window hosting this node.
    pub fn window_path(&self) -> &[usize] {
        &self.path[..1]
    }
}

/// Pre-order, depth-first, first match wins.
///
/// Searches with the built-in [`MAX_DEPTH`] cap. Use [`find_with_limit`] (or
/// [`crate::Dock::find`], which applies `Behavior::max_depth`) to honour a
/// configured cap.
pub fn find(scene: &Scene, id: NodeId) -> Result<Option<Found<'_>>> {
    find_with_limit(scene, id, MAX_DEPTH)
}

pub fn find_with_limit(scene: &Scene, id: NodeId, limit: usize) -> Result<Option<Found<'_>>> {
    let mut path = Vec::new();
    for (i, window) in scene.windows.iter().enumerate() {
        path.push(i);
        if let Some(found) = search(NodeRef::Window(window), None, i, 1, id, limit, &mut path)? {
            return Ok(Some(found));
        }
        path.pop();
    }
    Ok(None)
}

fn search<'a>(
    node: NodeRef<'a>,
    parent: Option<NodeRef<'a>>,
    index: usize,
    depth: usize,
    id: NodeId,
    limit: usize,
    path: &mut Vec<usize>,
) -> Result<Option<Found<'a>>> {
    if depth > limit {
        error!(depth, limit, "layout lookup exceeded depth cap");
        return Err(LayoutError::DepthExceeded { limit });
    }
    if node.id() == id {
        return Ok(Some(Found {
            item: node,
            parent,
            index,
            depth,
            path: path.clone(),
        }));
    }
    for (i, child) in node.children().into_iter().enumerate() {
        path.push(i);
        if let Some(found) = search(child, Some(node), i, depth + 1, id, limit, path)? {
            return Ok(Some(found));
        }
        path.pop();
    }
    Ok(None)
}

/// Find `id` only if it is a node of `kind`.
pub fn find_kind(scene: &Scene, id: NodeId, kind: NodeKind) -> Result<Option<Found<'_>>> {
    Ok(find(scene, id)?.filter(|f| f.kind() == kind))
}
