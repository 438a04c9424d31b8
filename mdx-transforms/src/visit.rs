//! In-place tree traversal.
//!
//! Two traversal shapes cover everything the transforms need: a plain
//! mutable visit of every node, and a child-editing visit that can replace
//! or remove a node at its index in the parent's `children` list. Both are
//! preorder and depth-first, and both are fallible so a visitor can
//! propagate log-write failures with `?`.

use crate::ast::Node;

/// Decision returned by a child-editing visitor for each visited child.
#[derive(Debug, PartialEq)]
pub enum Edit {
  /// Leave the node alone and descend into its children.
  Keep,
  /// Replace the node at the same index. The replacement is not descended
  /// into.
  Replace(Node),
  /// Remove the node from its parent entirely. The node that shifts into
  /// the vacated slot is visited next.
  Remove,
}

/// Visit every node in the tree, mutably, in preorder.
///
/// # Errors
///
/// Propagates the first error returned by the visitor.
pub fn try_visit_mut<E, F>(node: &mut Node, visitor: &mut F) -> Result<(), E>
where
  F: FnMut(&mut Node) -> Result<(), E>,
{
  visitor(node)?;
  if let Some(children) = node.children_mut() {
    for child in children {
      try_visit_mut(child, visitor)?;
    }
  }
  Ok(())
}

/// Visit every child position in the tree, allowing in-place replacement or
/// removal.
///
/// The root itself is never offered to the visitor since it has no parent to
/// edit it in. After a [`Edit::Keep`] the child's own children are visited;
/// replacements and removals keep the sibling list internally consistent
/// (no holes, order preserved).
///
/// # Errors
///
/// Propagates the first error returned by the visitor.
pub fn try_edit_children<E, F>(node: &mut Node, visitor: &mut F) -> Result<(), E>
where
  F: FnMut(&mut Node) -> Result<Edit, E>,
{
  let Some(children) = node.children_mut() else {
    return Ok(());
  };

  let mut index = 0;
  while index < children.len() {
    match visitor(&mut children[index])? {
      Edit::Keep => {
        try_edit_children(&mut children[index], visitor)?;
        index += 1;
      },
      Edit::Replace(replacement) => {
        children[index] = replacement;
        index += 1;
      },
      Edit::Remove => {
        children.remove(index);
      },
    }
  }
  Ok(())
}
