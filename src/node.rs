use std::cmp;

use tracing::trace;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A key/value pair placed in the tree.
///
/// Children are owned exclusively by their parent (the tree owns the root).
/// There are no parent links and no cached heights.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// Height of a subtree, recomputed by walking all of it.
/// An absent subtree has height 0, a leaf has height 1.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + cmp::max(height(&node.left), height(&node.right)),
    }
}

/// Height of the left subtree minus height of the right subtree.
/// Only defined for present nodes.
pub(crate) fn balance_factor<K, V>(node: &Node<K, V>) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

pub(crate) fn rotate_right<K, V>(mut grand_parent: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match grand_parent.left.take() {
        None => grand_parent,
        Some(mut parent) => {
            trace!("rotate right");
            grand_parent.left = parent.right.take();
            parent.right = Some(grand_parent);
            parent
        }
    }
}

pub(crate) fn rotate_left<K, V>(mut grand_parent: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match grand_parent.right.take() {
        None => grand_parent,
        Some(mut parent) => {
            trace!("rotate left");
            grand_parent.right = parent.left.take();
            parent.left = Some(grand_parent);
            parent
        }
    }
}

pub(crate) fn rotate_left_right<K, V>(mut grand_parent: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut parent) = grand_parent.left.take() else {
        return grand_parent;
    };
    let Some(mut pivot) = parent.right.take() else {
        grand_parent.left = Some(parent);
        return grand_parent;
    };
    trace!("rotate left-right");
    parent.right = pivot.left.take();
    grand_parent.left = pivot.right.take();
    pivot.left = Some(parent);
    pivot.right = Some(grand_parent);
    pivot
}

pub(crate) fn rotate_right_left<K, V>(mut grand_parent: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut parent) = grand_parent.right.take() else {
        return grand_parent;
    };
    let Some(mut pivot) = parent.left.take() else {
        grand_parent.right = Some(parent);
        return grand_parent;
    };
    trace!("rotate right-left");
    parent.left = pivot.right.take();
    grand_parent.right = pivot.left.take();
    pivot.left = Some(grand_parent);
    pivot.right = Some(parent);
    pivot
}

/// Rebalances every node of the subtree, children before parents,
/// and returns the new subtree root.
pub(crate) fn rebalance<K, V>(link: Link<K, V>) -> Link<K, V> {
    link.map(|mut node| {
        node.left = rebalance(node.left.take());
        node.right = rebalance(node.right.take());
        rebalance_node(node)
    })
}

/// Restores the AVL condition at a single node whose subtrees are balanced.
/// Returns the node itself or the root of the rotated subtree.
pub(crate) fn rebalance_node<K, V>(node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let balance = balance_factor(&node);
    if balance > 1 {
        // Left heavy
        let left_leans_right = node
            .left
            .as_deref()
            .is_some_and(|left| balance_factor(left) < 0);
        trace!(balance, left_leans_right, "rebalance left heavy node");
        if left_leans_right {
            rotate_left_right(node)
        } else {
            rotate_right(node)
        }
    } else if balance < -1 {
        // Right heavy
        let right_leans_left = node
            .right
            .as_deref()
            .is_some_and(|right| balance_factor(right) > 0);
        trace!(balance, right_leans_left, "rebalance right heavy node");
        if right_leans_left {
            rotate_right_left(node)
        } else {
            rotate_left(node)
        }
    } else {
        node
    }
}
