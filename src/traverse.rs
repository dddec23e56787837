use std::collections::VecDeque;
use std::fmt;

use crate::key::Key;
use crate::node::{Link, Node};
use crate::tree::AvlTree;

/// Columns added per tree level by the printer.
const INDENT: usize = 5;

impl<K: Key, V> AvlTree<K, V> {
    /// Returns all keys in ascending order.
    pub fn in_order_traversal(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.num_keys());
        self.in_order(|node| keys.push(&node.key));
        keys
    }

    /// Returns all keys, each node before its left and right subtrees.
    pub fn pre_order_traversal(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.num_keys());
        traverse(&self.root, &mut |node| keys.push(&node.key), &mut |_| {}, &mut |_| {});
        keys
    }

    /// Returns all keys, each node after its left and right subtrees.
    pub fn post_order_traversal(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.num_keys());
        traverse(&self.root, &mut |_| {}, &mut |_| {}, &mut |node| keys.push(&node.key));
        keys
    }

    /// Returns all keys level by level, from the root downwards and
    /// from left to right within a level.
    pub fn level_order_traversal(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.num_keys());
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            keys.push(&node.key);
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
        keys
    }

    pub(crate) fn in_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Node<K, V>),
    {
        traverse(&self.root, &mut |_| {}, &mut f, &mut |_| {});
    }
}

impl<K: Key + fmt::Display, V> AvlTree<K, V> {
    /// Renders the tree sideways: right subtree above, left subtree below,
    /// each key indented by its depth.
    pub fn render(&self) -> String {
        Sideways(&self.root, 0).to_string()
    }

    /// Prints [`render`](Self::render) to standard output.
    pub fn print(&self) {
        print!("{}", Sideways(&self.root, 0));
    }
}

fn traverse<'a, K, V, Pre, In, Post>(
    link: &'a Link<K, V>,
    preorder: &mut Pre,
    inorder: &mut In,
    postorder: &mut Post,
) where
    Pre: FnMut(&'a Node<K, V>),
    In: FnMut(&'a Node<K, V>),
    Post: FnMut(&'a Node<K, V>),
{
    if let Some(node) = link.as_deref() {
        preorder(node);
        traverse(&node.left, preorder, inorder, postorder);
        inorder(node);
        traverse(&node.right, preorder, inorder, postorder);
        postorder(node);
    }
}

struct Sideways<'a, K, V>(&'a Link<K, V>, usize);

impl<K: fmt::Display, V> fmt::Display for Sideways<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Sideways(link, depth) = *self;
        if let Some(node) = link.as_deref() {
            write!(f, "{}", Sideways(&node.right, depth + 1))?;
            writeln!(f)?;
            writeln!(f, "{:indent$}{}", "", node.key, indent = depth * INDENT)?;
            write!(f, "{}", Sideways(&node.left, depth + 1))?;
        }
        Ok(())
    }
}
