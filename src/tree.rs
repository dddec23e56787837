use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::key::Key;
use crate::node::{self, Link, Node};

/// Selects which nodes are re-examined after an insertion or removal.
///
/// Both policies produce identical trees for the same sequence of operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rebalance {
    /// Walk the whole tree after every mutation, children before parents.
    #[default]
    WholeTree,
    /// Only re-examine the ancestors of the mutated position,
    /// bottom-up while the descent unwinds.
    SearchPath,
}

/// An ordered map implemented with an AVL tree.
///
/// ```
/// use avl_engine::{AvlTree, Error};
///
/// let mut tree = AvlTree::new();
/// tree.insert(10, "ten")?;
/// tree.insert(20, "twenty")?;
/// tree.insert(30, "thirty")?;
/// assert_eq!(tree.key_at_root(), Some(&20));
/// assert_eq!(tree.get(&10), Ok(&"ten"));
/// assert_eq!(tree.insert(10, "again"), Err(Error::DuplicateKey));
/// tree.remove(&10)?;
/// assert_eq!(tree.get(&10), Err(Error::KeyNotFound));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    pub(crate) root: Link<K, V>,
    num_keys: usize,
    rebalance: Rebalance,
}

impl<K: Key, V> AvlTree<K, V> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self::with_rebalance(Rebalance::default())
    }

    /// Creates an empty tree using the given rebalance policy.
    pub fn with_rebalance(rebalance: Rebalance) -> Self {
        Self {
            root: None,
            num_keys: 0,
            rebalance,
        }
    }

    /// Builds a tree from key-value pairs, stopping at the first error.
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value)?;
        }
        Ok(tree)
    }

    /// Returns the rebalance policy of this tree.
    pub fn rebalance_policy(&self) -> Rebalance {
        self.rebalance
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    /// Returns the number of levels of the tree, 0 if it is empty.
    ///
    /// The height is recomputed by walking the whole tree.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_keys = 0;
    }

    /// Returns the key stored in the root node, if any.
    pub fn key_at_root(&self) -> Option<&K> {
        self.root.as_ref().map(|root| &root.key)
    }

    /// Returns a reference to the value stored with the key.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: &K) -> Result<bool> {
        match self.find(key) {
            Ok(_) => Ok(true),
            Err(Error::KeyNotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Returns the key of the left child of the node holding `key`.
    /// `Ok(None)` means the node exists but has no left child.
    pub fn key_of_left_child_of(&self, key: &K) -> Result<Option<&K>> {
        self.find(key)
            .map(|node| node.left.as_ref().map(|left| &left.key))
    }

    /// Returns the key of the right child of the node holding `key`.
    /// `Ok(None)` means the node exists but has no right child.
    pub fn key_of_right_child_of(&self, key: &K) -> Result<Option<&K>> {
        self.find(key)
            .map(|node| node.right.as_ref().map(|right| &right.key))
    }

    /// Inserts a key-value pair.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present,
    /// in which case the tree is left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        Self::check_key(&key)?;
        if let Err(err) = Self::insert_at(&mut self.root, key, value, self.rebalance) {
            debug!(%err, "insert rejected");
            return Err(err);
        }
        self.num_keys += 1;
        if self.rebalance == Rebalance::WholeTree {
            self.root = node::rebalance(self.root.take());
        }
        debug!(num_keys = self.num_keys, "inserted key");
        Ok(())
    }

    /// Removes a key and its value.
    ///
    /// Returns `Ok(true)` once the key has been removed.
    pub fn remove(&mut self, key: &K) -> Result<bool> {
        Self::check_key(key)?;
        if let Err(err) = Self::remove_at(&mut self.root, key, self.rebalance) {
            debug!(%err, "remove rejected");
            return Err(err);
        }
        debug_assert!(self.num_keys >= 1);
        self.num_keys -= 1;
        if self.rebalance == Rebalance::WholeTree {
            self.root = node::rebalance(self.root.take());
        }
        debug!(num_keys = self.num_keys, "removed key");
        Ok(true)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    /// Panics if the tree violates ordering, balance or key count.
    pub fn check_consistency(&self) {
        // Check tree nodes
        let mut num_nodes = 0;
        Self::check_node(&self.root, None, None, &mut num_nodes);

        // Check number of nodes
        assert_eq!(num_nodes, self.num_keys);
        assert_eq!(self.in_order_traversal().len(), self.num_keys);
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn check_node(
        link: &Link<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
        num_nodes: &mut usize,
    ) -> usize {
        let Some(node) = link else {
            return 0;
        };

        // Check ordering against all ancestors
        assert!(!node.key.is_null());
        if let Some(lower) = lower {
            assert!(*lower < node.key);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper);
        }

        let left_height = Self::check_node(&node.left, lower, Some(&node.key), num_nodes);
        let right_height = Self::check_node(&node.right, Some(&node.key), upper, num_nodes);

        // Check AVL condition (nearly balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        *num_nodes += 1;
        1 + left_height.max(right_height)
    }

    fn check_key(key: &K) -> Result<()> {
        if key.is_null() {
            debug!("null key rejected");
            return Err(Error::IllegalNullKey);
        }
        Ok(())
    }

    fn find(&self, key: &K) -> Result<&Node<K, V>> {
        Self::check_key(key)?;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Ok(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        Err(Error::KeyNotFound)
    }

    fn insert_at(link: &mut Link<K, V>, key: K, value: V, rebalance: Rebalance) -> Result<()> {
        match link {
            None => *link = Some(Node::create(key, value)),
            Some(node) => match key.cmp(&node.key) {
                Ordering::Equal => return Err(Error::DuplicateKey),
                Ordering::Less => Self::insert_at(&mut node.left, key, value, rebalance)?,
                Ordering::Greater => Self::insert_at(&mut node.right, key, value, rebalance)?,
            },
        }
        if rebalance == Rebalance::SearchPath {
            Self::rebalance_link(link);
        }
        Ok(())
    }

    fn remove_at(link: &mut Link<K, V>, key: &K, rebalance: Rebalance) -> Result<()> {
        let Some(node) = link else {
            return Err(Error::KeyNotFound);
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::remove_at(&mut node.left, key, rebalance)?,
            Ordering::Greater => Self::remove_at(&mut node.right, key, rebalance)?,
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    // Node to-remove keeps its place and takes over the
                    // content of its in-order predecessor
                    let (left, (key, value)) = Self::take_max(left, rebalance);
                    node.left = left;
                    node.right = Some(right);
                    node.key = key;
                    node.value = value;
                }
                // Node to-remove is stem or leaf, unlink from tree
                (left, right) => *link = left.or(right),
            },
        }
        if rebalance == Rebalance::SearchPath {
            Self::rebalance_link(link);
        }
        Ok(())
    }

    /// Unlinks the rightmost node of a subtree.
    /// Returns the remaining subtree and the content of the unlinked node.
    fn take_max(mut node: Box<Node<K, V>>, rebalance: Rebalance) -> (Link<K, V>, (K, V)) {
        match node.right.take() {
            Some(right) => {
                let (right, max) = Self::take_max(right, rebalance);
                node.right = right;
                if rebalance == Rebalance::SearchPath {
                    node = node::rebalance_node(node);
                }
                (Some(node), max)
            }
            None => {
                let Node {
                    key, value, left, ..
                } = *node;
                (left, (key, value))
            }
        }
    }

    fn rebalance_link(link: &mut Link<K, V>) {
        if let Some(node) = link.take() {
            *link = Some(node::rebalance_node(node));
        }
    }
}

impl<K: Key, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key + fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.in_order(|node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}
