// Copyright (c) 2025 Bucket Cache Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Doubly linked access list stored in an arena.
//!
//! Nodes live in a `Vec` and link to each other by [`NodeId`] instead of by
//! pointer. Freed slots go on a free list and are reused by the next push,
//! so a full cache recycles the evicted tail's slot for the new head.
//!
//! ```text
//!   head ─► [id 2] ◄──► [id 0] ◄──► [id 1] ◄── tail
//!            MRU                      LRU
//! ```

/// Stable handle to a node of an [`AccessList`].
///
/// A handle stays valid until its node is removed. After that the slot may
/// be reused by another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Arena-backed doubly linked list ordered from most to least recently used.
#[derive(Debug)]
pub struct AccessList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> AccessList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value at the head (most recently used).
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the tail (least recently used).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a value at the head and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };
        self.attach_front(id);
        self.len += 1;
        id
    }

    /// Removes the tail node and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes a node and returns its value. The slot is recycled.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id)?;
        self.detach(id);
        let node = self.nodes[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Relinks an existing node at the head. Returns `false` for a stale
    /// handle.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head != Some(id) {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    /// Iterates from head (MRU) to tail (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn detach(&mut self, id: NodeId) {
        let (prev, next) = match self.node_mut(id) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.node_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> Default for AccessList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an [`AccessList`], head to tail.
pub struct Iter<'a, T> {
    list: &'a AccessList<T>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &AccessList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = AccessList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(collect(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"a"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = AccessList::new();
        let a = list.push_front("a");
        list.push_front("b");
        let c = list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(collect(&list), vec!["a", "c", "b"]);

        // Already at head
        list.move_to_front(a);
        assert_eq!(collect(&list), vec!["a", "c", "b"]);

        list.move_to_front(c);
        assert_eq!(collect(&list), vec!["c", "a", "b"]);
        assert_eq!(list.back(), Some(&"b"));
    }

    #[test]
    fn test_pop_back_and_slot_reuse() {
        let mut list = AccessList::new();
        let a = list.push_front("a");
        list.push_front("b");

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.get(a), None);
        assert!(!list.move_to_front(a));

        let d = list.push_front("d");
        assert_eq!(d, a);
        assert_eq!(collect(&list), vec!["d", "b"]);
    }

    #[test]
    fn test_remove_middle_and_drain() {
        let mut list = AccessList::new();
        list.push_front(1);
        let two = list.push_front(2);
        list.push_front(3);

        assert_eq!(list.remove(two), Some(2));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(list.remove(two), None);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn test_get_mut() {
        let mut list = AccessList::new();
        let id = list.push_front(10);
        if let Some(value) = list.get_mut(id) {
            *value += 1;
        }
        assert_eq!(list.get(id), Some(&11));
    }
}
