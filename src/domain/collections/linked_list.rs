//! Ordered sequence with constant-time access to both ends.
//!
//! Nodes live in a slot vector and link to each other by index. The head
//! node's `prev` link always points at the current tail, so both ends are
//! reachable from the head without a separate tail pointer; every push and
//! pop keeps that wiring intact.

use std::fmt;

#[derive(Debug, Clone)]
struct Node<T> {
    value: Option<T>,
    next: Option<usize>,
    prev: usize,
}

/// Doubly linked list of values.
///
/// Cloning copies the list structure and clones each value; store shared
/// handles (`Arc<str>`, `Rc<T>`) to share ownership between clones.
pub struct LinkedList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Size of a possibly absent list; `-1` when there is no list.
    pub fn size_of(list: Option<&Self>) -> isize {
        list.map_or(-1, |list| list.len as isize)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a value at the back in O(1).
    pub fn push_back(&mut self, value: T) {
        let index = self.allocate(value);
        match self.head {
            None => {
                self.nodes[index].prev = index;
                self.head = Some(index);
            }
            Some(head) => {
                let tail = self.nodes[head].prev;
                self.nodes[tail].next = Some(index);
                self.nodes[index].prev = tail;
                self.nodes[head].prev = index;
            }
        }
        self.len += 1;
    }

    /// Removes the first value in O(1), `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        let tail = self.nodes[head].prev;
        match self.nodes[head].next {
            None => self.head = None,
            Some(next) => {
                self.nodes[next].prev = tail;
                self.head = Some(next);
            }
        }
        self.release(head)
    }

    /// Removes the last value in O(1), `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let head = self.head?;
        let tail = self.nodes[head].prev;
        if tail == head {
            self.head = None;
        } else {
            let new_tail = self.nodes[tail].prev;
            self.nodes[new_tail].next = None;
            self.nodes[head].prev = new_tail;
        }
        self.release(tail)
    }

    /// Value at `index`, walking from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.head.and_then(|head| self.nodes[head].value.as_ref())
    }

    pub fn last(&self) -> Option<&T> {
        self.head
            .and_then(|head| self.nodes[self.nodes[head].prev].value.as_ref())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Visits every value from front to back.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for value in self.iter() {
            visit(value);
        }
    }

    /// Drops every value and the node storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }

    fn allocate(&mut self, value: T) -> usize {
        let node = Node {
            value: Some(value),
            next: None,
            prev: 0,
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> Option<T> {
        let node = &mut self.nodes[index];
        node.next = None;
        let value = node.value.take();
        self.free.push(index);
        self.len -= 1;
        value
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = &self.list.nodes[index];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
