//! Recency List Module
//!
//! Arena-backed doubly-linked list that orders cache entries by recency.
//!
//! Entries live in a `Vec` of slots and link to their neighbours by slot
//! index instead of by reference, so the list owns every node outright and
//! no reference cycle exists. Vacated slots are recycled through a free list.
//!
//! Every live node is threaded on two chains:
//! - Recency: front = most recently used, back = least recently used
//! - Insertion: oldest insertion first; updates keep their position

use super::entry::Entry;

/// Sentinel for "no neighbour".
const NIL: usize = usize::MAX;

// == Chain Selector ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chain {
    Recency,
    Insertion,
}

#[derive(Debug, Clone, Copy)]
struct Links {
    prev: usize,
    next: usize,
}

impl Links {
    const DETACHED: Links = Links {
        prev: NIL,
        next: NIL,
    };
}

#[derive(Debug, Clone, Copy)]
struct Ends {
    head: usize,
    tail: usize,
}

impl Ends {
    const EMPTY: Ends = Ends {
        head: NIL,
        tail: NIL,
    };
}

#[derive(Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    recency: Links,
    insertion: Links,
}

impl<K, V> Node<K, V> {
    fn links(&self, chain: Chain) -> Links {
        match chain {
            Chain::Recency => self.recency,
            Chain::Insertion => self.insertion,
        }
    }

    fn links_mut(&mut self, chain: Chain) -> &mut Links {
        match chain {
            Chain::Recency => &mut self.recency,
            Chain::Insertion => &mut self.insertion,
        }
    }
}

// == Recency List ==
/// Doubly-linked recency ordering over cache entries.
///
/// Slot indices handed out by [`RecencyList::push_front`] stay valid until
/// the entry is removed, which is what lets the cache index map keys to
/// slots.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    recency: Ends,
    insertion: Ends,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            recency: Ends::EMPTY,
            insertion: Ends::EMPTY,
            len: 0,
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Push Front ==
    /// Stores `entry` as the most recently used and newest inserted entry.
    ///
    /// Returns the slot index of the new node.
    pub fn push_front(&mut self, entry: Entry<K, V>) -> usize {
        let node = Node {
            entry,
            recency: Links::DETACHED,
            insertion: Links::DETACHED,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_front(idx, Chain::Recency);
        self.attach_back(idx, Chain::Insertion);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry at `idx` as most recently used.
    ///
    /// Insertion order is unaffected. Unknown slots are ignored.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.recency.head == idx || self.node(idx).is_none() {
            return;
        }
        self.detach(idx, Chain::Recency);
        self.attach_front(idx, Chain::Recency);
    }

    // == Remove ==
    /// Unlinks the entry at `idx` and hands it back.
    ///
    /// Returns None if the slot holds no live entry.
    pub fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        self.node(idx)?;
        self.detach(idx, Chain::Recency);
        self.detach(idx, Chain::Insertion);

        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    // == Back ==
    /// Slot of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        (self.recency.tail != NIL).then_some(self.recency.tail)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let idx = self.back()?;
        self.remove(idx)
    }

    // == Accessors ==
    pub fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.node(idx).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.slots
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|node| &mut node.entry)
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.recency = Ends::EMPTY;
        self.insertion = Ends::EMPTY;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self, Chain::Recency)
    }

    /// Iterates in insertion order, oldest insertion first.
    pub fn iter_insertion(&self) -> Iter<'_, K, V> {
        Iter::new(self, Chain::Insertion)
    }

    // == Link Maintenance ==
    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn links_mut(&mut self, idx: usize, chain: Chain) -> Option<&mut Links> {
        self.slots
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|node| node.links_mut(chain))
    }

    fn ends(&self, chain: Chain) -> Ends {
        match chain {
            Chain::Recency => self.recency,
            Chain::Insertion => self.insertion,
        }
    }

    fn ends_mut(&mut self, chain: Chain) -> &mut Ends {
        match chain {
            Chain::Recency => &mut self.recency,
            Chain::Insertion => &mut self.insertion,
        }
    }

    fn attach_front(&mut self, idx: usize, chain: Chain) {
        let head = self.ends(chain).head;
        if let Some(links) = self.links_mut(idx, chain) {
            *links = Links { prev: NIL, next: head };
        }
        if head == NIL {
            self.ends_mut(chain).tail = idx;
        } else if let Some(links) = self.links_mut(head, chain) {
            links.prev = idx;
        }
        self.ends_mut(chain).head = idx;
    }

    fn attach_back(&mut self, idx: usize, chain: Chain) {
        let tail = self.ends(chain).tail;
        if let Some(links) = self.links_mut(idx, chain) {
            *links = Links { prev: tail, next: NIL };
        }
        if tail == NIL {
            self.ends_mut(chain).head = idx;
        } else if let Some(links) = self.links_mut(tail, chain) {
            links.next = idx;
        }
        self.ends_mut(chain).tail = idx;
    }

    fn detach(&mut self, idx: usize, chain: Chain) {
        let Some(Links { prev, next }) = self.node(idx).map(|node| node.links(chain)) else {
            return;
        };

        if prev == NIL {
            self.ends_mut(chain).head = next;
        } else if let Some(links) = self.links_mut(prev, chain) {
            links.next = next;
        }

        if next == NIL {
            self.ends_mut(chain).tail = prev;
        } else if let Some(links) = self.links_mut(next, chain) {
            links.prev = prev;
        }

        if let Some(links) = self.links_mut(idx, chain) {
            *links = Links::DETACHED;
        }
    }
}

// == Iterator ==
/// Borrowing iterator over the entries of one chain.
#[derive(Debug)]
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    chain: Chain,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(list: &'a RecencyList<K, V>, chain: Chain) -> Self {
        Self {
            list,
            chain,
            cursor: list.ends(chain).head,
            remaining: list.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor)?;
        self.cursor = node.links(self.chain).next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
