/// Byte-keyed prefix tree. Node 0 is the root; every other node lies on the
/// path of at least one inserted word.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Sorted by edge byte.
    children: Vec<(u8, u32)>,
    terminal: bool,
}

impl TrieNode {
    fn child(&self, byte: u8) -> Option<u32> {
        self.children
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|i| self.children[i].1)
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Insert a word, returning `true` if it was not already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut index = 0usize;
        for &byte in word.as_bytes() {
            index = match self.nodes[index].children.binary_search_by_key(&byte, |(b, _)| *b) {
                Ok(pos) => self.nodes[index].children[pos].1 as usize,
                Err(pos) => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[index].children.insert(pos, (byte, next as u32));
                    next
                }
            };
        }

        let node = &mut self.nodes[index];
        let inserted = !node.terminal;
        node.terminal = true;
        inserted
    }

    pub fn root(&self) -> Prefix<'_> {
        Prefix {
            trie: self,
            index: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A position in the trie reached by following some prefix from the root.
///
/// Holding a `Prefix` lets a caller extend a partial word one fragment at a
/// time without walking the tree from the root again.
#[derive(Debug, Clone, Copy)]
pub struct Prefix<'a> {
    trie: &'a Trie,
    index: u32,
}

impl<'a> Prefix<'a> {
    /// Follow `fragment` from this position. `None` means no stored word
    /// continues with it.
    pub fn extend(self, fragment: &str) -> Option<Prefix<'a>> {
        let mut index = self.index;
        for &byte in fragment.as_bytes() {
            index = self.trie.nodes[index as usize].child(byte)?;
        }
        Some(Prefix {
            trie: self.trie,
            index,
        })
    }

    /// Whether the text spelled so far is itself a stored word.
    pub fn is_word(self) -> bool {
        self.trie.nodes[self.index as usize].terminal
    }
}
