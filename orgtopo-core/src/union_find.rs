//! Component counter backing the weak-connectivity check.
//!
//! Nodes are merged edge by edge; `merge` reports how many components are
//! left so callers can stop as soon as the count reaches one.

#[derive(Clone, Debug)]
pub(crate) struct ComponentCounter {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl ComponentCounter {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count).collect(),
            size: vec![1; node_count],
            components: node_count,
        }
    }

    /// Representative of `node`, halving the path on the way up.
    ///
    /// Nodes outside the counter are their own representative.
    fn representative(&mut self, mut node: usize) -> usize {
        while let Some(&parent) = self.parent.get(node) {
            if parent == node {
                break;
            }
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(node) {
                *slot = grandparent;
            }
            node = grandparent;
        }
        node
    }

    /// Joins the components containing `a` and `b`, attaching the smaller
    /// one below the larger, and returns the number of components left.
    pub(crate) fn merge(&mut self, a: usize, b: usize) -> usize {
        let (a, b) = (self.representative(a), self.representative(b));
        if a == b {
            return self.components;
        }
        let size_of = |node: usize, sizes: &[usize]| sizes.get(node).copied().unwrap_or(1);
        let (big, small) = if size_of(a, &self.size) >= size_of(b, &self.size) {
            (a, b)
        } else {
            (b, a)
        };
        let absorbed = size_of(small, &self.size);
        if let Some(slot) = self.parent.get_mut(small) {
            *slot = big;
        }
        if let Some(slot) = self.size.get_mut(big) {
            *slot += absorbed;
        }
        self.components -= 1;
        self.components
    }
}
