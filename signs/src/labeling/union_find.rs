/// Disjoint sets over labels. Nodes are created on first reference, so
/// `find` works for any label without prior registration.
#[derive(Debug, Default, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
        }
    }

    fn ensure(&mut self, x: u32) {
        let needed = x as usize + 1;
        if self.parent.len() < needed {
            let start = self.parent.len() as u32;
            self.parent.extend(start..=x);
        }
    }

    /// Root of `x`. Every node on the path is re-parented to the root.
    pub fn find(&mut self, x: u32) -> u32 {
        self.ensure(x);

        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Merges the sets of `a` and `b`. The larger root is attached to the smaller.
    pub fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (small, large) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[large as usize] = small;
        }
    }

    /// Number of nodes created so far.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
