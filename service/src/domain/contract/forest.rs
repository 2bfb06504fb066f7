//! [`Forest`] of [`Contract`]s.

use std::collections::HashSet;

use tracing as log;

use super::{Contract, Depth, Id, Level};

/// Two-level tree of [`Contract`]s: root contracts, each with its own
/// amendments.
///
/// Every [`Forest`] is an immutable snapshot: cloning it is cheap, and every
/// mutation produces a new [`Forest`] leaving the original one untouched.
///
/// Amendments are only ever attached to a loaded root [`Contract`] with the
/// matching ID. Amendments whose root is not loaded are kept at the top
/// level.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Forest {
    /// [`Node`]s of this [`Forest`] keyed by [`Contract`] IDs.
    nodes: im::HashMap<Id, Node>,

    /// IDs of the top-level [`Contract`]s, in order.
    roots: im::Vector<Id>,
}

/// [`Contract`] placed into a [`Forest`].
#[derive(Clone, Debug, Eq, PartialEq)]
struct Node {
    /// Placed [`Contract`].
    contract: Contract,

    /// ID of the root [`Contract`] this [`Node`] is attached to.
    ///
    /// [`None`] for top-level [`Node`]s.
    attached_to: Option<Id>,

    /// IDs of the attached amendments, in order.
    children: im::Vector<Id>,
}

impl Node {
    /// Creates a new detached [`Node`] of the provided [`Contract`].
    fn new(contract: Contract) -> Self {
        Self {
            contract,
            attached_to: None,
            children: im::Vector::new(),
        }
    }
}

impl Forest {
    /// Creates a new empty [`Forest`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a [`Forest`] out of a flat list of [`Contract`]s, re-nesting
    /// amendments under their roots.
    ///
    /// Relative order of the provided [`Contract`]s is preserved on both
    /// levels. Only the first [`Contract`] with a given ID is kept.
    #[must_use]
    pub fn from_contracts<I>(contracts: I) -> Self
    where
        I: IntoIterator<Item = Contract>,
    {
        let mut seen = HashSet::new();
        let contracts = contracts
            .into_iter()
            .filter(|c| {
                let unique = seen.insert(c.id);
                if !unique {
                    log::warn!("duplicate `Contract(id: {})` skipped", c.id);
                }
                unique
            })
            .collect::<Vec<_>>();
        let root_ids = contracts
            .iter()
            .filter(|c| c.is_root())
            .map(|c| c.id)
            .collect::<HashSet<_>>();

        let mut forest = Self::new();
        let mut amendments = Vec::new();
        for contract in contracts {
            match contract.level {
                Level::Amendment { parent_id } if root_ids.contains(&parent_id) => {
                    amendments.push((parent_id, contract));
                }
                Level::Amendment { parent_id } => {
                    log::warn!(
                        "`Contract(id: {})` amends unknown \
                         `Contract(id: {parent_id})`, keeping it at top level",
                        contract.id,
                    );
                    forest.push_root(contract);
                }
                Level::Root => forest.push_root(contract),
            }
        }
        for (parent_id, contract) in amendments {
            forest.push_child(parent_id, contract);
        }
        forest
    }

    /// Finds a [`Contract`] by its ID, whatever its depth is.
    ///
    /// [`None`] is a regular outcome meaning that no such [`Contract`] is
    /// loaded.
    #[must_use]
    pub fn find(&self, id: Id) -> Option<&Contract> {
        self.nodes.get(&id).map(|n| &n.contract)
    }

    /// Indicates whether a [`Contract`] with the provided ID is loaded.
    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the structural [`Depth`] of the [`Contract`] with the provided
    /// ID.
    #[must_use]
    pub fn depth(&self, id: Id) -> Option<Depth> {
        self.nodes.get(&id).map(|n| {
            if n.attached_to.is_some() {
                Depth::Amendment
            } else {
                Depth::Root
            }
        })
    }

    /// Returns the root [`Contract`] the one with the provided ID is attached
    /// to.
    #[must_use]
    pub fn parent_of(&self, id: Id) -> Option<&Contract> {
        self.nodes
            .get(&id)
            .and_then(|n| n.attached_to)
            .and_then(|p| self.find(p))
    }

    /// Returns an iterator over the top-level [`Contract`]s.
    pub fn roots(&self) -> impl Iterator<Item = &Contract> + '_ {
        self.roots.iter().filter_map(|id| self.find(*id))
    }

    /// Returns an iterator over the amendments attached to the [`Contract`]
    /// with the provided ID.
    ///
    /// The iterator is empty if there is no such [`Contract`].
    pub fn children(&self, id: Id) -> impl Iterator<Item = &Contract> + '_ {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|id| self.find(*id))
    }

    /// Returns a depth-first iterator over all the [`Contract`]s: every
    /// top-level one followed by its amendments.
    pub fn iter(&self) -> impl Iterator<Item = (Depth, &Contract)> + '_ {
        self.roots().flat_map(|root| {
            std::iter::once((Depth::Root, root)).chain(
                self.children(root.id).map(|c| (Depth::Amendment, c)),
            )
        })
    }

    /// Returns the total number of [`Contract`]s in this [`Forest`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indicates whether this [`Forest`] has no [`Contract`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a new [`Forest`] with the provided [`Contract`] added.
    ///
    /// An amendment is appended to its root when the root is loaded, and to
    /// the top level otherwise. A [`Contract`] with an already loaded ID
    /// replaces the loaded one in place.
    #[must_use]
    pub fn with_inserted(&self, contract: Contract) -> Self {
        let mut forest = self.clone();

        if let Some(node) = forest.nodes.get_mut(&contract.id) {
            log::warn!(
                "`Contract(id: {})` is loaded already, replacing it",
                contract.id,
            );
            node.contract = contract;
            return forest;
        }

        match contract.level {
            Level::Amendment { parent_id }
                if forest.find(parent_id).is_some_and(|p| {
                    p.is_root() && forest.depth(parent_id) == Some(Depth::Root)
                }) =>
            {
                forest.push_child(parent_id, contract);
            }
            Level::Amendment { parent_id } => {
                log::warn!(
                    "`Contract(id: {parent_id})` is not loaded, placing \
                     `Contract(id: {})` at top level",
                    contract.id,
                );
                forest.push_root(contract);
            }
            Level::Root => forest.push_root(contract),
        }
        forest
    }

    /// Returns a new [`Forest`] without the [`Contract`] with the provided
    /// ID.
    ///
    /// The [`Contract`] is spliced out of its root's amendments if the root
    /// is loaded, or out of the top level otherwise. Removing a root
    /// [`Contract`] removes its amendments as well.
    ///
    /// [`None`] is returned if there is no such [`Contract`].
    #[must_use]
    pub fn without(&self, id: Id) -> Option<Self> {
        let mut forest = self.clone();
        let node = forest.nodes.remove(&id)?;

        let siblings = match node.attached_to.and_then(|p| forest.nodes.get_mut(&p)) {
            Some(parent) => &mut parent.children,
            None => &mut forest.roots,
        };
        if let Some(pos) = siblings.iter().position(|i| *i == id) {
            _ = siblings.remove(pos);
        }

        for child in &node.children {
            _ = forest.nodes.remove(child);
        }
        Some(forest)
    }

    /// Appends the provided [`Contract`] to the top level.
    fn push_root(&mut self, contract: Contract) {
        self.roots.push_back(contract.id);
        _ = self.nodes.insert(contract.id, Node::new(contract));
    }

    /// Appends the provided [`Contract`] to the amendments of the loaded root
    /// [`Contract`] with the `parent_id`.
    fn push_child(&mut self, parent_id: Id, contract: Contract) {
        let id = contract.id;
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.push_back(id);
            _ = self.nodes.insert(
                id,
                Node {
                    attached_to: Some(parent_id),
                    ..Node::new(contract)
                },
            );
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::contract::{Contract, Depth},
        fixture::{contract, id},
    };

    use super::Forest;

    fn ids<'a>(contracts: impl Iterator<Item = &'a Contract>) -> Vec<i64> {
        contracts.map(|c| c.id.into()).collect()
    }

    fn sample() -> Forest {
        Forest::from_contracts([
            contract(1, None),
            contract(2, Some(1)),
            contract(3, None),
            contract(4, Some(1)),
            contract(5, Some(3)),
        ])
    }

    #[test]
    fn nests_amendments_under_roots() {
        let forest = sample();

        assert_eq!(ids(forest.roots()), [1, 3]);
        assert_eq!(ids(forest.children(id(1))), [2, 4]);
        assert_eq!(ids(forest.children(id(3))), [5]);
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn nests_amendments_listed_before_their_root() {
        let forest =
            Forest::from_contracts([contract(2, Some(1)), contract(1, None)]);

        assert_eq!(ids(forest.roots()), [1]);
        assert_eq!(ids(forest.children(id(1))), [2]);
    }

    #[test]
    fn keeps_orphans_at_top_level() {
        let forest = Forest::from_contracts([
            contract(1, None),
            contract(2, Some(9)),
            contract(3, Some(1)),
            contract(4, Some(3)),
        ]);

        assert_eq!(ids(forest.roots()), [1, 2, 4]);
        assert_eq!(ids(forest.children(id(1))), [3]);
        assert_eq!(forest.depth(id(2)), Some(Depth::Root));
        assert_eq!(forest.depth(id(4)), Some(Depth::Root));
    }

    #[test]
    fn skips_duplicates() {
        let mut dup = contract(1, None);
        dup.name = "Duplikat".parse().unwrap();

        let forest = Forest::from_contracts([contract(1, None), dup]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest.find(id(1)), Some(&contract(1, None)));
    }

    #[test]
    fn bounds_depth_and_links_parents() {
        let forest = sample();

        for (depth, c) in forest.iter() {
            match depth {
                Depth::Root => assert!(forest.parent_of(c.id).is_none()),
                Depth::Amendment => {
                    assert_eq!(forest.children(c.id).count(), 0);
                    let parent = forest.parent_of(c.id).unwrap();
                    assert_eq!(Some(parent.id), c.parent_id());
                    assert!(forest.children(parent.id).any(|a| a.id == c.id));
                }
            }
        }
    }

    #[test]
    fn iterates_depth_first() {
        let order = sample()
            .iter()
            .map(|(d, c)| (d, i64::from(c.id)))
            .collect::<Vec<_>>();

        assert_eq!(
            order,
            [
                (Depth::Root, 1),
                (Depth::Amendment, 2),
                (Depth::Amendment, 4),
                (Depth::Root, 3),
                (Depth::Amendment, 5),
            ],
        );
    }

    #[test]
    fn finds_on_any_depth() {
        let forest = sample();

        assert_eq!(forest.find(id(3)), Some(&contract(3, None)));
        assert_eq!(forest.find(id(4)), Some(&contract(4, Some(1))));
        assert_eq!(forest.find(id(42)), None);
        assert_eq!(Forest::new().find(id(1)), None);
        assert_eq!(forest.depth(id(4)), Some(Depth::Amendment));
        assert_eq!(forest.parent_of(id(4)).map(|c| c.id), Some(id(1)));
    }

    #[test]
    fn inserts_amendment_under_loaded_root() {
        let forest = sample();

        let updated = forest.with_inserted(contract(6, Some(3)));

        assert_eq!(ids(updated.children(id(3))), [5, 6]);
        assert_eq!(ids(updated.roots()), [1, 3]);
        assert_eq!(forest, sample(), "snapshot must stay untouched");
    }

    #[test]
    fn inserts_root_and_orphan_at_top_level() {
        let forest = sample()
            .with_inserted(contract(6, None))
            .with_inserted(contract(7, Some(42)))
            .with_inserted(contract(8, Some(2)));

        assert_eq!(ids(forest.roots()), [1, 3, 6, 7, 8]);
        assert_eq!(forest.depth(id(8)), Some(Depth::Root));
    }

    #[test]
    fn replaces_already_loaded_contract() {
        let mut renamed = contract(2, Some(1));
        renamed.name = "Aneks nr 2".parse().unwrap();

        let forest = sample().with_inserted(renamed.clone());

        assert_eq!(forest.len(), 5);
        assert_eq!(forest.find(id(2)), Some(&renamed));
        assert_eq!(ids(forest.children(id(1))), [2, 4]);
    }

    #[test]
    fn removes_amendment_from_its_root() {
        let forest = sample();

        let updated = forest.without(id(2)).unwrap();

        assert_eq!(ids(updated.children(id(1))), [4]);
        assert_eq!(updated.find(id(2)), None);
        assert_eq!(forest, sample(), "snapshot must stay untouched");
    }

    #[test]
    fn removes_root_with_its_amendments() {
        let updated = sample().without(id(1)).unwrap();

        assert_eq!(ids(updated.roots()), [3]);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.find(id(4)), None);
    }

    #[test]
    fn removes_orphan_from_top_level() {
        let forest =
            Forest::from_contracts([contract(1, None), contract(2, Some(9))]);

        let updated = forest.without(id(2)).unwrap();

        assert_eq!(ids(updated.roots()), [1]);
    }

    #[test]
    fn removing_absent_contract_is_none() {
        assert!(sample().without(id(42)).is_none());
        assert!(Forest::new().without(id(1)).is_none());
    }
}
