use crate::models::{DataPoint, DataPointKind};

/// Ordered, kind-indexed aggregate of a user's data points.
///
/// Multiple instances of one kind are allowed (e.g. two phone numbers).
/// Iteration order is deterministic: kind groups in the order their first
/// entry was inserted, then insertion order within each group. The wire
/// payload depends on this order, so the backing store is an ordered
/// association list rather than a hash map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPointList {
    groups: Vec<(DataPointKind, Vec<DataPoint>)>,
}

impl DataPointList {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Appends a data point under its kind. Never deduplicates.
    pub fn add(&mut self, data_point: DataPoint) {
        let kind = data_point.kind();
        match self.groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, group)) => group.push(data_point),
            None => self.groups.push((kind, vec![data_point])),
        }
    }

    /// Idempotent upsert for single-valued fields: removes every existing
    /// entry of the data point's kind, then inserts the new one.
    pub fn replace(&mut self, data_point: DataPoint) {
        self.remove_kind(data_point.kind());
        self.add(data_point);
    }

    /// Removes all entries of the given kind.
    pub fn remove_kind(&mut self, kind: DataPointKind) {
        self.groups.retain(|(k, _)| *k != kind);
    }

    /// Cloned snapshot of all entries of the given kind, in insertion
    /// order. Mutating the returned vector does not affect the list.
    pub fn get(&self, kind: DataPointKind) -> Vec<DataPoint> {
        self.groups
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, group)| group.clone())
            .unwrap_or_default()
    }

    /// First entry of the given kind, if any.
    pub fn first(&self, kind: DataPointKind) -> Option<&DataPoint> {
        self.groups
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, group)| group.first())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, group)| group.is_empty())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.len()).sum()
    }

    /// Iterates every data point in the deterministic serialization order.
    pub fn iter(&self) -> impl Iterator<Item = &DataPoint> {
        self.groups.iter().flat_map(|(_, group)| group.iter())
    }

    /// Mutable iteration in the same order; used by the user service for
    /// post-fetch taxonomy reconciliation.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DataPoint> {
        self.groups.iter_mut().flat_map(|(_, group)| group.iter_mut())
    }
}

impl FromIterator<DataPoint> for DataPointList {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        let mut list = DataPointList::new();
        for data_point in iter {
            list.add(data_point);
        }
        list
    }
}
