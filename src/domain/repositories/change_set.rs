//! Staged mutations awaiting a commit.

/// A single staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<E> {
    Insert(E),
    Update(E),
    Delete(E),
}

impl<E> Change<E> {
    /// Returns the record this change applies to.
    pub fn record(&self) -> &E {
        match self {
            Self::Insert(e) | Self::Update(e) | Self::Delete(e) => e,
        }
    }
}

/// Ordered list of staged inserts, updates and deletes.
///
/// Staging never touches the store. Changes become durable only when the set
/// is handed to [`super::Repository::save_changes`], which applies them in
/// order inside one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<E> {
    changes: Vec<Change<E>>,
}

impl<E> ChangeSet<E> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Stages an insert.
    pub fn add(&mut self, record: E) -> &mut Self {
        self.changes.push(Change::Insert(record));
        self
    }

    /// Stages a full replace of the row matching the record's identifier.
    pub fn update(&mut self, record: E) -> &mut Self {
        self.changes.push(Change::Update(record));
        self
    }

    /// Stages a row removal.
    pub fn delete(&mut self, record: E) -> &mut Self {
        self.changes.push(Change::Delete(record));
        self
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change<E>> {
        self.changes.iter()
    }
}

impl<E> Default for ChangeSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> IntoIterator for ChangeSet<E> {
    type Item = Change<E>;
    type IntoIter = std::vec::IntoIter<Change<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
