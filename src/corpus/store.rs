use super::document::Document;

/// Ordered, append-only collection of ingested documents.
///
/// Positions are stable: the document at position `i` never changes, which is
/// what lets the vector index align its rows with this store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStore {
    documents: Vec<Document>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: Vec::with_capacity(capacity),
        }
    }

    /// Appends a document and returns its position.
    pub fn push(&mut self, document: Document) -> usize {
        self.documents.push(document);
        self.documents.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_vec(self) -> Vec<Document> {
        self.documents
    }
}

impl From<Vec<Document>> for CorpusStore {
    fn from(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}
