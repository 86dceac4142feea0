use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::services::document::IngestedDocument;

#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub original_filename: String,
    pub size_bytes: usize,
    pub page_count: usize,
    pub char_count: usize,
    pub chunks: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(original_filename: &str, size_bytes: usize, ingested: IngestedDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_filename: original_filename.to_string(),
            size_bytes,
            page_count: ingested.page_count,
            char_count: ingested.char_count,
            chunks: ingested.chunks,
            created_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct Inner {
    docs: HashMap<Uuid, Arc<Document>>,
    order: VecDeque<Uuid>,
}

/// In-memory document holder. Oldest entries are evicted past `capacity`.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn insert(&self, doc: Document) -> Arc<Document> {
        let doc = Arc::new(doc);
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        inner.order.push_back(doc.id);
        inner.docs.insert(doc.id, doc.clone());

        while inner.docs.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if inner.docs.remove(&oldest).is_some() {
                tracing::debug!("Evicted document {oldest}");
            }
        }

        doc
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<Document>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.docs.get(id).cloned()
    }

    pub fn remove(&self, id: &Uuid) -> Option<Arc<Document>> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let removed = inner.docs.remove(id);
        if removed.is_some() {
            inner.order.retain(|k| k != id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
