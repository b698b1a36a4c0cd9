use std::collections::HashMap;

use uuid::Uuid;

use crate::editing::AnchorId;
use crate::upload::SourceFile;

/// Opaque identifier for one upload attempt.
///
/// Generated when the task is registered; identity is never tied to the
/// upload future or any other concurrency primitive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TaskId(Uuid);

impl TaskId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TaskState {
    Pending,
    Resolved,
}

/// One in-flight upload: the file being sent, the anchor tracking its
/// placeholder, and the span the placeholder occupies.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: TaskId,
    pub file: SourceFile,
    pub anchor: AnchorId,
    pub placeholder_len: usize,
    pub state: TaskState,
}

/// Bookkeeping for pending uploads. Pure data, no I/O.
///
/// An id is present from placeholder insertion until the task is claimed at
/// resolution, and never again afterwards — claiming is how reconciliation
/// stays at-most-once per task.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    tasks: HashMap<TaskId, UploadTask>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly inserted placeholder and return its task id.
    pub fn register(&mut self, file: SourceFile, anchor: AnchorId, placeholder_len: usize) -> TaskId {
        let id = TaskId::generate();
        self.tasks.insert(
            id,
            UploadTask {
                id,
                file,
                anchor,
                placeholder_len,
                state: TaskState::Pending,
            },
        );
        id
    }

    pub fn lookup(&self, id: TaskId) -> Option<&UploadTask> {
        self.tasks.get(&id)
    }

    /// Remove and return the task. Subsequent lookups and claims of the same
    /// id return `None` — no resurrection.
    pub fn claim(&mut self, id: TaskId) -> Option<UploadTask> {
        self.tasks.remove(&id).map(|mut task| {
            task.state = TaskState::Resolved;
            task
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
