use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Analysis,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// A task moves through `pending` (requested by the reducer, not yet
/// spawned) to `active` (spawned, cancel token known). Started or
/// completed events for any other id are stale.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub pending: Option<TaskId>,
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.pending.is_some() || self.active.is_some()
    }

    /// Records the id the reducer just asked the runtime to spawn.
    pub fn expect(&mut self, id: TaskId) {
        self.pending = Some(id);
    }

    /// Returns false when `started` is not the task we are waiting for.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        if self.pending != Some(started.id) {
            return false;
        }
        self.pending = None;
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
        true
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Forgets the task and hands back its cancel token, if any.
    pub fn clear(&mut self) -> Option<CancellationToken> {
        self.pending = None;
        self.active = None;
        self.cancel.take()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub analysis: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Analysis => &mut self.analysis,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.analysis.is_running()
    }
}
