pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Keyed background tasks. A new task aborts the running one with the same
/// key, so a slow response can never overwrite a newer one.
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn_load_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.tasks.remove(&task_id) {
            if !handle.is_finished() {
                tracing::debug!("Superseding running task {}", task_id);
                handle.abort();
            }
        }

        // Playlist loads use one key per playlist, drop the finished ones
        self.tasks.retain(|_, handle| !handle.is_finished());

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    pub fn is_running(&self, task_id: &str) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel all running tasks (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
