use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use futures::future;
use serde::{de::DeserializeOwned, Serialize};

use crate::group::Group;
use crate::task::{Task, TaskStatus};

/// Callback applied once per key. It receives the key and its group by value
/// and returns the key with the reduced value.
pub type ReduceFn<K, V, O> = fn(K, Option<Vec<V>>) -> (K, O);

/// Runs reduce tasks in-process.
pub struct Worker<K, V, O> {
    id: i32,
    reduce_fn: ReduceFn<K, V, O>,
    output_dir: Option<PathBuf>,
}

impl<K, V, O> std::fmt::Display for Worker<K, V, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Worker {{ id: {}, output_dir: {:?} }}",
            self.id, self.output_dir
        )
    }
}

fn reduce_all<K, V, O>(reduce_fn: ReduceFn<K, V, O>, groups: Vec<Group<K, V>>) -> Vec<(K, O)> {
    groups
        .into_iter()
        .map(|(key, values)| reduce_fn(key, values))
        .collect()
}

impl<K, V, O> Worker<K, V, O> {
    pub fn new(id: i32, reduce_fn: ReduceFn<K, V, O>) -> Self {
        Worker {
            id,
            reduce_fn,
            output_dir: None,
        }
    }

    /// Also write each task's output to `<dir>/<task id>.json`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Reduces every group of one task on the calling thread.
    pub fn do_reduce(&self, mut task: Task<K, V>) -> Vec<(K, O)> {
        reduce_all(self.reduce_fn, task.take_groups())
    }
}

impl<K, V, O> Worker<K, V, O>
where
    K: Serialize + Send + 'static,
    V: Send + 'static,
    O: Serialize + Send + 'static,
{
    /// Runs all tasks concurrently on the blocking pool.
    ///
    /// Every task comes back with its final status. Failed tasks carry no
    /// output; a reduce fn that panics, or an output file that cannot be
    /// written, only fails its own task.
    pub async fn run_tasks(
        &self,
        tasks: Vec<Task<K, V>>,
    ) -> Vec<(Task<K, V>, Option<Vec<(K, O)>>)> {
        let runs = tasks.into_iter().map(|mut task| {
            let reduce_fn = self.reduce_fn;
            let groups = task.take_groups();
            task.set_status(TaskStatus::Ongoing);
            log::debug!(
                "worker {} got task {} with {} groups",
                self.id,
                task.get_task_id(),
                groups.len()
            );

            async move {
                match tokio::task::spawn_blocking(move || reduce_all(reduce_fn, groups)).await {
                    Ok(output) => {
                        if let Some(dir) = &self.output_dir {
                            let path = dir.join(format!("{}.json", task.get_task_id()));
                            if let Err(e) = save_result(&output, &path) {
                                log::warn!(
                                    "worker {} task {} failed saving {}: {}",
                                    self.id,
                                    task.get_task_id(),
                                    path.display(),
                                    e
                                );
                                task.set_status(TaskStatus::Failed);
                                return (task, None);
                            }
                            task.set_task_output(Some(path.display().to_string()));
                        }
                        task.set_status(TaskStatus::Done);
                        (task, Some(output))
                    }
                    Err(e) => {
                        log::warn!("worker {} task {} failed: {}", self.id, task.get_task_id(), e);
                        task.set_status(TaskStatus::Failed);
                        (task, None)
                    }
                }
            }
        });

        future::join_all(runs).await
    }

    /// Runs all tasks and concatenates their outputs, in no particular order.
    pub async fn run(&self, tasks: Vec<Task<K, V>>) -> anyhow::Result<Vec<(K, O)>> {
        let n_tasks = tasks.len();
        let mut result = vec![];
        let mut failed = vec![];

        for (task, output) in self.run_tasks(tasks).await {
            match output {
                Some(output) => result.extend(output),
                None => failed.push(task.get_task_id()),
            }
        }

        if !failed.is_empty() {
            return Err(anyhow!("reduce tasks {:?} failed", failed));
        }
        log::info!(
            "worker {} completed {} tasks, {} keys reduced",
            self.id,
            n_tasks,
            result.len()
        );
        Ok(result)
    }
}

pub fn save_result<T: Serialize + ?Sized>(result: &T, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let serialized = serde_json::to_string(result)?;
    Ok(fs::write(path, serialized)?)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading {} failed", path.display()))?;
    let result: T = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {} failed", path.display()))?;
    Ok(result)
}
