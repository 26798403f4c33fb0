use anyhow::bail;

use crate::group::Group;
use crate::task::{Task, TaskStatus};

/// Upper bound on reduce tasks; every task is allocated before any work starts.
pub const MAX_N_REDUCE: i32 = 4096;

/// Splits grouped input into reduce tasks for a local worker.
#[derive(Debug, Clone)]
pub struct Coordinator<K, V> {
    groups: Vec<Group<K, V>>,
    n_reduce: i32,
    tasks: Vec<Task<K, V>>,
}

impl<K, V> Coordinator<K, V> {
    pub fn new(groups: Vec<Group<K, V>>, n_reduce: i32) -> anyhow::Result<Self> {
        if n_reduce < 1 {
            bail!("n_reduce must be at least 1, got {}", n_reduce);
        }
        if n_reduce > MAX_N_REDUCE {
            bail!("n_reduce must be at most {}, got {}", MAX_N_REDUCE, n_reduce);
        }
        Ok(Coordinator {
            groups,
            n_reduce,
            tasks: vec![],
        })
    }

    fn add_reduce_tasks(&mut self) {
        for i in 0..self.n_reduce {
            // ids are [1, n_reduce]
            let mut task = Task::new(i + 1, vec![]);
            task.set_status(TaskStatus::NotReady);
            self.tasks.push(task);
        }
    }

    /// Deals the groups round-robin over `n_reduce` tasks. Keys are already
    /// unique, so every key lands in exactly one task.
    pub fn slice(&mut self) {
        if self.tasks.is_empty() {
            self.add_reduce_tasks();
        }
        for (i, group) in std::mem::take(&mut self.groups).into_iter().enumerate() {
            self.tasks[i % self.n_reduce as usize].add_group(group);
        }
        for task in self.tasks.iter_mut() {
            task.set_status(TaskStatus::Init);
        }
        log::debug!(
            "sliced input into {} reduce tasks: {:?}",
            self.tasks.len(),
            self.tasks
                .iter()
                .map(|t| t.get_groups().len())
                .collect::<Vec<_>>()
        );
    }

    pub fn get_tasks(&self) -> &Vec<Task<K, V>> {
        &self.tasks
    }

    pub fn into_tasks(mut self) -> Vec<Task<K, V>> {
        if !self.groups.is_empty() || self.tasks.is_empty() {
            self.slice();
        }
        self.tasks
    }
}
