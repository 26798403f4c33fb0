use crate::group::Group;

#[derive(Debug, PartialEq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub enum TaskStatus {
    NotReady,
    Init,
    Ongoing,
    Done,
    Failed,
}

/// A reduce task: a slice of the grouped input, reduced by one worker.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct Task<K, V> {
    id: i32,
    groups: Vec<Group<K, V>>,
    status: TaskStatus,
    output: Option<String>,
}

impl<K, V> Task<K, V> {
    pub fn new(id: i32, groups: Vec<Group<K, V>>) -> Task<K, V> {
        Task {
            id,
            groups,
            status: TaskStatus::Init,
            output: None,
        }
    }

    pub fn add_group(&mut self, group: Group<K, V>) {
        self.groups.push(group);
    }

    pub fn get_groups(&self) -> &Vec<Group<K, V>> {
        &self.groups
    }

    /// Moves the groups out, leaving the task empty.
    pub fn take_groups(&mut self) -> Vec<Group<K, V>> {
        std::mem::take(&mut self.groups)
    }

    pub fn get_task_status(&self) -> TaskStatus {
        self.status
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub fn get_task_id(&self) -> i32 {
        self.id
    }

    pub fn get_task_output(&self) -> &Option<String> {
        &self.output
    }

    pub fn set_task_output(&mut self, output: Option<String>) {
        self.output = output;
    }
}
