use std::sync::Arc;

use crate::{gateway::GenerationGateway, outcome::AnswerOutcome};

/// Asks the model to reorder a task list by priority.
///
/// Pure function of its inputs aside from the network call: nothing is
/// persisted and no corpus is consulted.
pub struct TaskPrioritizer {
    gateway: Arc<GenerationGateway>,
}

impl TaskPrioritizer {
    pub fn new(gateway: Arc<GenerationGateway>) -> Self {
        Self { gateway }
    }

    pub async fn prioritize(&self, tasks: &[String], credential: &str) -> AnswerOutcome {
        let prompt = compose_prioritize_prompt(tasks);
        self.gateway.complete_soft(credential, &prompt).await
    }
}

fn compose_prioritize_prompt(tasks: &[String]) -> String {
    let task_list = tasks
        .iter()
        .map(|task| format!("- {task}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r"I have these tasks to do:
{task_list}

Reorder them by priority, most important first, and give a one-sentence reason
for each placement. Return a simple numbered list.
"
    )
}
