use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::brew::{self, Brew};
use crate::error::{BrewError, TaskError};

/// A mutating brew action that runs in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Install(String),
    Uninstall(String),
    UpgradeAll,
}

impl Operation {
    fn apply(&self, brew: &dyn Brew) -> Result<(), BrewError> {
        match self {
            Operation::Install(name) => brew::install(brew, name),
            Operation::Uninstall(name) => brew::uninstall(brew, name),
            Operation::UpgradeAll => brew::upgrade_all(brew),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Install(name) => write!(f, "install {}", name),
            Operation::Uninstall(name) => write!(f, "uninstall {}", name),
            Operation::UpgradeAll => write!(f, "upgrade"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskState {
    #[default]
    Idle,
    Running(Operation),
}

/// What a finished task hands back to the interactive thread: the outcome
/// plus the installed list reloaded after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub operation: Operation,
    pub outcome: Result<(), TaskError>,
    pub packages: Vec<String>,
}

/// Guards the single background task slot. Mutating controls are enabled
/// only while this is idle.
#[derive(Debug, Default)]
pub struct TaskCoordinator {
    state: TaskState,
}

impl TaskCoordinator {
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TaskState::Running(_))
    }

    pub fn controls_enabled(&self) -> bool {
        !self.is_running()
    }

    /// Idle -> Running. A second task is rejected instead of queued.
    pub fn begin(&mut self, operation: Operation) -> Result<Operation, TaskError> {
        if let TaskState::Running(current) = &self.state {
            tracing::warn!(running = %current, rejected = %operation, "task already in flight");
            return Err(TaskError::Busy);
        }
        tracing::info!(operation = %operation, "task started");
        self.state = TaskState::Running(operation.clone());
        Ok(operation)
    }

    /// Running -> Idle. Returns the operation that was running, if any.
    pub fn finish(&mut self) -> Option<Operation> {
        match std::mem::take(&mut self.state) {
            TaskState::Running(operation) => {
                tracing::info!(operation = %operation, "task finished");
                Some(operation)
            }
            TaskState::Idle => None,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn join_failure(e: tokio::task::JoinError) -> String {
    if e.is_panic() {
        panic_message(e.into_panic())
    } else {
        e.to_string()
    }
}

/// Reloads the installed list on a blocking worker.
pub async fn load_installed(brew: Arc<dyn Brew>) -> Vec<String> {
    let marker = brew::list_failed_marker(brew.as_ref());
    tokio::task::spawn_blocking(move || brew::list_installed(brew.as_ref()))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %join_failure(e), "installed list worker failed");
            vec![marker]
        })
}

/// Runs a remote search on a blocking worker.
pub async fn load_search(brew: Arc<dyn Brew>, query: String) -> Vec<String> {
    tokio::task::spawn_blocking(move || brew::search(brew.as_ref(), &query))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %join_failure(e), "search worker failed");
            vec![brew::SEARCH_FAILED.to_string()]
        })
}

/// Runs `operation` off the interactive thread, then reloads the installed
/// list. The reload happens whatever the outcome, including a panic.
pub async fn execute(brew: Arc<dyn Brew>, operation: Operation) -> TaskReport {
    let worker_brew = Arc::clone(&brew);
    let worker_op = operation.clone();
    let outcome = match tokio::task::spawn_blocking(move || worker_op.apply(worker_brew.as_ref())).await {
        Ok(result) => result.map_err(TaskError::from),
        Err(e) => Err(TaskError::Panicked(join_failure(e))),
    };

    if let Err(e) = &outcome {
        tracing::warn!(operation = %operation, error = %e, "task failed");
    }

    let packages = load_installed(brew).await;
    TaskReport {
        operation,
        outcome,
        packages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew::MockBrew;

    #[test]
    fn begin_then_finish_round_trips_state() {
        let mut coordinator = TaskCoordinator::default();
        assert!(coordinator.controls_enabled());

        coordinator.begin(Operation::UpgradeAll).unwrap();
        assert!(!coordinator.controls_enabled());
        assert_eq!(coordinator.state(), &TaskState::Running(Operation::UpgradeAll));

        assert_eq!(coordinator.finish(), Some(Operation::UpgradeAll));
        assert!(coordinator.controls_enabled());
        assert_eq!(coordinator.finish(), None);
    }

    #[test]
    fn second_task_is_rejected() {
        let mut coordinator = TaskCoordinator::default();
        coordinator.begin(Operation::Install("wget".into())).unwrap();

        let err = coordinator.begin(Operation::UpgradeAll).unwrap_err();
        assert_eq!(err, TaskError::Busy);
        assert_eq!(
            coordinator.state(),
            &TaskState::Running(Operation::Install("wget".into()))
        );
    }

    fn brew_with_listing() -> MockBrew {
        let mut brew = MockBrew::new();
        brew.expect_location().return_const("brew".to_string());
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --formula")
            .returning(|_| Ok("wget\n".to_string()));
        brew.expect_run()
            .withf(|a| a.join(" ") == "list --cask")
            .returning(|_| Ok("firefox\n".to_string()));
        brew
    }

    #[tokio::test]
    async fn execute_runs_operation_then_refreshes() {
        let mut brew = brew_with_listing();
        brew.expect_run()
            .withf(|a| a.join(" ") == "install wget")
            .times(1)
            .returning(|_| Ok(String::new()));

        let report = execute(Arc::new(brew), Operation::Install("wget".into())).await;
        assert_eq!(report.outcome, Ok(()));
        assert_eq!(report.packages, vec!["firefox", "wget"]);
    }

    #[tokio::test]
    async fn execute_reports_failure_and_still_refreshes() {
        let mut brew = brew_with_listing();
        brew.expect_run()
            .withf(|a| a.join(" ") == "uninstall ghost")
            .returning(|_| {
                Err(BrewError::Failed {
                    command: "uninstall ghost".to_string(),
                    code: Some(1),
                    stderr: "No such keg".to_string(),
                })
            });

        let report = execute(Arc::new(brew), Operation::Uninstall("ghost".into())).await;
        assert!(matches!(report.outcome, Err(TaskError::Brew(BrewError::Failed { .. }))));
        assert_eq!(report.packages, vec!["firefox", "wget"]);
    }

    struct PanickingBrew;

    impl Brew for PanickingBrew {
        fn location(&self) -> String {
            "brew".to_string()
        }

        fn run(&self, args: &[String]) -> Result<String, BrewError> {
            match args.first().map(String::as_str) {
                Some("upgrade") => panic!("worker blew up"),
                _ => Ok("curl\n".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn execute_survives_a_panicking_worker() {
        let report = execute(Arc::new(PanickingBrew), Operation::UpgradeAll).await;
        assert_eq!(
            report.outcome,
            Err(TaskError::Panicked("worker blew up".to_string()))
        );
        assert_eq!(report.packages, vec!["curl", "curl"]);
    }

    #[tokio::test]
    async fn search_runs_on_worker() {
        let mut brew = MockBrew::new();
        brew.expect_run()
            .withf(|a| a.join(" ") == "search node")
            .returning(|_| Ok("node\nnodenv\n".to_string()));
        let results = load_search(Arc::new(brew), "node".to_string()).await;
        assert_eq!(results, vec!["node", "nodenv"]);
    }
}
