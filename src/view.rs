// src/view.rs
//! Program list view: one-shot loader state machine and render-ready cards

use anyhow::Result;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::classifier::AssetKind;
use crate::scope::ProgramScope;
use crate::source::ProgramSource;
use crate::types::Program;

/// Heading shown above the program cards
pub const HEADING: &str = "HackerOne Programs";

/// Shown while the request is in flight
pub const LOADING_MESSAGE: &str = "Loading programs...";

/// The only user-facing error; the cause is logged, never shown
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch programs.";

/// Bounty line marker when no bounty is advertised
pub const NO_BOUNTY: &str = "N/A";

/// Fetch programs from a source, independent of any view
pub async fn load_programs(source: &dyn ProgramSource) -> Result<Vec<Program>> {
    source.fetch_programs().await
}

/// Loader state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Created, not mounted yet
    Idle,
    Loading,
    Ready(Vec<Program>),
    Error(String),
}

/// Program list view
///
/// Fetches exactly once, on `mount`. A teardown signal received while the
/// request is in flight disposes the view and the response is discarded.
#[derive(Debug)]
pub struct ProgramsView {
    state: LoadState,
    disposed: bool,
}

impl ProgramsView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            disposed: false,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Issue the one request of this view and settle its state
    pub async fn mount(
        &mut self,
        source: &dyn ProgramSource,
        mut teardown: watch::Receiver<bool>,
    ) {
        if self.disposed || self.state != LoadState::Idle {
            debug!("View already mounted, ignoring mount");
            return;
        }

        if *teardown.borrow() {
            info!("View torn down before mount, skipping fetch");
            self.disposed = true;
            return;
        }

        self.state = LoadState::Loading;

        tokio::select! {
            result = load_programs(source) => self.settle(source.name(), result),
            Ok(_) = teardown.wait_for(|torn_down| *torn_down) => {
                warn!("View torn down while loading, discarding response");
                self.disposed = true;
            }
        }
    }

    fn settle(&mut self, source_name: &str, result: Result<Vec<Program>>) {
        match result {
            Ok(programs) => {
                info!("Loaded {} programs from {}", programs.len(), source_name);
                self.state = LoadState::Ready(programs);
            }
            Err(e) => {
                error!("Failed to load programs from {}: {:?}", source_name, e);
                self.state = LoadState::Error(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Cards for every program, in array order; empty unless ready
    pub fn cards(&self) -> Vec<ProgramCard> {
        match &self.state {
            LoadState::Ready(programs) => programs
                .iter()
                .enumerate()
                .map(|(idx, program)| ProgramCard::from_program(idx, program))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for ProgramsView {
    fn default() -> Self {
        Self::new()
    }
}

/// A checkbox + label pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectableItem {
    /// Stable id, `d-<program>-<item>` or `u-<program>-<item>`
    pub id: String,
    pub label: String,
    pub kind: AssetKind,
}

/// Render-ready projection of a program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramCard {
    pub name: String,
    pub url: String,
    pub handle: String,
    pub bounty: String,
    pub domains: Vec<SelectableItem>,
    pub urls: Vec<SelectableItem>,
}

impl ProgramCard {
    pub fn from_program(index: usize, program: &Program) -> Self {
        let scope = ProgramScope::from_program(program);
        debug!(
            "Program {}: {} domains, {} urls",
            program.handle,
            scope.domains.len(),
            scope.urls.len()
        );

        Self {
            name: program.name.clone(),
            url: program.url.clone(),
            handle: program.handle.clone(),
            bounty: format_bounty(program.max_bounty),
            domains: selectable(index, "d", AssetKind::Domain, scope.domains),
            urls: selectable(index, "u", AssetKind::Url, scope.urls),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &SelectableItem> {
        self.domains.iter().chain(self.urls.iter())
    }
}

fn selectable(
    program_idx: usize,
    prefix: &str,
    kind: AssetKind,
    labels: Vec<String>,
) -> Vec<SelectableItem> {
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| SelectableItem {
            id: format!("{}-{}-{}", prefix, program_idx, i),
            label,
            kind,
        })
        .collect()
}

/// `$<amount>` for an advertised, non-zero bounty; `N/A` otherwise
pub fn format_bounty(max_bounty: Option<f64>) -> String {
    match max_bounty {
        Some(amount) if amount != 0.0 && !amount.is_nan() => format!("${}", amount),
        _ => NO_BOUNTY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Target;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct MockSource {
        programs: Option<Vec<Program>>,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn ok(programs: Vec<Program>) -> Self {
            Self {
                programs: Some(programs),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                programs: None,
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ProgramSource for MockSource {
        fn name(&self) -> &str {
            "Mock"
        }

        async fn fetch_programs(&self) -> Result<Vec<Program>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match &self.programs {
                Some(programs) => Ok(programs.clone()),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    fn acme() -> Program {
        Program {
            name: "Acme".to_string(),
            url: "https://acme.com".to_string(),
            handle: "acme".to_string(),
            max_bounty: Some(500.0),
            targets: Some(vec![
                Target::new("*.acme.com"),
                Target::new("https://app.acme.com/login"),
                Target::new("not a target"),
            ]),
        }
    }

    #[tokio::test]
    async fn test_mount_success() {
        let source = MockSource::ok(vec![acme()]);
        let (_tx, rx) = watch::channel(false);
        let mut view = ProgramsView::new();
        assert_eq!(view.state(), &LoadState::Idle);

        view.mount(&source, rx).await;

        assert_eq!(view.state(), &LoadState::Ready(vec![acme()]));
        assert!(!view.is_disposed());
    }

    #[tokio::test]
    async fn test_mount_failure_sets_fixed_message() {
        let source = MockSource::failing();
        let (_tx, rx) = watch::channel(false);
        let mut view = ProgramsView::new();

        view.mount(&source, rx).await;

        assert_eq!(
            view.state(),
            &LoadState::Error(FETCH_ERROR_MESSAGE.to_string())
        );
        assert!(view.cards().is_empty());
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let source = MockSource::ok(vec![acme()]);
        let calls = source.calls.clone();
        let (_tx, rx) = watch::channel(false);
        let mut view = ProgramsView::new();

        view.mount(&source, rx.clone()).await;
        view.mount(&source, rx).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_teardown_before_mount_skips_fetch() {
        let source = MockSource::ok(vec![acme()]);
        let calls = source.calls.clone();
        let (_tx, rx) = watch::channel(true);
        let mut view = ProgramsView::new();

        view.mount(&source, rx).await;

        assert!(view.is_disposed());
        assert_eq!(view.state(), &LoadState::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_teardown_while_loading_discards_response() {
        let mut source = MockSource::ok(vec![acme()]);
        source.delay = Duration::from_secs(5);
        let (tx, rx) = watch::channel(false);
        let mut view = ProgramsView::new();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tx.send(true).ok();
        });
        view.mount(&source, rx).await;

        assert!(view.is_disposed());
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(view.cards().is_empty());
    }

    #[tokio::test]
    async fn test_false_teardown_value_does_not_cancel() {
        let mut source = MockSource::ok(vec![acme()]);
        source.delay = Duration::from_millis(100);
        let (tx, rx) = watch::channel(false);
        let mut view = ProgramsView::new();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(false).ok();
            tokio::time::sleep(Duration::from_secs(1)).await;
            drop(tx);
        });
        view.mount(&source, rx).await;

        assert!(!view.is_disposed());
        assert_eq!(view.state(), &LoadState::Ready(vec![acme()]));
    }

    #[tokio::test]
    async fn test_dropped_teardown_sender_does_not_cancel() {
        let source = MockSource::ok(vec![acme()]);
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let mut view = ProgramsView::new();

        view.mount(&source, rx).await;

        assert!(matches!(view.state(), LoadState::Ready(_)));
    }

    #[tokio::test]
    async fn test_load_programs_result() {
        let ok = load_programs(&MockSource::ok(vec![])).await;
        assert!(ok.unwrap().is_empty());

        let err = load_programs(&MockSource::failing()).await;
        assert!(err.is_err());
    }

    #[test]
    fn test_acme_card() {
        let card = ProgramCard::from_program(0, &acme());

        assert_eq!(card.name, "Acme");
        assert_eq!(card.url, "https://acme.com");
        assert_eq!(card.handle, "acme");
        assert_eq!(card.bounty, "$500");
        assert_eq!(card.domains.len(), 1);
        assert_eq!(card.domains[0].label, "*.acme.com");
        assert_eq!(card.domains[0].id, "d-0-0");
        assert_eq!(card.urls.len(), 1);
        assert_eq!(card.urls[0].label, "https://app.acme.com/login");
        assert_eq!(card.urls[0].id, "u-0-0");
        assert!(card.items().all(|item| item.label != "not a target"));
    }

    #[test]
    fn test_card_ids_use_program_index() {
        let program = Program {
            targets: Some(vec![Target::new("a.com"), Target::new("b.com")]),
            ..Default::default()
        };

        let card = ProgramCard::from_program(3, &program);

        let ids: Vec<&str> = card.domains.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d-3-0", "d-3-1"]);
    }

    #[test]
    fn test_format_bounty() {
        assert_eq!(format_bounty(Some(500.0)), "$500");
        assert_eq!(format_bounty(Some(1500.5)), "$1500.5");
        assert_eq!(format_bounty(None), "N/A");
        assert_eq!(format_bounty(Some(0.0)), "N/A");
        assert_eq!(format_bounty(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_cards_empty_when_not_ready() {
        let view = ProgramsView::new();
        assert!(view.cards().is_empty());
    }
}
