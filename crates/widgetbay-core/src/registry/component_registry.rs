//! Thread-safe name -> declaration map.

use crate::component::ComponentDeclaration;
use crate::error::{Result, WidgetError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{info, warn};

static INSTANCE: OnceLock<Arc<ComponentRegistry>> = OnceLock::new();

/// What a call to [`ComponentRegistry::register`] did to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// No component was registered under this name.
    Inserted,
    /// An equal declaration was already registered.
    Unchanged,
    /// A different declaration was overridden.
    Replaced { previous: ComponentDeclaration },
}

/// Registry of declared components.
///
/// At most one declaration per name; the last registration wins. The map is
/// guarded by a single mutex held only for the insert or lookup itself.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: Mutex<HashMap<String, ComponentDeclaration>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    ///
    /// Hosts normally use [`ComponentRegistry::instance`]; separate registries
    /// are useful for tests and embedded hosts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry, creating it on first access.
    pub fn instance() -> Arc<Self> {
        INSTANCE.get_or_init(|| Arc::new(Self::new())).clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ComponentDeclaration>> {
        // The map holds no invariant a panicking writer could break halfway.
        self.components.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a component, replacing any previous declaration of the same
    /// name.
    ///
    /// Local components must point at an existing directory.
    pub fn register(&self, component: ComponentDeclaration) -> Result<RegisterOutcome> {
        if let Some(abspath) = component.abspath() {
            if !abspath.is_dir() {
                return Err(WidgetError::config(format!(
                    "No such component directory: '{}'",
                    abspath.display()
                )));
            }
        }

        let existing = {
            let mut components = self.lock();
            components.insert(component.name().to_string(), component.clone())
        };

        let outcome = match existing {
            None => RegisterOutcome::Inserted,
            Some(previous) if previous == component => RegisterOutcome::Unchanged,
            Some(previous) => {
                warn!("{} overriding previously-registered {}", component, previous);
                RegisterOutcome::Replaced { previous }
            }
        };

        info!("Registered component {}", component);
        Ok(outcome)
    }

    /// The absolute directory of a locally served component.
    ///
    /// `None` for unregistered names and for url-backed components.
    pub fn component_path(&self, name: &str) -> Option<PathBuf> {
        self.lock().get(name).and_then(ComponentDeclaration::abspath)
    }

    /// The current declaration registered under `name`.
    pub fn get(&self, name: &str) -> Option<ComponentDeclaration> {
        self.lock().get(name).cloned()
    }

    /// Registered component names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tempfile::TempDir;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts WARN events seen on the current thread.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Run `f` and return how many warnings it logged.
    fn count_warnings(f: impl FnOnce()) -> usize {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        tracing::subscriber::with_default(subscriber, f);
        counter.0.load(Ordering::SeqCst)
    }

    #[test]
    fn test_register_local_component() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ComponentRegistry::new();

        let outcome = registry
            .register(ComponentDeclaration::from_path("slider", temp_dir.path()))
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::Inserted);
        assert_eq!(
            registry.component_path("slider"),
            Some(std::path::absolute(temp_dir.path()).unwrap())
        );
    }

    #[test]
    fn test_register_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let registry = ComponentRegistry::new();

        let result = registry.register(ComponentDeclaration::from_path("slider", &missing));

        match result {
            Err(WidgetError::Config { message }) => {
                assert!(message.contains("No such component directory"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
        assert!(registry.get("slider").is_none());
    }

    #[test]
    fn test_register_file_instead_of_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();
        let registry = ComponentRegistry::new();

        let result = registry.register(ComponentDeclaration::from_path("slider", &file));
        assert!(matches!(result, Err(WidgetError::Config { .. })));
    }

    #[test]
    fn test_url_component_has_no_path() {
        let registry = ComponentRegistry::new();
        registry
            .register(ComponentDeclaration::from_url(
                "slider",
                "http://localhost:3001",
            ))
            .unwrap();

        assert!(registry.get("slider").is_some());
        assert!(registry.component_path("slider").is_none());
        assert!(registry.component_path("unknown").is_none());
    }

    #[test]
    fn test_reregister_equal_is_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ComponentRegistry::new();
        let component = ComponentDeclaration::from_path("slider", temp_dir.path());

        registry.register(component.clone()).unwrap();
        let outcome = registry.register(component).unwrap();

        assert_eq!(outcome, RegisterOutcome::Unchanged);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregister_different_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ComponentRegistry::new();
        let local = ComponentDeclaration::from_path("slider", temp_dir.path());
        let remote = ComponentDeclaration::from_url("slider", "http://localhost:3001");

        registry.register(local.clone()).unwrap();
        let outcome = registry.register(remote.clone()).unwrap();

        assert_eq!(outcome, RegisterOutcome::Replaced { previous: local });
        assert_eq!(registry.get("slider"), Some(remote));
        assert!(registry.component_path("slider").is_none());
    }

    #[test]
    fn test_override_warns_exactly_once() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ComponentRegistry::new();
        let local = ComponentDeclaration::from_path("slider", temp_dir.path());
        let remote = ComponentDeclaration::from_url("slider", "http://localhost:3001");

        let warnings = count_warnings(|| {
            registry.register(local.clone()).unwrap();
        });
        assert_eq!(warnings, 0);

        let warnings = count_warnings(|| {
            registry.register(local.clone()).unwrap();
        });
        assert_eq!(warnings, 0);

        let warnings = count_warnings(|| {
            registry.register(remote).unwrap();
        });
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_names_sorted() {
        let registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        for name in ["knob", "chart", "slider"] {
            registry
                .register(ComponentDeclaration::from_url(name, "http://localhost"))
                .unwrap();
        }
        assert_eq!(registry.names(), vec!["chart", "knob", "slider"]);
    }

    #[test]
    fn test_instance_is_shared() {
        let a = ComponentRegistry::instance();
        let b = ComponentRegistry::instance();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(ComponentRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let name = format!("component-{}", i);
                    registry
                        .register(ComponentDeclaration::from_url(
                            name.clone(),
                            "http://localhost",
                        ))
                        .unwrap();
                    assert!(registry.get(&name).is_some());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 8);
    }
}
