//! Collaborative queue plugin
//!
//! Wires the classifier, synchronizer and reconciler together behind the
//! host's plugin contract. The plugin keeps one compiled classifier per
//! registered project, consumes `Queued`/`Dropped` events from the bus, and
//! answers the host's render hooks.

use crate::classify::QueueClassifier;
use crate::config::CollabConfig;
use crate::core::error_handling::log_error_with_context;
use crate::events::{Event, EventFilter, NotificationManager};
use crate::model::{MessageId, Project, UserId};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::Plugin;
use crate::plugin::types::PluginInfo;
use crate::status::{escape_html, MessageStatus, StatusReconciler};
use crate::store::SeriesStore;
use crate::sync::MembershipSynchronizer;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

const SUBSCRIBER_ID: &str = "collab";

/// Read-only info panel shown on the project admin page
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInfoPanel {
    pub title: String,
    pub class: String,
    pub content_html: String,
}

#[derive(Clone)]
struct ProjectEntry {
    project: Project,
    classifier: QueueClassifier,
}

/// The collaborative queue plugin
pub struct CollabPlugin {
    store: Arc<dyn SeriesStore>,
    notification_manager: Option<Arc<Mutex<NotificationManager>>>,
    projects: Arc<RwLock<HashMap<String, ProjectEntry>>>,
    reconciler: StatusReconciler,
    event_task: Option<tokio::task::JoinHandle<()>>,
}

impl CollabPlugin {
    pub fn new(store: Arc<dyn SeriesStore>) -> Self {
        Self {
            reconciler: StatusReconciler::new(store.clone()),
            store,
            notification_manager: None,
            projects: Arc::new(RwLock::new(HashMap::new())),
            event_task: None,
        }
    }

    /// Register a project, compiling its queue configuration
    ///
    /// A project whose configuration fails validation is rejected and stays
    /// unregistered: no queue name is special for it until the admin fixes
    /// the config.
    pub fn register_project(&self, project: Project) -> PluginResult<()> {
        let classifier = QueueClassifier::new(project.config()).map_err(|e| {
            let err = PluginError::ProjectConfiguration {
                project: project.name.clone(),
                message: e.to_string(),
            };
            log_error_with_context(&err, "Project registration");
            err
        })?;

        let mut projects = self.projects.write().unwrap_or_else(|e| e.into_inner());
        projects.insert(
            project.name.clone(),
            ProjectEntry {
                project,
                classifier,
            },
        );
        Ok(())
    }

    /// Read-only view of a registered project's queue configuration
    pub fn project_config(&self, project_name: &str) -> Option<CollabConfig> {
        let projects = self.projects.read().unwrap_or_else(|e| e.into_inner());
        projects
            .get(project_name)
            .map(|entry| entry.project.config().clone())
    }

    /// Message render hook: derive the status tags for one message
    ///
    /// Recomputed on every call from the membership records; nothing is
    /// persisted. Returns `None` for unregistered projects.
    pub fn prepare_message(
        &self,
        project_name: &str,
        message: &MessageId,
    ) -> Option<MessageStatus> {
        let entry = {
            let projects = self.projects.read().unwrap_or_else(|e| e.into_inner());
            projects.get(project_name).cloned()
        }?;
        Some(self.reconciler.derive_status(&entry.classifier, message))
    }

    /// Project admin hook: describe the active queue configuration
    ///
    /// Gated on the requester being a maintainer; everyone else gets `None`.
    pub fn prepare_project(
        &self,
        requesting_user: &UserId,
        project_name: &str,
    ) -> Option<ProjectInfoPanel> {
        let entry = {
            let projects = self.projects.read().unwrap_or_else(|e| e.into_inner());
            projects.get(project_name).cloned()
        }?;

        if !entry.project.maintained_by(requesting_user) {
            return None;
        }

        Some(ProjectInfoPanel {
            title: "Collaborative configuration".to_string(),
            class: "info".to_string(),
            content_html: render_config_html(entry.project.config()),
        })
    }

    fn manager(&self) -> PluginResult<Arc<Mutex<NotificationManager>>> {
        self.notification_manager
            .clone()
            .ok_or_else(|| PluginError::InitializationFailed {
                message: "notification manager not injected".to_string(),
            })
    }
}

fn render_config_html(config: &CollabConfig) -> String {
    let mut html = String::from(
        "<table class=\"table\"><thead><tr>\
         <th>Pattern</th><th>Title</th><th>Char</th><th>Type</th>\
         </tr></thead><tbody>",
    );
    for definition in &config.queues {
        html.push_str(&format!(
            "<tr><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&definition.regex),
            escape_html(&definition.title),
            escape_html(&definition.glyph),
            definition.kind
        ));
    }
    html.push_str("</tbody></table>");
    html
}

#[async_trait::async_trait]
impl Plugin for CollabPlugin {
    fn plugin_info(&self) -> PluginInfo {
        PluginInfo {
            name: "collab".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Shares review queue membership among project maintainers".to_string(),
            author: "Collabq Contributors".to_string(),
            api_version: crate::get_plugin_api_version(),
        }
    }

    fn is_compatible(&self, system_api_version: u32) -> bool {
        system_api_version >= crate::get_plugin_api_version()
    }

    fn set_notification_manager(&mut self, manager: Arc<Mutex<NotificationManager>>) {
        self.notification_manager = Some(manager);
    }

    async fn initialize(&mut self) -> PluginResult<()> {
        let manager = self.manager()?;

        let mut receiver = manager.lock().await.subscribe(
            SUBSCRIBER_ID.to_string(),
            EventFilter::All,
            "plugin:collab".to_string(),
        );

        let synchronizer = MembershipSynchronizer::new(self.store.clone(), manager.clone());
        let projects = self.projects.clone();
        let bus = manager.clone();

        self.event_task = Some(tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                bus.lock().await.record_event_processed(SUBSCRIBER_ID);
                let change = event.change().clone();

                // Fan-out re-publishes events for downstream listeners; our
                // own propagated events need no further processing.
                if change.is_propagated() {
                    continue;
                }

                let entry = {
                    let projects = projects.read().unwrap_or_else(|e| e.into_inner());
                    projects.get(&change.project).cloned()
                };
                let Some(entry) = entry else {
                    log::trace!(
                        "Event for unregistered project '{}', ignoring",
                        change.project
                    );
                    continue;
                };

                match event {
                    Event::Queued(_) => {
                        synchronizer
                            .on_queued(
                                &entry.classifier,
                                &change.user,
                                &entry.project,
                                &change.message,
                                &change.queue_name,
                            )
                            .await
                    }
                    Event::Dropped(_) => {
                        synchronizer
                            .on_dropped(
                                &entry.classifier,
                                &change.user,
                                &entry.project,
                                &change.message,
                                &change.queue_name,
                            )
                            .await
                    }
                }
            }
            log::debug!("Collab event loop stopped: bus closed");
        }));

        log::info!("Collab plugin initialized");
        Ok(())
    }

    async fn cleanup(&mut self) -> PluginResult<()> {
        if let Some(manager) = &self.notification_manager {
            manager.lock().await.unsubscribe(SUBSCRIBER_ID);
        }
        if let Some(task) = self.event_task.take() {
            task.abort();
        }
        Ok(())
    }
}
