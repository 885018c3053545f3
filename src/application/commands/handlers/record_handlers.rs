//! Record Command Handlers
//!
//! 三个写入命令都归结为一次 `MergePatch`，区别只在于补丁怎么构造

use std::sync::Arc;

use crate::application::commands::{SaveAttendance, SaveMainLog, SaveProfile, WriteLayout};
use crate::application::error::ApplicationError;
use crate::application::ports::HierarchicalStorePort;
use crate::domain::{MergePatch, SubTree};

async fn apply(
    store: &Arc<dyn HierarchicalStorePort>,
    patch: MergePatch,
) -> Result<(), ApplicationError> {
    let (parent, entries) = patch.into_parts();
    tracing::debug!(parent = %parent, "Merging into sub-tree");
    store.merge(&parent, entries).await?;
    Ok(())
}

// ============================================================================
// SaveProfile
// ============================================================================

/// SaveProfile Handler
///
/// 档案总是按 profile_id 写入 `mines/Profiles/<profile_id>`
pub struct SaveProfileHandler {
    store: Arc<dyn HierarchicalStorePort>,
}

impl SaveProfileHandler {
    pub fn new(store: Arc<dyn HierarchicalStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: SaveProfile) -> Result<(), ApplicationError> {
        let patch = MergePatch::keyed(SubTree::Profiles, &command.profile_id, command.body);
        apply(&self.store, patch).await
    }
}

// ============================================================================
// SaveMainLog
// ============================================================================

/// SaveMainLog Handler
pub struct SaveMainLogHandler {
    store: Arc<dyn HierarchicalStorePort>,
    layout: WriteLayout,
}

impl SaveMainLogHandler {
    pub fn new(store: Arc<dyn HierarchicalStorePort>, layout: WriteLayout) -> Self {
        Self { store, layout }
    }

    pub async fn handle(&self, command: SaveMainLog) -> Result<(), ApplicationError> {
        let patch = match self.layout {
            WriteLayout::Flat => MergePatch::flat(SubTree::MainLogs, command.body),
            WriteLayout::KeyedById => {
                MergePatch::keyed(SubTree::MainLogs, &command.log_id, command.body)
            }
        };
        apply(&self.store, patch).await
    }
}

// ============================================================================
// SaveAttendance
// ============================================================================

/// SaveAttendance Handler
pub struct SaveAttendanceHandler {
    store: Arc<dyn HierarchicalStorePort>,
    layout: WriteLayout,
}

impl SaveAttendanceHandler {
    pub fn new(store: Arc<dyn HierarchicalStorePort>, layout: WriteLayout) -> Self {
        Self { store, layout }
    }

    pub async fn handle(&self, command: SaveAttendance) -> Result<(), ApplicationError> {
        let patch = match self.layout {
            WriteLayout::Flat => MergePatch::flat(SubTree::Attendance, command.body),
            WriteLayout::KeyedById => {
                let key = format!("{}/{}", command.date, command.worker_id);
                MergePatch::keyed(SubTree::Attendance, &key, command.body)
            }
        };
        apply(&self.store, patch).await
    }
}
