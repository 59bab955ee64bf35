use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// Structured audit trail. Events are emitted on the `audit` tracing
/// target; a persistent sink subscribes to that target without touching
/// call sites.
pub struct AuditService;

impl AuditService {
    pub fn log_event(
        actor: Option<Uuid>,
        action: &str,
        entity: Option<&str>,
        entity_id: Option<&str>,
        metadata: Value,
    ) {
        info!(
            target: "audit",
            actor = ?actor,
            action = %action,
            entity = ?entity,
            entity_id = ?entity_id,
            metadata = %metadata,
        );
    }
}
