//! Domain events raised by aggregates and the publishers that deliver them.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DomainEvent {
    #[serde(rename_all = "camelCase")]
    StudentEnrolled {
        student_id: Uuid,
        school_id: Uuid,
        occurred_at: Timestamp,
    },
}

impl DomainEvent {
    pub fn student_enrolled(student_id: Uuid, school_id: Uuid) -> Self {
        DomainEvent::StudentEnrolled {
            student_id,
            school_id,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::StudentEnrolled { .. } => "StudentEnrolled",
        }
    }
}

/// Delivers events once the transaction that produced them has committed.
#[async_trait]
pub trait DomainEventPublisher: Send + Sync {
    async fn publish(&self, event: &DomainEvent);

    async fn publish_all(&self, events: &[DomainEvent]) {
        for event in events {
            self.publish(event).await;
        }
    }
}

/// Publishes each event as a structured log record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl DomainEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: &DomainEvent) {
        match event {
            DomainEvent::StudentEnrolled {
                student_id,
                school_id,
                occurred_at,
            } => tracing::info!(
                target: "school_api::events",
                event = event.name(),
                student_id = %student_id,
                school_id = %school_id,
                occurred_at = %occurred_at,
                "Domain event published"
            ),
        }
    }
}
