//! ProvisionConversationHandler - Creates the chat channel for an accepted proposal.
//!
//! Runs once per `ProposalAccepted` event. Triggers for the same proposal
//! are serialized in-process, and the conversation store rejects a second
//! live conversation per proposal, so at most one conversation exists even
//! when triggers race across processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::foundation::ProposalId;
use crate::domain::marketplace::{
    ChannelId, Conversation, NewConversation, ProposalAccepted, ProvisioningError, CHANNEL_TYPE,
};
use crate::ports::{ConversationRepository, MessagingProvider, ProjectRepository};

/// Result of provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created(Conversation),
    /// A live conversation already existed for the proposal.
    AlreadyProvisioned,
}

type ProposalLocks = Mutex<HashMap<ProposalId, Arc<tokio::sync::Mutex<()>>>>;

pub struct ProvisionConversationHandler {
    projects: Arc<dyn ProjectRepository>,
    conversations: Arc<dyn ConversationRepository>,
    messaging: Arc<dyn MessagingProvider>,
    locks: ProposalLocks,
}

impl ProvisionConversationHandler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        conversations: Arc<dyn ConversationRepository>,
        messaging: Arc<dyn MessagingProvider>,
    ) -> Self {
        Self {
            projects,
            conversations,
            messaging,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn handle(
        &self,
        event: &ProposalAccepted,
    ) -> Result<ProvisionOutcome, ProvisioningError> {
        let lease = self.lease(&event.proposal_id);
        let _guard = lease.lock.lock().await;
        self.provision(event).await
    }

    async fn provision(
        &self,
        event: &ProposalAccepted,
    ) -> Result<ProvisionOutcome, ProvisioningError> {
        if self
            .conversations
            .find_live_by_proposal(&event.proposal_id)
            .await?
            .is_some()
        {
            tracing::debug!(proposal_id = %event.proposal_id, "Conversation already provisioned");
            return Ok(ProvisionOutcome::AlreadyProvisioned);
        }

        // a. resolve the project
        let project = self
            .projects
            .find_by_id(&event.project_id)
            .await?
            .ok_or_else(|| ProvisioningError::ProjectNotFound(event.project_id.clone()))?;

        // b. derive the channel id
        let channel_id = ChannelId::for_project(&project.id);
        let members = [event.client_id.clone(), event.freelancer_id.clone()];

        // c. make sure both users exist at the provider
        self.messaging.upsert_users(&members).await.map_err(|err| {
            tracing::warn!(proposal_id = %event.proposal_id, error = %err, "Failed to upsert chat users");
            ProvisioningError::Provider(err.to_string())
        })?;

        // d. create the channel
        self.messaging
            .create_channel(CHANNEL_TYPE, &channel_id, &event.client_id, &members)
            .await
            .map_err(|err| {
                tracing::warn!(
                    proposal_id = %event.proposal_id,
                    channel_id = %channel_id,
                    error = %err,
                    "Failed to create chat channel"
                );
                ProvisioningError::Provider(err.to_string())
            })?;

        // e. record the mapping last
        let inserted = self
            .conversations
            .insert(NewConversation {
                project_id: project.id,
                proposal_id: event.proposal_id.clone(),
                channel_id: channel_id.clone(),
            })
            .await;

        match inserted {
            Ok(conversation) => {
                tracing::info!(
                    proposal_id = %event.proposal_id,
                    conversation_id = %conversation.id,
                    channel_id = %channel_id,
                    "Conversation provisioned"
                );
                Ok(ProvisionOutcome::Created(conversation))
            }
            Err(err) if err.is_conflict() => {
                tracing::info!(proposal_id = %event.proposal_id, "Conversation provisioned concurrently");
                Ok(ProvisionOutcome::AlreadyProvisioned)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn lease(&self, proposal_id: &ProposalId) -> LockLease<'_> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = locks.entry(proposal_id.clone()).or_default().clone();
        LockLease {
            locks: &self.locks,
            proposal_id: proposal_id.clone(),
            lock,
        }
    }
}

/// A trigger's claim on a per-proposal lock.
///
/// Dropping it, including when the trigger is cancelled while waiting,
/// removes the map entry once no other trigger holds or awaits the lock.
struct LockLease<'a> {
    locks: &'a ProposalLocks,
    proposal_id: ProposalId,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // the map's clone plus ours
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.proposal_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConversationRepository, InMemoryProjectRepository};
    use crate::adapters::stream::MockMessagingProvider;
    use crate::application::handlers::test_support::{self, CLIENT_ID, FREELANCER_ID, PROJECT_ID};
    use crate::domain::foundation::{ProjectId, UserId};
    use crate::ports::ProviderError;
    use std::time::Duration;

    struct Fixture {
        conversations: InMemoryConversationRepository,
        messaging: Arc<MockMessagingProvider>,
        handler: Arc<ProvisionConversationHandler>,
    }

    async fn fixture(messaging: MockMessagingProvider) -> Fixture {
        let projects = InMemoryProjectRepository::new();
        projects.insert(test_support::project()).await;
        let conversations = InMemoryConversationRepository::new();
        let messaging = Arc::new(messaging);

        let handler = Arc::new(ProvisionConversationHandler::new(
            Arc::new(projects),
            Arc::new(conversations.clone()),
            messaging.clone(),
        ));

        Fixture {
            conversations,
            messaging,
            handler,
        }
    }

    fn accepted() -> ProposalAccepted {
        ProposalAccepted {
            proposal_id: ProposalId::new(test_support::PROPOSAL_ID).unwrap(),
            project_id: ProjectId::new(PROJECT_ID).unwrap(),
            client_id: UserId::new(CLIENT_ID).unwrap(),
            freelancer_id: UserId::new(FREELANCER_ID).unwrap(),
        }
    }

    #[tokio::test]
    async fn creates_channel_and_conversation() {
        let f = fixture(MockMessagingProvider::new()).await;

        let outcome = f.handler.handle(&accepted()).await.unwrap();

        let ProvisionOutcome::Created(conversation) = outcome else {
            panic!("expected a new conversation");
        };
        assert_eq!(conversation.channel_id.as_str(), "project_project-1");

        let channels = f.messaging.channels();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].channel_type, "messaging");
        assert_eq!(channels[0].members.len(), 2);
        assert_eq!(f.messaging.upserted_users().len(), 2);
    }

    #[tokio::test]
    async fn second_trigger_is_already_provisioned() {
        let f = fixture(MockMessagingProvider::new()).await;
        f.handler.handle(&accepted()).await.unwrap();

        let outcome = f.handler.handle(&accepted()).await.unwrap();

        assert_eq!(outcome, ProvisionOutcome::AlreadyProvisioned);
        assert_eq!(f.conversations.all().await.len(), 1);
        assert_eq!(f.messaging.channels().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_triggers_create_one_conversation() {
        let f = fixture(MockMessagingProvider::new().with_delay(Duration::from_millis(20))).await;

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = f.handler.clone();
                tokio::spawn(async move { handler.handle(&accepted()).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if let ProvisionOutcome::Created(_) = task.await.unwrap().unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(f.conversations.all().await.len(), 1);
        assert_eq!(f.messaging.channels().len(), 1);
        assert!(f.handler.locks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_waiter_leaves_no_lock_behind() {
        let f = fixture(MockMessagingProvider::new().with_delay(Duration::from_millis(50))).await;

        let holder = {
            let handler = f.handler.clone();
            tokio::spawn(async move { handler.handle(&accepted()).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let waiter =
            tokio::time::timeout(Duration::from_millis(10), f.handler.handle(&accepted())).await;
        assert!(waiter.is_err());

        assert!(matches!(
            holder.await.unwrap().unwrap(),
            ProvisionOutcome::Created(_)
        ));
        assert!(f.handler.locks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn channel_failure_writes_nothing_and_retry_succeeds() {
        let f = fixture(MockMessagingProvider::new()).await;
        f.messaging
            .fail_next_channel(ProviderError::provider("channel quota exceeded"));

        let err = f.handler.handle(&accepted()).await.unwrap_err();
        assert!(matches!(err, ProvisioningError::Provider(_)));
        assert!(f.conversations.all().await.is_empty());

        let outcome = f.handler.handle(&accepted()).await.unwrap();
        assert!(matches!(outcome, ProvisionOutcome::Created(_)));
    }

    #[tokio::test]
    async fn upsert_failure_aborts_before_channel() {
        let f = fixture(MockMessagingProvider::new()).await;
        f.messaging.fail_next_upsert(ProviderError::network("reset"));

        assert!(f.handler.handle(&accepted()).await.is_err());
        assert!(f.messaging.channels().is_empty());
    }

    #[tokio::test]
    async fn missing_project_aborts() {
        let f = fixture(MockMessagingProvider::new()).await;
        let mut event = accepted();
        event.project_id = ProjectId::new("gone").unwrap();

        let err = f.handler.handle(&event).await.unwrap_err();

        assert!(matches!(err, ProvisioningError::ProjectNotFound(_)));
        assert!(f.messaging.upserted_users().is_empty());
    }

    #[tokio::test]
    async fn soft_deleted_conversation_is_reprovisioned() {
        let f = fixture(MockMessagingProvider::new()).await;
        f.handler.handle(&accepted()).await.unwrap();
        f.conversations
            .soft_delete_for_proposal(&accepted().proposal_id)
            .await;

        let outcome = f.handler.handle(&accepted()).await.unwrap();

        assert!(matches!(outcome, ProvisionOutcome::Created(_)));
        assert_eq!(f.conversations.all().await.len(), 2);
    }
}
