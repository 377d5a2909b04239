//! Backend service - outbound port over the command bus

use anyhow::Result;
use literaplay_shared::BackendCall;

use crate::infrastructure::messaging::CommandBus;
use crate::ports::outbound::BackendPort;

/// Turns controller calls into `BackendCall` frames on the `CommandBus`.
#[derive(Clone)]
pub struct BackendService {
    commands: CommandBus,
}

impl BackendService {
    pub fn new(commands: CommandBus) -> Self {
        Self { commands }
    }

    fn queue(&self, call: BackendCall) -> Result<()> {
        tracing::debug!(method = call.method(), "Queueing backend call");
        self.commands.send(call)
    }
}

impl BackendPort for BackendService {
    fn request_initial_state(&self) -> Result<()> {
        self.queue(BackendCall::RequestInitialState)
    }

    fn verify_api_key(&self, key: &str) -> Result<()> {
        self.queue(BackendCall::VerifyApiKey {
            key: key.to_string(),
        })
    }

    fn save_api_key_decision(&self, key: &str, accepted: bool) -> Result<()> {
        self.queue(BackendCall::SaveApiKeyDecision {
            key: key.to_string(),
            accepted,
        })
    }

    fn start_chat_session(&self, work_key: &str, situation_key: Option<String>) -> Result<()> {
        self.queue(BackendCall::StartChatSession {
            work_key: work_key.to_string(),
            situation_key,
        })
    }

    fn send_user_message(&self, text: &str) -> Result<()> {
        self.queue(BackendCall::SendUserMessage {
            text: text.to_string(),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_calls_become_frames_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let service = BackendService::new(CommandBus::new(tx));

        service.request_initial_state().unwrap();
        service
            .start_chat_session("pod_igoto", Some("pod_igoto_sit1".into()))
            .unwrap();
        service.save_api_key_decision("AIza-123", true).unwrap();

        assert_eq!(rx.recv().await.unwrap(), BackendCall::RequestInitialState);
        assert_eq!(
            rx.recv().await.unwrap(),
            BackendCall::StartChatSession {
                work_key: "pod_igoto".into(),
                situation_key: Some("pod_igoto_sit1".into()),
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            BackendCall::SaveApiKeyDecision {
                key: "AIza-123".into(),
                accepted: true,
            }
        );
    }

    #[tokio::test]
    async fn test_closed_bridge_surfaces_error() {
        let (tx, rx) = mpsc::channel(1);
        let service = BackendService::new(CommandBus::new(tx));
        drop(rx);

        assert!(service.send_user_message("Здравей").is_err());
    }
}
