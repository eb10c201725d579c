#[derive(Debug, thiserror::Error)]
pub enum Error<H> {
    #[error(transparent)]
    Handler(H),
    #[error("failed to announce the client connection")]
    Announce(#[source] rumqttc::ClientError),
    #[error("failed to disconnect after error")]
    Disconnect(#[source] rumqttc::ClientError),
}
