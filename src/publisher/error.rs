#[derive(Debug, thiserror::Error)]
pub enum PublishError<T> {
    #[error("payload serialization failure")]
    PayloadSerialization(#[from] serde_json::Error),
    #[error("transport error")]
    Transport(#[source] T),
}
