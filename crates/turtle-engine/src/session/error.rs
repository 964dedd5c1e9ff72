#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a session is already open in this process")]
    AlreadyOpen,
}
