use motion_utils::numerical::Execution;

/// Options for how a ``SequenceTransformer`` runs. They never change the
/// numbers it produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformerOptions {
    pub execution: Execution,
}
impl TransformerOptions {
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }
    pub fn serial() -> Self {
        Self::new(Execution::Serial)
    }
}
