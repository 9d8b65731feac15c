use thiserror::Error;

/// Errors raised while setting up a layout run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// An edge references a node index outside the node array
    #[error("edge {edge} references node {node}, but only {len} nodes were given")]
    DanglingEdge {
        edge: usize,
        node: usize,
        len: usize,
    },

    /// An option is outside its accepted range
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
