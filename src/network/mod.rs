pub mod network;
pub mod selection;
pub mod snapshot;
pub mod spec;

pub use network::Network;
pub use selection::ranked_choice;
pub use snapshot::{LayerSnapshot, NetworkSnapshot, NeuronSnapshot};
pub use spec::NetworkSpec;
