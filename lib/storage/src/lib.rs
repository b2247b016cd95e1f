pub mod loader;
pub mod model;
pub mod workspace;

pub use loader::{load_catalog, read_catalog};
pub use model::LinearPriceModel;
pub use workspace::{Workspace, WorkspaceConfig};
