pub mod portal;
pub mod session;

pub use portal::{PortalClient, Resource, DEFAULT_BASE_URL};
pub use session::SessionProvider;
