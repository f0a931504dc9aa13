pub mod portal_client;
pub mod refresh_client;

pub use portal_client::{MemberFetcher, PortalClient};
pub use refresh_client::{RefreshAction, WorkflowDispatchClient};

#[cfg(test)]
pub(crate) mod test_server;
