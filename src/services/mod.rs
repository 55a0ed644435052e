//! Entity services.
//!
//! Each service owns one PSA entity collection and is generic over the
//! [`RemoteClient`](crate::client::RemoteClient) it talks to. Services share a
//! [`ServiceContext`] that carries the client, the rate gate and the
//! cancellation token, and delegate searching to [`search::run`] so every
//! entity honours the same paging contract.

pub mod companies;
pub mod configuration_items;
pub mod contacts;
mod context;
pub mod contracts;
mod error;
pub mod expenses;
pub mod notes;
pub mod pagination;
pub mod projects;
pub mod resources;
pub mod search;
pub mod tickets;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod configuration_items_test;
#[cfg(test)]
mod expenses_test;

pub use companies::CompanyService;
pub use configuration_items::ConfigurationItemService;
pub use contacts::ContactService;
pub use context::ServiceContext;
pub use contracts::ContractService;
pub use error::{ServiceError, ServiceResult};
pub use expenses::ExpenseService;
pub use pagination::{MAX_PAGE_SIZE, PaginationConfig};
pub use projects::ProjectService;
pub use resources::ResourceService;
pub use search::{SearchOutcome, Termination};
pub use tickets::TicketService;
