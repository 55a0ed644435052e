//! MCP server implementation
//!
//! The server owns one service per PSA entity and a tool router assembled
//! from the per-entity routers in [`super::tools`].

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::client::RemoteClient;
use crate::services::{
    CompanyService, ConfigurationItemService, ContactService, ContractService, ExpenseService,
    ProjectService, ResourceService, ServiceContext, TicketService,
};

/// Main MCP server coordinator
///
/// Generic over `C: RemoteClient` so tests drive every tool against a
/// scripted client.
pub struct McpServer<C: RemoteClient> {
    pub(crate) ctx: Arc<ServiceContext<C>>,
    pub(crate) companies: CompanyService<C>,
    pub(crate) contacts: ContactService<C>,
    pub(crate) tickets: TicketService<C>,
    pub(crate) projects: ProjectService<C>,
    pub(crate) resources: ResourceService<C>,
    pub(crate) contracts: ContractService<C>,
    pub(crate) configuration_items: ConfigurationItemService<C>,
    pub(crate) expenses: ExpenseService<C>,
    tool_router: ToolRouter<Self>,
}

impl<C: RemoteClient> Clone for McpServer<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            companies: self.companies.clone(),
            contacts: self.contacts.clone(),
            tickets: self.tickets.clone(),
            projects: self.projects.clone(),
            resources: self.resources.clone(),
            contracts: self.contracts.clone(),
            configuration_items: self.configuration_items.clone(),
            expenses: self.expenses.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<C: RemoteClient> McpServer<C> {
    /// Create a server whose services share `ctx`.
    pub fn new(ctx: impl Into<Arc<ServiceContext<C>>>) -> Self {
        let ctx = ctx.into();

        Self {
            companies: CompanyService::new(Arc::clone(&ctx)),
            contacts: ContactService::new(Arc::clone(&ctx)),
            tickets: TicketService::new(Arc::clone(&ctx)),
            projects: ProjectService::new(Arc::clone(&ctx)),
            resources: ResourceService::new(Arc::clone(&ctx)),
            contracts: ContractService::new(Arc::clone(&ctx)),
            configuration_items: ConfigurationItemService::new(Arc::clone(&ctx)),
            expenses: ExpenseService::new(Arc::clone(&ctx)),
            ctx,
            tool_router: Self::company_tools()
                + Self::contact_tools()
                + Self::ticket_tools()
                + Self::project_tools()
                + Self::resource_tools()
                + Self::contract_tools()
                + Self::configuration_item_tools()
                + Self::expense_tools()
                + Self::system_tools(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }
}

#[tool_handler(router = self.tool_router)]
impl<C: RemoteClient> ServerHandler for McpServer<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "PSA MCP Server - search, read, create and update companies, contacts, tickets, \
             projects, configuration items, expense reports and notes in the PSA. Searches \
             return a capped page by default; pass pageSize: -1 to request every match.",
        )
    }
}
