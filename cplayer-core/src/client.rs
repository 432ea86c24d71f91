//! Client entry point.
//!
//! ```ignore
//! use cplayer::{client::Client, config::ClientConfig};
//!
//! let client = Client::new(transport, ClientConfig::builder("100.books").build()?);
//! let books = client.default_collection();
//! ```

use crate::{
    collection::Collection,
    config::ClientConfig,
    statement::Statement,
    transport::Transport,
};

/// Owns a transport and the configuration shared by every collection.
#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    /// Creates a new client with the given transport and configuration.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Opens a handle on the collection at `path`.
    pub fn collection<'a>(&'a self, path: &str) -> Collection<'a, T> {
        Collection::new(Statement::new(path), self.config.scope(), &self.transport)
    }

    /// Opens a handle on the configured collection.
    pub fn default_collection(&self) -> Collection<'_, T> {
        self.collection(&self.config.database)
    }

    /// Consumes the client and returns its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
