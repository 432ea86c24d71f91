//! Convenient re-exports of commonly used types from cplayer.
//!
//! ```ignore
//! use cplayer::prelude::*;
//! ```

pub use cplayer_core::{
    client::Client,
    collection::Collection,
    config::{ClientConfig, ClientConfigBuilder},
    error::{ClientError, ClientResult},
    request::{Method, RequestDescriptor},
    scope::Scope,
    statement::Statement,
    transport::{Transport, TransportBuilder},
    value::{Operand, Selection, key, raw},
};
