//! # Toolgate Registry
//!
//! Maps provider identifiers to their declared scope, connection descriptor
//! and tool definitions, and carries the injected collaborator seams the
//! executor consumes: permission policy, usage counters, and the call-log
//! sink.
//!
//! Registry contents are read-mostly after startup registration; the only
//! mutation on the call path is the advisory usage-counter increment.

pub mod call_log;
pub mod policy;
pub mod provider;
pub mod registry;
pub mod usage;

pub use call_log::{CallLogError, CallLogRecord, CallLogSink, CallStatus, InMemoryCallLog};
pub use policy::{AllowAllPolicy, PermissionPolicy};
pub use provider::{ProviderEntry, ProviderSpec};
pub use registry::{ProviderRegistry, RegistryError};
pub use usage::{InMemoryUsageStore, UsageStore, UsageStoreError};
