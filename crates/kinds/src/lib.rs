//! Resource-kind schemas and entity adapters.
//!
//! One module per resource kind. Each kind defines three things the cache
//! needs from its boundary:
//!
//! - a column [`Schema`](vantage_cache::Schema) (display name, binding
//!   name, declared type, in display order),
//! - a deterministic **stable-ID formula** over fields that are immutable
//!   for the underlying object's lifetime, documented on the kind's
//!   `stable_id` function,
//! - an entity adapter implementing
//!   [`CacheEntity`](vantage_cache::CacheEntity), whose mutable state sits
//!   behind a lock so refresh drivers update survivors in place while
//!   display consumers on other threads keep reading them.
//!
//! Discovery itself — the platform API calls that enumerate services,
//! processes, and connections — is deliberately not here; an enumerator
//! produces plain field structs and drives a
//! [`RefreshCycle`](vantage_cache::RefreshCycle) with them.

pub mod connections;
pub mod processes;
pub mod render;
pub mod services;
