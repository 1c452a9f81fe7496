//! Unit tests for the dynamic message stack.

mod resolver_tests;

use std::sync::Arc;

use crate::factory::MessageFactory;
use crate::provider::StaticProvider;

/// A provider pre-seeded with the standard scalar message types the
/// tests lean on, plus a factory wired to it.
pub(crate) fn test_factory() -> (Arc<StaticProvider>, MessageFactory) {
    let provider = Arc::new(StaticProvider::new());
    provider.add("std_msgs/Int32", "int32 data");
    provider.add("std_msgs/String", "string data");
    let factory = MessageFactory::new(provider.clone());
    (provider, factory)
}
