//! Translation client and bundle translation tests.

#[path = "translate/fake_service.rs"]
mod fake_service;
#[path = "translate/http_provider.rs"]
mod http_provider;
#[path = "translate/tree_pipeline.rs"]
mod tree_pipeline;
