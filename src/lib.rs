//! Library entry for Alamendah exposing locale resolution, bundles and translation for
//! the binary and integration tests.

pub mod catalog;
pub mod i18n;
pub mod site;
pub mod translate;
pub mod util;
