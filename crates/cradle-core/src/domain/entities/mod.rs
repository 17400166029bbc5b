pub mod common;
pub mod metadata;
pub mod package;
pub mod spec;
pub mod template;

pub use common::RelativePath;
pub use metadata::{Metadata, Versions};
pub use package::PackageRecord;
pub use spec::{LibrarySpec, PackageSpec, PackageSpecBuilder};
pub use template::{Helper, HelperSet, TemplateId, TemplateMap, TemplateMapEntry};
