pub mod format;
pub mod list;
pub mod render;
pub mod versions;

pub use format::OutputFormat;
pub use list::ListCommand;
pub use render::RenderCommand;
pub use versions::VersionsCommand;
