//! The configuration document tree: configurations, sections, settings,
//! comments, and the options context they are interpreted against

pub mod comment;
pub mod configuration;
pub mod options;
pub mod section;
pub mod setting;

// Re-export main model types
pub use comment::Comment;
pub use configuration::Configuration;
pub use options::Options;
pub use section::Section;
pub use setting::Setting;
