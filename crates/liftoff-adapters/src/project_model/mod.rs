//! Project model adapters.

mod objects;
mod pbxproj;
mod xcode;

pub use xcode::{PBXPROJ_FILE_NAME, XcodeProject};
