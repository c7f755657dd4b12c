//! Fixed strings used by the documentation fixer
//!
//! This module keeps the command line text, the environment variable names,
//! the mdoc element names and the synthesized prose in one place so the
//! merge engine and its tests agree on them.

/// Printed for `-h`, `--help` and on a missing documentation root
pub const USAGE: &str =
    "Usage is: document-generated-code [--appledocs] temp.dll path-to-documentation";

/// Flag enabling external documentation merging
pub const APPLEDOCS_FLAG: &str = "--appledocs";

/// Language subdirectory that must exist under the documentation root
pub const LANGUAGE_DIR: &str = "en";

/// Restricts the run to a single fully-qualified type name
pub const ENV_DEBUG_TYPE: &str = "DOCFIXER";

/// Directory holding external documentation fragments
pub const ENV_APPLEDOCS_DIR: &str = "DOCFIXER_APPLEDOCS_DIR";

/// Overrides [`DEFAULT_NOTIFICATION_TYPE`]
pub const ENV_NOTIFICATION_TYPE: &str = "DOCFIXER_NOTIFICATION_TYPE";

/// Log level filter (`error`, `warn`, `info`, `debug`, `trace`)
pub const ENV_LOG_LEVEL: &str = "DOCFIXER_LOG";

/// Optional log file receiving timestamped copies of every log line
pub const ENV_LOG_FILE: &str = "DOCFIXER_LOG_FILE";

/// Default directory name (under the documentation root) for external fragments
pub const DEFAULT_APPLEDOCS_DIR: &str = "appledocs";

/// Return type of notification-name fields that get external docs merged in
pub const DEFAULT_NOTIFICATION_TYPE: &str = "MonoMac.Foundation.NSString";

/// Exported symbols must end with this to be treated as notifications
pub const NOTIFICATION_SUFFIX: &str = "Notification";

/// Return type name meaning "no value"
pub const VOID_TYPE: &str = "System.Void";

/// Number of leading external content nodes kept in the summary.
///
/// Everything after these goes to the remarks. This is a structural boundary
/// over the fragment's node sequence, not a paragraph parser.
pub const SUMMARY_NODE_COUNT: usize = 2;

// mdoc element and attribute names
pub const EL_TYPE: &str = "Type";
pub const EL_MEMBERS: &str = "Members";
pub const EL_MEMBER: &str = "Member";
pub const ATTR_MEMBER_NAME: &str = "MemberName";
pub const EL_DOCS: &str = "Docs";
pub const EL_SUMMARY: &str = "summary";
pub const EL_REMARKS: &str = "remarks";
pub const EL_RETURN_VALUE: &str = "ReturnValue";
pub const EL_RETURN_TYPE: &str = "ReturnType";

/// Summary for delegate methods returning no value
pub const EVENT_SUMMARY: &str = "Event raised by the object.";

/// Summary for delegate methods returning a value
pub const DELEGATE_SUMMARY: &str = "Delegate invoked by the object to get a value.";

/// Remarks for an event; the backing property name goes between the parts
pub fn event_remarks(property: &str) -> String {
    format!(
        "If you assign a value to this event, this will reset the value for the {} property to an internal handler that maps delegates to events.",
        property
    )
}

/// Remarks for a value-returning delegate slot
pub fn delegate_remarks(property: &str) -> String {
    format!(
        "You assign a function, delegate or anonymous method to this property to return a value to the object.   If you assign a value to this property, it this will reset the value for the {} property to an internal handler that maps delegates to events.",
        property
    )
}
