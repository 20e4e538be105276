//! IRC buffer grouping.
//!
//! IRC server buffers are named `irc.server.<network>` while channel and
//! query buffers are named `irc.<network>.<channel>`. Sorted as-is, every
//! channel of every network would land between `irc.irc_raw` and the server
//! buffers. Inserting a `server` component turns channel names into
//! `irc.server.<network>.<channel>`, which places them right after their
//! server buffer.

/// Root component of names the rewrite applies to.
pub const GROUP_ROOT: &str = "irc";

/// Component inserted after the root.
pub const GROUP_PARENT: &str = "server";

/// Second components that are left alone.
pub const GROUP_EXCEPTIONS: &[&str] = &["server", "irc_raw"];

/// Rewrite `components` in place so channel buffers group under their server.
///
/// Returns whether a component was inserted.
pub fn apply_grouping(components: &mut Vec<String>) -> bool {
    let applies = components.len() >= 2
        && components[0] == GROUP_ROOT
        && !GROUP_EXCEPTIONS.contains(&components[1].as_str());

    if applies {
        components.insert(1, GROUP_PARENT.to_string());
    }
    applies
}
