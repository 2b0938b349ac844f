/// Templates module for the embedded starter declaration file

/// Get the starter declaration file content
/// The template is embedded at compile time using include_str! macro
pub fn get_workspaces_template() -> &'static str {
    include_str!("../../templates/workspaces")
}
