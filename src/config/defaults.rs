//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_server_name() -> String {
    "linechat".to_string()
}

pub fn default_prompt() -> String {
    "Please enter a nick name: ".to_string()
}

// =============================================================================
// Limits Defaults
// =============================================================================

pub fn default_max_line_length() -> usize {
    8192
}

pub fn default_outbound_queue() -> usize {
    256
}
