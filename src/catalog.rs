//! File-level metadata for the known touchscreen UI files.
//!
//! Each known input file gets a one-paragraph description of its UI role,
//! which is embedded in context-generation prompts. Unknown file names fall
//! back to a generic description.

/// Description used when the file name is not one of the known UI files
pub const GENERIC_FILE_DESCRIPTION: &str = "UI text for the machine.";

/// Structurally trivial file that carries no description fields to backfill
const SIMPLE_FILE: &str = "language.json";

/// Look up the UI role of a known input file
pub fn file_description(file_name: &str) -> &'static str {
    match file_name {
        "component.json" => {
            "This file contains UI component labels, such as buttons and input placeholders \
             for the touchscreen interface of the machine."
        }
        "dynamic.json" => {
            "This file holds dynamic configuration texts and settings descriptions for \
             various cleaning modes and machine operations."
        }
        "language.json" => {
            "This file lists language names used for the UI language selection on the machine."
        }
        "notification.json" => {
            "This file contains notification messages, error alerts, and status updates for \
             the machine interface."
        }
        "screen.json" => {
            "This file comprises screen titles, instructions, and button labels for various \
             sections of the touchscreen interface."
        }
        "unit.json" => {
            "This file defines measurement units and dynamic templates used across the \
             machine's UI."
        }
        _ => GENERIC_FILE_DESCRIPTION,
    }
}

/// Whether the description-backfill pass should run for this file
pub fn needs_backfill(file_name: &str) -> bool {
    file_name != SIMPLE_FILE
}
