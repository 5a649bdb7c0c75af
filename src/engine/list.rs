use crate::config::Settings;
use crate::registry::Registry;
use crate::utils::formatters::format_retention;

/// Notice printed instead of an empty listing.
pub const NOTHING_TRACKED: &str = "There are no tracked files";

/// Renders the registry ordered by ascending retention.
#[must_use]
pub fn render(registry: &Registry) -> String {
    if registry.is_empty() {
        return NOTHING_TRACKED.to_string();
    }

    let mut rendered = String::from("Tracked files:");
    for (path, secs) in registry.by_retention() {
        rendered.push_str(&format!("\n\t{}: {}", format_retention(secs), path.display()));
    }
    rendered
}

/// Prints the listing. Never mutates the registry.
pub fn execute(registry: &Registry, settings: &Settings) {
    let out = settings.output();
    if registry.is_empty() {
        out.info(NOTHING_TRACKED);
    } else {
        out.line(&render(registry));
    }
}
